// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, flags, and query results.

use alloc::vec::Vec;

/// Identifier for a node in the [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable while the node is attached
/// and becomes invalid once the node is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Newer
///
/// A `NodeId` is considered newer than another when it has a higher generation.
/// If generations are equal, the one with the higher slot index is considered newer.
/// This order is used only for deterministic tie-breaks in
/// [hit testing](crate::Document::hit_test_point).
///
/// ### Liveness
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether a `NodeId`
/// still refers to a live node. Stale ids never alias a different live node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible. Hidden elements cannot take focus.
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
        /// Node is disabled. Disabled form controls cannot take focus.
        const DISABLED = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// What a node is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// The document root. There is exactly one per [`Document`](crate::Document).
    Document,
    /// An element with the given (lowercase) tag name.
    Element(&'a str),
    /// A text node with its content.
    Text(&'a str),
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub node: NodeId,
    /// Path from the document root to the element (inclusive).
    pub path: Vec<NodeId>,
}

/// Filters applied during hit testing.
///
/// Used by [`Document::hit_test_point`](crate::Document::hit_test_point).
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider nodes marked [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider nodes marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
}

impl QueryFilter {
    /// Visible and pickable elements only; what a pointer event sees.
    pub const POINTER: Self = Self {
        visible_only: true,
        pickable_only: true,
    };
}

/// Parsed `tabindex` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// Negative value: focusable by script, skipped by sequential navigation.
    Programmatic,
    /// Zero or positive value: focusable and part of sequential navigation.
    Sequential(i32),
}

impl TabIndex {
    /// Parse an attribute value. Returns `None` for values that are not integers,
    /// which leaves the element's native focusability in effect.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().parse::<i32>() {
            Ok(n) if n < 0 => Some(Self::Programmatic),
            Ok(n) => Some(Self::Sequential(n)),
            Err(_) => None,
        }
    }
}
