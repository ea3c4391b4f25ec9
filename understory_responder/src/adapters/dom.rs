// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Understory DOM.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.
//!
//! ## Notes
//!
//! [`DomParents`] lets the [`Router`](crate::router::Router) reconstruct root→target
//! paths from a [`Document`], which is what keyboard events (routed to the active
//! element) need. [`top_hit_for_point`] turns a document hit test into a
//! [`ResolvedHit`] that already carries its path.

use kurbo::Point;
use understory_dom::{Document, NodeId, QueryFilter};

use crate::types::{ParentLookup, ResolvedHit};

/// Parent lookup backed by a [`Document`].
#[derive(Copy, Clone, Debug)]
pub struct DomParents<'a>(pub &'a Document);

impl ParentLookup<NodeId> for DomParents<'_> {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.0.parent(*node)
    }
}

/// Build a single resolved hit for the topmost element under a point.
///
/// Returns `None` if no element matches the filter.
/// The hit's `z` is the element's own z-index.
pub fn top_hit_for_point(
    doc: &Document,
    pt: Point,
    filter: QueryFilter,
) -> Option<ResolvedHit<NodeId>> {
    let hit = doc.hit_test_point(pt, filter)?;
    Some(ResolvedHit {
        node: hit.node,
        z: doc.z_index(hit.node).unwrap_or(0),
        path: Some(hit.path),
    })
}
