// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events delivered to menu handlers.

use understory_dom::NodeId;

use crate::keys::Key;

/// Kinds of events a [`Page`](crate::Page) dispatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A completed click.
    Click,
    /// A pointer pressed down.
    PointerDown,
    /// A key pressed while an element has focus.
    KeyDown,
}

/// An event in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    kind: EventType,
    target: NodeId,
    key: Option<Key>,
    default_prevented: bool,
}

impl Event {
    /// A pointer or click event aimed at `target`.
    pub fn new(kind: EventType, target: NodeId) -> Self {
        Self {
            kind,
            target,
            key: None,
            default_prevented: false,
        }
    }

    /// A key-down event aimed at `target`.
    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventType::KeyDown, target)
        }
    }

    /// What kind of event this is.
    pub fn kind(&self) -> EventType {
        self.kind
    }

    /// The node the event was aimed at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The key, for [`EventType::KeyDown`] events.
    pub fn key(&self) -> Option<Key> {
        self.key
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler called [`Event::prevent_default`].
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
