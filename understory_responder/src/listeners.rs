// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry keyed by node, event kind, and phase.
//!
//! ## Overview
//!
//! [`ListenerRegistry`] stores handlers the way `addEventListener` does: each entry
//! names a node, an event kind, whether it listens during capture, and an opaque
//! handler value `H`. For a [`Dispatch`] step, [`ListenerRegistry::matching`]
//! returns the handlers that should run:
//!
//! - [`Phase::Capture`] steps see capture listeners only.
//! - [`Phase::Bubble`] steps see non-capture listeners only.
//! - [`Phase::Target`] steps see capture listeners first, then non-capture ones.
//!
//! Within a group, handlers are returned in registration order.
//!
//! The registry never dereferences `K`; stale node keys simply never match again.
//! Owners are expected to [`remove`](ListenerRegistry::remove) what they add.

use alloc::vec::Vec;

use crate::types::{Dispatch, Phase};

/// Handle of a registered listener, returned by [`ListenerRegistry::add`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u32);

#[derive(Clone, Debug)]
struct Entry<K, E, H> {
    id: ListenerId,
    node: K,
    event: E,
    capture: bool,
    handler: H,
}

/// Registry of event listeners.
#[derive(Clone, Debug)]
pub struct ListenerRegistry<K, E, H> {
    entries: Vec<Entry<K, E, H>>,
    next_id: u32,
}

impl<K, E, H> Default for ListenerRegistry<K, E, H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K: PartialEq, E: PartialEq, H> ListenerRegistry<K, E, H> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event` on `node`.
    pub fn add(&mut self, node: K, event: E, capture: bool, handler: H) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry {
            id,
            node,
            event,
            capture,
            handler,
        });
        id
    }

    /// Remove a listener, returning its handler if it was registered.
    pub fn remove(&mut self, id: ListenerId) -> Option<H> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).handler)
    }

    /// Keep only the listeners for which `keep(node, event, handler)` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &E, &H) -> bool) {
        self.entries.retain(|e| keep(&e.node, &e.event, &e.handler));
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handlers that should run for `dispatch` when delivering `event`.
    pub fn matching(&self, dispatch: &Dispatch<K>, event: &E) -> Vec<&H> {
        let on_node = move |capture: bool| {
            self.entries
                .iter()
                .filter(move |e| {
                    e.capture == capture && e.node == dispatch.node && e.event == *event
                })
                .map(|e| &e.handler)
        };
        match dispatch.phase {
            Phase::Capture => on_node(true).collect(),
            Phase::Bubble => on_node(false).collect(),
            Phase::Target => on_node(true).chain(on_node(false)).collect(),
        }
    }
}
