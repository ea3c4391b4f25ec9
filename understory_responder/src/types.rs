// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the responder: phases, outcomes, hits, lookups, and dispatch.
//!
//! ## Overview
//!
//! These types describe the responder protocol and its inputs/outputs.
//! They are referenced by the [`router`](crate::router), the
//! [`dispatcher`](crate::dispatcher), and the [`listeners`](crate::listeners) registry.

use alloc::vec::Vec;

/// Phases of event propagation.
///
/// Appears on each [`Dispatch`] item produced by the [`Router`](crate::router::Router).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-parent traversal, before the target is reached.
    Capture,
    /// The target node itself.
    Target,
    /// Parent-to-root traversal, after the target.
    Bubble,
}

/// Handler outcome controlling propagation.
///
/// Returned by the handler passed to [`dispatcher::run`](crate::dispatcher::run).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Continue within the current phase.
    Continue,
    /// Stop propagation within the current phase.
    Stop,
    /// Stop and mark consumed; remaining phases are skipped.
    StopAndConsume,
}

/// A resolved hit to be routed.
///
/// Typically obtained from a hit test (for example
/// [`adapters::dom::top_hit_for_point`](crate::adapters)). It is the input to
/// [`Router::handle_with_hits`](crate::router::Router::handle_with_hits).
#[derive(Clone, Debug)]
pub struct ResolvedHit<K> {
    /// Node key associated with the hit.
    pub node: K,
    /// Optional root→target path; if absent, the router may consult [`ParentLookup`] to derive one.
    pub path: Option<Vec<K>>,
    /// Stacking order used to pick the winning target; higher is nearer to the user.
    pub z: i32,
}

/// Look up the parent of a node to reconstruct a root→target path for propagation.
///
/// The [router](crate::router::Router) consults this when a [`ResolvedHit::path`] is absent,
/// and always for [`Router::dispatch_for`](crate::router::Router::dispatch_for).
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider used by default when no parent lookup is needed.
///
/// Used by [`Router::new`](crate::router::Router::new). All calls to
/// [`ParentLookup::parent_of`] return `None`.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// A single dispatch item.
///
/// Produced by the [`Router`](crate::router::Router) and typically fed into
/// [`dispatcher::run`](crate::dispatcher::run), which invokes handlers in
/// [`Capture`](Phase::Capture), then [`Target`](Phase::Target), then
/// [`Bubble`](Phase::Bubble) order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dispatch<K> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Node whose handlers run at this step.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// A capture step for `node`.
    pub fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
        }
    }

    /// The target step for `node`.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// A bubble step for `node`.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_constructors_set_phase() {
        assert_eq!(Dispatch::capture(1).phase, Phase::Capture);
        assert_eq!(Dispatch::target(1).phase, Phase::Target);
        assert_eq!(Dispatch::bubble(1).phase, Phase::Bubble);
        assert_eq!(Dispatch::bubble(7).node, 7);
    }

    #[test]
    fn no_parent_is_always_root() {
        assert_eq!(ParentLookup::<u32>::parent_of(&NoParent, &3), None);
    }
}
