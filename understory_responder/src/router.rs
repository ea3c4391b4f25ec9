// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Picks a target, reconstructs its path, and emits dispatch steps.
//! Produces a capture → target → bubble sequence for the selected target:
//!
//! - `Capture` for every ancestor, root first.
//! - `Target` once, for the target itself.
//! - `Bubble` for every ancestor, parent first.
//!
//! ## Target Selection
//!
//! - Pointer events: [`Router::handle_with_hits`] ranks candidates by `z` (higher is nearer)
//!   and picks exactly one; equal `z` ties are stable and the last wins.
//! - Keyboard and focus events: [`Router::dispatch_for`] routes to a known target (usually
//!   the focused node) without ranking.
//!
//! ## See Also
//!
//! [`dispatcher`](crate::dispatcher) for running handlers over the emitted sequence.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase, ResolvedHit};

/// Deterministic responder chain router.
///
/// ## Usage
///
/// - Construct with [`Router::new`] when callers always provide a full path in
///   [`ResolvedHit`], or with [`Router::with_parent`] to enable path
///   reconstruction via a [`ParentLookup`].
/// - Call [`Router::handle_with_hits`] for each pointer event, or
///   [`Router::dispatch_for`] for events aimed at a specific node.
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    parent: P,
    _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Router<K, P> {
    /// Create a router with a default parent lookup.
    pub fn new() -> Self {
        Self::with_parent(P::default())
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Router<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Select the nearest hit and produce its propagation sequence.
    ///
    /// Returns an empty sequence when `hits` is empty.
    pub fn handle_with_hits(&self, hits: &[ResolvedHit<K>]) -> Vec<Dispatch<K>> {
        // Single pass; `>=` keeps equal-z ties stable with the last one winning.
        let mut best: Option<&ResolvedHit<K>> = None;
        for h in hits {
            match best {
                Some(b) if h.z < b.z => {}
                _ => best = Some(h),
            }
        }
        let Some(best) = best else {
            return Vec::new();
        };

        let path = match &best.path {
            Some(p) if !p.is_empty() => p.clone(),
            _ => self.reconstruct_path(best.node),
        };
        Self::emit_path(&path)
    }

    /// Produce the propagation sequence for a known target.
    pub fn dispatch_for(&self, target: K) -> Vec<Dispatch<K>> {
        Self::emit_path(&self.reconstruct_path(target))
    }

    fn reconstruct_path(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match self.parent.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    fn emit_path(path: &[K]) -> Vec<Dispatch<K>> {
        let Some((&target, ancestors)) = path.split_last() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(ancestors.len() * 2 + 1);
        out.extend(ancestors.iter().map(|&n| Dispatch {
            phase: Phase::Capture,
            node: n,
        }));
        out.push(Dispatch {
            phase: Phase::Target,
            node: target,
        });
        out.extend(ancestors.iter().rev().map(|&n| Dispatch {
            phase: Phase::Bubble,
            node: n,
        }));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    struct Node(u32);

    #[derive(Default)]
    struct Parents;
    impl ParentLookup<Node> for Parents {
        fn parent_of(&self, node: &Node) -> Option<Node> {
            match node.0 {
                3 => Some(Node(2)),
                2 => Some(Node(1)),
                _ => None,
            }
        }
    }

    fn phases(out: &[Dispatch<Node>]) -> Vec<(Phase, u32)> {
        out.iter().map(|d| (d.phase, d.node.0)).collect()
    }

    #[test]
    fn dispatch_for_reconstructs_path() {
        let router: Router<Node, Parents> = Router::new();
        let out = router.dispatch_for(Node(3));
        assert_eq!(
            phases(&out),
            vec![
                (Phase::Capture, 1),
                (Phase::Capture, 2),
                (Phase::Target, 3),
                (Phase::Bubble, 2),
                (Phase::Bubble, 1),
            ]
        );
    }

    #[test]
    fn root_target_has_single_step() {
        let router: Router<Node, Parents> = Router::new();
        let out = router.dispatch_for(Node(1));
        assert_eq!(phases(&out), vec![(Phase::Target, 1)]);
    }

    #[test]
    fn hit_path_is_used_when_present() {
        let router: Router<Node> = Router::new();
        let hits = vec![ResolvedHit {
            node: Node(7),
            path: Some(vec![Node(1), Node(7)]),
            z: 0,
        }];
        let out = router.handle_with_hits(&hits);
        assert_eq!(
            phases(&out),
            vec![(Phase::Capture, 1), (Phase::Target, 7), (Phase::Bubble, 1)]
        );
    }

    #[test]
    fn higher_z_wins() {
        let router: Router<Node, Parents> = Router::new();
        let hits = vec![
            ResolvedHit {
                node: Node(9),
                path: None,
                z: 10,
            },
            ResolvedHit {
                node: Node(3),
                path: None,
                z: 5,
            },
        ];
        let out = router.handle_with_hits(&hits);
        assert_eq!(phases(&out), vec![(Phase::Target, 9)]);
    }

    #[test]
    fn tie_break_is_stable_last_wins_on_equal_z() {
        let router: Router<Node> = Router::new();
        let hits = vec![
            ResolvedHit {
                node: Node(1),
                path: None,
                z: 5,
            },
            ResolvedHit {
                node: Node(2),
                path: None,
                z: 5,
            },
        ];
        let out = router.handle_with_hits(&hits);
        assert_eq!(phases(&out), vec![(Phase::Target, 2)]);
    }

    #[test]
    fn no_hits_no_dispatch() {
        let router: Router<Node> = Router::new();
        assert!(router.handle_with_hits(&[]).is_empty());
    }

    #[test]
    fn empty_hit_path_falls_back_to_parent_lookup() {
        let router: Router<Node, Parents> = Router::new();
        let hits = vec![ResolvedHit {
            node: Node(2),
            path: Some(Vec::new()),
            z: 0,
        }];
        let out = router.handle_with_hits(&hits);
        assert_eq!(
            phases(&out),
            vec![(Phase::Capture, 1), (Phase::Target, 2), (Phase::Bubble, 1)]
        );
    }
}
