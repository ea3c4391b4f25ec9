// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_responder --heading-base-level=0

//! Understory Responder: deterministic, `no_std` event propagation for UI.
//!
//! ## Overview
//!
//! This crate builds the responder chain sequence (capture → target → bubble) for a target,
//! runs handlers over it, and keeps a registry of listeners.
//! It does not perform hit testing.
//! Instead, feed it [`ResolvedHit`](crate::types::ResolvedHit) items (for example from
//! [`Document::hit_test_point`](understory_dom::Document::hit_test_point) through the
//! `dom_adapter` feature), or route directly to a known target such as the focused element.
//!
//! ## Inputs
//!
//! - Pointer events: one or more [`ResolvedHit`](crate::types::ResolvedHit) values, each with
//!   the node key, an optional root→target `path`, and a `z` used for ordering.
//! - Keyboard events: the target key itself, passed to
//!   [`Router::dispatch_for`](crate::router::Router::dispatch_for).
//!
//! A [`ParentLookup`](crate::types::ParentLookup) source reconstructs a path whenever one is absent.
//!
//! ## Ordering
//!
//! Candidates are ranked by `z`; higher is nearer.
//! Equal‑z ties are stable and the router selects the last.
//! The emitted sequence matches DOM event flow: capture on every ancestor from the root down,
//! the target once, then bubble on every ancestor back up to the root.
//!
//! ## Layering
//!
//! - [`router`]: computes the traversal order only.
//! - [`dispatcher`]: executes a handler per step and honors
//!   [`Outcome::Stop`](crate::types::Outcome::Stop) (skip the rest of the phase) and
//!   [`Outcome::StopAndConsume`](crate::types::Outcome::StopAndConsume) (abort).
//! - [`listeners`]: maps a step to the handlers registered for its node, event kind, and phase.
//!
//! ## Workflow
//!
//! ```
//! use understory_responder::dispatcher;
//! use understory_responder::listeners::ListenerRegistry;
//! use understory_responder::router::Router;
//! use understory_responder::types::{Outcome, ParentLookup};
//!
//! // A three-node chain: 1 is the root, 3 the leaf.
//! #[derive(Default)]
//! struct Chain;
//! impl ParentLookup<u32> for Chain {
//!     fn parent_of(&self, n: &u32) -> Option<u32> {
//!         (*n > 1).then(|| n - 1)
//!     }
//! }
//!
//! let mut listeners = ListenerRegistry::new();
//! listeners.add(1_u32, "click", true, "root capture");
//! listeners.add(3, "click", false, "leaf");
//! listeners.add(2, "click", false, "middle bubble");
//!
//! let router: Router<u32, Chain> = Router::new();
//! let seq = router.dispatch_for(3);
//!
//! let mut log = Vec::new();
//! dispatcher::run(&seq, &mut log, |step, log| {
//!     for h in listeners.matching(step, &"click") {
//!         log.push(*h);
//!     }
//!     Outcome::Continue
//! });
//! assert_eq!(log, ["root capture", "leaf", "middle bubble"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod listeners;
pub mod router;
pub mod types;
