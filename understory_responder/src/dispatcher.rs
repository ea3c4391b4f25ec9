// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: walk a routed sequence and honor stop/consume outcomes.
//!
//! ## Overview
//!
//! The [`Router`](crate::router::Router) only computes the traversal order.
//! [`run`] executes a handler for each [`Dispatch`] step in that order and applies
//! the [`Outcome`] rules:
//!
//! - [`Outcome::Continue`]: proceed to the next step.
//! - [`Outcome::Stop`]: skip the remaining steps of the current phase; the next phase still runs.
//! - [`Outcome::StopAndConsume`]: abort; no further steps run.
//!
//! Handlers receive a caller-provided `state` so they can record effects (for
//! example "default prevented") without capturing it by reference.
//!
//! ## Example
//!
//! ```
//! use understory_responder::dispatcher;
//! use understory_responder::types::{Dispatch, Outcome, Phase};
//!
//! let seq = [Dispatch::capture(1_u32), Dispatch::target(2), Dispatch::bubble(1)];
//! let mut seen = Vec::new();
//! let consumed = dispatcher::run(&seq, &mut seen, |d, seen| {
//!     seen.push((d.phase, d.node));
//!     if d.phase == Phase::Target { Outcome::StopAndConsume } else { Outcome::Continue }
//! });
//! assert_eq!(consumed, Some(1));
//! assert_eq!(seen, [(Phase::Capture, 1), (Phase::Target, 2)]);
//! ```

use crate::types::{Dispatch, Outcome};

/// Run `handler` over `seq` in order.
///
/// Returns the index of the step whose handler returned [`Outcome::StopAndConsume`],
/// or `None` if the event was never consumed.
pub fn run<K, S>(
    seq: &[Dispatch<K>],
    state: &mut S,
    mut handler: impl FnMut(&Dispatch<K>, &mut S) -> Outcome,
) -> Option<usize> {
    let mut i = 0;
    while i < seq.len() {
        let phase = seq[i].phase;
        match handler(&seq[i], state) {
            Outcome::Continue => {}
            Outcome::Stop => {
                while i + 1 < seq.len() && seq[i + 1].phase == phase {
                    i += 1;
                }
            }
            Outcome::StopAndConsume => return Some(i),
        }
        i += 1;
    }
    None
}
