// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use thiserror::Error;

/// A menu button was configured in a way it cannot render.
///
/// Returned by [`MenuButtonBuilder::build`](crate::MenuButtonBuilder::build).
/// These indicate integration mistakes; nothing at interaction time produces them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No render callback was supplied.
    #[error("menu button `{id}` has no render callback")]
    MissingRender {
        /// The `id` of the menu that failed to build.
        id: String,
    },
}
