// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: an accessible menu button with roving focus.
//!
//! Implements the WAI-ARIA "menu button" pattern over [`understory_dom`]:
//!
//! - A control toggles a single-level list of items.
//! - While open, exactly one item holds focus and the arrow keys, `Home`, and `End`
//!   move it, wrapping at both ends.
//! - Typing a letter jumps forward to the next item starting with it.
//! - `Escape`, or a click outside the menu, closes it and returns focus to the control.
//!
//! ## Render props
//!
//! The menu never decides what its elements look like. A render callback receives
//! [`MenuProps`] and returns a [`View`]; the callback spreads the prop bundles onto
//! whatever elements it likes with [`Element::with`]. The menu finds its items again
//! by their `role="menuitem"`, so their number, order, and text may change between
//! renders.
//!
//! ## Hosting
//!
//! A [`Page`] owns the document, routes events through it (capture → target → bubble,
//! via [`understory_responder`]), re-renders widgets whose state changed, and only
//! then moves focus. See the [`host`] module for the exact order.
//!
//! ## Example
//!
//! ```
//! use understory_menu::{Key, MenuButton, MenuConfig, Page, View};
//!
//! let menu = MenuButton::builder(MenuConfig::new("test"))
//!     .render(|p| {
//!         View::fragment([
//!             View::element("button").with(&p.control).text("Menu").into(),
//!             View::when(p.is_open, || {
//!                 View::element("ul").with(&p.menu).children(
//!                     ["One", "Two", "Five", "Eight", "Nine", "Fifty"]
//!                         .map(|label| View::element("li").with(&p.item).text(label)),
//!                 )
//!             }),
//!         ])
//!     })
//!     .build()?;
//!
//! let mut page = Page::new();
//! page.mount(page.body(), menu);
//! let control = page.document().element_by_id("test").unwrap();
//! let label = |page: &Page| page.document().text_content(page.active_element().unwrap());
//!
//! page.key_down(control, Key::Enter);
//! assert_eq!(label(&page), "One");
//! page.press(Key::from_dom("f"));
//! assert_eq!(label(&page), "Five");
//! page.press(Key::from_dom("ArrowUp"));
//! assert_eq!(label(&page), "Two");
//! page.press(Key::from_dom("Escape"));
//! assert_eq!(page.active_element(), Some(control));
//! # Ok::<(), understory_menu::ConfigError>(())
//! ```
//!
//! ## Logging
//!
//! Open, close, mount, and unmount are reported through [`tracing`] at `debug`;
//! dispatches and focus moves at `trace`. No subscriber is installed.

mod config;
mod controller;
mod error;
mod event;
pub mod focus;
pub mod host;
mod keys;
mod props;
mod reconcile;
mod view;

pub use config::MenuConfig;
pub use controller::{MenuButton, MenuButtonBuilder};
pub use error::ConfigError;
pub use event::{Event, EventType};
pub use host::{Dispatched, Page, WidgetId};
pub use keys::Key;
pub use props::{Attach, ContainerProps, ControlProps, EventHandler, ItemProps, MenuProps};
pub use view::{Element, View};
