// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dom --heading-base-level=0

//! Understory DOM: a small element tree with focus and hit testing.
//!
//! Understory DOM is the host surface that widgets such as `understory_menu` run against.
//! It plays the role a browser document plays for web widgets, without any rendering.
//!
//! - Represents a single-rooted tree of elements and text nodes with generational ids.
//! - Stores string attributes (`id`, `role`, `tabindex`, `aria-*`, …) per element.
//! - Answers document-order queries: by role, by attribute, by id, and containment.
//! - Tracks exactly one active (focused) element with browser-like focusability rules.
//! - Hit tests document-space points against element bounds, honoring z order.
//!
//! ## Not a layout engine
//!
//! Bounds are supplied by upstream code. This crate never measures or arranges content;
//! elements without bounds simply never receive pointer hits.
//!
//! ## API overview
//!
//! - [`Document`]: container managing nodes, attributes, focus, and queries.
//! - [`NodeId`]: generational handle of a node.
//! - [`NodeFlags`]: visibility, picking, and disabled state.
//! - [`QueryFilter`]: restricts hit test results (visible/pickable).
//! - [`TabIndex`]: parsed `tabindex` attribute.
//!
//! ## Focusability
//!
//! [`Document::focus`] only succeeds for connected, visible elements that either carry an
//! integer `tabindex` (including `-1`) or are enabled native controls.
//! Removing or hiding the active element clears focus, just as a browser moves focus to
//! the body when the focused element leaves the document.
//!
//! ### Minimal usage
//!
//! ```
//! use understory_dom::{Document, QueryFilter};
//! use kurbo::{Point, Rect};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//!
//! let list = doc.append_element(root, "ul");
//! doc.set_attr(list, "role", "menu");
//! for label in ["One", "Two"] {
//!     let li = doc.append_element(list, "li");
//!     doc.set_attr(li, "role", "menuitem");
//!     doc.set_attr(li, "tabindex", "-1");
//!     doc.append_text(li, label);
//! }
//!
//! let items = doc.query_role(root, "menuitem");
//! assert_eq!(items.len(), 2);
//! assert!(doc.focus(items[1]));
//! assert_eq!(doc.text_content(doc.active_element().unwrap()), "Two");
//!
//! doc.set_bounds(items[0], Rect::new(0.0, 0.0, 100.0, 20.0));
//! let hit = doc.hit_test_point(Point::new(10.0, 10.0), QueryFilter::POINTER).unwrap();
//! assert_eq!(hit.node, items[0]);
//! assert_eq!(hit.path, vec![root, list, items[0]]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod types;

pub use document::Document;
pub use types::{Hit, NodeFlags, NodeId, NodeKind, QueryFilter, TabIndex};
