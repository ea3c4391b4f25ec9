// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positional reconciliation of [`View`] output into a [`Document`].
//!
//! Children are matched by position after flattening fragments:
//!
//! - An element view over an element with the same tag reuses that element; its
//!   attributes, geometry, and listeners are replaced and its children reconciled.
//! - A text view over a text node reuses it and replaces its content.
//! - Anything else replaces the old node with a freshly created one.
//! - Old children beyond the new output are removed.
//!
//! Reuse keeps [`NodeId`]s (and therefore focus) stable across renders. Removing a
//! subtree holding focus clears it, and drops the listeners of every removed node.

use kurbo::Rect;
use understory_dom::{Document, NodeId, NodeKind};
use understory_responder::listeners::ListenerRegistry;

use crate::event::EventType;
use crate::props::EventHandler;
use crate::view::{Element, View};

pub(crate) type Listeners = ListenerRegistry<NodeId, EventType, EventHandler>;

/// Make the children of `parent` match `view`.
pub(crate) fn reconcile(
    doc: &mut Document,
    listeners: &mut Listeners,
    parent: NodeId,
    view: &View,
) {
    reconcile_children(doc, listeners, parent, &view.flatten());
    listeners.retain(|node, _, _| doc.is_alive(*node));
}

fn reconcile_children(
    doc: &mut Document,
    listeners: &mut Listeners,
    parent: NodeId,
    views: &[&View],
) {
    let existing = doc.children(parent).to_vec();
    for (index, view) in views.iter().enumerate() {
        let old = existing.get(index).copied();
        match view {
            View::Text(content) => {
                if let Some(old) = old
                    && matches!(doc.kind(old), Some(NodeKind::Text(_)))
                {
                    doc.set_text(old, content);
                    continue;
                }
                let node = doc.create_text(content);
                replace_at(doc, parent, index, old, node);
            }
            View::Element(element) => {
                let node = match old {
                    Some(old) if doc.tag(old) == Some(element.tag.as_str()) => old,
                    _ => {
                        let node = doc.create_element(&element.tag);
                        replace_at(doc, parent, index, old, node);
                        node
                    }
                };
                patch(doc, listeners, node, element);
            }
            // `flatten` only yields text and element views.
            View::Empty | View::Fragment(_) => {}
        }
    }
    for stale in existing.iter().skip(views.len()) {
        doc.remove(*stale);
    }
}

fn replace_at(doc: &mut Document, parent: NodeId, index: usize, old: Option<NodeId>, node: NodeId) {
    if let Some(old) = old {
        doc.remove(old);
    }
    doc.insert_child(parent, index, node);
}

fn patch(doc: &mut Document, listeners: &mut Listeners, node: NodeId, element: &Element) {
    doc.clear_attrs(node);
    for (name, value) in &element.attrs {
        doc.set_attr(node, name, value);
    }
    doc.set_bounds(node, element.bounds.unwrap_or(Rect::ZERO));
    doc.set_z_index(node, element.z_index);

    listeners.retain(|n, _, _| *n != node);
    for (kind, handler) in &element.handlers {
        listeners.add(node, *kind, false, *handler);
    }

    let children: Vec<&View> = element.children.iter().flat_map(View::flatten).collect();
    reconcile_children(doc, listeners, node, &children);
}
