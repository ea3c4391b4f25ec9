// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prop bundles handed to the render callback.
//!
//! The menu owns every interaction decision, but renders nothing itself. Each render
//! pass builds a [`MenuProps`] and the callback spreads its bundles onto the elements
//! it creates with [`Element::with`](crate::Element::with):
//!
//! - [`ControlProps`] on exactly one focusable control (usually a `button`).
//! - [`ContainerProps`] on the element holding the items, rendered only while open.
//! - [`ItemProps`] on every item. The callback supplies the item text.

use crate::event::EventType;
use crate::host::WidgetId;
use crate::view::Element;

/// What a handler does when its event arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    ControlClick,
    ControlKeyDown,
    ItemKeyDown,
    DismissOutside,
}

/// A handler token naming a menu and the reaction it wants.
///
/// Tokens are only produced by the menu itself, inside [`MenuProps`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventHandler {
    pub(crate) widget: WidgetId,
    pub(crate) action: Action,
}

impl EventHandler {
    pub(crate) fn new(widget: WidgetId, action: Action) -> Self {
        Self { widget, action }
    }
}

/// Something that can be spread onto an [`Element`].
pub trait Attach {
    /// Add attributes and handlers to `element`.
    fn attach(&self, element: Element) -> Element;
}

/// Props for the control that opens and closes the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlProps {
    /// The menu's identity; becomes the control's `id`.
    pub id: String,
    /// Toggles the menu.
    pub on_click: EventHandler,
    /// Opens the menu from the keyboard.
    pub on_key_down: EventHandler,
    /// Always `true`.
    pub aria_haspopup: bool,
    /// Whether the menu is open.
    pub aria_expanded: bool,
}

/// Props for the element containing the items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerProps {
    /// Always `"menu"`.
    pub role: &'static str,
    /// The control's `id`.
    pub aria_labelledby: String,
}

/// Props for each item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemProps {
    /// Always `"menuitem"`.
    pub role: &'static str,
    /// Always `-1`: focusable by the menu, skipped by sequential navigation.
    pub tab_index: i32,
    /// Keyboard navigation within the open menu.
    pub on_key_down: EventHandler,
}

/// Everything the render callback receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuProps {
    /// Spread onto the control.
    pub control: ControlProps,
    /// Spread onto the item container.
    pub menu: ContainerProps,
    /// Spread onto every item.
    pub item: ItemProps,
    /// Whether the menu is open. Render the container only when this is `true`.
    pub is_open: bool,
}

impl MenuProps {
    pub(crate) fn new(widget: WidgetId, id: &str, is_open: bool) -> Self {
        Self {
            control: ControlProps {
                id: id.to_owned(),
                on_click: EventHandler::new(widget, Action::ControlClick),
                on_key_down: EventHandler::new(widget, Action::ControlKeyDown),
                aria_haspopup: true,
                aria_expanded: is_open,
            },
            menu: ContainerProps {
                role: "menu",
                aria_labelledby: id.to_owned(),
            },
            item: ItemProps {
                role: "menuitem",
                tab_index: -1,
                on_key_down: EventHandler::new(widget, Action::ItemKeyDown),
            },
            is_open,
        }
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

impl Attach for ControlProps {
    fn attach(&self, element: Element) -> Element {
        element
            .attr("id", self.id.as_str())
            .attr("aria-haspopup", bool_attr(self.aria_haspopup))
            .attr("aria-expanded", bool_attr(self.aria_expanded))
            .on(EventType::Click, self.on_click)
            .on(EventType::KeyDown, self.on_key_down)
    }
}

impl Attach for ContainerProps {
    fn attach(&self, element: Element) -> Element {
        element
            .attr("role", self.role)
            .attr("aria-labelledby", self.aria_labelledby.as_str())
    }
}

impl Attach for ItemProps {
    fn attach(&self, element: Element) -> Element {
        element
            .attr("role", self.role)
            .attr("tabindex", self.tab_index.to_string())
            .on(EventType::KeyDown, self.on_key_down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;

    fn props(is_open: bool) -> MenuProps {
        MenuProps::new(WidgetId(3), "file", is_open)
    }

    #[test]
    fn control_reflects_state() {
        let closed = View::element("button").with(&props(false).control);
        assert_eq!(closed.get_attr("id"), Some("file"));
        assert_eq!(closed.get_attr("aria-haspopup"), Some("true"));
        assert_eq!(closed.get_attr("aria-expanded"), Some("false"));

        let open = View::element("button").with(&props(true).control);
        assert_eq!(open.get_attr("aria-expanded"), Some("true"));
        assert_eq!(open.handlers.len(), 2);
    }

    #[test]
    fn container_and_item_roles() {
        let p = props(true);
        let ul = View::element("ul").with(&p.menu);
        assert_eq!(ul.get_attr("role"), Some("menu"));
        assert_eq!(ul.get_attr("aria-labelledby"), Some("file"));
        assert!(ul.handlers.is_empty());

        let li = View::element("li").with(&p.item);
        assert_eq!(li.get_attr("role"), Some("menuitem"));
        assert_eq!(li.get_attr("tabindex"), Some("-1"));
        assert_eq!(
            li.handlers,
            vec![(
                EventType::KeyDown,
                EventHandler::new(WidgetId(3), Action::ItemKeyDown)
            )]
        );
    }

    #[test]
    fn caller_attrs_after_spread_win() {
        let p = props(false);
        let el = View::element("button").with(&p.control).attr("id", "other");
        assert_eq!(el.get_attr("id"), Some("other"));
    }
}
