// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page: a document, its listeners, and the widgets mounted into it.
//!
//! ## Event flow
//!
//! Every dispatch runs in two phases:
//!
//! 1. **Dispatch.** The event is routed through the document with
//!    [`understory_responder`]: capture from the root down, the target, then bubble back up.
//!    Listeners matching each step run in order. Menu handlers only record state
//!    (open/closed, navigation intent, pending focus restore).
//! 2. **Settle.** Widgets whose state changed re-render and their output is reconciled
//!    into the document. Then every widget with a pending restore returns focus to its
//!    control, and finally every pending navigation intent is applied to the items now
//!    present.
//!
//! Focus therefore never moves inside a handler, only once the document reflects the
//! new state.
//!
//! Events are synthetic: a click does not focus its target and no default actions run.

use kurbo::Point;
use tracing::{debug, trace};
use understory_dom::{Document, NodeId, QueryFilter};
use understory_responder::adapters::dom::{DomParents, top_hit_for_point};
use understory_responder::dispatcher;
use understory_responder::listeners::ListenerId;
use understory_responder::router::Router;
use understory_responder::types::{Dispatch, NoParent, Outcome};

use crate::controller::MenuButton;
use crate::event::{Event, EventType};
use crate::keys::Key;
use crate::props::{Action, EventHandler};
use crate::reconcile::{Listeners, reconcile};

/// Handle of a widget mounted in a [`Page`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId(pub(crate) usize);

/// Summary of one dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatched {
    /// Number of listeners that ran.
    pub delivered: usize,
    /// Whether any listener suppressed the default action.
    pub default_prevented: bool,
}

#[derive(Debug)]
struct Mounted {
    button: MenuButton,
    root: NodeId,
    dismiss: [ListenerId; 2],
}

/// A document with a `body`, an event pipeline, and mounted menus.
pub struct Page {
    doc: Document,
    body: NodeId,
    widgets: Vec<Option<Mounted>>,
    listeners: Listeners,
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mounted = self.widgets.iter().flatten().count();
        f.debug_struct("Page")
            .field("doc", &self.doc)
            .field("body", &self.body)
            .field("widgets_mounted", &mounted)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A page holding an empty `body`.
    pub fn new() -> Self {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root(), "body");
        Self {
            doc,
            body,
            widgets: Vec::new(),
            listeners: Listeners::new(),
        }
    }

    /// The `body` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The document, for adding content around the widgets.
    ///
    /// Do not restructure the subtrees widgets render into; the next render
    /// reconciles them back.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Mount `button` as the last child of `parent` and render it.
    ///
    /// The menu gets its own root container (a `div` carrying the configured class)
    /// and listens on the document root for outside clicks until unmounted.
    pub fn mount(&mut self, parent: NodeId, mut button: MenuButton) -> WidgetId {
        let id = WidgetId(self.widgets.len());
        let root = self.doc.append_element(parent, "div");
        if let Some(class) = &button.config().class_name {
            self.doc.set_attr(root, "class", class);
        }
        let doc_root = self.doc.root();
        let handler = EventHandler::new(id, Action::DismissOutside);
        let dismiss = [EventType::Click, EventType::PointerDown]
            .map(|kind| self.listeners.add(doc_root, kind, true, handler));
        debug!(widget = id.0, menu = %button.config().id, "mount");
        button.invalidate();
        self.widgets.push(Some(Mounted {
            button,
            root,
            dismiss,
        }));
        self.settle();
        id
    }

    /// Remove a widget, its elements, and every listener it installed.
    ///
    /// Returns the widget, or `None` if `id` is not mounted.
    pub fn unmount(&mut self, id: WidgetId) -> Option<MenuButton> {
        let mounted = self.widgets.get_mut(id.0)?.take()?;
        for listener in mounted.dismiss {
            self.listeners.remove(listener);
        }
        self.doc.remove(mounted.root);
        let doc = &self.doc;
        self.listeners.retain(|node, _, _| doc.is_alive(*node));
        debug!(widget = id.0, menu = %mounted.button.config().id, "unmount");
        Some(mounted.button)
    }

    /// A mounted widget.
    pub fn widget(&self, id: WidgetId) -> Option<&MenuButton> {
        self.widgets.get(id.0)?.as_ref().map(|m| &m.button)
    }

    /// The root container a widget renders into.
    pub fn widget_root(&self, id: WidgetId) -> Option<NodeId> {
        self.widgets.get(id.0)?.as_ref().map(|m| m.root)
    }

    /// Re-render a widget whose render callback reads state that changed.
    pub fn invalidate(&mut self, id: WidgetId) {
        if let Some(Some(m)) = self.widgets.get_mut(id.0) {
            m.button.invalidate();
            self.settle();
        }
    }

    /// Move focus to `node`. Returns `false` if it cannot take focus.
    pub fn focus(&mut self, node: NodeId) -> bool {
        self.doc.focus(node)
    }

    /// The element holding focus.
    pub fn active_element(&self) -> Option<NodeId> {
        self.doc.active_element()
    }

    /// Number of registered listeners, element handlers included.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Click `node`.
    pub fn click(&mut self, node: NodeId) -> Dispatched {
        self.dispatch_to(Event::new(EventType::Click, node))
    }

    /// Press a pointer down on `node`.
    pub fn pointer_down(&mut self, node: NodeId) -> Dispatched {
        self.dispatch_to(Event::new(EventType::PointerDown, node))
    }

    /// Click whatever is topmost at `pt`; the document root if nothing is.
    pub fn click_at(&mut self, pt: Point) -> Dispatched {
        self.dispatch_at(EventType::Click, pt)
    }

    /// Press a pointer down on whatever is topmost at `pt`; the document root if nothing is.
    pub fn pointer_down_at(&mut self, pt: Point) -> Dispatched {
        self.dispatch_at(EventType::PointerDown, pt)
    }

    /// Send a key-down to `node`.
    pub fn key_down(&mut self, node: NodeId, key: Key) -> Dispatched {
        self.dispatch_to(Event::key_down(node, key))
    }

    /// Send a key-down to the focused element, or to `body` if nothing has focus.
    pub fn press(&mut self, key: Key) -> Dispatched {
        let target = self.doc.active_element().unwrap_or(self.body);
        self.key_down(target, key)
    }

    fn dispatch_to(&mut self, event: Event) -> Dispatched {
        if !self.doc.is_connected(event.target()) {
            return Dispatched::default();
        }
        let seq = Router::with_parent(DomParents(&self.doc)).dispatch_for(event.target());
        self.run(&seq, event)
    }

    fn dispatch_at(&mut self, kind: EventType, pt: Point) -> Dispatched {
        match top_hit_for_point(&self.doc, pt, QueryFilter::POINTER) {
            Some(hit) => {
                let target = hit.node;
                let router: Router<NodeId, NoParent> = Router::new();
                let seq = router.handle_with_hits(&[hit]);
                self.run(&seq, Event::new(kind, target))
            }
            None => self.dispatch_to(Event::new(kind, self.doc.root())),
        }
    }

    fn run(&mut self, seq: &[Dispatch<NodeId>], mut event: Event) -> Dispatched {
        trace!(kind = ?event.kind(), target = ?event.target(), steps = seq.len(), "dispatch");
        let mut delivered = 0;
        dispatcher::run(seq, &mut event, |step, event| {
            let handlers: Vec<EventHandler> = self
                .listeners
                .matching(step, &event.kind())
                .into_iter()
                .copied()
                .collect();
            for handler in handlers {
                delivered += 1;
                self.deliver(handler, event);
            }
            Outcome::Continue
        });
        self.settle();
        Dispatched {
            delivered,
            default_prevented: event.default_prevented(),
        }
    }

    fn deliver(&mut self, handler: EventHandler, event: &mut Event) {
        let Some(Some(m)) = self.widgets.get_mut(handler.widget.0) else {
            return;
        };
        m.button.handle(handler.action, event, &self.doc, m.root);
    }

    fn settle(&mut self) {
        for (index, slot) in self.widgets.iter_mut().enumerate() {
            let Some(m) = slot else {
                continue;
            };
            if m.button.take_dirty() {
                let view = m.button.render(WidgetId(index));
                reconcile(&mut self.doc, &mut self.listeners, m.root, &view);
            }
        }
        // Restores first, so a menu closed by another menu opening cannot pull
        // focus away from the newly opened one.
        for m in self.widgets.iter_mut().flatten() {
            m.button.restore_focus(&mut self.doc);
        }
        for m in self.widgets.iter_mut().flatten() {
            m.button.evaluate_focus(&mut self.doc, m.root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuConfig;
    use crate::view::View;
    use kurbo::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    const ITEMS: [&str; 6] = ["One", "Two", "Five", "Eight", "Nine", "Fifty"];

    fn row(i: usize) -> Rect {
        let y = 20.0 * (i as f64 + 1.0);
        Rect::new(0.0, y, 100.0, y + 20.0)
    }

    fn test_menu(config: MenuConfig) -> MenuButton {
        MenuButton::builder(config)
            .render(|p| {
                View::fragment([
                    View::element("button")
                        .with(&p.control)
                        .bounds(Rect::new(0.0, 0.0, 100.0, 20.0))
                        .text("Menu")
                        .into(),
                    View::when(p.is_open, || {
                        View::element("ul").with(&p.menu).children(
                            ITEMS.iter().enumerate().map(|(i, label)| {
                                View::element("li").with(&p.item).bounds(row(i)).text(*label)
                            }),
                        )
                    }),
                ])
            })
            .build()
            .unwrap()
    }

    struct Fixture {
        page: Page,
        widget: WidgetId,
        control: NodeId,
        outside: NodeId,
    }

    fn fixture_with(config: MenuConfig) -> Fixture {
        let mut page = Page::new();
        let body = page.body();
        let doc = page.document_mut();
        let outside = doc.append_element(body, "span");
        doc.append_text(outside, "content outside menu");
        doc.set_bounds(outside, Rect::new(200.0, 0.0, 300.0, 20.0));
        let widget = page.mount(body, test_menu(config));
        let control = page.document().element_by_id("test").unwrap();
        assert!(page.focus(control));
        Fixture {
            page,
            widget,
            control,
            outside,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MenuConfig::new("test"))
    }

    impl Fixture {
        fn active_label(&self) -> String {
            self.page
                .active_element()
                .map(|n| self.page.document().text_content(n))
                .unwrap_or_default()
        }

        fn menu_rendered(&self) -> bool {
            let doc = self.page.document();
            !doc.query_role(doc.root(), "menu").is_empty()
        }

        fn is_open(&self) -> bool {
            self.page.widget(self.widget).unwrap().is_open()
        }

        fn item(&self, label: &str) -> NodeId {
            let doc = self.page.document();
            doc.query_role(doc.root(), "menuitem")
                .into_iter()
                .find(|n| doc.text_content(*n) == label)
                .unwrap()
        }
    }

    #[test]
    fn clicking_control_opens_menu() {
        let mut f = fixture();
        assert!(!f.menu_rendered());
        let out = f.page.click(f.control);
        // Outside-click guard plus the control's own handler.
        assert_eq!(out.delivered, 2);
        assert!(f.is_open());
        assert_eq!(f.active_label(), "One");
        let doc = f.page.document();
        assert_eq!(doc.attr(f.control, "aria-expanded"), Some("true"));
    }

    #[test]
    fn clicking_control_again_closes_menu() {
        let mut f = fixture();
        f.page.click(f.control);
        f.page.click(f.control);
        assert!(!f.is_open());
        assert_eq!(f.page.active_element(), Some(f.control));
        assert!(!f.menu_rendered());
        assert_eq!(f.page.document().attr(f.control, "aria-expanded"), Some("false"));
    }

    #[test]
    fn clicking_outside_closes_menu() {
        let mut f = fixture();
        f.page.click(f.control);
        assert_eq!(f.active_label(), "One");
        f.page.click(f.outside);
        assert!(!f.menu_rendered());
        assert_eq!(f.page.active_element(), Some(f.control));
    }

    #[test]
    fn clicking_inside_list_keeps_menu_open() {
        let mut f = fixture();
        f.page.click(f.control);
        let two = f.item("Two");
        f.page.click(two);
        f.page.pointer_down(two);
        assert!(f.is_open());
        assert!(f.menu_rendered());
    }

    #[test]
    fn outside_pointer_down_closes_menu() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::Enter);
        f.page.pointer_down(f.outside);
        assert!(!f.is_open());
    }

    #[test]
    fn outside_click_on_closed_menu_keeps_focus_elsewhere() {
        let mut f = fixture();
        let body = f.page.body();
        let input = f.page.document_mut().append_element(body, "input");
        assert!(f.page.focus(input));
        f.page.click(f.outside);
        assert_eq!(f.page.active_element(), Some(input));
    }

    #[test]
    fn enter_space_and_down_open_on_first_item() {
        for key in [Key::Enter, Key::Space, Key::ArrowDown] {
            let mut f = fixture();
            let out = f.page.key_down(f.control, key);
            assert!(out.default_prevented, "{key:?}");
            assert_eq!(f.active_label(), "One", "{key:?}");
        }
    }

    #[test]
    fn up_opens_on_last_item() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::ArrowUp);
        assert_eq!(f.active_label(), "Fifty");
    }

    #[test]
    fn other_control_keys_are_ignored() {
        let mut f = fixture();
        let out = f.page.key_down(f.control, Key::Char('a'));
        assert!(!out.default_prevented);
        assert!(!f.is_open());
    }

    #[test]
    fn escape_closes_and_refocuses_control() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::Enter);
        f.page.press(Key::ArrowDown);
        assert_eq!(f.active_label(), "Two");
        let out = f.page.press(Key::Escape);
        assert!(out.default_prevented);
        assert_eq!(f.page.active_element(), Some(f.control));
        assert!(!f.menu_rendered());
    }

    #[test]
    fn arrows_wrap() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::ArrowUp);
        f.page.press(Key::ArrowDown);
        assert_eq!(f.active_label(), "One");
        f.page.press(Key::ArrowUp);
        assert_eq!(f.active_label(), "Fifty");
        f.page.press(Key::ArrowUp);
        assert_eq!(f.active_label(), "Nine");
    }

    #[test]
    fn home_and_end() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::Enter);
        f.page.press(Key::End);
        assert_eq!(f.active_label(), "Fifty");
        f.page.press(Key::Home);
        assert_eq!(f.active_label(), "One");
    }

    #[test]
    fn type_ahead_moves_forward_without_wrapping() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::Enter);
        f.page.press(Key::Char('F'));
        assert_eq!(f.active_label(), "Five");
        f.page.press(Key::Char('f'));
        assert_eq!(f.active_label(), "Fifty");
        let out = f.page.press(Key::Char('f'));
        assert!(out.default_prevented);
        assert_eq!(f.active_label(), "Fifty");
        let out = f.page.press(Key::Char('1'));
        assert!(!out.default_prevented);
    }

    #[test]
    fn full_next_cycle_returns_to_start() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::Enter);
        for _ in 0..ITEMS.len() {
            f.page.press(Key::ArrowDown);
        }
        assert_eq!(f.active_label(), "One");
    }

    #[test]
    fn round_trip_restores_control_focus() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::Enter);
        for key in [Key::ArrowDown, Key::End, Key::ArrowUp, Key::Char('e')] {
            f.page.press(key);
        }
        f.page.click(f.control);
        assert_eq!(f.page.active_element(), Some(f.control));
        // A second close changes nothing.
        f.page.click(f.outside);
        assert_eq!(f.page.active_element(), Some(f.control));
        assert!(!f.is_open());
    }

    #[test]
    fn control_node_survives_renders() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::Enter);
        f.page.press(Key::Escape);
        f.page.click(f.control);
        assert_eq!(f.page.document().element_by_id("test"), Some(f.control));
    }

    #[test]
    fn stale_targets_are_ignored() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::Enter);
        let one = f.item("One");
        f.page.press(Key::Escape);
        assert_eq!(f.page.key_down(one, Key::ArrowDown), Dispatched::default());
        assert!(!f.is_open());
    }

    #[test]
    fn press_without_focus_goes_to_body() {
        let mut f = fixture();
        f.page.document_mut().blur();
        let out = f.page.press(Key::Enter);
        assert_eq!(out, Dispatched::default());
        assert!(!f.is_open());
    }

    #[test]
    fn initially_open_menu_waits_for_input() {
        let mut f = fixture_with(MenuConfig::new("test").open(true));
        assert!(f.menu_rendered());
        assert_eq!(f.page.active_element(), Some(f.control));
        let two = f.item("Two");
        // Unfocused list: Next starts from the top.
        f.page.key_down(two, Key::ArrowDown);
        assert_eq!(f.active_label(), "One");
    }

    #[test]
    fn class_name_lands_on_root_container() {
        let f = fixture_with(MenuConfig::new("test").class_name("dropdown"));
        let root = f.page.widget_root(f.widget).unwrap();
        assert_eq!(f.page.document().attr(root, "class"), Some("dropdown"));
        assert!(f.page.document().contains(root, f.control));
    }

    #[test]
    fn unmount_removes_listeners_and_elements() {
        let mut f = fixture();
        f.page.key_down(f.control, Key::Enter);
        assert!(f.page.listener_count() > 2);
        let button = f.page.unmount(f.widget).unwrap();
        assert!(button.is_open());
        assert_eq!(f.page.listener_count(), 0);
        assert_eq!(f.page.document().element_by_id("test"), None);
        assert_eq!(f.page.active_element(), None);
        assert!(f.page.widget(f.widget).is_none());
        assert!(f.page.unmount(f.widget).is_none());
        // Clicks after teardown reach nobody.
        assert_eq!(f.page.click(f.outside).delivered, 0);
    }

    #[test]
    fn opening_second_menu_dismisses_first() {
        let mut page = Page::new();
        let body = page.body();
        let a = page.mount(body, test_menu(MenuConfig::new("a")));
        let b = page.mount(body, test_menu(MenuConfig::new("b")));
        let control_a = page.document().element_by_id("a").unwrap();
        let control_b = page.document().element_by_id("b").unwrap();

        page.key_down(control_a, Key::Enter);
        assert!(page.widget(a).unwrap().is_open());

        page.click(control_b);
        assert!(!page.widget(a).unwrap().is_open());
        assert!(page.widget(b).unwrap().is_open());
        let active = page.active_element().unwrap();
        let root_b = page.widget_root(b).unwrap();
        assert!(page.document().contains(root_b, active));
        assert_eq!(page.document().text_content(active), "One");
    }

    #[test]
    fn pointer_hits_route_through_geometry() {
        let mut f = fixture();
        f.page.click_at(Point::new(50.0, 10.0));
        assert!(f.is_open());
        assert_eq!(f.active_label(), "One");

        // Third row is "Five"; clicking it keeps the menu open.
        f.page.click_at(Point::new(50.0, 70.0));
        assert!(f.is_open());

        // Empty space targets the document root, which is outside the menu.
        f.page.pointer_down_at(Point::new(500.0, 500.0));
        assert!(!f.is_open());
        assert_eq!(f.page.active_element(), Some(f.control));
    }

    #[test]
    fn invalidate_picks_up_new_items() {
        let items = Rc::new(RefCell::new(vec!["Apple".to_string(), "Bananas".to_string()]));
        let source = Rc::clone(&items);
        let button = MenuButton::new(MenuConfig::new("fruit"), move |p| {
            let labels = source.borrow().clone();
            View::fragment([
                View::element("button").with(&p.control).into(),
                View::when(p.is_open, || {
                    View::element("ul")
                        .with(&p.menu)
                        .children(labels.into_iter().map(|l| View::element("li").with(&p.item).text(l)))
                }),
            ])
        });
        let mut page = Page::new();
        let widget = page.mount(page.body(), button);
        let control = page.document().element_by_id("fruit").unwrap();
        page.key_down(control, Key::ArrowUp);
        let active = page.active_element().unwrap();
        assert_eq!(page.document().text_content(active), "Bananas");

        items.borrow_mut().push("Clementine".to_string());
        page.invalidate(widget);
        assert_eq!(page.active_element(), Some(active));
        page.press(Key::ArrowDown);
        let active = page.active_element().unwrap();
        assert_eq!(page.document().text_content(active), "Clementine");
    }
}
