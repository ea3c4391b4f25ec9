// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu button controller.

use tracing::{debug, trace};
use understory_dom::{Document, NodeId};

use crate::config::MenuConfig;
use crate::error::ConfigError;
use crate::event::Event;
use crate::focus::{DomItems, FocusEngine};
use crate::host::WidgetId;
use crate::keys::Key;
use crate::props::{Action, MenuProps};
use crate::view::View;

type RenderFn = Box<dyn FnMut(&MenuProps) -> View>;

/// A menu button: open state, roving focus, and dismissal.
///
/// A `MenuButton` renders nothing by itself. Its render callback turns the current
/// [`MenuProps`] into a [`View`]; once [mounted](crate::Page::mount) it is driven
/// entirely by events the [`Page`](crate::Page) routes to the elements carrying
/// those props.
///
/// ```
/// use understory_menu::{Key, MenuButton, MenuConfig, Page, View};
///
/// let menu = MenuButton::builder(MenuConfig::new("fruit"))
///     .render(|p| {
///         View::fragment([
///             View::element("button").with(&p.control).text("Fruit").into(),
///             View::when(p.is_open, || {
///                 View::element("ul").with(&p.menu).children(
///                     ["Apple", "Bananas"].map(|l| View::element("li").with(&p.item).text(l)),
///                 )
///             }),
///         ])
///     })
///     .build()
///     .unwrap();
///
/// let mut page = Page::new();
/// let widget = page.mount(page.body(), menu);
/// let control = page.document().element_by_id("fruit").unwrap();
///
/// page.key_down(control, Key::ArrowUp);
/// assert!(page.widget(widget).unwrap().is_open());
/// let active = page.active_element().unwrap();
/// assert_eq!(page.document().text_content(active), "Bananas");
/// ```
pub struct MenuButton {
    config: MenuConfig,
    render: RenderFn,
    is_open: bool,
    pending_restore: bool,
    focus: FocusEngine,
    dirty: bool,
}

impl core::fmt::Debug for MenuButton {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuButton")
            .field("config", &self.config)
            .field("is_open", &self.is_open)
            .field("pending_restore", &self.pending_restore)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl MenuButton {
    /// A menu button with the given configuration and render callback.
    pub fn new(config: MenuConfig, render: impl FnMut(&MenuProps) -> View + 'static) -> Self {
        Self::with_render(config, Box::new(render))
    }

    fn with_render(config: MenuConfig, render: RenderFn) -> Self {
        Self {
            is_open: config.open,
            config,
            render,
            pending_restore: false,
            focus: FocusEngine::new(),
            dirty: true,
        }
    }

    /// Start configuring a menu button.
    pub fn builder(config: MenuConfig) -> MenuButtonBuilder {
        MenuButtonBuilder {
            config,
            render: None,
        }
    }

    /// The configuration this menu was built with.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The pending navigation state.
    pub fn focus_engine(&self) -> &FocusEngine {
        &self.focus
    }

    pub(crate) fn open(&mut self) {
        if !self.is_open {
            debug!(menu = %self.config.id, "open");
        }
        self.is_open = true;
        self.focus.first();
        self.pending_restore = false;
        self.dirty = true;
    }

    pub(crate) fn close(&mut self) {
        if self.is_open {
            debug!(menu = %self.config.id, "close");
        }
        self.is_open = false;
        self.focus.reset();
        self.pending_restore = true;
        self.dirty = true;
    }

    pub(crate) fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// React to an event routed to one of this menu's handlers.
    ///
    /// `root` is the container the menu is mounted in; it scopes outside-click checks.
    pub(crate) fn handle(&mut self, action: Action, event: &mut Event, doc: &Document, root: NodeId) {
        match action {
            Action::ControlClick => self.toggle(),
            Action::ControlKeyDown => match event.key() {
                Some(Key::Enter | Key::Space | Key::ArrowDown) => {
                    event.prevent_default();
                    self.open();
                    self.focus.first();
                }
                Some(Key::ArrowUp) => {
                    event.prevent_default();
                    self.open();
                    self.focus.last();
                }
                _ => {}
            },
            Action::ItemKeyDown => self.item_key_down(event),
            Action::DismissOutside => {
                if self.is_open && !doc.contains(root, event.target()) {
                    self.close();
                }
            }
        }
    }

    fn item_key_down(&mut self, event: &mut Event) {
        let Some(key) = event.key() else {
            return;
        };
        match key {
            Key::Escape => self.close(),
            Key::ArrowDown => self.focus.next(),
            Key::ArrowUp => self.focus.prev(),
            Key::Home => self.focus.first(),
            Key::End => self.focus.last(),
            other => match other.type_ahead() {
                Some(ch) => self.focus.match_char(ch),
                None => return,
            },
        }
        event.prevent_default();
    }

    pub(crate) fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    pub(crate) fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn render(&mut self, widget: WidgetId) -> View {
        let props = MenuProps::new(widget, &self.config.id, self.is_open);
        (self.render)(&props)
    }

    /// Apply the pending navigation intent to the items below `root`.
    pub(crate) fn evaluate_focus(&mut self, doc: &mut Document, root: NodeId) -> Option<NodeId> {
        let focused = self.focus.evaluate(&mut DomItems::new(doc, root));
        if let Some(node) = focused {
            trace!(menu = %self.config.id, ?node, "focus item");
        }
        focused
    }

    /// Return focus to the control after a close.
    ///
    /// The pending flag is cleared even when the control cannot be found.
    pub(crate) fn restore_focus(&mut self, doc: &mut Document) {
        if !core::mem::take(&mut self.pending_restore) {
            return;
        }
        if let Some(control) = doc.element_by_id(&self.config.id)
            && doc.focus(control)
        {
            trace!(menu = %self.config.id, ?control, "focus control");
        }
    }
}

/// Builder for [`MenuButton`].
pub struct MenuButtonBuilder {
    config: MenuConfig,
    render: Option<RenderFn>,
}

impl core::fmt::Debug for MenuButtonBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuButtonBuilder")
            .field("config", &self.config)
            .field("has_render", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

impl MenuButtonBuilder {
    /// Set the render callback.
    #[must_use]
    pub fn render(mut self, render: impl FnMut(&MenuProps) -> View + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Finish building.
    ///
    /// Fails with [`ConfigError::MissingRender`] if no render callback was set.
    pub fn build(self) -> Result<MenuButton, ConfigError> {
        let Some(render) = self.render else {
            return Err(ConfigError::MissingRender { id: self.config.id });
        };
        Ok(MenuButton::with_render(self.config, render))
    }
}
