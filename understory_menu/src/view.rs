// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render output.
//!
//! A render callback returns a [`View`]: a lightweight description of the elements
//! the menu should consist of. The [`Page`](crate::Page) reconciles it into its
//! [`Document`](understory_dom::Document) after every state change.
//!
//! ```
//! use understory_menu::View;
//!
//! let open = true;
//! let view = View::fragment([
//!     View::element("button").attr("id", "m").text("Menu").into(),
//!     View::when(open, || {
//!         View::element("ul")
//!             .attr("role", "menu")
//!             .children(["One", "Two"].map(|l| View::element("li").text(l)))
//!     }),
//! ]);
//! assert_eq!(view.flatten().len(), 2);
//! ```

use kurbo::Rect;

use crate::event::EventType;
use crate::props::{Attach, EventHandler};

/// A node of render output.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum View {
    /// Renders nothing.
    #[default]
    Empty,
    /// A text node.
    Text(String),
    /// An element with attributes, handlers, and children.
    Element(Element),
    /// A sequence of views rendered side by side, without a wrapper element.
    Fragment(Vec<View>),
}

impl View {
    /// Start building an element.
    pub fn element(tag: &str) -> Element {
        Element::new(tag)
    }

    /// A text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Several views without a wrapper.
    pub fn fragment<V: Into<Self>>(views: impl IntoIterator<Item = V>) -> Self {
        Self::Fragment(views.into_iter().map(Into::into).collect())
    }

    /// Nothing.
    pub fn empty() -> Self {
        Self::Empty
    }

    /// `view()` if `cond` holds, nothing otherwise.
    pub fn when<V: Into<Self>>(cond: bool, view: impl FnOnce() -> V) -> Self {
        if cond { view().into() } else { Self::Empty }
    }

    /// The element and text nodes this view produces at its own level, with
    /// fragments spliced in and empties dropped.
    pub fn flatten(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Self>) {
        match self {
            Self::Empty => {}
            Self::Text(_) | Self::Element(_) => out.push(self),
            Self::Fragment(views) => {
                for v in views {
                    v.flatten_into(out);
                }
            }
        }
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for View {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for View {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// An element under construction. Convert it into a [`View`] with `.into()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) handlers: Vec<(EventType, EventHandler)>,
    pub(crate) children: Vec<View>,
    pub(crate) bounds: Option<Rect>,
    pub(crate) z_index: i32,
}

impl Element {
    /// An element with the given tag name (case-insensitive).
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            handlers: Vec::new(),
            children: Vec::new(),
            bounds: None,
            z_index: 0,
        }
    }

    /// Set an attribute. A later value for the same name replaces the earlier one.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self
            .attrs
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_ascii_lowercase(), value)),
        }
        self
    }

    /// Listen for `kind` on this element during bubbling.
    #[must_use]
    pub fn on(mut self, kind: EventType, handler: EventHandler) -> Self {
        self.handlers.push((kind, handler));
        self
    }

    /// Spread a prop bundle onto this element.
    #[must_use]
    pub fn with(self, props: &impl Attach) -> Self {
        props.attach(self)
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children<V: Into<View>>(mut self, children: impl IntoIterator<Item = V>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(View::Text(content.into()))
    }

    /// Document-space bounds used for pointer hit testing.
    #[must_use]
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Stacking order for hit testing; higher is on top.
    #[must_use]
    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    /// Tag name, lowercase.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of an attribute set on this element.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
