// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu configuration.

/// Static configuration of a [`MenuButton`](crate::MenuButton).
///
/// ```
/// use understory_menu::MenuConfig;
///
/// let config = MenuConfig::new("file-menu").open(true).class_name("toolbar");
/// assert_eq!(config.id, "file-menu");
/// assert!(config.open);
/// assert_eq!(config.class_name.as_deref(), Some("toolbar"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuConfig {
    /// Identity of the control element.
    ///
    /// Used for `aria-labelledby` on the item container and for looking the control
    /// up again when focus returns to it, so it must be unique in the document.
    /// It is not validated.
    pub id: String,
    /// Whether the menu starts open.
    pub open: bool,
    /// Value of the root container's `class` attribute.
    pub class_name: Option<String>,
}

impl MenuConfig {
    /// A closed menu whose control carries `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set whether the menu starts open.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Set the root container's `class` attribute.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}
