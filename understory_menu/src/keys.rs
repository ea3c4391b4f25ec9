// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard keys as the menu sees them.

/// A logical key, as carried by `KeyboardEvent.key` in the DOM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `Enter`.
    Enter,
    /// The space bar.
    Space,
    /// `Escape`.
    Escape,
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// `Tab`.
    Tab,
    /// A key producing a single printable character.
    Char(char),
    /// Anything else (modifiers, function keys, IME composition, …).
    Unidentified,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    ///
    /// Legacy names (`"Esc"`, `"Up"`, `"Spacebar"`, …) are accepted too.
    ///
    /// ```
    /// use understory_menu::Key;
    ///
    /// assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
    /// assert_eq!(Key::from_dom(" "), Key::Space);
    /// assert_eq!(Key::from_dom("f"), Key::Char('f'));
    /// assert_eq!(Key::from_dom("Shift"), Key::Unidentified);
    /// ```
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Unidentified,
                }
            }
        }
    }

    /// The character this key contributes to type-ahead, if any.
    ///
    /// Only the letters `A`–`Z` (either case) take part, matching the key codes
    /// 65–90 that browsers report for them.
    pub fn type_ahead(self) -> Option<char> {
        match self {
            Self::Char(c) if c.is_ascii_alphabetic() => Some(c),
            _ => None,
        }
    }
}
