// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus engine: roving focus among menu items.
//!
//! ## Overview
//!
//! Navigation is a two-step protocol.
//! Event handlers only *record* a navigation [`Intent`] through the emitters on
//! [`FocusEngine`]. Once the host has rendered, [`FocusEngine::evaluate`] reads the
//! current items from a [`FocusHost`], resolves the intent against them, and moves
//! focus. The intent is consumed by that evaluation.
//!
//! Only the latest intent survives until the next evaluation; emitters overwrite,
//! they never queue.
//!
//! ## Resolution
//!
//! | intent | unfocused | focused at `i` |
//! |---|---|---|
//! | `First` | `0` | `0` |
//! | `Last` | `len - 1` | `len - 1` |
//! | `Next` | `0` | `i + 1`, wrapping to `0` |
//! | `Prev` | `len - 1` | `i - 1`, wrapping to `len - 1` |
//! | `MatchChar(c)` | nothing | first item after `i` whose label starts with `c` |
//!
//! Type-ahead compares case-insensitively, scans forward only, and does not wrap.
//! An empty item list resolves every intent to nothing.

use understory_dom::{Document, NodeId};

/// A recorded navigation request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Intent {
    /// Nothing to do.
    #[default]
    None,
    /// Focus the first item.
    First,
    /// Focus the last item.
    Last,
    /// Focus the item after the focused one.
    Next,
    /// Focus the item before the focused one.
    Prev,
    /// Focus the next item whose label starts with this character.
    MatchChar(char),
}

/// The items a [`FocusEngine`] navigates, and the focus they share.
pub trait FocusHost {
    /// Opaque item handle.
    type Handle: Copy + PartialEq;

    /// Current items in visual order.
    fn items(&self) -> Vec<Self::Handle>;

    /// The item holding focus, if focus is on any handle at all.
    ///
    /// Returning a handle that is not among [`items`](FocusHost::items) counts as unfocused.
    fn focused(&self) -> Option<Self::Handle>;

    /// Move focus to `item`. Returns `false` if the host refused.
    fn focus(&mut self, item: Self::Handle) -> bool;

    /// User-visible label of `item`, used for type-ahead.
    fn label(&self, item: Self::Handle) -> String;
}

/// Resolve `intent` against `len` items.
///
/// `focused` is the index of the focused item, if any; out-of-range values count
/// as unfocused. `label` is only consulted for [`Intent::MatchChar`].
///
/// ```
/// use understory_menu::focus::{Intent, resolve};
///
/// let items = ["One", "Two", "Five", "Eight", "Nine", "Fifty"];
/// let label = |i: usize| items[i];
///
/// assert_eq!(resolve(Intent::Next, items.len(), Some(5), label), Some(0));
/// assert_eq!(resolve(Intent::Prev, items.len(), None, label), Some(5));
/// assert_eq!(resolve(Intent::MatchChar('f'), items.len(), Some(2), label), Some(5));
/// assert_eq!(resolve(Intent::MatchChar('f'), items.len(), Some(5), label), None);
/// ```
pub fn resolve<L: AsRef<str>>(
    intent: Intent,
    len: usize,
    focused: Option<usize>,
    mut label: impl FnMut(usize) -> L,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    let focused = focused.filter(|&i| i < len);
    match intent {
        Intent::None => None,
        Intent::First => Some(0),
        Intent::Last => Some(last),
        Intent::Next => Some(match focused {
            Some(i) if i < last => i + 1,
            _ => 0,
        }),
        Intent::Prev => Some(match focused {
            Some(i) if i > 0 => i - 1,
            _ => last,
        }),
        Intent::MatchChar(ch) => {
            let from = focused? + 1;
            (from..len).find(|&i| starts_with_ignore_case(label(i).as_ref(), ch))
        }
    }
}

fn starts_with_ignore_case(label: &str, ch: char) -> bool {
    let prefix: String = ch.to_lowercase().collect();
    label.to_lowercase().starts_with(&prefix)
}

/// Holds the pending navigation intent of one menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusEngine {
    intent: Intent,
}

impl FocusEngine {
    /// An engine with no pending intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// The intent the next [`evaluate`](Self::evaluate) will apply.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Drop any pending intent.
    pub fn reset(&mut self) {
        self.intent = Intent::None;
    }

    /// Request the first item.
    pub fn first(&mut self) {
        self.intent = Intent::First;
    }

    /// Request the last item.
    pub fn last(&mut self) {
        self.intent = Intent::Last;
    }

    /// Request the next item, wrapping.
    pub fn next(&mut self) {
        self.intent = Intent::Next;
    }

    /// Request the previous item, wrapping.
    pub fn prev(&mut self) {
        self.intent = Intent::Prev;
    }

    /// Request the next item whose label starts with `ch`.
    pub fn match_char(&mut self, ch: char) {
        self.intent = Intent::MatchChar(ch);
    }

    /// Consume the pending intent and apply it to `host`.
    ///
    /// Returns the item that received focus, if any.
    pub fn evaluate<H: FocusHost>(&mut self, host: &mut H) -> Option<H::Handle> {
        let intent = core::mem::take(&mut self.intent);
        if intent == Intent::None {
            return None;
        }
        let items = host.items();
        let focused = host
            .focused()
            .and_then(|f| items.iter().position(|item| *item == f));
        let index = resolve(intent, items.len(), focused, |i| host.label(items[i]))?;
        let target = items[index];
        host.focus(target).then_some(target)
    }
}

/// [`FocusHost`] over the `role="menuitem"` elements below a container in a [`Document`].
#[derive(Debug)]
pub struct DomItems<'a> {
    doc: &'a mut Document,
    container: NodeId,
}

impl<'a> DomItems<'a> {
    /// Items below `container`, in document order.
    pub fn new(doc: &'a mut Document, container: NodeId) -> Self {
        Self { doc, container }
    }
}

impl FocusHost for DomItems<'_> {
    type Handle = NodeId;

    fn items(&self) -> Vec<NodeId> {
        self.doc.query_role(self.container, "menuitem")
    }

    fn focused(&self) -> Option<NodeId> {
        self.doc.active_element()
    }

    fn focus(&mut self, item: NodeId) -> bool {
        self.doc.focus(item)
    }

    fn label(&self, item: NodeId) -> String {
        self.doc.text_content(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [&str; 6] = ["One", "Two", "Five", "Eight", "Nine", "Fifty"];

    struct ListHost {
        labels: Vec<&'static str>,
        focused: Option<usize>,
        refuse: bool,
    }

    impl ListHost {
        fn new(labels: &[&'static str]) -> Self {
            Self {
                labels: labels.to_vec(),
                focused: None,
                refuse: false,
            }
        }
    }

    impl FocusHost for ListHost {
        type Handle = usize;

        fn items(&self) -> Vec<usize> {
            (0..self.labels.len()).collect()
        }

        fn focused(&self) -> Option<usize> {
            self.focused
        }

        fn focus(&mut self, item: usize) -> bool {
            if self.refuse {
                return false;
            }
            self.focused = Some(item);
            true
        }

        fn label(&self, item: usize) -> String {
            self.labels[item].to_string()
        }
    }

    fn step(engine: &mut FocusEngine, host: &mut ListHost, f: fn(&mut FocusEngine)) {
        f(engine);
        engine.evaluate(host);
    }

    #[test]
    fn first_and_last_for_every_count() {
        for n in 1..=8 {
            assert_eq!(resolve(Intent::First, n, None, |_| ""), Some(0));
            assert_eq!(resolve(Intent::Last, n, Some(0), |_| ""), Some(n - 1));
        }
    }

    #[test]
    fn next_cycles_back_to_start() {
        let mut host = ListHost::new(&ITEMS);
        let mut engine = FocusEngine::new();
        step(&mut engine, &mut host, FocusEngine::first);
        for _ in 0..ITEMS.len() {
            step(&mut engine, &mut host, FocusEngine::next);
        }
        assert_eq!(host.focused, Some(0));
    }

    #[test]
    fn wraps_both_ways() {
        assert_eq!(resolve(Intent::Prev, 6, Some(0), |_| ""), Some(5));
        assert_eq!(resolve(Intent::Next, 6, Some(5), |_| ""), Some(0));
        assert_eq!(resolve(Intent::Prev, 6, Some(5), |_| ""), Some(4));
    }

    #[test]
    fn unfocused_next_and_prev() {
        assert_eq!(resolve(Intent::Next, 6, None, |_| ""), Some(0));
        assert_eq!(resolve(Intent::Prev, 6, None, |_| ""), Some(5));
        // Out of range behaves like unfocused.
        assert_eq!(resolve(Intent::Next, 6, Some(17), |_| ""), Some(0));
    }

    #[test]
    fn single_item_wraps_to_itself() {
        assert_eq!(resolve(Intent::Next, 1, Some(0), |_| ""), Some(0));
        assert_eq!(resolve(Intent::Prev, 1, Some(0), |_| ""), Some(0));
    }

    #[test]
    fn empty_list_is_noop() {
        for intent in [
            Intent::First,
            Intent::Last,
            Intent::Next,
            Intent::Prev,
            Intent::MatchChar('a'),
        ] {
            assert_eq!(resolve(intent, 0, None, |_| ""), None);
        }
        let mut host = ListHost::new(&[]);
        let mut engine = FocusEngine::new();
        engine.first();
        assert_eq!(engine.evaluate(&mut host), None);
    }

    #[test]
    fn type_ahead_is_forward_only() {
        let label = |i: usize| ITEMS[i];
        // From "One": "Five", then "Fifty", then nothing.
        assert_eq!(resolve(Intent::MatchChar('f'), 6, Some(0), label), Some(2));
        assert_eq!(resolve(Intent::MatchChar('F'), 6, Some(2), label), Some(5));
        assert_eq!(resolve(Intent::MatchChar('f'), 6, Some(5), label), None);
        // "Two" is before "Nine"; no wrap.
        assert_eq!(resolve(Intent::MatchChar('t'), 6, Some(4), label), None);
    }

    #[test]
    fn type_ahead_needs_focus() {
        assert_eq!(resolve(Intent::MatchChar('o'), 6, None, |i| ITEMS[i]), None);
    }

    #[test]
    fn latest_intent_wins() {
        let mut host = ListHost::new(&ITEMS);
        let mut engine = FocusEngine::new();
        engine.first();
        engine.last();
        engine.prev();
        assert_eq!(engine.intent(), Intent::Prev);
        assert_eq!(engine.evaluate(&mut host), Some(5));
    }

    #[test]
    fn evaluation_consumes_intent() {
        let mut host = ListHost::new(&ITEMS);
        let mut engine = FocusEngine::new();
        engine.next();
        assert_eq!(engine.evaluate(&mut host), Some(0));
        assert_eq!(engine.intent(), Intent::None);
        assert_eq!(engine.evaluate(&mut host), None);
        assert_eq!(host.focused, Some(0));
    }

    #[test]
    fn reset_does_not_touch_focus() {
        let mut host = ListHost::new(&ITEMS);
        host.focused = Some(3);
        let mut engine = FocusEngine::new();
        engine.last();
        engine.reset();
        assert_eq!(engine.evaluate(&mut host), None);
        assert_eq!(host.focused, Some(3));
    }

    #[test]
    fn refused_focus_reports_nothing() {
        let mut host = ListHost::new(&ITEMS);
        host.refuse = true;
        let mut engine = FocusEngine::new();
        engine.first();
        assert_eq!(engine.evaluate(&mut host), None);
    }

    #[test]
    fn dom_items_follow_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let menu = doc.append_element(root, "ul");
        let mut items = Vec::new();
        for label in ITEMS {
            let li = doc.append_element(menu, "li");
            doc.set_attr(li, "role", "menuitem");
            doc.set_attr(li, "tabindex", "-1");
            doc.append_text(li, label);
            items.push(li);
        }
        // Outside the container: never part of the navigation.
        let stray = doc.append_element(root, "li");
        doc.set_attr(stray, "role", "menuitem");

        let mut engine = FocusEngine::new();
        engine.last();
        assert_eq!(engine.evaluate(&mut DomItems::new(&mut doc, menu)), Some(items[5]));
        engine.next();
        assert_eq!(engine.evaluate(&mut DomItems::new(&mut doc, menu)), Some(items[0]));
        engine.match_char('e');
        assert_eq!(engine.evaluate(&mut DomItems::new(&mut doc, menu)), Some(items[3]));
        assert_eq!(doc.active_element(), Some(items[3]));
    }
}
