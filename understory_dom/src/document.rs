// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, attributes, queries, focus, hit testing.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::{Hit, NodeFlags, NodeId, NodeKind, QueryFilter, TabIndex};

/// Tags that can take focus without a `tabindex` attribute.
const NATIVE_FOCUSABLE: &[&str] = &["button", "input", "select", "textarea"];

#[derive(Clone, Debug)]
struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    bounds: Rect,
    z_index: i32,
    flags: NodeFlags,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            bounds: Rect::ZERO,
            z_index: 0,
            flags: NodeFlags::default(),
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug)]
enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

impl Node {
    fn new(generation: u32, data: NodeData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    fn element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// An element tree with a single document root and one active (focused) element.
///
/// Stale or detached ids are tolerated everywhere: queries return `None` or an
/// empty result and mutations are ignored.
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    active: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document holding only its root node.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            active: None,
        };
        doc.root = doc.alloc(NodeData::Document);
        doc
    }

    /// The document root. Every connected node descends from it.
    pub fn root(&self) -> NodeId {
        self.root
    }

    // --- structure ---

    /// Create a detached element. Attach it with [`Document::append_child`] or
    /// [`Document::insert_child`].
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(NodeData::Text(content.to_string()))
    }

    /// Create an element and append it to `parent`.
    ///
    /// If `parent` is stale the element is still created, but stays detached.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, content: &str) -> NodeId {
        let id = self.create_text(content);
        self.append_child(parent, id);
        id
    }

    /// Append `child` as the last child of `parent`, moving it if already attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let len = self.children(parent).len();
        self.insert_child(parent, len, child)
    }

    /// Insert `child` at `index` among the children of `parent`, moving it if
    /// already attached. `index` is clamped to the child count.
    ///
    /// Returns `false` (and changes nothing) if either id is stale, if `parent`
    /// is a text node, if `child` is the root, or if the move would create a cycle.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) || child == self.root {
            return false;
        }
        if matches!(self.node(parent).data, NodeData::Text(_)) || self.contains(child, parent) {
            return false;
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
        }
        let siblings = &mut self.node_mut(parent).children;
        let at = index.min(siblings.len());
        siblings.insert(at, child);
        self.node_mut(child).parent = Some(parent);
        true
    }

    /// Remove a node and its subtree. Removing the root is ignored.
    ///
    /// If the active element is inside the removed subtree, focus is cleared.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        if let Some(active) = self.active
            && self.contains(id, active)
        {
            self.active = None;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.free_subtree(id);
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// generation stored in that slot. See [`NodeId`] for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns true if `id` is live and reachable from the root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_alive(id) && self.contains(self.root, id)
    }

    /// What kind of node `id` is, or `None` if stale.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind<'_>> {
        let node = self.node_opt(id)?;
        Some(match &node.data {
            NodeData::Document => NodeKind::Document,
            NodeData::Element(e) => NodeKind::Element(&e.tag),
            NodeData::Text(t) => NodeKind::Text(t),
        })
    }

    /// Tag name of an element (lowercase), or `None` for other nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Returns true if `id` is a live element (not text, not the root).
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Parent of a node, or `None` for the root, detached nodes and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a node in order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Path from the topmost ancestor to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = Some(id).filter(|id| self.is_alive(*id));
        while let Some(n) = cur {
            out.push(n);
            cur = self.node(n).parent;
        }
        out.reverse();
        out
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cur = Some(node).filter(|id| self.is_alive(*id));
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.node(n).parent;
        }
        false
    }

    // --- attributes and content ---

    /// Read an attribute. Names are matched ASCII case-insensitively.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Iterate an element's attributes in insertion order.
    pub fn attrs(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.element(id)
            .into_iter()
            .flat_map(|e| e.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str())))
    }

    /// Set (or replace) an attribute on an element.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(e) = self.element_mut(id) else {
            return;
        };
        if let Some(slot) = e.attrs.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            slot.1 = value.to_string();
        } else {
            e.attrs.push((name.to_ascii_lowercase(), value.to_string()));
        }
    }

    /// Remove an attribute from an element.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(e) = self.element_mut(id) {
            e.attrs.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        }
    }

    /// Remove every attribute from an element.
    pub fn clear_attrs(&mut self, id: NodeId) {
        if let Some(e) = self.element_mut(id) {
            e.attrs.clear();
        }
    }

    /// Replace the content of a text node. Returns `false` for other nodes.
    pub fn set_text(&mut self, id: NodeId, content: &str) -> bool {
        match self.node_opt_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Text(t)) => {
                t.clear();
                t.push_str(content);
                true
            }
            _ => false,
        }
    }

    /// Concatenated text of a node and its descendants, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(NodeData::Text(t)) = self.node_opt(id).map(|n| &n.data) {
            out.push_str(t);
            return out;
        }
        for n in self.descendants(id) {
            if let NodeData::Text(t) = &self.node(n).data {
                out.push_str(t);
            }
        }
        out
    }

    // --- geometry and flags ---

    /// Update an element's bounds in document space.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(e) = self.element_mut(id) {
            e.bounds = bounds;
        }
    }

    /// Bounds of an element, or `None` for other nodes.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.element(id).map(|e| e.bounds)
    }

    /// Update an element's z index. Higher is on top for hit testing.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) {
        if let Some(e) = self.element_mut(id) {
            e.z_index = z;
        }
    }

    /// Returns the z index of an element if the identifier is live.
    pub fn z_index(&self, id: NodeId) -> Option<i32> {
        self.element(id).map(|e| e.z_index)
    }

    /// Update an element's flags.
    ///
    /// Hiding or disabling the active element clears focus.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(e) = self.element_mut(id) {
            e.flags = flags;
        }
        if self.active == Some(id) && !self.is_focusable(id) {
            self.active = None;
        }
    }

    /// Flags of an element, or `None` for other nodes.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.element(id).map(|e| e.flags)
    }

    // --- queries ---

    /// Descendants of `id` in document (pre-order) order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.node(n).children.iter().rev().copied());
        }
        out
    }

    /// Elements under `root` (exclusive) whose `name` attribute equals `value`,
    /// in document order.
    pub fn query_attr(&self, root: NodeId, name: &str, value: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.attr(*n, name) == Some(value))
            .collect()
    }

    /// Elements under `root` (exclusive) carrying `role` among the tokens of
    /// their `role` attribute, in document order. Roles compare ASCII
    /// case-insensitively.
    pub fn query_role(&self, root: NodeId, role: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| {
                self.attr(*n, "role").is_some_and(|v| {
                    v.split_ascii_whitespace()
                        .any(|token| token.eq_ignore_ascii_case(role))
                })
            })
            .collect()
    }

    /// First connected element whose `id` attribute equals `id`, in document order.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    // --- focus ---

    /// Returns true if `id` can currently take focus.
    ///
    /// An element is focusable when it is connected, visible, and either has an
    /// integer `tabindex` or is a native control (`button`, `input`, `select`,
    /// `textarea`, or `a` with `href`) that is not disabled.
    pub fn is_focusable(&self, id: NodeId) -> bool {
        let Some(e) = self.element(id) else {
            return false;
        };
        if !e.flags.contains(NodeFlags::VISIBLE) || !self.is_connected(id) {
            return false;
        }
        if e.attr("tabindex").and_then(TabIndex::parse).is_some() {
            return true;
        }
        let native = NATIVE_FOCUSABLE.contains(&e.tag.as_str())
            || (e.tag == "a" && e.attr("href").is_some());
        native && !e.flags.contains(NodeFlags::DISABLED)
    }

    /// Move focus to `id`. Returns `false` and leaves focus unchanged if the
    /// element cannot take focus.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// The element holding focus, if any.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|id| self.is_alive(*id))
    }

    // --- hit testing ---

    /// Hit test a document-space point. Returns the topmost connected element.
    ///
    /// Elements with empty bounds never match. If multiple elements overlap with
    /// the same `z_index`, the newer [`NodeId`] wins, which for freshly built
    /// trees means the later one in document order.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        let mut best: Option<(NodeId, i32)> = None;
        for (i, slot) in self.nodes.iter().enumerate() {
            let Some(node) = slot else {
                continue;
            };
            let Some(e) = node.element() else {
                continue;
            };
            if filter.visible_only && !e.flags.contains(NodeFlags::VISIBLE) {
                continue;
            }
            if filter.pickable_only && !e.flags.contains(NodeFlags::PICKABLE) {
                continue;
            }
            if e.bounds.area() <= 0.0 || !e.bounds.contains(pt) {
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let id = NodeId::new(i as u32, node.generation);
            if !self.is_connected(id) {
                continue;
            }
            let z = e.z_index;
            match best {
                Some((best_id, z_best)) if z < z_best || (z == z_best && !id.is_newer_than(best_id)) => {}
                _ => best = Some((id, z)),
            }
        }
        best.map(|(node, _)| Hit {
            node,
            path: self.path_to_root(node),
        })
    }

    // --- internals ---

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        NodeId::new(idx as u32, generation)
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Access a live node; panics if `id` is stale. Callers check liveness first.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node_opt(id)?.element()
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.node_opt_mut(id)?.element_mut()
    }
}
