use crate::document::node::{ElementNode, MarkerAttrs, Node, NodeId, NodeKind};

/// An explicit, index-addressed model of the editable lesson document.
///
/// Nodes live in an arena and are referenced by [`NodeId`]. Removed nodes
/// stay allocated but detached (their parent link is cleared), so a stale
/// captured position keeps pointing at a node that is simply no longer
/// reachable from the root. Staleness is not detected; that hazard belongs
/// to the caller.
#[derive(Debug)]
pub struct DocumentTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl DocumentTree {
    /// Create a tree containing only the content root element
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            kind: NodeKind::Element(ElementNode {
                children: Vec::new(),
                is_content_root: true,
                marker: None,
            }),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn is_content_root(&self, id: NodeId) -> bool {
        self.node(id).as_element().is_some_and(|e| e.is_content_root)
    }

    /// Returns the marker attributes if `id` is an annotation marker
    pub fn marker(&self, id: NodeId) -> Option<&MarkerAttrs> {
        self.node(id).as_element().and_then(|e| e.marker.as_ref())
    }

    /// Allocate a detached node and return its id
    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent: None, kind });
        id
    }

    pub(crate) fn alloc_text(&mut self, text: String) -> NodeId {
        self.alloc(NodeKind::Text(text))
    }

    /// Allocate a detached marker element wrapping a single text leaf
    pub(crate) fn alloc_marker(&mut self, attrs: MarkerAttrs, display_text: &str) -> NodeId {
        let text = self.alloc_text(display_text.to_string());
        let marker = self.alloc(NodeKind::Element(ElementNode {
            children: vec![text],
            is_content_root: false,
            marker: Some(attrs),
        }));
        self.node_mut(text).parent = Some(marker);
        marker
    }

    /// Append a new empty element under `parent`
    pub fn push_element(&mut self, parent: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Element(ElementNode::new()));
        self.append_child(parent, id);
        id
    }

    /// Append a new text leaf under `parent`
    pub fn push_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc_text(text.to_string());
        self.append_child(parent, id);
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Element(element) = &mut self.node_mut(parent).kind {
            element.children.push(child);
        }
        self.node_mut(child).parent = Some(parent);
    }

    /// Replace `old` in `parent`'s child list with `replacement` (which may
    /// be empty). `old` is left detached in the arena.
    pub(crate) fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        replacement: Vec<NodeId>,
    ) {
        let Some(index) = self.child_index(parent, old) else {
            return;
        };
        if let NodeKind::Element(element) = &mut self.node_mut(parent).kind {
            element.children.splice(index..=index, replacement.iter().copied());
        }
        self.node_mut(old).parent = None;
        for id in replacement {
            self.node_mut(id).parent = Some(parent);
        }
    }

    /// Insert `child` into `parent`'s child list right after `after`
    pub(crate) fn insert_after(&mut self, parent: NodeId, after: NodeId, child: NodeId) {
        let Some(index) = self.child_index(parent, after) else {
            return;
        };
        if let NodeKind::Element(element) = &mut self.node_mut(parent).kind {
            element.children.insert(index + 1, child);
        }
        self.node_mut(child).parent = Some(parent);
    }

    /// Detach `id` from its parent, leaving it allocated but unreachable
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(index) = self.child_index(parent, id) {
            if let NodeKind::Element(element) = &mut self.node_mut(parent).kind {
                element.children.remove(index);
            }
        }
        self.node_mut(id).parent = None;
    }

    /// Overwrite the content of a text leaf
    pub(crate) fn set_text(&mut self, leaf: NodeId, text: String) {
        if let NodeKind::Text(current) = &mut self.node_mut(leaf).kind {
            *current = text;
        }
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.node(parent)
            .as_element()?
            .children
            .iter()
            .position(|&c| c == child)
    }

    /// All text leaves under `id` (inclusive), in document order
    pub fn text_leaves(&self, id: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match &self.node(current).kind {
                NodeKind::Text(_) => leaves.push(current),
                NodeKind::Element(element) => {
                    stack.extend(element.children.iter().rev().copied());
                }
            }
        }
        leaves
    }

    /// Concatenated text content of the subtree rooted at `id`
    pub fn text_of(&self, id: NodeId) -> String {
        let mut text = String::new();
        for leaf in self.text_leaves(id) {
            if let Some(t) = self.node(leaf).as_text() {
                text.push_str(t);
            }
        }
        text
    }

    /// Length of a text leaf in characters (zero for elements)
    pub fn char_len(&self, leaf: NodeId) -> usize {
        self.node(leaf).as_text().map_or(0, |t| t.chars().count())
    }

    /// Absolute character offset within `container` of the position
    /// `local_offset` characters into `leaf`: the sum of the lengths of
    /// the leaves preceding `leaf` in document order, plus `local_offset`.
    /// Returns None if `leaf` is not inside `container`'s subtree.
    pub fn offset_within(
        &self,
        container: NodeId,
        leaf: NodeId,
        local_offset: usize,
    ) -> Option<usize> {
        let mut offset = 0;
        for candidate in self.text_leaves(container) {
            if candidate == leaf {
                return Some(offset + local_offset);
            }
            offset += self.char_len(candidate);
        }
        None
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte index of the `char_offset`-th character of `s`, clamped to the end
pub(crate) fn char_to_byte(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map_or(s.len(), |(index, _)| index)
}
