/// Stable identifier for a node in a [`DocumentTree`] arena.
///
/// Ids are never reused while the tree is alive, so a captured id stays
/// valid (though possibly detached) across later edits.
///
/// [`DocumentTree`]: crate::document::DocumentTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Annotation metadata carried by a marker element.
///
/// A marker is distinguishable from ordinary elements by the presence of
/// these attributes; the term id resolves to a record in the term store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerAttrs {
    pub term_id: i64,
    pub part_of_speech: String,
}

/// A single node in the document tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent element, or None for the root and detached nodes
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementNode),
    /// An atomic text-bearing leaf
    Text(String),
}

/// An element node: an editable block, column, inline span or marker
#[derive(Debug, Clone)]
pub struct ElementNode {
    /// Child nodes in document order
    pub children: Vec<NodeId>,
    /// Marks the outermost content boundary; the sentence climb never
    /// proceeds past an element with this flag set
    pub is_content_root: bool,
    /// Present iff this element is an annotation marker
    pub marker: Option<MarkerAttrs>,
}

impl ElementNode {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            is_content_root: false,
            marker: None,
        }
    }
}

impl Default for ElementNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Returns the element data if this node is an element
    pub fn as_element(&self) -> Option<&ElementNode> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns the text content if this node is a text leaf
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Check whether this node is an annotation marker
    pub fn is_marker(&self) -> bool {
        self.as_element().is_some_and(|e| e.marker.is_some())
    }
}
