//! The two inverse mutations this crate performs on the document tree:
//! replacing a captured range with an annotation marker, and unwrapping a
//! marker back to plain text. Everything else that edits the document
//! (block and column editing) belongs to the containing editor.

use crate::document::node::MarkerAttrs;
use crate::document::tree::char_to_byte;
use crate::document::{CapturedRange, DocumentTree, NodeId};

/// Delete the contents of `range` and insert a single marker element in
/// their place, carrying `term_id` and `part_of_speech` and rendering
/// `display_text`.
///
/// The range must have been captured from the current document state;
/// edits made between capture and inject are not detected, and a stale
/// range may silently edit the wrong location. Ranges overlapping an
/// existing marker are unsupported and the result is unspecified.
pub fn inject(
    tree: &mut DocumentTree,
    range: &CapturedRange,
    term_id: i64,
    display_text: &str,
    part_of_speech: &str,
) {
    let attrs = MarkerAttrs {
        term_id,
        part_of_speech: part_of_speech.to_string(),
    };
    let marker = tree.alloc_marker(attrs, display_text);
    let (start, end) = (range.start, range.end);

    if start.leaf == end.leaf {
        let Some(text) = tree.node(start.leaf).as_text().map(str::to_string) else {
            return;
        };
        let Some(parent) = tree.parent(start.leaf) else {
            return;
        };
        let from = char_to_byte(&text, start.offset);
        let to = char_to_byte(&text, end.offset.max(start.offset));
        let before = &text[..from];
        let after = &text[to..];

        let mut replacement = Vec::new();
        if !before.is_empty() {
            replacement.push(tree.alloc_text(before.to_string()));
        }
        replacement.push(marker);
        if !after.is_empty() {
            replacement.push(tree.alloc_text(after.to_string()));
        }
        tree.replace_child(parent, start.leaf, replacement);
        return;
    }

    // Range spans leaves: trim the end leaf's head, drop the leaves wholly
    // covered, trim the start leaf's tail, then place the marker at the cut.
    let leaves = tree.text_leaves(tree.root());
    let Some(start_index) = leaves.iter().position(|&leaf| leaf == start.leaf) else {
        return;
    };
    let Some(end_index) = leaves.iter().position(|&leaf| leaf == end.leaf) else {
        return;
    };
    if end_index < start_index {
        return;
    }

    if let Some(text) = tree.node(end.leaf).as_text().map(str::to_string) {
        let to = char_to_byte(&text, end.offset);
        let tail = text[to..].to_string();
        if tail.is_empty() {
            tree.detach(end.leaf);
        } else {
            tree.set_text(end.leaf, tail);
        }
    }
    for &leaf in &leaves[start_index + 1..end_index] {
        tree.detach(leaf);
    }

    let Some(text) = tree.node(start.leaf).as_text().map(str::to_string) else {
        return;
    };
    let Some(parent) = tree.parent(start.leaf) else {
        return;
    };
    let from = char_to_byte(&text, start.offset);
    let head = text[..from].to_string();
    if head.is_empty() {
        tree.replace_child(parent, start.leaf, vec![marker]);
    } else {
        tree.set_text(start.leaf, head);
        tree.insert_after(parent, start.leaf, marker);
    }
}

/// Replace a marker created by [`inject`] with a plain text node holding
/// its visible text. The document's text content is unchanged; only the
/// annotation metadata is discarded. Nodes without marker attributes are
/// left untouched (callers obtain markers via [`find_marker`] or a click
/// on one).
pub fn unlink(tree: &mut DocumentTree, marker: NodeId) {
    if tree.marker(marker).is_none() {
        return;
    }
    let Some(parent) = tree.parent(marker) else {
        return;
    };
    let text = tree.text_of(marker);
    let replacement = tree.alloc_text(text);
    tree.replace_child(parent, marker, vec![replacement]);
}

/// Find the marker element carrying `term_id`, for the click-to-reopen
/// path. Ids are unique within a document, so the first hit is the only one.
pub fn find_marker(tree: &DocumentTree, term_id: i64) -> Option<NodeId> {
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        if let Some(attrs) = tree.marker(id) {
            if attrs.term_id == term_id {
                return Some(id);
            }
        }
        if let Some(element) = tree.node(id).as_element() {
            stack.extend(element.children.iter().rev().copied());
        }
    }
    None
}
