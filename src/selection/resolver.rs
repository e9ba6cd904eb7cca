use crate::document::{CapturedRange, DocumentTree, NodeId};
use crate::selection::sentence::{is_inside_sentence, sentence_at};

/// The selection state captured by the event handler at the moment of the
/// selection event. The live selection is ambient mutable state that the
/// next user action (a click opening a popup, say) collapses, so everything
/// the resolver and the annotation engine need is copied into this value
/// up front and never re-queried.
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    /// The text leaf where the selection starts
    pub anchor_leaf: NodeId,
    /// Character offset of the selection start within `anchor_leaf`
    pub local_offset: usize,
    /// The full selected text, untrimmed
    pub raw_text: String,
    /// The captured range, retained for a later inject
    pub range: CapturedRange,
}

/// Output of the resolver: the trimmed selection and its enclosing sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub text: String,
    pub sentence: String,
}

/// One candidate container for the sentence scan: an ancestor of the
/// anchor leaf together with its full text and the selection start
/// recomputed as an absolute character offset into that text.
#[derive(Debug, Clone)]
pub struct ContainerText {
    pub container: NodeId,
    pub text: String,
    pub offset: usize,
}

/// Build the list of candidate containers for the anchor leaf, innermost
/// to outermost, computed once per event. The chain starts at the leaf's
/// immediate parent and stops at the last ancestor below the content root;
/// if the immediate parent is itself the content root, the chain is just
/// that one entry.
pub fn ancestor_chain(
    tree: &DocumentTree,
    anchor_leaf: NodeId,
    local_offset: usize,
) -> Vec<ContainerText> {
    let mut chain = Vec::new();
    let mut current = tree.parent(anchor_leaf);
    while let Some(container) = current {
        let text = tree.text_of(container);
        let offset = tree
            .offset_within(container, anchor_leaf, local_offset)
            .unwrap_or(0);
        chain.push(ContainerText {
            container,
            text,
            offset,
        });
        if tree.is_content_root(container) {
            break;
        }
        current = match tree.parent(container) {
            Some(parent) if !tree.is_content_root(parent) => Some(parent),
            _ => None,
        };
    }
    chain
}

/// Pick the container whose text holds a complete sentence around the
/// selection: the innermost entry passing the sentence test, or the
/// outermost entry when none passes (the climb exhausted its ancestors;
/// a defined fallback, not a failure).
pub fn pick_container(chain: &[ContainerText]) -> Option<&ContainerText> {
    chain
        .iter()
        .find(|entry| is_inside_sentence(&entry.text, entry.offset))
        .or_else(|| chain.last())
}

/// Resolve a captured selection into its trimmed text and enclosing
/// sentence. Callers guard against invoking this without a selection; an
/// empty trimmed selection still yields whatever sentence the context
/// produces.
pub fn resolve_selection(
    tree: &DocumentTree,
    selection: &SelectionSnapshot,
) -> ResolvedSelection {
    let chain = ancestor_chain(tree, selection.anchor_leaf, selection.local_offset);
    let sentence = pick_container(&chain)
        .map(|entry| sentence_at(&entry.text, entry.offset).trim().to_string())
        .unwrap_or_default();
    ResolvedSelection {
        text: selection.raw_text.trim().to_string(),
        sentence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Position;

    fn snapshot(leaf: NodeId, offset: usize, raw: &str) -> SelectionSnapshot {
        let chars = raw.chars().count();
        SelectionSnapshot {
            anchor_leaf: leaf,
            local_offset: offset,
            raw_text: raw.to_string(),
            range: CapturedRange::new(
                Position::new(leaf, offset),
                Position::new(leaf, offset + chars),
            ),
        }
    }

    #[test]
    fn test_resolve_inside_single_block() {
        let mut tree = DocumentTree::new();
        let block = tree.push_element(tree.root());
        let leaf = tree.push_text(block, "Hello world. This is a test sentence. Goodbye.");

        let sel = snapshot(leaf, 23, "test");
        let resolved = resolve_selection(&tree, &sel);

        assert_eq!(resolved.text, "test");
        assert_eq!(resolved.sentence, "This is a test sentence.");
    }

    #[test]
    fn test_resolve_trims_selected_text() {
        let mut tree = DocumentTree::new();
        let block = tree.push_element(tree.root());
        let leaf = tree.push_text(block, "Some words. More words.");

        let sel = snapshot(leaf, 5, " words ");
        assert_eq!(resolve_selection(&tree, &sel).text, "words");
    }

    #[test]
    fn test_resolve_first_sentence_keeps_full_prefix() {
        let mut tree = DocumentTree::new();
        let block = tree.push_element(tree.root());
        let leaf = tree.push_text(block, "An opening line without end marks yet. Tail.");

        // Selection on "line": nothing before the offset terminates a
        // sentence, so the prefix runs from the start of the text
        let sel = snapshot(leaf, 11, "line");
        assert_eq!(
            resolve_selection(&tree, &sel).sentence,
            "An opening line without end marks yet."
        );
    }

    #[test]
    fn test_resolve_climbs_out_of_inline_span() {
        let mut tree = DocumentTree::new();
        let paragraph = tree.push_element(tree.root());
        tree.push_text(paragraph, "This is a ");
        let span = tree.push_element(paragraph);
        let inner = tree.push_text(span, "very important");
        tree.push_text(paragraph, " point.");

        // "very important" alone has no terminal punctuation; the resolver
        // must climb to the paragraph and return its full sentence
        let sel = snapshot(inner, 0, "very");
        let resolved = resolve_selection(&tree, &sel);

        assert_eq!(resolved.sentence, "This is a very important point.");
    }

    #[test]
    fn test_resolve_stops_at_content_root() {
        let mut tree = DocumentTree::new();
        let block = tree.push_element(tree.root());
        let leaf = tree.push_text(block, "fragment with no end");

        // Nothing in the chain passes the sentence test; the outermost
        // container below the root is used as-is
        let sel = snapshot(leaf, 9, "with");
        assert_eq!(resolve_selection(&tree, &sel).sentence, "fragment with no end");
    }

    #[test]
    fn test_resolve_leaf_directly_under_root() {
        let mut tree = DocumentTree::new();
        let leaf = tree.push_text(tree.root(), "Loose text. Under the root.");

        let sel = snapshot(leaf, 3, "se");
        assert_eq!(resolve_selection(&tree, &sel).sentence, "Loose text.");
    }

    #[test]
    fn test_ancestor_chain_is_innermost_first() {
        let mut tree = DocumentTree::new();
        let outer = tree.push_element(tree.root());
        let middle = tree.push_element(outer);
        let span = tree.push_element(middle);
        let leaf = tree.push_text(span, "abc");

        let chain = ancestor_chain(&tree, leaf, 1);
        let ids: Vec<NodeId> = chain.iter().map(|c| c.container).collect();
        assert_eq!(ids, vec![span, middle, outer]);
        assert!(chain.iter().all(|c| c.offset == 1));
    }

    #[test]
    fn test_chain_offsets_recomputed_per_container() {
        let mut tree = DocumentTree::new();
        let paragraph = tree.push_element(tree.root());
        tree.push_text(paragraph, "Before ");
        let span = tree.push_element(paragraph);
        let leaf = tree.push_text(span, "inside");
        tree.push_text(paragraph, " after.");

        let chain = ancestor_chain(&tree, leaf, 2);
        assert_eq!(chain[0].offset, 2);
        assert_eq!(chain[1].offset, 9);
    }

    #[test]
    fn test_empty_selection_still_produces_sentence() {
        let mut tree = DocumentTree::new();
        let block = tree.push_element(tree.root());
        let leaf = tree.push_text(block, "Context matters here. Really.");

        let sel = snapshot(leaf, 8, "");
        let resolved = resolve_selection(&tree, &sel);
        assert_eq!(resolved.text, "");
        assert_eq!(resolved.sentence, "Context matters here.");
    }
}
