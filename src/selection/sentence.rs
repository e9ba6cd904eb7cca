//! Sentence-boundary heuristics.
//!
//! These are pure functions over plain text and a character offset; the
//! ancestor climb in the resolver feeds them container text computed once
//! per event, so nothing here touches the document tree. The only boundary
//! signal is terminal punctuation (`.`, `!`, `?`); abbreviations, ellipses
//! and quotation-adjacent punctuation are deliberately not handled.

use crate::document::tree::char_to_byte;

/// Check whether a character ends a sentence
pub fn is_sentence_ending(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// The trailing part of `text` that belongs to the current sentence: the
/// characters after the last sentence-ending punctuation mark. If `text`
/// contains none, the whole of `text` is returned (start-of-document case).
/// A mark in the final position yields an empty prefix.
pub fn sentence_part_from_end(text: &str) -> &str {
    match text
        .char_indices()
        .rev()
        .find(|&(_, c)| is_sentence_ending(c))
    {
        Some((index, c)) => &text[index + c.len_utf8()..],
        None => text,
    }
}

/// The leading part of `text` up to and including the first sentence-ending
/// punctuation mark, or all of `text` if there is none.
pub fn sentence_part_from_start(text: &str) -> &str {
    match text.char_indices().find(|&(_, c)| is_sentence_ending(c)) {
        Some((index, c)) => &text[..index + c.len_utf8()],
        None => text,
    }
}

/// Heuristic test for whether the position `offset` (in characters) sits
/// inside a complete sentence of `text`: the text after it must contain a
/// sentence-ending mark, and the text before it must either contain one
/// too or open with an uppercase letter. Approximate on purpose; lowercase
/// sentence starts and mid-sentence capitals are misjudged.
pub fn is_inside_sentence(text: &str, offset: usize) -> bool {
    let (before, after) = text.split_at(char_to_byte(text, offset));
    if !after.chars().any(is_sentence_ending) {
        return false;
    }
    if before.chars().any(is_sentence_ending) {
        return true;
    }
    before
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// The full sentence of `text` around the position `offset` (in
/// characters): the backward scan's prefix joined to the forward scan's
/// suffix. Not trimmed.
pub fn sentence_at(text: &str, offset: usize) -> String {
    let (before, after) = text.split_at(char_to_byte(text, offset));
    let mut sentence = String::from(sentence_part_from_end(before));
    sentence.push_str(sentence_part_from_start(after));
    sentence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sentence_ending() {
        assert!(is_sentence_ending('.'));
        assert!(is_sentence_ending('!'));
        assert!(is_sentence_ending('?'));
        assert!(!is_sentence_ending(','));
        assert!(!is_sentence_ending(';'));
        assert!(!is_sentence_ending('a'));
    }

    #[test]
    fn test_part_from_end_after_punctuation() {
        assert_eq!(sentence_part_from_end("Hello world. This is a "), " This is a ");
        assert_eq!(sentence_part_from_end("One! Two? Three "), " Three ");
    }

    #[test]
    fn test_part_from_end_without_punctuation_keeps_everything() {
        // Start-of-document: the whole prefix is the sentence start
        assert_eq!(sentence_part_from_end("This is a "), "This is a ");
        assert_eq!(sentence_part_from_end(""), "");
    }

    #[test]
    fn test_part_from_end_punctuation_in_final_position() {
        assert_eq!(sentence_part_from_end("Done."), "");
    }

    #[test]
    fn test_part_from_start_includes_punctuation() {
        assert_eq!(sentence_part_from_start("test sentence. Goodbye."), "test sentence.");
        assert_eq!(sentence_part_from_start("!rest"), "!");
    }

    #[test]
    fn test_part_from_start_without_punctuation() {
        assert_eq!(sentence_part_from_start("no end here"), "no end here");
    }

    #[test]
    fn test_is_inside_sentence() {
        let text = "Hello world. This is a test sentence. Goodbye.";
        // Inside the second sentence: punctuation on both sides
        assert!(is_inside_sentence(text, 23));
        // Start of text: uppercase opener plus punctuation after
        assert!(is_inside_sentence(text, 6));
        // No punctuation after the offset at all
        assert!(!is_inside_sentence("no terminal mark", 3));
        // Lowercase opener and no preceding punctuation
        assert!(!is_inside_sentence("very important", 5));
    }

    #[test]
    fn test_is_inside_sentence_empty_before() {
        assert!(!is_inside_sentence("word here.", 0));
    }

    #[test]
    fn test_sentence_at_mid_document() {
        let text = "Hello world. This is a test sentence. Goodbye.";
        // Offset of "test"
        let offset = text.find("test").unwrap();
        assert_eq!(sentence_at(text, offset).trim(), "This is a test sentence.");
    }

    #[test]
    fn test_sentence_at_first_sentence() {
        let text = "Hello world. More text.";
        assert_eq!(sentence_at(text, 6), "Hello world.");
    }

    #[test]
    fn test_sentence_at_no_leading_punctuation_keeps_full_prefix() {
        let text = "this has no capital but it ends. Next.";
        let offset = text.find("no").unwrap();
        assert_eq!(sentence_at(text, offset), "this has no capital but it ends.");
    }

    #[test]
    fn test_sentence_at_unpunctuated_tail() {
        let text = "First one. trailing fragment";
        let offset = text.find("fragment").unwrap();
        assert_eq!(sentence_at(text, offset), " trailing fragment");
    }

    #[test]
    fn test_sentence_at_multibyte_text() {
        let text = "Él habla. Ella escucha. Fin.";
        // 13 characters in lands inside "Ella", past the accented É
        assert_eq!(sentence_at(text, 13).trim(), "Ella escucha.");
    }
}
