pub mod resolver;
pub mod sentence;

pub use resolver::{
    ancestor_chain, pick_container, resolve_selection, ContainerText, ResolvedSelection,
    SelectionSnapshot,
};
pub use sentence::{is_inside_sentence, is_sentence_ending, sentence_at};
