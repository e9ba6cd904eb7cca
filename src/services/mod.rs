pub mod dictionary;
pub mod lessons;
pub mod terms;

pub use dictionary::{DictionaryEntry, DictionaryError, lookup_word};
pub use lessons::{Lesson, LessonError, LessonId};
pub use terms::{Term, TermError, TermId};
