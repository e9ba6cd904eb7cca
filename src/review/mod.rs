pub mod schedule;
pub mod sm2;

pub use schedule::{REVIEW_INTERVAL_DAYS, SECONDS_PER_DAY, SECTION_COUNT, next_lesson_review};
pub use sm2::{ReviewState, next_review_delay_secs, practice};
