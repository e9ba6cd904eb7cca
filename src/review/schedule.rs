//! The lesson review ladder: fixed, widening intervals between the seven
//! review sections of a lesson.

/// Days until the next review after completing each section, in order
pub const REVIEW_INTERVAL_DAYS: [i64; 7] = [1, 3, 5, 10, 20, 40, 50];

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Total number of review sections in a lesson
pub const SECTION_COUNT: usize = REVIEW_INTERVAL_DAYS.len();

/// The review date (unix seconds) scheduled by completing section
/// `section` (0-based) at time `completed_at`. None once the ladder is
/// exhausted.
pub fn next_lesson_review(completed_at: i64, section: usize) -> Option<i64> {
    REVIEW_INTERVAL_DAYS
        .get(section)
        .map(|days| completed_at + days * SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_widens() {
        let now = 1_700_000_000;
        assert_eq!(next_lesson_review(now, 0), Some(now + SECONDS_PER_DAY));
        assert_eq!(next_lesson_review(now, 1), Some(now + 3 * SECONDS_PER_DAY));
        assert_eq!(next_lesson_review(now, 6), Some(now + 50 * SECONDS_PER_DAY));
    }

    #[test]
    fn test_ladder_ends_after_seven_sections() {
        assert_eq!(next_lesson_review(0, 7), None);
    }
}
