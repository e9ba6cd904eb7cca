//! In-memory state for one open lesson study session.
//!
//! While a lesson is open, every annotated term carries a recall grade that
//! starts at perfect and decays each time the user has to click its marker
//! to re-check the definition. Completing a review section snapshots those
//! grades for batch practice and schedules the next review off the ladder.

use std::collections::HashMap;

use crate::review::{next_lesson_review, SECTION_COUNT};
use crate::services::terms::TermId;

/// Grade a term starts the session with
const INITIAL_GRADE: u8 = 5;
/// Grade every term gets on a lesson's first completed review, regardless
/// of clicks: the first pass is reading, not recall
const FIRST_REVIEW_GRADE: u8 = 4;

/// Result of completing a review section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReview {
    /// When the next review is due (unix seconds); None when the ladder
    /// is exhausted
    pub next_review_date: Option<i64>,
    /// Sections completed after this one
    pub on_track: usize,
    /// The grades to feed into term practice
    pub grades: Vec<(TermId, u8)>,
}

/// Tracks term recall grades and review progress for an open lesson
#[derive(Debug, Default)]
pub struct StudySession {
    grades: HashMap<TermId, u8>,
    on_track: usize,
}

impl StudySession {
    /// Start a session over a lesson's terms with `on_track` sections
    /// already completed
    pub fn new(term_ids: impl IntoIterator<Item = TermId>, on_track: usize) -> Self {
        Self {
            grades: term_ids.into_iter().map(|id| (id, INITIAL_GRADE)).collect(),
            on_track,
        }
    }

    pub fn on_track(&self) -> usize {
        self.on_track
    }

    /// Sections still ahead of this lesson
    pub fn is_finished(&self) -> bool {
        self.on_track >= SECTION_COUNT
    }

    pub fn grade(&self, id: TermId) -> Option<u8> {
        self.grades.get(&id).copied()
    }

    /// Register a term created during this session
    pub fn add_term(&mut self, id: TermId) {
        self.grades.insert(id, INITIAL_GRADE);
    }

    /// Drop a term deleted during this session
    pub fn remove_term(&mut self, id: TermId) {
        self.grades.remove(&id);
    }

    /// The user clicked a term's marker to re-check it: recall was not
    /// immediate, so the grade drops one step (never below zero). Returns
    /// the new grade, or None for a term this session doesn't track.
    pub fn record_marker_click(&mut self, id: TermId) -> Option<u8> {
        let grade = self.grades.get_mut(&id)?;
        *grade = grade.saturating_sub(1);
        Some(*grade)
    }

    /// Complete the current review section at `now`: snapshot the grades,
    /// advance progress, and compute the next review date. On the first
    /// review every term is graded [`FIRST_REVIEW_GRADE`]. Returns None if
    /// the ladder is already exhausted.
    pub fn complete_section(&mut self, now: i64) -> Option<SectionReview> {
        if self.is_finished() {
            return None;
        }
        let section = self.on_track;
        if section == 0 {
            for grade in self.grades.values_mut() {
                *grade = FIRST_REVIEW_GRADE;
            }
        }
        self.on_track += 1;

        let mut grades: Vec<(TermId, u8)> =
            self.grades.iter().map(|(&id, &g)| (id, g)).collect();
        grades.sort_by_key(|&(id, _)| id);

        Some(SectionReview {
            next_review_date: next_lesson_review(now, section),
            on_track: self.on_track,
            grades,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::SECONDS_PER_DAY;

    #[test]
    fn test_terms_start_at_five() {
        let session = StudySession::new([1, 2, 3], 0);
        assert_eq!(session.grade(2), Some(5));
    }

    #[test]
    fn test_marker_clicks_decay_grade_to_zero() {
        let mut session = StudySession::new([7], 1);
        for expected in (0..5).rev() {
            assert_eq!(session.record_marker_click(7), Some(expected));
        }
        // Floor at zero
        assert_eq!(session.record_marker_click(7), Some(0));
    }

    #[test]
    fn test_click_on_unknown_term() {
        let mut session = StudySession::new([1], 0);
        assert_eq!(session.record_marker_click(99), None);
    }

    #[test]
    fn test_first_review_grades_everything_four() {
        let mut session = StudySession::new([1, 2], 0);
        session.record_marker_click(1);
        session.record_marker_click(1);

        let review = session.complete_section(1_700_000_000).unwrap();
        assert_eq!(review.grades, vec![(1, 4), (2, 4)]);
        assert_eq!(review.on_track, 1);
        assert_eq!(
            review.next_review_date,
            Some(1_700_000_000 + SECONDS_PER_DAY)
        );
    }

    #[test]
    fn test_later_reviews_keep_click_decayed_grades() {
        let mut session = StudySession::new([1, 2], 2);
        session.record_marker_click(2);

        let review = session.complete_section(1_700_000_000).unwrap();
        assert_eq!(review.grades, vec![(1, 5), (2, 4)]);
        assert_eq!(review.on_track, 3);
        assert_eq!(
            review.next_review_date,
            Some(1_700_000_000 + 5 * SECONDS_PER_DAY)
        );
    }

    #[test]
    fn test_ladder_exhausts() {
        let mut session = StudySession::new([1], 6);
        let review = session.complete_section(0).unwrap();
        assert_eq!(review.next_review_date, Some(50 * SECONDS_PER_DAY));
        assert!(session.is_finished());
        assert_eq!(session.complete_section(0), None);
    }

    #[test]
    fn test_add_and_remove_terms() {
        let mut session = StudySession::new([1], 3);
        session.add_term(2);
        assert_eq!(session.grade(2), Some(5));
        session.remove_term(1);
        assert_eq!(session.grade(1), None);
    }
}
