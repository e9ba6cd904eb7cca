//! SM-2 grading for term practice.
//!
//! Grades run 0 (complete blackout) to 5 (perfect recall). A grade of 3 or
//! better advances the repetition streak and grows the interval; anything
//! lower resets the streak. The ease factor moves with every grade and
//! never drops below 1.3.

/// SM-2 scheduling state carried by each term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewState {
    pub efactor: f64,
    /// Review interval, in hours
    pub interval: i64,
    /// Consecutive successful reviews
    pub repetition: i64,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            efactor: 2.5,
            interval: 0,
            repetition: 0,
        }
    }
}

/// Apply one practice grade to a term's scheduling state
pub fn practice(state: ReviewState, grade: u8) -> ReviewState {
    let grade = grade.min(5);
    let (interval, repetition) = if grade >= 3 {
        match state.repetition {
            0 => (1, 1),
            1 => (6, 2),
            _ => (
                (state.interval as f64 * state.efactor).round() as i64,
                state.repetition + 1,
            ),
        }
    } else {
        (1, 0)
    };

    let miss = (5 - grade) as f64;
    let efactor = (state.efactor + (0.1 - miss * (0.08 + miss * 0.02))).max(1.3);

    ReviewState {
        efactor,
        interval,
        repetition,
    }
}

/// Seconds from a practice until its next review. Intervals count hours,
/// which keeps early repetitions same-day.
pub fn next_review_delay_secs(interval: i64) -> i64 {
    interval * 3600
}
