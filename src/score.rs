//! Candidate desirability scoring.

use rand::Rng;

use crate::bank::QuestionRecord;
use crate::constants::scoring::{
    GLOBAL_REPEAT_WEIGHT, PREVIOUS_SESSION_PENALTY, SUBJECT_REPEAT_WEIGHT, TIE_JITTER,
};
use crate::rng::DeterministicRng;
use crate::state::SelectionState;

/// Score a candidate against the running selection state. Lower is better.
///
/// A previous-session repeat takes a large flat penalty; each prior
/// appearance of the candidate's pattern group adds pressure, with
/// subject-local occurrences weighing more than global ones; a small jitter
/// drawn from the injected RNG breaks exact ties. The RNG advance is the
/// only side effect.
pub fn score_candidate(
    record: &QuestionRecord,
    state: &SelectionState,
    rng: &mut DeterministicRng,
) -> f64 {
    let mut score = 0.0;
    if state.previously_seen(&record.uid) {
        score += PREVIOUS_SESSION_PENALTY;
    }
    score +=
        state.subject_count(record.subject, &record.pattern_group) as f64 * SUBJECT_REPEAT_WEIGHT;
    score += state.global_count(&record.pattern_group) as f64 * GLOBAL_REPEAT_WEIGHT;
    score + rng.random_range(0.0..TIE_JITTER)
}
