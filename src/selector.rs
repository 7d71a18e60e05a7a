//! Per-subject selection: pool widening, bucket targeting, ladder walk.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::bank::{Difficulty, QuestionRecord, Subject};
use crate::config::{QuizFilters, SelectorOptions};
use crate::constants::selection::{LIGHT_AVOID_MIN_POOL, LIGHT_AVOID_MIN_REMAINING};
use crate::errors::AssemblyError;
use crate::ladder::{DiversityCaps, RelaxationLevel};
use crate::pool::CandidatePool;
use crate::quota::SubjectQuota;
use crate::rng::DeterministicRng;
use crate::score::score_candidate;
use crate::state::SelectionState;

/// Select one subject's slice of the quiz.
///
/// Walks the subject through pool construction (with filter widening when
/// the narrow pool cannot fill the slice), then picks the best-scoring
/// admissible candidate once per slot, targeting the difficulty bucket with
/// the largest remaining quota deficit. The slice size is the quota total.
pub fn select_for_subject(
    subject: Subject,
    filters: &QuizFilters,
    quota: SubjectQuota,
    pool: &CandidatePool,
    state: &mut SelectionState,
    options: SelectorOptions,
    rng: &mut DeterministicRng,
) -> Result<Vec<QuestionRecord>, AssemblyError> {
    let slice_size = quota.total();
    if slice_size == 0 {
        return Ok(Vec::new());
    }

    let mut working = build_working_pool(subject, filters, pool, slice_size);
    if working.len() < slice_size {
        return Err(AssemblyError::PoolExhausted {
            subject,
            missing: slice_size - working.len(),
        });
    }

    // With plenty of candidates, drop previous-session repeats up front
    // instead of relying on the scorer penalty alone.
    if options.avoid_previous
        && !state.previous_session().is_empty()
        && working.len() > LIGHT_AVOID_MIN_POOL
    {
        let filtered: Vec<&QuestionRecord> = working
            .iter()
            .copied()
            .filter(|record| !state.previously_seen(&record.uid))
            .collect();
        if filtered.len() >= LIGHT_AVOID_MIN_REMAINING.max(slice_size) {
            working = filtered;
        }
    }

    let distinct_groups: HashSet<&str> = working
        .iter()
        .map(|record| record.pattern_group.as_str())
        .collect();
    let caps = DiversityCaps::for_pool(slice_size, options.max_per_group, distinct_groups.len());
    if caps.subject_cap > options.max_per_group {
        debug!(
            %subject,
            cap = caps.subject_cap,
            groups = distinct_groups.len(),
            "pattern cap auto-widened"
        );
    }

    let mut chosen: Vec<QuestionRecord> = Vec::with_capacity(slice_size);
    let mut chosen_by_difficulty = [0usize; 3];

    for _ in 0..slice_size {
        if working.is_empty() {
            return Err(AssemblyError::PoolExhausted {
                subject,
                missing: slice_size - chosen.len(),
            });
        }

        let bucket = preferred_difficulty(quota, chosen_by_difficulty);
        let mut subset: Vec<usize> = working
            .iter()
            .enumerate()
            .filter(|(_, record)| record.difficulty == bucket)
            .map(|(index, _)| index)
            .collect();
        // Quota adherence is secondary to filling the slot.
        if subset.is_empty() {
            subset = (0..working.len()).collect();
        }

        let (level, admitted) =
            admissible_candidates(&working, &subset, state, caps, options.avoid_similar);
        let mut scored: Vec<(usize, f64)> = Vec::with_capacity(admitted.len());
        for index in admitted {
            scored.push((index, score_candidate(working[index], state, rng)));
        }
        let Some(&(position, _)) = scored
            .iter()
            .min_by(|(_, left), (_, right)| left.total_cmp(right))
        else {
            return Err(AssemblyError::PoolExhausted {
                subject,
                missing: slice_size - chosen.len(),
            });
        };

        let record = working.remove(position);
        if level != RelaxationLevel::Strict {
            debug!(%subject, level = ?level, "diversity constraints relaxed");
        }
        if level == RelaxationLevel::Free && state.uid_used(&record.uid) {
            warn!(%subject, uid = %record.uid, "re-using content under free relaxation");
        }
        state.note_selection(record);
        chosen_by_difficulty[difficulty_slot(record.difficulty)] += 1;
        chosen.push(record.clone());
    }

    Ok(chosen)
}

/// Subject pool after filter widening: the narrow grade + difficulty pool
/// when it can fill the slice, otherwise all difficulties, otherwise the
/// whole subject. The subject filter is never dropped.
fn build_working_pool<'p>(
    subject: Subject,
    filters: &QuizFilters,
    pool: &'p CandidatePool,
    slice_size: usize,
) -> Vec<&'p QuestionRecord> {
    let subject_records = pool.records_for_subject(subject);
    let grades = filters.effective_grades();
    let difficulties = filters.effective_difficulties();

    let narrow: Vec<&QuestionRecord> = subject_records
        .iter()
        .copied()
        .filter(|record| {
            grades.contains(&record.grade) && difficulties.contains(&record.difficulty)
        })
        .collect();
    if narrow.len() >= slice_size {
        return narrow;
    }

    let all_difficulties: Vec<&QuestionRecord> = subject_records
        .iter()
        .copied()
        .filter(|record| grades.contains(&record.grade))
        .collect();
    if all_difficulties.len() >= slice_size {
        debug!(
            %subject,
            narrow = narrow.len(),
            widened = all_difficulties.len(),
            "difficulty filter widened"
        );
        return all_difficulties;
    }

    debug!(
        %subject,
        narrow = narrow.len(),
        widened = subject_records.len(),
        "grade filter widened"
    );
    subject_records
}

/// Walk the ladder until a level admits at least one candidate from the
/// subset. Returns the level that produced the admitted indexes.
fn admissible_candidates(
    working: &[&QuestionRecord],
    subset: &[usize],
    state: &SelectionState,
    caps: DiversityCaps,
    enforce_caps: bool,
) -> (RelaxationLevel, Vec<usize>) {
    for level in RelaxationLevel::LADDER {
        let admitted: Vec<usize> = subset
            .iter()
            .copied()
            .filter(|&index| level.admits(working[index], state, caps, enforce_caps))
            .collect();
        if !admitted.is_empty() {
            return (level, admitted);
        }
    }
    (RelaxationLevel::Free, Vec::new())
}

/// Difficulty bucket with the largest remaining quota deficit; ties keep
/// the fixed low-to-high priority order.
fn preferred_difficulty(quota: SubjectQuota, chosen: [usize; 3]) -> Difficulty {
    let mut best = Difficulty::ALL[0];
    let mut best_deficit = deficit(quota, chosen, best);
    for difficulty in Difficulty::ALL.into_iter().skip(1) {
        let current = deficit(quota, chosen, difficulty);
        if current > best_deficit {
            best = difficulty;
            best_deficit = current;
        }
    }
    best
}

fn deficit(quota: SubjectQuota, chosen: [usize; 3], difficulty: Difficulty) -> i64 {
    quota.target(difficulty) as i64 - chosen[difficulty_slot(difficulty)] as i64
}

fn difficulty_slot(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Low => 0,
        Difficulty::Medium => 1,
        Difficulty::High => 2,
    }
}
