//! Per-build mutable selection state.

use std::collections::{HashMap, HashSet};

use crate::bank::{QuestionRecord, Subject};
use crate::types::{PatternGroup, Uid};

/// Mutable state scoped to one quiz build.
///
/// Created fresh for every build, owned exclusively by that call, threaded
/// by reference through selection and scoring, and discarded once the quiz
/// is assembled.
#[derive(Debug, Default)]
pub struct SelectionState {
    used_uids: HashSet<Uid>,
    global_group_counts: HashMap<PatternGroup, usize>,
    subject_group_counts: HashMap<Subject, HashMap<PatternGroup, usize>>,
    previous_session: HashSet<Uid>,
}

impl SelectionState {
    /// Fresh state carrying the previous session's uid set.
    pub fn new(previous_session: HashSet<Uid>) -> Self {
        Self {
            previous_session,
            ..Self::default()
        }
    }

    /// Whether this uid is already placed in the quiz being built.
    pub fn uid_used(&self, uid: &str) -> bool {
        self.used_uids.contains(uid)
    }

    /// Whether this uid appeared in the previous session.
    pub fn previously_seen(&self, uid: &str) -> bool {
        self.previous_session.contains(uid)
    }

    /// How often this pattern group appears across the whole quiz so far.
    pub fn global_count(&self, group: &str) -> usize {
        self.global_group_counts.get(group).copied().unwrap_or(0)
    }

    /// How often this pattern group appears in this subject's slice so far.
    pub fn subject_count(&self, subject: Subject, group: &str) -> usize {
        self.subject_group_counts
            .get(&subject)
            .and_then(|counts| counts.get(group))
            .copied()
            .unwrap_or(0)
    }

    /// Record a selection: marks the uid used and bumps both pattern
    /// counters.
    pub fn note_selection(&mut self, record: &QuestionRecord) {
        self.used_uids.insert(record.uid.clone());
        *self
            .global_group_counts
            .entry(record.pattern_group.clone())
            .or_insert(0) += 1;
        *self
            .subject_group_counts
            .entry(record.subject)
            .or_default()
            .entry(record.pattern_group.clone())
            .or_insert(0) += 1;
    }

    /// The previous session's uid set.
    pub fn previous_session(&self) -> &HashSet<Uid> {
        &self.previous_session
    }
}
