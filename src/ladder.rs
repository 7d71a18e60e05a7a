//! Constraint-relaxation ladder walked when no candidate is admissible.

use crate::bank::QuestionRecord;
use crate::constants::selection::RELAXED_CAP_STEP;
use crate::state::SelectionState;

/// Pattern-repetition caps in force for one subject slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiversityCaps {
    /// Max appearances of one pattern group within the subject slice.
    pub subject_cap: usize,
    /// Max appearances of one pattern group across the whole quiz.
    pub global_cap: usize,
}

impl DiversityCaps {
    /// Caps for a subject pool spanning `distinct_groups` pattern groups.
    ///
    /// A pool with fewer groups than the slice needs cannot honor a tight
    /// cap, so the subject cap widens to `ceil(slice / groups)`; the global
    /// bound tracks the widened value.
    pub fn for_pool(slice_size: usize, configured_cap: usize, distinct_groups: usize) -> Self {
        let groups = distinct_groups.max(1);
        let widened = configured_cap.max(slice_size.div_ceil(groups));
        Self {
            subject_cap: widened,
            global_cap: widened,
        }
    }
}

/// Constraint-strictness level for one admission check.
///
/// The ladder loosens the diversity constraints only; subject, grade, and
/// difficulty filters are relaxed separately by the selector's pool
/// widening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelaxationLevel {
    /// Unique content, both pattern caps enforced as computed.
    Strict,
    /// Unique content, both pattern caps raised by one step.
    Relaxed,
    /// Anything goes. Last resort for critically small pools; picks made
    /// here may repeat content and are flagged by the selector.
    Free,
}

impl RelaxationLevel {
    /// Walk order. Each level is evaluated against the current candidate
    /// subset until one admits at least one candidate.
    pub const LADDER: [RelaxationLevel; 3] = [
        RelaxationLevel::Strict,
        RelaxationLevel::Relaxed,
        RelaxationLevel::Free,
    ];

    /// Whether this level still refuses to repeat already-used content.
    pub fn requires_unique_content(self) -> bool {
        !matches!(self, RelaxationLevel::Free)
    }

    /// Whether the candidate passes this level's constraints.
    ///
    /// With `enforce_caps` off the pattern caps are skipped at every level;
    /// uid uniqueness still holds everywhere below `Free`.
    pub fn admits(
        self,
        record: &QuestionRecord,
        state: &SelectionState,
        caps: DiversityCaps,
        enforce_caps: bool,
    ) -> bool {
        if self.requires_unique_content() && state.uid_used(&record.uid) {
            return false;
        }
        let step = match self {
            RelaxationLevel::Strict => 0,
            RelaxationLevel::Relaxed => RELAXED_CAP_STEP,
            RelaxationLevel::Free => return true,
        };
        if !enforce_caps {
            return true;
        }
        let subject_count = state.subject_count(record.subject, &record.pattern_group);
        let global_count = state.global_count(&record.pattern_group);
        subject_count < caps.subject_cap + step && global_count < caps.global_cap + step
    }
}
