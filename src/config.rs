use crate::bank::{Difficulty, GradeLevel, Subject};
use crate::constants::assembly::{DEFAULT_SEED, DEFAULT_SLICE_PER_SUBJECT};
use crate::constants::selection::DEFAULT_MAX_PER_GROUP;
use crate::errors::AssemblyError;
use crate::quota::DifficultyRatios;

/// Knobs governing admissibility during selection.
#[derive(Clone, Copy, Debug)]
pub struct SelectorOptions {
    /// Enforce pattern-repetition caps (the ladder's strict and relaxed
    /// rungs). Off means variety pressure comes from scoring alone.
    pub avoid_similar: bool,
    /// Penalize previous-session repeats, pre-excluding them when the pool
    /// is comfortably large, and persist the built quiz's uids.
    pub avoid_previous: bool,
    /// Configured cap on per-group appearances within a subject slice;
    /// widened automatically when a pool spans few groups.
    pub max_per_group: usize,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            avoid_similar: true,
            avoid_previous: true,
            max_per_group: DEFAULT_MAX_PER_GROUP,
        }
    }
}

/// Grade and difficulty restrictions from the caller's filter controls.
///
/// An empty list means "no restriction", never "select nothing".
#[derive(Clone, Debug, Default)]
pub struct QuizFilters {
    /// Admitted grade bands; empty admits all.
    pub grades: Vec<GradeLevel>,
    /// Admitted difficulty bands; empty admits all.
    pub difficulties: Vec<Difficulty>,
}

impl QuizFilters {
    /// Grades in force after empty-means-all substitution.
    pub fn effective_grades(&self) -> Vec<GradeLevel> {
        if self.grades.is_empty() {
            GradeLevel::ALL.to_vec()
        } else {
            self.grades.clone()
        }
    }

    /// Difficulties in force after empty-means-all substitution.
    pub fn effective_difficulties(&self) -> Vec<Difficulty> {
        if self.difficulties.is_empty() {
            Difficulty::ALL.to_vec()
        } else {
            self.difficulties.clone()
        }
    }
}

/// Top-level assembly configuration.
#[derive(Clone, Debug)]
pub struct AssemblyConfig {
    /// RNG seed controlling scorer jitter and the final shuffle.
    pub seed: u64,
    /// Subjects drawn from, in fixed iteration order.
    pub subjects: Vec<Subject>,
    /// Questions drawn per subject.
    pub slice_per_subject: usize,
    /// Target difficulty mix per subject slice.
    pub ratios: DifficultyRatios,
    /// Admissibility knobs.
    pub options: SelectorOptions,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            subjects: Subject::ALL.to_vec(),
            slice_per_subject: DEFAULT_SLICE_PER_SUBJECT,
            ratios: DifficultyRatios::default(),
            options: SelectorOptions::default(),
        }
    }
}

impl AssemblyConfig {
    /// Validate the configuration; returns it back for chaining.
    pub fn validated(self) -> Result<Self, AssemblyError> {
        if self.subjects.is_empty() {
            return Err(AssemblyError::Configuration(
                "at least one subject is required".to_string(),
            ));
        }
        for (position, subject) in self.subjects.iter().enumerate() {
            if self.subjects[..position].contains(subject) {
                return Err(AssemblyError::Configuration(format!(
                    "subject '{subject}' is listed more than once"
                )));
            }
        }
        self.ratios.validated()?;
        Ok(self)
    }

    /// Number of questions a successful build must return.
    pub fn expected_total(&self) -> usize {
        self.subjects.len() * self.slice_per_subject
    }
}
