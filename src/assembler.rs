use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use rand::seq::SliceRandom;
use tracing::debug;

use crate::bank::Quiz;
use crate::config::{AssemblyConfig, QuizFilters};
use crate::errors::AssemblyError;
use crate::heuristics::{SubjectCoverage, subject_coverage};
use crate::metrics::{pattern_spread, session_overlap};
use crate::pool::CandidatePool;
use crate::quota::plan_quotas;
use crate::rng::DeterministicRng;
use crate::selector::select_for_subject;
use crate::session::SessionStore;
use crate::state::SelectionState;
use crate::types::Uid;

/// Deterministic quiz assembler over a validated candidate pool.
///
/// One assembler owns a seeded RNG stream: repeated builds on the same
/// instance advance the stream, while two instances created with the
/// same seed reproduce each other's quizzes build for build.
pub struct QuizAssembler {
    config: AssemblyConfig,
    pool: Arc<CandidatePool>,
    session: Option<Arc<dyn SessionStore>>,
    rng: Mutex<DeterministicRng>,
}

impl fmt::Debug for QuizAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizAssembler")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .field("has_session", &self.session.is_some())
            .field("rng", &self.rng)
            .finish()
    }
}

impl QuizAssembler {
    /// Create an assembler from `config` and a shared candidate pool.
    pub fn new(config: AssemblyConfig, pool: Arc<CandidatePool>) -> Result<Self, AssemblyError> {
        let config = config.validated()?;
        let rng = Mutex::new(DeterministicRng::new(config.seed));
        Ok(Self {
            config,
            pool,
            session: None,
            rng,
        })
    }

    /// Attach a session store used to avoid repeating the previous quiz.
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// The validated assembly configuration.
    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// The candidate pool backing this assembler.
    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// Estimate per-subject coverage for `filters` without consuming RNG state.
    pub fn preflight(&self, filters: &QuizFilters) -> Vec<SubjectCoverage> {
        subject_coverage(&self.pool, &self.config, filters)
    }

    /// Assemble a quiz, consulting the attached session store for history.
    ///
    /// The built quiz's uids are persisted back to the store so the next
    /// session can steer away from them.
    pub fn build_quiz(&self, filters: &QuizFilters) -> Result<Quiz, AssemblyError> {
        let previous = match &self.session {
            Some(store) if self.config.options.avoid_previous => store.load_recent_uids(),
            _ => HashSet::new(),
        };
        let quiz = self.build_quiz_with_history(filters, &previous)?;
        if let Some(store) = &self.session {
            store.store_recent_uids(&quiz.uids())?;
        }
        Ok(quiz)
    }

    /// Assemble a quiz against an explicit previous-session uid set.
    pub fn build_quiz_with_history(
        &self,
        filters: &QuizFilters,
        previous: &HashSet<Uid>,
    ) -> Result<Quiz, AssemblyError> {
        let mut rng = self.rng.lock().unwrap();
        let history = if self.config.options.avoid_previous {
            previous.clone()
        } else {
            HashSet::new()
        };
        let mut state = SelectionState::new(history);
        let quota = plan_quotas(self.config.slice_per_subject, self.config.ratios);

        let expected = self.config.expected_total();
        let mut questions = Vec::with_capacity(expected);
        for &subject in &self.config.subjects {
            let picked = select_for_subject(
                subject,
                filters,
                quota,
                &self.pool,
                &mut state,
                self.config.options,
                &mut rng,
            )?;
            questions.extend(picked);
        }
        questions.shuffle(&mut *rng);

        if questions.len() != expected {
            return Err(AssemblyError::AssemblyIncomplete {
                expected,
                actual: questions.len(),
            });
        }

        let quiz = Quiz::new(questions);
        if let Some(spread) = pattern_spread(&quiz) {
            debug!(
                total = spread.total,
                groups = spread.groups,
                max_share = spread.max_share,
                "assembled quiz pattern spread"
            );
        }
        let overlap = session_overlap(&quiz, previous);
        if overlap.repeated > 0 {
            debug!(
                repeated = overlap.repeated,
                total = overlap.total,
                "assembled quiz repeats previous-session questions"
            );
        }
        Ok(quiz)
    }
}
