#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Quiz assembly pipeline and public entry point.
pub mod assembler;
/// Question bank enums and record types.
pub mod bank;
/// Assembly configuration types.
pub mod config;
/// Centralized constants used across gating, scoring, and selection.
pub mod constants;
/// Candidate validation and content fingerprinting.
pub mod gate;
/// Pool coverage estimation helpers.
pub mod heuristics;
/// Diversity caps and the relaxation ladder.
pub mod ladder;
/// Aggregate metrics helpers.
pub mod metrics;
/// Validated candidate pools built from raw bank entries.
pub mod pool;
/// Difficulty quota planning.
pub mod quota;
/// Deterministic RNG shared across assembly.
pub mod rng;
/// Candidate scoring.
pub mod score;
/// Per-subject candidate selection.
pub mod selector;
/// Session history stores and persistence helpers.
pub mod session;
/// Selection-pass bookkeeping.
pub mod state;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;

pub use assembler::QuizAssembler;
pub use bank::{
    AnswerSlot, Difficulty, GradeLevel, QuestionRecord, Quiz, RawQuestion, Subject,
};
pub use config::{AssemblyConfig, QuizFilters, SelectorOptions};
pub use errors::AssemblyError;
pub use gate::CandidateDefect;
pub use heuristics::SubjectCoverage;
pub use ladder::{DiversityCaps, RelaxationLevel};
pub use metrics::{GroupShare, OverlapReport, PatternSpread};
pub use pool::{CandidatePool, IngestPolicy, SubjectCensus};
pub use quota::{DifficultyRatios, SubjectQuota};
pub use rng::DeterministicRng;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use state::SelectionState;
pub use types::{PatternGroup, PatternTag, RecordKey, SubjectTag, Uid};
