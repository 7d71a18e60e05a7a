use std::io;

use thiserror::Error;

use crate::bank::Subject;
use crate::gate::CandidateDefect;

/// Error type for assembly, configuration, and persistence failures.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("candidate {index} rejected: {defect}")]
    InvalidCandidate {
        index: usize,
        defect: CandidateDefect,
    },
    #[error("not enough questions for subject '{subject}': {missing} slot(s) unfilled")]
    PoolExhausted { subject: Subject, missing: usize },
    #[error("assembled {actual} questions where {expected} were required")]
    AssemblyIncomplete { expected: usize, actual: usize },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("session store failure: {0}")]
    SessionStore(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
