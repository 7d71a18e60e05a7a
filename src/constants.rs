/// Constants used by candidate scoring.
pub mod scoring {
    /// Penalty added when a candidate's uid appeared in the previous session.
    ///
    /// Large enough to outrank any realistic pattern-pressure total, small
    /// enough that a starved bucket can still fall back on repeats.
    pub const PREVIOUS_SESSION_PENALTY: f64 = 300.0;
    /// Per-occurrence weight for the candidate's pattern group within the
    /// current subject slice.
    pub const SUBJECT_REPEAT_WEIGHT: f64 = 15.0;
    /// Per-occurrence weight for the candidate's pattern group across the
    /// whole quiz so far. Kept below the subject weight so subject-local
    /// pressure dominates.
    pub const GLOBAL_REPEAT_WEIGHT: f64 = 5.0;
    /// Upper bound (exclusive) of the random jitter that breaks exact ties.
    pub const TIE_JITTER: f64 = 0.001;
}

/// Constants used by subject selection and the relaxation ladder.
pub mod selection {
    /// Default cap on how often one pattern group may appear in a subject
    /// slice before the ladder has to relax.
    pub const DEFAULT_MAX_PER_GROUP: usize = 2;
    /// How much the relaxed ladder level raises each pattern cap.
    pub const RELAXED_CAP_STEP: usize = 1;
    /// Minimum working-pool size before previous-session uids are excluded
    /// up front instead of merely penalized.
    pub const LIGHT_AVOID_MIN_POOL: usize = 25;
    /// Minimum candidates that must survive the up-front exclusion for it
    /// to be kept.
    pub const LIGHT_AVOID_MIN_REMAINING: usize = 5;
}

/// Constants used by the quality gate and fingerprinting.
pub mod gate {
    /// Required number of answer choices per question.
    pub const CHOICE_COUNT: usize = 4;
    /// Separator between fingerprint fields (subject, prompt, choices, answer).
    pub const FINGERPRINT_SEPARATOR: &str = "::";
    /// Separator between the sorted choice texts inside a fingerprint.
    pub const CHOICE_SEPARATOR: &str = "|";
    /// Pattern group assigned when a record carries no usable pattern tag.
    pub const FALLBACK_PATTERN_GROUP: &str = "misc";
    /// Choice texts that are not real answers. Compared after normalization,
    /// so case and width variants match too.
    pub const PLACEHOLDER_CHOICES: &[&str] = &[
        "none of the above",
        "all of the above",
        "unknown",
        "n/a",
        "not applicable",
        "cannot be determined",
        "-",
        "どれも当てはまらない",
        "上のどれでもない",
        "該当なし",
    ];
}

/// Constants used by previous-session persistence.
pub mod session {
    /// Version tag for persisted recent-uid payloads.
    pub const RECENT_UIDS_VERSION: u32 = 1;
    /// Maximum number of uids kept in a persisted payload.
    pub const MAX_STORED_UIDS: usize = 200;
    /// Default filename for the file-backed session store.
    pub const DEFAULT_STORE_FILENAME: &str = "recent_uids.json";
}

/// Constants used by quiz assembly defaults.
pub mod assembly {
    /// Default number of questions drawn per subject.
    pub const DEFAULT_SLICE_PER_SUBJECT: usize = 5;
    /// Default RNG seed for reproducible assembly.
    pub const DEFAULT_SEED: u64 = 42;
    /// Default target fraction of low-difficulty questions per slice.
    pub const DEFAULT_LOW_RATIO: f64 = 0.2;
    /// Default target fraction of medium-difficulty questions per slice.
    pub const DEFAULT_MEDIUM_RATIO: f64 = 0.5;
    /// Default target fraction of high-difficulty questions per slice.
    pub const DEFAULT_HIGH_RATIO: f64 = 0.3;
}
