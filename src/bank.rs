use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::types::{PatternGroup, PatternTag, RecordKey, Uid};

/// Subject category a question belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// Japanese language.
    Japanese,
    /// Mathematics.
    Math,
    /// English language.
    English,
    /// Natural sciences.
    Science,
    /// Social studies.
    SocialStudies,
}

impl Subject {
    /// Canonical iteration order used for assembly and reporting.
    pub const ALL: [Subject; 5] = [
        Subject::Japanese,
        Subject::Math,
        Subject::English,
        Subject::Science,
        Subject::SocialStudies,
    ];

    /// Lowercase tag used in fingerprints, record keys, and log fields.
    pub fn tag(&self) -> &'static str {
        match self {
            Subject::Japanese => "japanese",
            Subject::Math => "math",
            Subject::English => "english",
            Subject::Science => "science",
            Subject::SocialStudies => "social_studies",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// School grade band a question targets.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GradeLevel {
    /// Lower grade band.
    Junior,
    /// Upper grade band.
    Senior,
}

impl GradeLevel {
    /// Both grade bands, in canonical order.
    pub const ALL: [GradeLevel; 2] = [GradeLevel::Junior, GradeLevel::Senior];

    /// Lowercase tag used in record keys and log fields.
    pub fn tag(&self) -> &'static str {
        match self {
            GradeLevel::Junior => "junior",
            GradeLevel::Senior => "senior",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Difficulty band. The declaration order doubles as the fixed priority
/// order used to break quota-deficit ties during selection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Warm-up questions.
    Low,
    /// Standard questions.
    Medium,
    /// Stretch questions.
    High,
}

impl Difficulty {
    /// All difficulty bands, lowest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Medium, Difficulty::High];

    /// Lowercase tag used in record keys and log fields.
    pub fn tag(&self) -> &'static str {
        match self {
            Difficulty::Low => "low",
            Difficulty::Medium => "medium",
            Difficulty::High => "high",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Unvalidated candidate question as produced by a content generator.
///
/// Field names follow the generators' camelCase wire form. Enum membership
/// for subject/grade/difficulty is enforced here at parse time; the quality
/// gate checks everything the type system cannot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    /// Subject category.
    pub subject: Subject,
    /// Target grade band.
    pub grade_level: GradeLevel,
    /// Difficulty band.
    pub difficulty: Difficulty,
    /// Fine-grained pattern tag; may be empty.
    #[serde(default)]
    pub topic_pattern: PatternTag,
    /// Optional coarser grouping for repetition capping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_group: Option<PatternGroup>,
    /// Question body.
    pub prompt: String,
    /// Answer choices; the gate requires exactly four usable entries.
    pub choices: Vec<String>,
    /// Index of the correct choice.
    pub correct_index: usize,
    /// Explanation shown after grading.
    #[serde(default)]
    pub explanation: String,
}

impl RawQuestion {
    /// Pattern group this record caps under: explicit group, else the
    /// pattern tag, else the fixed fallback label.
    pub fn resolved_pattern_group(&self) -> PatternGroup {
        match self.pattern_group.as_deref() {
            Some(group) if !group.trim().is_empty() => group.to_string(),
            _ if !self.topic_pattern.trim().is_empty() => self.topic_pattern.clone(),
            _ => crate::constants::gate::FALLBACK_PATTERN_GROUP.to_string(),
        }
    }
}

/// Validated, fingerprinted question owned by the candidate pool.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    /// Subject category.
    pub subject: Subject,
    /// Target grade band.
    pub grade: GradeLevel,
    /// Difficulty band.
    pub difficulty: Difficulty,
    /// Fine-grained pattern tag.
    pub pattern: PatternTag,
    /// Coarser pattern grouping used for repetition capping.
    pub pattern_group: PatternGroup,
    /// Question body.
    pub prompt: String,
    /// Exactly four answer choices.
    pub choices: [String; 4],
    /// Index of the correct choice, validated to be in range.
    pub correct_index: usize,
    /// Explanation shown after grading.
    pub explanation: String,
    /// Content-identity fingerprint.
    pub uid: Uid,
    /// Stable object identity assigned at pool construction.
    pub key: RecordKey,
}

impl QuestionRecord {
    /// Text of the correct choice. The index is validated at construction.
    pub fn correct_text(&self) -> &str {
        &self.choices[self.correct_index]
    }
}

/// Per-question answer slot, unanswered until the player commits a choice.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerSlot {
    /// Index of the choice the player picked, if any.
    pub chosen: Option<usize>,
}

impl AnswerSlot {
    /// Whether a choice has been committed.
    pub fn is_answered(&self) -> bool {
        self.chosen.is_some()
    }
}

/// Assembled quiz: the shuffled question list plus parallel answer slots.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quiz {
    /// Questions in final (shuffled) order.
    pub questions: Vec<QuestionRecord>,
    /// One slot per question, initialized unanswered.
    pub answers: Vec<AnswerSlot>,
}

impl Quiz {
    /// Wrap an ordered question list with fresh answer slots.
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        let answers = vec![AnswerSlot::default(); questions.len()];
        Self { questions, answers }
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the quiz holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Uids of every question, in quiz order.
    pub fn uids(&self) -> Vec<Uid> {
        self.questions.iter().map(|q| q.uid.clone()).collect()
    }
}
