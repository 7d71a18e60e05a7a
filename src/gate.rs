//! Structural validation and content fingerprinting for raw candidates.

use thiserror::Error;

use crate::bank::RawQuestion;
use crate::constants::gate::{
    CHOICE_COUNT, CHOICE_SEPARATOR, FINGERPRINT_SEPARATOR, PLACEHOLDER_CHOICES,
};
use crate::types::Uid;
use crate::utils::normalize_content;

/// Structural defect found in a raw candidate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CandidateDefect {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("expected {} choices, found {found}", CHOICE_COUNT)]
    ChoiceCount { found: usize },
    #[error("choice {index} is blank")]
    BlankChoice { index: usize },
    #[error("choice {index} is a placeholder, not an answer")]
    PlaceholderChoice { index: usize },
    #[error("choices {first} and {second} are duplicates")]
    DuplicateChoices { first: usize, second: usize },
    #[error("correct index {index} is out of range")]
    CorrectIndexOutOfRange { index: usize },
}

/// Validate a raw candidate's structural well-formedness.
///
/// Enum membership is already enforced at parse time; this covers the text
/// rules: a usable prompt, exactly four pairwise-distinct non-placeholder
/// choices, and an in-range correct index. Pure, no side effects.
pub fn check(raw: &RawQuestion) -> Result<(), CandidateDefect> {
    if raw.prompt.trim().is_empty() {
        return Err(CandidateDefect::EmptyPrompt);
    }
    if raw.choices.len() != CHOICE_COUNT {
        return Err(CandidateDefect::ChoiceCount {
            found: raw.choices.len(),
        });
    }
    let normalized: Vec<String> = raw.choices.iter().map(normalize_content).collect();
    for (index, choice) in normalized.iter().enumerate() {
        if choice.is_empty() {
            return Err(CandidateDefect::BlankChoice { index });
        }
        if PLACEHOLDER_CHOICES.contains(&choice.as_str()) {
            return Err(CandidateDefect::PlaceholderChoice { index });
        }
    }
    for first in 0..normalized.len() {
        for second in first + 1..normalized.len() {
            if normalized[first] == normalized[second] {
                return Err(CandidateDefect::DuplicateChoices { first, second });
            }
        }
    }
    if raw.correct_index >= CHOICE_COUNT {
        return Err(CandidateDefect::CorrectIndexOutOfRange {
            index: raw.correct_index,
        });
    }
    Ok(())
}

/// Content-identity fingerprint: normalized subject tag + prompt + sorted
/// choice set + correct answer text, joined with fixed separators.
///
/// Choice order does not change the fingerprint and the correct answer
/// enters as text, so re-shuffled or re-indexed exports of one question
/// collapse to the same uid. Pure, no side effects.
pub fn fingerprint(raw: &RawQuestion) -> Uid {
    let prompt = normalize_content(&raw.prompt);
    let mut choices: Vec<String> = raw.choices.iter().map(normalize_content).collect();
    let answer = choices.get(raw.correct_index).cloned().unwrap_or_default();
    choices.sort();
    [
        raw.subject.tag().to_string(),
        prompt,
        choices.join(CHOICE_SEPARATOR),
        answer,
    ]
    .join(FINGERPRINT_SEPARATOR)
}
