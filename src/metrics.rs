use std::collections::{HashMap, HashSet};

use crate::bank::Quiz;
use crate::types::{PatternGroup, Uid};

/// Aggregate spread metrics for pattern groups within one quiz.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternSpread {
    pub total: usize,
    pub groups: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub max_share: f64,
    pub per_group: Vec<GroupShare>,
}

/// Per-group share of a quiz for spread inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupShare {
    pub group: PatternGroup,
    pub count: usize,
    pub share: f64,
}

/// Overlap between a quiz and the previous session's uid set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlapReport {
    pub repeated: usize,
    pub total: usize,
    pub share: f64,
}

/// Compute pattern-group spread for an assembled quiz.
pub fn pattern_spread(quiz: &Quiz) -> Option<PatternSpread> {
    let mut counts: HashMap<PatternGroup, usize> = HashMap::new();
    for question in &quiz.questions {
        *counts.entry(question.pattern_group.clone()).or_insert(0) += 1;
    }
    if counts.is_empty() {
        return None;
    }
    let total: usize = counts.values().sum();
    let groups = counts.len();
    let min = *counts.values().min().expect("counts non-empty");
    let max = *counts.values().max().expect("counts non-empty");
    let mean = total as f64 / groups as f64;
    let max_share = if total == 0 {
        0.0
    } else {
        max as f64 / total as f64
    };
    let mut per_group: Vec<GroupShare> = counts
        .iter()
        .map(|(group, count)| GroupShare {
            group: group.clone(),
            count: *count,
            share: if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64
            },
        })
        .collect();
    per_group.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.group.cmp(&b.group)));
    Some(PatternSpread {
        total,
        groups,
        min,
        max,
        mean,
        max_share,
        per_group,
    })
}

/// Count how many of the quiz's questions repeat the previous session.
pub fn session_overlap(quiz: &Quiz, previous: &HashSet<Uid>) -> OverlapReport {
    let total = quiz.len();
    let repeated = quiz
        .questions
        .iter()
        .filter(|question| previous.contains(&question.uid))
        .count();
    let share = if total == 0 {
        0.0
    } else {
        repeated as f64 / total as f64
    };
    OverlapReport {
        repeated,
        total,
        share,
    }
}
