use std::collections::HashSet;

use crate::bank::Subject;
use crate::config::{AssemblyConfig, QuizFilters};
use crate::pool::CandidatePool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCoverage {
    pub subject: Subject,
    pub total: usize,
    pub strict_eligible: usize,
    pub widened_eligible: usize,
    pub distinct_groups: usize,
    pub covers_slice: bool,
}

pub fn subject_coverage(
    pool: &CandidatePool,
    config: &AssemblyConfig,
    filters: &QuizFilters,
) -> Vec<SubjectCoverage> {
    let grades = filters.effective_grades();
    let difficulties = filters.effective_difficulties();
    config
        .subjects
        .iter()
        .map(|&subject| {
            let records = pool.records_for_subject(subject);
            let total = records.len();
            let strict_eligible = records
                .iter()
                .filter(|record| {
                    grades.contains(&record.grade) && difficulties.contains(&record.difficulty)
                })
                .count();
            let widened_eligible = records
                .iter()
                .filter(|record| grades.contains(&record.grade))
                .count();
            let distinct_groups = records
                .iter()
                .map(|record| record.pattern_group.as_str())
                .collect::<HashSet<_>>()
                .len();
            SubjectCoverage {
                subject,
                total,
                strict_eligible,
                widened_eligible,
                distinct_groups,
                covers_slice: total >= config.slice_per_subject,
            }
        })
        .collect()
}

pub fn format_coverage_line(coverage: &SubjectCoverage) -> String {
    let status = if coverage.covers_slice { "ok" } else { "short" };
    format!(
        "{}: {} total ({} strict, {} widened), {} groups [{status}]",
        coverage.subject,
        coverage.total,
        coverage.strict_eligible,
        coverage.widened_eligible,
        coverage.distinct_groups,
    )
}
