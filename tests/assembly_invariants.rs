use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use quizzer::{
    AssemblyConfig, CandidatePool, Difficulty, GradeLevel, QuestionRecord, QuizAssembler,
    QuizFilters, Subject,
};

fn build_record(
    subject: Subject,
    grade: GradeLevel,
    difficulty: Difficulty,
    group: &str,
    serial: usize,
) -> QuestionRecord {
    let uid = format!("{subject}_{group}_{serial}");
    QuestionRecord {
        subject,
        grade,
        difficulty,
        pattern: format!("{group}_fine"),
        pattern_group: group.to_string(),
        prompt: format!("{subject} question {serial}"),
        choices: [
            format!("choice a {serial}"),
            format!("choice b {serial}"),
            format!("choice c {serial}"),
            format!("choice d {serial}"),
        ],
        correct_index: serial % 4,
        explanation: String::new(),
        uid: uid.clone(),
        key: uid,
    }
}

/// 30 records per subject: 6 low, 18 medium, 6 high, spread over 6 pattern
/// groups and both grade bands.
fn build_bank() -> Vec<QuestionRecord> {
    let mut records = Vec::new();
    for subject in Subject::ALL {
        for serial in 0..30 {
            let difficulty = match serial % 5 {
                0 => Difficulty::Low,
                3 => Difficulty::High,
                _ => Difficulty::Medium,
            };
            let grade = if serial % 2 == 0 {
                GradeLevel::Junior
            } else {
                GradeLevel::Senior
            };
            records.push(build_record(
                subject,
                grade,
                difficulty,
                &format!("g{}", serial % 6),
                serial,
            ));
        }
    }
    records
}

fn build_config(seed: u64) -> AssemblyConfig {
    AssemblyConfig {
        seed,
        ..AssemblyConfig::default()
    }
}

fn build_assembler(seed: u64) -> QuizAssembler {
    let pool = Arc::new(CandidatePool::from_records(build_bank()));
    QuizAssembler::new(build_config(seed), pool).unwrap()
}

#[test]
fn assembled_quiz_fills_every_subject_slice() {
    let assembler = build_assembler(42);
    let quiz = assembler
        .build_quiz_with_history(&QuizFilters::default(), &HashSet::new())
        .unwrap();

    assert_eq!(quiz.len(), 25);
    assert_eq!(quiz.answers.len(), 25);

    let mut per_subject: HashMap<Subject, usize> = HashMap::new();
    for question in &quiz.questions {
        *per_subject.entry(question.subject).or_insert(0) += 1;
    }
    for subject in Subject::ALL {
        assert_eq!(
            per_subject.get(&subject).copied().unwrap_or(0),
            5,
            "subject {subject} should contribute a full slice"
        );
    }
}

#[test]
fn no_uid_appears_twice_in_a_quiz() {
    let assembler = build_assembler(43);
    let quiz = assembler
        .build_quiz_with_history(&QuizFilters::default(), &HashSet::new())
        .unwrap();

    let unique: HashSet<_> = quiz.uids().into_iter().collect();
    assert_eq!(unique.len(), quiz.len());
}

#[test]
fn difficulty_quotas_match_the_default_ratios() {
    let assembler = build_assembler(44);
    let quiz = assembler
        .build_quiz_with_history(&QuizFilters::default(), &HashSet::new())
        .unwrap();

    let mut per_subject: HashMap<Subject, (usize, usize, usize)> = HashMap::new();
    for question in &quiz.questions {
        let entry = per_subject.entry(question.subject).or_insert((0, 0, 0));
        match question.difficulty {
            Difficulty::Low => entry.0 += 1,
            Difficulty::Medium => entry.1 += 1,
            Difficulty::High => entry.2 += 1,
        }
    }
    for subject in Subject::ALL {
        assert_eq!(
            per_subject.get(&subject).copied().unwrap_or((0, 0, 0)),
            (1, 3, 1),
            "subject {subject} should split 5 questions as 1 low / 3 medium / 1 high"
        );
    }
}

#[test]
fn pattern_groups_respect_the_per_subject_cap() {
    let assembler = build_assembler(45);
    let quiz = assembler
        .build_quiz_with_history(&QuizFilters::default(), &HashSet::new())
        .unwrap();

    let cap = assembler.config().options.max_per_group;
    let mut counts: HashMap<(Subject, String), usize> = HashMap::new();
    for question in &quiz.questions {
        *counts
            .entry((question.subject, question.pattern_group.clone()))
            .or_insert(0) += 1;
    }
    for ((subject, group), count) in counts {
        assert!(
            count <= cap,
            "{subject}/{group} appears {count} times, cap is {cap}"
        );
    }
}

#[test]
fn same_seed_reproduces_the_same_quiz() {
    let run = || {
        build_assembler(7)
            .build_quiz_with_history(&QuizFilters::default(), &HashSet::new())
            .unwrap()
            .uids()
    };

    assert_eq!(run(), run());
}

#[test]
fn sequential_builds_on_one_assembler_differ() {
    let assembler = build_assembler(8);
    let filters = QuizFilters::default();

    let first = assembler
        .build_quiz_with_history(&filters, &HashSet::new())
        .unwrap()
        .uids();
    let second = assembler
        .build_quiz_with_history(&filters, &HashSet::new())
        .unwrap()
        .uids();

    assert_ne!(first, second);
}

#[test]
fn grade_filter_narrows_every_selected_question() {
    let assembler = build_assembler(9);
    let filters = QuizFilters {
        grades: vec![GradeLevel::Junior],
        difficulties: Vec::new(),
    };

    let quiz = assembler
        .build_quiz_with_history(&filters, &HashSet::new())
        .unwrap();
    assert_eq!(quiz.len(), 25);
    assert!(
        quiz.questions
            .iter()
            .all(|question| question.grade == GradeLevel::Junior)
    );
}

#[test]
fn preflight_reports_full_coverage_for_the_fixture_bank() {
    let assembler = build_assembler(10);
    let coverage = assembler.preflight(&QuizFilters::default());

    assert_eq!(coverage.len(), 5);
    for entry in coverage {
        assert_eq!(entry.total, 30);
        assert_eq!(entry.distinct_groups, 6);
        assert!(entry.covers_slice);
    }
}
