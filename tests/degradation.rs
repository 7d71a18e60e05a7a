use std::collections::HashSet;
use std::sync::Arc;

use quizzer::{
    AssemblyConfig, AssemblyError, CandidatePool, Difficulty, GradeLevel, QuestionRecord,
    QuizAssembler, QuizFilters, Subject,
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
        pattern: group.to_string(),
        pattern_group: group.to_string(),
        prompt: format!("{subject} question {serial}"),
        choices: [
            format!("a{serial}"),
            format!("b{serial}"),
            format!("c{serial}"),
            format!("d{serial}"),
        ],
        correct_index: 0,
        explanation: String::new(),
        uid: uid.clone(),
        key: uid,
    }
}

fn single_subject_config(subject: Subject) -> AssemblyConfig {
    AssemblyConfig {
        subjects: vec![subject],
        ..AssemblyConfig::default()
    }
}

#[test]
fn difficulty_filter_widens_before_failing() {
    let mut records = Vec::new();
    for serial in 0..3 {
        records.push(build_record(
            Subject::Math,
            GradeLevel::Junior,
            Difficulty::High,
            "geometry",
            serial,
        ));
    }
    for serial in 3..15 {
        records.push(build_record(
            Subject::Math,
            GradeLevel::Junior,
            Difficulty::Medium,
            &format!("g{}", serial % 4),
            serial,
        ));
    }
    let pool = Arc::new(CandidatePool::from_records(records));
    let assembler = QuizAssembler::new(single_subject_config(Subject::Math), pool).unwrap();

    let filters = QuizFilters {
        grades: Vec::new(),
        difficulties: vec![Difficulty::High],
    };
    let quiz = assembler
        .build_quiz_with_history(&filters, &HashSet::new())
        .unwrap();
    assert_eq!(quiz.len(), 5);
}

#[test]
fn grade_filter_widens_after_difficulty() {
    let mut records = Vec::new();
    for serial in 0..13 {
        records.push(build_record(
            Subject::Science,
            GradeLevel::Junior,
            Difficulty::Medium,
            &format!("g{}", serial % 4),
            serial,
        ));
    }
    for serial in 13..15 {
        records.push(build_record(
            Subject::Science,
            GradeLevel::Senior,
            Difficulty::Low,
            "senior_only",
            serial,
        ));
    }
    let pool = Arc::new(CandidatePool::from_records(records));
    let assembler = QuizAssembler::new(single_subject_config(Subject::Science), pool).unwrap();

    let filters = QuizFilters {
        grades: vec![GradeLevel::Senior],
        difficulties: vec![Difficulty::High],
    };
    let quiz = assembler
        .build_quiz_with_history(&filters, &HashSet::new())
        .unwrap();
    assert_eq!(quiz.len(), 5);
}

#[test]
fn exhausted_subject_pool_is_fatal() {
    let records = (0..3)
        .map(|serial| {
            build_record(
                Subject::Math,
                GradeLevel::Junior,
                Difficulty::Medium,
                "arith",
                serial,
            )
        })
        .collect();
    let pool = Arc::new(CandidatePool::from_records(records));
    let assembler = QuizAssembler::new(single_subject_config(Subject::Math), pool).unwrap();

    let err = assembler
        .build_quiz_with_history(&QuizFilters::default(), &HashSet::new())
        .unwrap_err();
    match err {
        AssemblyError::PoolExhausted { subject, missing } => {
            assert_eq!(subject, Subject::Math);
            assert_eq!(missing, 2);
        }
        other => panic!("expected pool exhaustion, got {other:?}"),
    }
}

#[test]
fn widening_stays_scoped_to_the_short_subject() {
    let mut records = Vec::new();
    for serial in 0..15 {
        records.push(build_record(
            Subject::Math,
            GradeLevel::Junior,
            Difficulty::Medium,
            &format!("g{}", serial % 5),
            serial,
        ));
    }
    for serial in 0..5 {
        records.push(build_record(
            Subject::English,
            GradeLevel::Junior,
            Difficulty::Low,
            &format!("vocab{serial}"),
            serial,
        ));
    }
    let pool = Arc::new(CandidatePool::from_records(records));
    let config = AssemblyConfig {
        subjects: vec![Subject::Math, Subject::English],
        ..AssemblyConfig::default()
    };
    let assembler = QuizAssembler::new(config, pool).unwrap();

    let filters = QuizFilters {
        grades: Vec::new(),
        difficulties: vec![Difficulty::Medium],
    };
    let quiz = assembler
        .build_quiz_with_history(&filters, &HashSet::new())
        .unwrap();

    assert_eq!(quiz.len(), 10);
    let math: Vec<_> = quiz
        .questions
        .iter()
        .filter(|q| q.subject == Subject::Math)
        .collect();
    let english: Vec<_> = quiz
        .questions
        .iter()
        .filter(|q| q.subject == Subject::English)
        .collect();
    assert_eq!(math.len(), 5);
    assert_eq!(english.len(), 5);
    assert!(math.iter().all(|q| q.difficulty == Difficulty::Medium));
    assert!(english.iter().all(|q| q.difficulty == Difficulty::Low));
}

#[test]
fn cloned_records_repeat_only_under_free_relaxation() {
    let template = build_record(
        Subject::Math,
        GradeLevel::Junior,
        Difficulty::Medium,
        "arith",
        0,
    );
    let mut records = vec![template.clone(), template.clone(), template];
    records.push(build_record(
        Subject::Math,
        GradeLevel::Junior,
        Difficulty::Medium,
        "geometry",
        1,
    ));
    records.push(build_record(
        Subject::Math,
        GradeLevel::Junior,
        Difficulty::Medium,
        "fractions",
        2,
    ));
    let pool = Arc::new(CandidatePool::from_records(records));
    let assembler = QuizAssembler::new(single_subject_config(Subject::Math), pool).unwrap();

    let quiz = assembler
        .build_quiz_with_history(&QuizFilters::default(), &HashSet::new())
        .unwrap();

    assert_eq!(quiz.len(), 5);
    let uids = quiz.uids();
    let unique: HashSet<_> = uids.iter().cloned().collect();
    assert_eq!(unique.len(), 3);
    let clone_uid = "math_arith_0";
    assert_eq!(uids.iter().filter(|uid| uid.as_str() == clone_uid).count(), 3);
}
