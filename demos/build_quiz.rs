use std::sync::Arc;

use quizzer::{
    AssemblyConfig, CandidatePool, Difficulty, FileSessionStore, GradeLevel, IngestPolicy,
    QuizAssembler, QuizFilters, RawQuestion, SessionStore, Subject,
};

fn question(
    subject: Subject,
    grade_level: GradeLevel,
    difficulty: Difficulty,
    pattern: &str,
    prompt: &str,
    choices: [&str; 4],
    correct_index: usize,
) -> RawQuestion {
    RawQuestion {
        subject,
        grade_level,
        difficulty,
        topic_pattern: pattern.to_string(),
        pattern_group: None,
        prompt: prompt.to_string(),
        choices: choices.iter().map(|c| c.to_string()).collect(),
        correct_index,
        explanation: String::new(),
    }
}

fn multiplication_drills() -> Vec<RawQuestion> {
    let mut out = Vec::new();
    for (a, b) in [(3, 4), (6, 7), (7, 8), (8, 9), (9, 6), (12, 11), (13, 7), (14, 9)] {
        let product = a * b;
        let difficulty = if product < 30 {
            Difficulty::Low
        } else if product < 100 {
            Difficulty::Medium
        } else {
            Difficulty::High
        };
        let choices = [
            (product - 2).to_string(),
            (product - 1).to_string(),
            product.to_string(),
            (product + 2).to_string(),
        ];
        out.push(question(
            Subject::Math,
            GradeLevel::Junior,
            difficulty,
            "multiplication",
            &format!("{a} x {b} = ?"),
            [&choices[0], &choices[1], &choices[2], &choices[3]],
            2,
        ));
    }
    out
}

fn build_bank() -> Vec<RawQuestion> {
    let mut bank = multiplication_drills();
    bank.push(question(
        Subject::Math,
        GradeLevel::Junior,
        Difficulty::Medium,
        "fractions",
        "Which fraction equals 0.25?",
        ["1/2", "1/3", "1/4", "1/5"],
        2,
    ));
    bank.push(question(
        Subject::Math,
        GradeLevel::Senior,
        Difficulty::High,
        "fractions",
        "What is 3/4 divided by 1/8?",
        ["3", "4", "6", "8"],
        2,
    ));
    bank.push(question(
        Subject::Math,
        GradeLevel::Senior,
        Difficulty::Low,
        "geometry",
        "How many sides does a hexagon have?",
        ["5", "6", "7", "8"],
        1,
    ));
    bank.push(question(
        Subject::Science,
        GradeLevel::Junior,
        Difficulty::Low,
        "astronomy",
        "Which planet is closest to the sun?",
        ["Venus", "Earth", "Mercury", "Mars"],
        2,
    ));
    bank.push(question(
        Subject::Science,
        GradeLevel::Junior,
        Difficulty::Medium,
        "astronomy",
        "How long does Earth take to orbit the sun once?",
        ["One day", "One month", "One year", "Ten years"],
        2,
    ));
    bank.push(question(
        Subject::Science,
        GradeLevel::Junior,
        Difficulty::Medium,
        "biology",
        "Which organ pumps blood through the body?",
        ["Lungs", "Heart", "Liver", "Kidneys"],
        1,
    ));
    bank.push(question(
        Subject::Science,
        GradeLevel::Junior,
        Difficulty::Medium,
        "biology",
        "What do plants release during photosynthesis?",
        ["Carbon dioxide", "Nitrogen", "Oxygen", "Hydrogen"],
        2,
    ));
    bank.push(question(
        Subject::Science,
        GradeLevel::Senior,
        Difficulty::Medium,
        "chemistry",
        "What is the chemical symbol for sodium?",
        ["S", "So", "Na", "Sn"],
        2,
    ));
    bank.push(question(
        Subject::Science,
        GradeLevel::Senior,
        Difficulty::High,
        "chemistry",
        "How many electrons does a neutral carbon atom have?",
        ["4", "6", "8", "12"],
        1,
    ));
    bank.push(question(
        Subject::Science,
        GradeLevel::Senior,
        Difficulty::Low,
        "physics",
        "What unit measures electrical resistance?",
        ["Volt", "Ampere", "Ohm", "Watt"],
        2,
    ));
    bank.push(question(
        Subject::Science,
        GradeLevel::Senior,
        Difficulty::High,
        "physics",
        "What is the acceleration of free fall near Earth's surface?",
        ["1.6 m/s^2", "4.9 m/s^2", "9.8 m/s^2", "19.6 m/s^2"],
        2,
    ));
    bank
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let pool = Arc::new(CandidatePool::from_raw(build_bank(), IngestPolicy::default())?);
    println!("Pool census:");
    for row in pool.census() {
        println!(
            "  {:<16} {:>3} records, {} pattern groups",
            row.subject.tag(),
            row.records,
            row.pattern_groups
        );
    }

    let config = AssemblyConfig {
        seed: 7,
        subjects: vec![Subject::Math, Subject::Science],
        ..AssemblyConfig::default()
    };
    let store_path = std::env::temp_dir().join("quizzer_demo_recent.json");
    let store = FileSessionStore::new(store_path);
    println!("Session store: {}", store.path().display());
    let assembler = QuizAssembler::new(config, pool)?
        .with_session_store(Arc::new(store) as Arc<dyn SessionStore>);

    let filters = QuizFilters::default();
    println!("\nPreflight coverage:");
    for coverage in assembler.preflight(&filters) {
        println!("  {}", quizzer::heuristics::format_coverage_line(&coverage));
    }

    let quiz = assembler.build_quiz(&filters)?;
    println!("\nAssembled {} questions (run again to see fresh picks):\n", quiz.len());
    for (number, record) in quiz.questions.iter().enumerate() {
        println!(
            "Q{} [{} / {} / {}]",
            number + 1,
            record.subject.tag(),
            record.difficulty.tag(),
            record.pattern_group
        );
        println!("  {}", record.prompt);
        for (idx, choice) in record.choices.iter().enumerate() {
            let letter = (b'a' + idx as u8) as char;
            println!("    {letter}) {choice}");
        }
        println!("  answer: {}\n", record.correct_text());
    }

    Ok(())
}
