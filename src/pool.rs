//! Candidate pool construction and lookup.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::debug;

use crate::bank::{QuestionRecord, RawQuestion, Subject};
use crate::errors::AssemblyError;
use crate::gate;
use crate::types::{RecordKey, Uid};

/// How pool construction treats records the quality gate rejects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IngestPolicy {
    /// Drop rejected records, logging the defect. The pool is expected to
    /// carry ample valid records, so drops are never user-facing.
    #[default]
    DropInvalid,
    /// Abort construction on the first rejected record.
    RejectInvalid,
}

/// Per-subject census row reported after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubjectCensus {
    /// Subject the row describes.
    pub subject: Subject,
    /// Validated records held for the subject.
    pub records: usize,
    /// Distinct pattern groups among those records.
    pub pattern_groups: usize,
}

/// Immutable, deduplicated question pool shared by every build.
///
/// Built once at startup and treated as read-only thereafter; builds thread
/// it by shared reference and never mutate it.
#[derive(Clone, Debug, Default)]
pub struct CandidatePool {
    records: Vec<QuestionRecord>,
    by_subject: HashMap<Subject, Vec<usize>>,
    by_uid: IndexMap<Uid, usize>,
}

impl CandidatePool {
    /// Build a pool from generator output: gate-check every candidate,
    /// fingerprint the survivors, and keep the first record per uid.
    pub fn from_raw(raw: Vec<RawQuestion>, policy: IngestPolicy) -> Result<Self, AssemblyError> {
        let mut pool = Self::default();
        let mut dropped = 0usize;
        let mut duplicates = 0usize;
        for (index, candidate) in raw.into_iter().enumerate() {
            if let Err(defect) = gate::check(&candidate) {
                match policy {
                    IngestPolicy::DropInvalid => {
                        debug!(index, %defect, "dropping rejected candidate");
                        dropped += 1;
                        continue;
                    }
                    IngestPolicy::RejectInvalid => {
                        return Err(AssemblyError::InvalidCandidate { index, defect });
                    }
                }
            }
            let uid = gate::fingerprint(&candidate);
            if pool.by_uid.contains_key(&uid) {
                duplicates += 1;
                continue;
            }
            let pattern_group = candidate.resolved_pattern_group();
            let key = make_record_key(&candidate, &pattern_group, index);
            let RawQuestion {
                subject,
                grade_level,
                difficulty,
                topic_pattern,
                pattern_group: _,
                prompt,
                choices,
                correct_index,
                explanation,
            } = candidate;
            // The gate already pinned the choice count.
            let Ok(choices) = <[String; 4]>::try_from(choices) else {
                continue;
            };
            let record = QuestionRecord {
                subject,
                grade: grade_level,
                difficulty,
                pattern: topic_pattern,
                pattern_group,
                prompt,
                choices,
                correct_index,
                explanation,
                uid: uid.clone(),
                key,
            };
            let position = pool.records.len();
            pool.by_uid.insert(uid, position);
            pool.by_subject
                .entry(record.subject)
                .or_default()
                .push(position);
            pool.records.push(record);
        }
        debug!(
            total = pool.records.len(),
            dropped, duplicates, "candidate pool built"
        );
        for row in pool.census() {
            debug!(
                subject = %row.subject,
                records = row.records,
                pattern_groups = row.pattern_groups,
                "subject census"
            );
        }
        Ok(pool)
    }

    /// Wrap pre-built records without gating or dedup.
    ///
    /// For synthetic pools and callers with their own validation. Selection
    /// stays correct on pools with repeated uids: content uniqueness is then
    /// enforced per build by the relaxation ladder.
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        let mut pool = Self::default();
        for record in records {
            let position = pool.records.len();
            pool.by_uid.entry(record.uid.clone()).or_insert(position);
            pool.by_subject
                .entry(record.subject)
                .or_default()
                .push(position);
            pool.records.push(record);
        }
        pool
    }

    /// All records, in pool order.
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the pool holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record carrying this uid, if any.
    pub fn get(&self, uid: &str) -> Option<&QuestionRecord> {
        self.by_uid
            .get(uid)
            .map(|&position| &self.records[position])
    }

    /// Records belonging to one subject, in pool order.
    pub fn records_for_subject(&self, subject: Subject) -> Vec<&QuestionRecord> {
        self.by_subject
            .get(&subject)
            .map(|positions| positions.iter().map(|&p| &self.records[p]).collect())
            .unwrap_or_default()
    }

    /// Census rows for every subject present, in canonical subject order.
    pub fn census(&self) -> Vec<SubjectCensus> {
        Subject::ALL
            .iter()
            .filter_map(|&subject| {
                let positions = self.by_subject.get(&subject)?;
                let groups: HashSet<&str> = positions
                    .iter()
                    .map(|&p| self.records[p].pattern_group.as_str())
                    .collect();
                Some(SubjectCensus {
                    subject,
                    records: positions.len(),
                    pattern_groups: groups.len(),
                })
            })
            .collect()
    }
}

fn make_record_key(raw: &RawQuestion, pattern_group: &str, index: usize) -> RecordKey {
    format!(
        "{}|{}|{}|{}|{}",
        raw.subject.tag(),
        raw.grade_level.tag(),
        raw.difficulty.tag(),
        pattern_group,
        index
    )
}
