//! Duplicate initiative detection.
//!
//! # Responsibility
//! - Group records that share an identical title.
//! - Flag title pairs whose similarity ratio reaches a threshold.
//! - Cluster related initiatives by normalized title or shared keywords.
//!
//! # Invariants
//! - Exact groups are ordered by first occurrence; indices ascend.
//! - Similar pairs are ordered by `(left, right)` with `left < right`.
//! - Titles that are exactly equal appear only in exact groups.
//! - A record belongs to at most one related group.

use crate::model::initiative::InitiativeRecord;
use log::info;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

mod matcher;
mod text;

pub use matcher::similarity_ratio;
pub use text::{extract_keywords, keyword_overlap, normalize_text};

use text::jaccard;

/// Default ratio at which two titles count as near-duplicates.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.9;
/// Normalized-title ratio at which two records join one related group.
pub const RELATED_TITLE_THRESHOLD: f64 = 0.75;
/// Keyword overlap at which two records join one related group.
pub const RELATED_KEYWORD_THRESHOLD: f64 = 0.7;

/// Records sharing one title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExactDuplicate {
    pub title: String,
    pub indices: Vec<usize>,
}

/// Two records with highly similar titles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPair {
    pub left: usize,
    pub right: usize,
    pub left_title: String,
    pub right_title: String,
    pub ratio: f64,
}

/// Records that describe the same initiative in different words.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedGroup {
    /// Ascending; the first index seeded the group.
    pub indices: Vec<usize>,
    /// Member with the longest description, the one to keep when merging.
    pub keep: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DuplicateReport {
    pub record_count: usize,
    pub exact: Vec<ExactDuplicate>,
    pub similar: Vec<SimilarPair>,
    pub related: Vec<RelatedGroup>,
}

impl DuplicateReport {
    pub fn is_clean(&self) -> bool {
        self.exact.is_empty() && self.similar.is_empty() && self.related.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.exact.len() + self.similar.len() + self.related.len()
    }

    /// Records a merge would drop: every related member except `keep`.
    pub fn removal_candidates(&self) -> usize {
        self.related.iter().map(|group| group.indices.len() - 1).sum()
    }
}

/// Scans records for exact and near-duplicate titles.
///
/// `threshold` is compared against the lower-cased title ratio; callers are
/// expected to pass a value in `(0.0, 1.0]`.
pub fn scan_duplicates(records: &[InitiativeRecord], threshold: f64) -> DuplicateReport {
    let titles: Vec<&str> = records.iter().map(|record| record.title.trim()).collect();

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, title) in titles.iter().copied().enumerate() {
        groups
            .entry(title)
            .or_insert_with(|| {
                order.push(title);
                Vec::new()
            })
            .push(index);
    }
    let exact: Vec<ExactDuplicate> = order
        .into_iter()
        .filter_map(|title| {
            let indices = groups.remove(title)?;
            (indices.len() > 1).then(|| ExactDuplicate {
                title: title.to_string(),
                indices,
            })
        })
        .collect();

    let lowered: Vec<String> = titles.iter().map(|title| title.to_lowercase()).collect();
    let mut similar = Vec::new();
    for left in 0..titles.len() {
        for right in (left + 1)..titles.len() {
            if titles[left] == titles[right] {
                continue;
            }
            let ratio = similarity_ratio(&lowered[left], &lowered[right]);
            if ratio >= threshold {
                similar.push(SimilarPair {
                    left,
                    right,
                    left_title: titles[left].to_string(),
                    right_title: titles[right].to_string(),
                    ratio,
                });
            }
        }
    }

    let report = DuplicateReport {
        record_count: records.len(),
        exact,
        similar,
        related: related_groups(records),
    };
    info!(
        "event=duplicate_scan module=duplicates status={} records={} exact={} similar={} related={}",
        if report.is_clean() { "ok" } else { "found" },
        report.record_count,
        report.exact.len(),
        report.similar.len(),
        report.related.len()
    );
    report
}

/// Greedy clustering: each unclaimed record seeds a group and claims every
/// later unclaimed record whose normalized title ratio reaches
/// `RELATED_TITLE_THRESHOLD` or whose keyword overlap reaches
/// `RELATED_KEYWORD_THRESHOLD`. Single-member groups are dropped.
pub fn related_groups(records: &[InitiativeRecord]) -> Vec<RelatedGroup> {
    let normalized: Vec<String> = records
        .iter()
        .map(|record| normalize_text(&record.title))
        .collect();
    let keywords: Vec<BTreeSet<String>> = records
        .iter()
        .map(|record| extract_keywords(&record.title))
        .collect();

    let mut claimed = vec![false; records.len()];
    let mut groups = Vec::new();
    for seed in 0..records.len() {
        if claimed[seed] {
            continue;
        }
        let mut indices = vec![seed];
        for other in (seed + 1)..records.len() {
            if claimed[other] {
                continue;
            }
            let related = similarity_ratio(&normalized[seed], &normalized[other])
                >= RELATED_TITLE_THRESHOLD
                || jaccard(&keywords[seed], &keywords[other]) >= RELATED_KEYWORD_THRESHOLD;
            if related {
                claimed[other] = true;
                indices.push(other);
            }
        }
        if indices.len() > 1 {
            claimed[seed] = true;
            let keep = longest_description(records, &indices);
            groups.push(RelatedGroup { indices, keep });
        }
    }
    groups
}

/// Ties go to the earliest index.
fn longest_description(records: &[InitiativeRecord], indices: &[usize]) -> usize {
    let mut keep = indices[0];
    for &index in &indices[1..] {
        if records[index].description.chars().count()
            > records[keep].description.chars().count()
        {
            keep = index;
        }
    }
    keep
}
