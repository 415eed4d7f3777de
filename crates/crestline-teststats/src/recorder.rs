//! Assertion-call recording.

use std::collections::HashMap;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::kinds::AssertKind;

/// Identifies one test method: suite kind (unit, integration, …), test
/// class (module), and method name. The merge key of the totals reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TestKey {
    pub test_type: String,
    pub test_class: String,
    pub test_method: String,
}

impl TestKey {
    pub fn new(
        test_type: impl Into<String>,
        test_class: impl Into<String>,
        test_method: impl Into<String>,
    ) -> Self {
        Self {
            test_type: test_type.into(),
            test_class: test_class.into(),
            test_method: test_method.into(),
        }
    }
}

/// Per-kind assertion counters for one test method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub counts: HashMap<AssertKind, u64>,
    pub total: u64,
}

impl MethodRecord {
    fn count(&mut self, kind: AssertKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
        self.total += 1;
    }

    /// Merge another record into this one, summing counters.
    pub fn merge(&mut self, other: &MethodRecord) {
        for (kind, count) in &other.counts {
            *self.counts.entry(*kind).or_insert(0) += count;
        }
        self.total += other.total;
    }

    pub fn count_of(&self, kind: AssertKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}

/// One test method's counters together with its key: the row shape of the
/// detail and totals reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodResult {
    #[serde(flatten)]
    pub key: TestKey,
    #[serde(flatten)]
    pub record: MethodRecord,
}

/// Collects assertion counters per test method.
///
/// The process-wide instance behind [`stats`] backs the `TestScope`
/// wrappers; owned instances exist so the reporting pipeline is testable
/// in isolation.
#[derive(Debug, Default)]
pub struct AssertStats {
    records: DashMap<TestKey, MethodRecord>,
}

impl AssertStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one assertion call for a test method.
    pub fn record(&self, key: &TestKey, kind: AssertKind) {
        self.records.entry(key.clone()).or_default().count(kind);
    }

    /// The counters recorded for one test method so far.
    pub fn method_record(&self, key: &TestKey) -> Option<MethodRecord> {
        self.records.get(key).map(|entry| entry.value().clone())
    }

    /// All rows recorded so far, sorted by key for stable report output.
    pub fn snapshot(&self) -> Vec<MethodResult> {
        let mut rows: Vec<MethodResult> = self
            .records
            .iter()
            .map(|entry| MethodResult {
                key: entry.key().clone(),
                record: entry.value().clone(),
            })
            .collect();
        rows.sort_by(|left, right| left.key.cmp(&right.key));
        rows
    }

    /// Total assertion calls across all methods.
    pub fn assert_total(&self) -> u64 {
        self.records.iter().map(|entry| entry.value().total).sum()
    }

    /// Drop everything recorded so far (start of a new run).
    pub fn reset(&self) {
        self.records.clear();
    }
}

static GLOBAL: Lazy<AssertStats> = Lazy::new(AssertStats::new);

/// The process-wide recorder used by the assertion wrappers.
pub fn stats() -> &'static AssertStats {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_per_kind() {
        let stats = AssertStats::new();
        let key = TestKey::new("Unit", "OrderTests", "test_post");

        stats.record(&key, AssertKind::Equality);
        stats.record(&key, AssertKind::Equality);
        stats.record(&key, AssertKind::IsTrue);

        let record = stats.method_record(&key).unwrap();
        assert_eq!(record.total, 3);
        assert_eq!(record.count_of(AssertKind::Equality), 2);
        assert_eq!(record.count_of(AssertKind::IsTrue), 1);
        assert_eq!(record.count_of(AssertKind::Fail), 0);
    }

    #[test]
    fn test_snapshot_is_sorted_by_key() {
        let stats = AssertStats::new();
        stats.record(&TestKey::new("Unit", "B", "m"), AssertKind::Equality);
        stats.record(&TestKey::new("Unit", "A", "m"), AssertKind::Equality);

        let rows = stats.snapshot();
        assert_eq!(rows[0].key.test_class, "A");
        assert_eq!(rows[1].key.test_class, "B");
    }

    #[test]
    fn test_merge_sums_counters() {
        let mut left = MethodRecord::default();
        left.count(AssertKind::Equality);
        let mut right = MethodRecord::default();
        right.count(AssertKind::Equality);
        right.count(AssertKind::IsNone);

        left.merge(&right);
        assert_eq!(left.total, 3);
        assert_eq!(left.count_of(AssertKind::Equality), 2);
        assert_eq!(left.count_of(AssertKind::IsNone), 1);
    }

    #[test]
    fn test_reset_clears_records() {
        let stats = AssertStats::new();
        stats.record(&TestKey::new("Unit", "A", "m"), AssertKind::Equality);
        stats.reset();
        assert_eq!(stats.assert_total(), 0);
        assert!(stats.snapshot().is_empty());
    }

    #[test]
    fn test_method_result_serializes_flat() {
        let key = TestKey::new("Unit", "OrderTests", "test_post");
        let stats = AssertStats::new();
        stats.record(&key, AssertKind::Contains);

        let rows = stats.snapshot();
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["test_class"], "OrderTests");
        assert_eq!(json["total"], 1);
        assert_eq!(json["counts"]["Contains"], 1);
    }
}
