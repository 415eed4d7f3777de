//! End-to-end test statistics: counted assertions to report documents.

use crestline_teststats::{
    stats, write_reports, AssertKind, MethodResult, SummaryResult, TestScope,
};

#[test]
fn test_counted_assertions_end_up_in_the_documents() {
    let scope = TestScope::new("Integration", "WireContractTests", "test_round_trip");
    scope.check_eq(1 + 1, 2);
    scope.check_contains("BrokenRulesException", "Exception");
    scope.check_true(true);

    let dir = tempfile::tempdir().unwrap();
    let paths = write_reports(stats(), dir.path()).unwrap();

    let detail: Vec<MethodResult> = crestline_common::read_json(&paths.detail).unwrap();
    let row = detail
        .iter()
        .find(|row| row.key.test_method == "test_round_trip")
        .expect("the counted method must be reported");
    assert!(row.record.total >= 3);
    assert!(row.record.count_of(AssertKind::Equality) >= 1);

    let summaries: Vec<SummaryResult> =
        crestline_common::read_json(&paths.detail_summary).unwrap();
    assert!(summaries
        .iter()
        .any(|summary| summary.test_type == "Integration" && summary.test_class.is_none()));

    // A second run merges rather than duplicates.
    let paths = write_reports(stats(), dir.path()).unwrap();
    let totals: Vec<MethodResult> = crestline_common::read_json(&paths.totals).unwrap();
    let merged: Vec<_> = totals
        .iter()
        .filter(|row| row.key.test_method == "test_round_trip")
        .collect();
    assert_eq!(merged.len(), 1);
    assert!(merged[0].record.total >= 6);
}
