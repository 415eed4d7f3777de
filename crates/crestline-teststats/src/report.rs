//! Run reports.
//!
//! Each run writes two timestamped detail documents (per-method rows and
//! per-class/type summaries) and folds its rows into two totals documents
//! that accumulate across runs, merged by (test type, test class, test
//! method).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crestline_common::json_store::{read_json_or_default, write_json_atomic, StoreError};

use crate::recorder::{stats, AssertStats, MethodResult, TestKey};

/// Environment variable naming the report output directory.
pub const OUTPUT_ROOT_ENV: &str = "CRESTLINE_UNITTEST_ROOT";

const TOTALS_FILE: &str = "TotalsUnitTestResults.json";
const TOTALS_SUMMARY_FILE: &str = "TotalsUnitTestSummaryResults.json";

/// Errors raised while writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no report output root: {OUTPUT_ROOT_ENV} is not set")]
    NoOutputRoot,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Aggregated row: one test class, or a whole test type when
/// `test_class` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub test_type: String,
    pub test_class: Option<String>,
    pub method_count: usize,
    pub assert_total: u64,
}

/// Paths of the documents one run produced.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub detail: PathBuf,
    pub detail_summary: PathBuf,
    pub totals: PathBuf,
    pub totals_summary: PathBuf,
}

/// The report output directory, from the environment.
pub fn output_root() -> Option<PathBuf> {
    std::env::var(OUTPUT_ROOT_ENV).ok().map(PathBuf::from)
}

/// Build class-level and type-level summary rows from method rows.
pub fn summarize(rows: &[MethodResult]) -> Vec<SummaryResult> {
    let mut per_class: BTreeMap<(String, String), (usize, u64)> = BTreeMap::new();
    let mut per_type: BTreeMap<String, (usize, u64)> = BTreeMap::new();

    for row in rows {
        let class_entry = per_class
            .entry((row.key.test_type.clone(), row.key.test_class.clone()))
            .or_default();
        class_entry.0 += 1;
        class_entry.1 += row.record.total;

        let type_entry = per_type.entry(row.key.test_type.clone()).or_default();
        type_entry.0 += 1;
        type_entry.1 += row.record.total;
    }

    let mut summaries: Vec<SummaryResult> = per_type
        .into_iter()
        .map(|(test_type, (method_count, assert_total))| SummaryResult {
            test_type,
            test_class: None,
            method_count,
            assert_total,
        })
        .collect();
    summaries.extend(per_class.into_iter().map(
        |((test_type, test_class), (method_count, assert_total))| SummaryResult {
            test_type,
            test_class: Some(test_class),
            method_count,
            assert_total,
        },
    ));
    summaries
}

/// Write the four report documents for the recorder's current content.
///
/// The two detail documents are stamped with the run timestamp; the two
/// totals documents are read back first and merged by test key, so
/// repeated runs accumulate.
pub fn write_reports(statistics: &AssertStats, root: &Path) -> Result<ReportPaths, ReportError> {
    let rows = statistics.snapshot();
    let stamp = Utc::now().format("%Y%m%d%H%M%S");

    let paths = ReportPaths {
        detail: root.join(format!("DetailUnitTestResults{stamp}.json")),
        detail_summary: root.join(format!("DetailUnitTestSummaryResults{stamp}.json")),
        totals: root.join(TOTALS_FILE),
        totals_summary: root.join(TOTALS_SUMMARY_FILE),
    };

    write_json_atomic(&paths.detail, &rows)?;
    write_json_atomic(&paths.detail_summary, &summarize(&rows))?;

    let totals = merge_totals(read_json_or_default(&paths.totals)?, &rows);
    write_json_atomic(&paths.totals, &totals)?;
    write_json_atomic(&paths.totals_summary, &summarize(&totals))?;

    Ok(paths)
}

fn merge_totals(existing: Vec<MethodResult>, new_rows: &[MethodResult]) -> Vec<MethodResult> {
    let mut merged: BTreeMap<TestKey, MethodResult> = existing
        .into_iter()
        .map(|row| (row.key.clone(), row))
        .collect();

    for row in new_rows {
        merged
            .entry(row.key.clone())
            .and_modify(|kept| kept.record.merge(&row.record))
            .or_insert_with(|| row.clone());
    }
    merged.into_values().collect()
}

/// Write the reports for the process-wide recorder, fire-and-forget:
/// a missing output root or a write failure is logged and swallowed,
/// because reporting must never fail the test run it describes.
pub fn report_results() {
    let Some(root) = output_root() else {
        warn!("{OUTPUT_ROOT_ENV} not set; test statistics not written");
        return;
    };
    match write_reports(stats(), &root) {
        Ok(paths) => tracing::info!(detail = %paths.detail.display(), "test statistics written"),
        Err(error) => warn!(%error, "failed to write test statistics"),
    }
}
