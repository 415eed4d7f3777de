//! Assertion-call statistics for the crestline test suites.
//!
//! Tests assert through counted wrappers ([`TestScope`]) so every run can
//! report how many assertions of which kind each test method made. At the
//! end of a run, [`report_results`] writes timestamped detail documents
//! and folds the run into totals documents that accumulate across runs.
//!
//! ```no_run
//! use crestline_teststats::{report_results, TestScope};
//!
//! let scope = TestScope::new("Unit", "OrderTests", "test_post");
//! scope.check_eq(2 + 2, 4);
//! scope.check_true("posted".contains("post"));
//! report_results();
//! ```

pub mod kinds;
pub mod recorder;
pub mod report;
pub mod scope;

pub use kinds::AssertKind;
pub use recorder::{stats, AssertStats, MethodRecord, MethodResult, TestKey};
pub use report::{
    output_root, report_results, summarize, write_reports, ReportError, ReportPaths,
    SummaryResult, OUTPUT_ROOT_ENV,
};
pub use scope::TestScope;
