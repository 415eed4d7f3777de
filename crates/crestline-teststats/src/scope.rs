//! Assertion wrappers with call logging.
//!
//! A test opens a [`TestScope`] naming itself, then asserts through the
//! `check_*` methods. Each call is counted in the process-wide recorder
//! before delegating to the standard assertion, so a failing check still
//! behaves exactly like `assert_eq!` and friends.

use std::fmt::Debug;

use crate::kinds::AssertKind;
use crate::recorder::{stats, TestKey};

/// Identifies the running test to the recorder.
#[derive(Debug, Clone)]
pub struct TestScope {
    key: TestKey,
}

impl TestScope {
    /// Open a scope for `test_type` / `test_class` / `test_method`.
    pub fn new(
        test_type: impl Into<String>,
        test_class: impl Into<String>,
        test_method: impl Into<String>,
    ) -> Self {
        Self {
            key: TestKey::new(test_type, test_class, test_method),
        }
    }

    pub fn key(&self) -> &TestKey {
        &self.key
    }

    fn count(&self, kind: AssertKind) {
        stats().record(&self.key, kind);
    }

    /// Counted `assert_eq!`.
    pub fn check_eq<T: PartialEq + Debug>(&self, actual: T, expected: T) {
        self.count(AssertKind::Equality);
        assert_eq!(actual, expected);
    }

    /// Counted `assert_ne!`.
    pub fn check_ne<T: PartialEq + Debug>(&self, actual: T, unexpected: T) {
        self.count(AssertKind::Inequality);
        assert_ne!(actual, unexpected);
    }

    /// Counted truth assertion.
    pub fn check_true(&self, condition: bool) {
        self.count(AssertKind::IsTrue);
        assert!(condition, "expected condition to hold");
    }

    /// Counted falsity assertion.
    pub fn check_false(&self, condition: bool) {
        self.count(AssertKind::IsFalse);
        assert!(!condition, "expected condition not to hold");
    }

    /// Counted `Option::is_some` assertion; returns the value.
    pub fn check_some<T>(&self, value: Option<T>) -> T {
        self.count(AssertKind::IsSome);
        match value {
            Some(inner) => inner,
            None => panic!("expected Some, got None"),
        }
    }

    /// Counted `Option::is_none` assertion.
    pub fn check_none<T: Debug>(&self, value: Option<T>) {
        self.count(AssertKind::IsNone);
        assert!(value.is_none(), "expected None, got {value:?}");
    }

    /// Counted substring assertion.
    pub fn check_contains(&self, haystack: &str, needle: &str) {
        self.count(AssertKind::Contains);
        assert!(
            haystack.contains(needle),
            "expected {haystack:?} to contain {needle:?}"
        );
    }

    /// Counted unconditional failure.
    pub fn fail(&self, message: &str) -> ! {
        self.count(AssertKind::Fail);
        panic!("{message}");
    }

    /// Record that the test could not decide its outcome. Only counted;
    /// the test harness has no skipped-at-runtime state to move into.
    pub fn inconclusive(&self, reason: &str) {
        self.count(AssertKind::Inconclusive);
        tracing::warn!(test = ?self.key, reason, "test inconclusive");
    }
}
