//! Accumulation of rule violations.
//!
//! Validation code registers violations as it finds them instead of
//! failing on the first one; the builder then raises everything at once as
//! a broken-rules aggregate, or, for a single violation, as the violation
//! itself, depending on the call-site policy.

use crate::exception::AppException;

/// Collects exceptions without raising them, then raises on demand.
#[derive(Debug, Default)]
pub struct BrokenRulesBuilder {
    exceptions: Vec<AppException>,
    never_throw_as_simple: bool,
}

impl BrokenRulesBuilder {
    /// A builder with the default policy: a single registered exception is
    /// raised as itself, not wrapped in an aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder with an explicit collapse policy. With
    /// `never_throw_as_simple == true`,
    /// [`throw_on_errors`](Self::throw_on_errors) always raises the
    /// aggregate, even for a single member.
    pub fn with_policy(never_throw_as_simple: bool) -> Self {
        Self {
            exceptions: Vec::new(),
            never_throw_as_simple,
        }
    }

    /// Register a violation. Never raises.
    pub fn add(&mut self, exception: AppException) {
        self.exceptions.push(exception);
    }

    /// Register the error of a `Result`, passing values through.
    pub fn add_result<T>(&mut self, result: Result<T, AppException>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(exception) => {
                self.add(exception);
                None
            }
        }
    }

    /// Number of registered violations.
    pub fn error_count(&self) -> usize {
        self.exceptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exceptions.is_empty()
    }

    /// Raise if anything was registered.
    ///
    /// A single violation collapses to itself unless the policy says
    /// `never_throw_as_simple`; more than one always raises the aggregate.
    pub fn throw_on_errors(self) -> Result<(), AppException> {
        if self.exceptions.is_empty() {
            return Ok(());
        }
        if self.exceptions.len() == 1 && !self.never_throw_as_simple {
            let mut exceptions = self.exceptions;
            return Err(exceptions.remove(0));
        }
        Err(AppException::aggregate(
            self.exceptions,
            self.never_throw_as_simple,
        ))
    }

    /// Raise if anything was registered, with the collapse condition
    /// inverted relative to [`throw_on_errors`](Self::throw_on_errors).
    /// The asymmetry is intentional: blocking-error call sites historically
    /// expect the opposite single-violation shape, and downstream handlers
    /// rely on it.
    pub fn throw_on_blocking_errors(self) -> Result<(), AppException> {
        if self.exceptions.is_empty() {
            return Ok(());
        }
        if self.exceptions.len() == 1 && self.never_throw_as_simple {
            let mut exceptions = self.exceptions;
            return Err(exceptions.remove(0));
        }
        Err(AppException::aggregate(
            self.exceptions,
            self.never_throw_as_simple,
        ))
    }
}
