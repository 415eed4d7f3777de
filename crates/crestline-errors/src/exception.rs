//! The application exception carrier.

use std::backtrace::{Backtrace, BacktraceStatus};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::catalog::ExceptionKind;
use crate::message;
use crate::severity::Severity;

/// Identity and timing stamped on every exception at the throw site.
///
/// These four identity fields plus the timestamp travel on the wire
/// projection and are restored verbatim on decode, so a client-visible
/// fault can be correlated back to the server-side instance.
#[derive(Debug, Clone)]
pub struct ExceptionMeta {
    /// Machine the exception was raised on.
    pub host_name: String,
    /// Executable (logical application) name.
    pub process_name: String,
    /// Application user from the ambient request context, when one is
    /// installed; empty otherwise.
    pub thread_identity: String,
    /// Operating-system account the process runs under.
    pub os_identity: String,
    /// When the exception was created.
    pub created_at: DateTime<Utc>,
    /// Captured backtrace, when the runtime provides one.
    pub stack_trace: Option<String>,
    /// Correlation id; fresh at construction, preserved across the wire
    /// when the record carries one.
    pub reference_id: Uuid,
}

impl ExceptionMeta {
    /// Stamp metadata from the process environment and the ambient
    /// request context.
    pub fn capture() -> Self {
        let backtrace = Backtrace::capture();
        let stack_trace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            host_name: std::env::var("HOSTNAME")
                .or_else(|_| std::env::var("COMPUTERNAME"))
                .unwrap_or_else(|_| "localhost".to_string()),
            process_name: std::env::current_exe()
                .ok()
                .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
                .unwrap_or_else(|| "unknown".to_string()),
            thread_identity: crestline_context::current_user_name().unwrap_or_default(),
            os_identity: std::env::var("USER")
                .or_else(|_| std::env::var("USERNAME"))
                .unwrap_or_default(),
            created_at: Utc::now(),
            stack_trace,
            reference_id: Uuid::new_v4(),
        }
    }
}

/// A typed application exception.
///
/// Immutable after the throw site apart from wrapping and aggregation:
/// the kind fixes the code, severity, and message pattern; `arguments`
/// carries the positional values the pattern substitutes.
#[derive(Debug, Clone)]
pub struct AppException {
    pub(crate) kind: ExceptionKind,
    pub(crate) arguments: Vec<String>,
    /// Members of a [`ExceptionKind::BrokenRules`] aggregate; empty for
    /// every other kind.
    pub(crate) aggregated: Vec<AppException>,
    /// Whether a single-member aggregate must stay an aggregate when
    /// rethrown; see `BrokenRulesBuilder`.
    pub(crate) never_throw_as_simple: bool,
    pub(crate) inner: Option<Box<AppException>>,
    pub(crate) meta: ExceptionMeta,
}

impl AppException {
    /// Build an exception from a kind and its positional arguments,
    /// stamping metadata from the environment. The catalog constructors
    /// are the arity-safe front door; this is the uniform back door used
    /// by the decode registry.
    pub fn from_parts(kind: ExceptionKind, arguments: Vec<String>) -> Self {
        Self {
            kind,
            arguments,
            aggregated: Vec::new(),
            never_throw_as_simple: false,
            inner: None,
            meta: ExceptionMeta::capture(),
        }
    }

    /// Build a broken-rules aggregate. The members are kept for reporting
    /// only; their severity, not the catalog row's, determines the
    /// aggregate severity.
    pub fn aggregate(members: Vec<AppException>, never_throw_as_simple: bool) -> Self {
        let mut exception = Self::from_parts(ExceptionKind::BrokenRules, Vec::new());
        exception.aggregated = members;
        exception.never_throw_as_simple = never_throw_as_simple;
        exception
    }

    /// Wrap a foreign error so the escaping fault is typed and loggable.
    pub fn wrap<E: std::error::Error>(error: &E) -> Self {
        Self::wrapper(std::any::type_name::<E>(), error.to_string())
    }

    /// Attach a causing exception.
    pub fn with_inner(mut self, inner: AppException) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    /// Override the correlation id (used when replaying a wire record).
    pub fn with_reference_id(mut self, reference_id: Uuid) -> Self {
        self.meta.reference_id = reference_id;
        self
    }

    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    /// The positional arguments, in pattern order.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Stable negative code from the catalog.
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    /// Wire discriminator from the catalog.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Effective severity: the catalog row for ordinary kinds, the
    /// maximum member severity for a broken-rules aggregate.
    pub fn severity(&self) -> Severity {
        if self.kind == ExceptionKind::BrokenRules {
            self.aggregated
                .iter()
                .map(AppException::severity)
                .max()
                .unwrap_or_else(|| self.kind.base_severity())
        } else {
            self.kind.base_severity()
        }
    }

    /// Members of a broken-rules aggregate; empty for other kinds.
    pub fn aggregated(&self) -> &[AppException] {
        &self.aggregated
    }

    pub fn never_throw_as_simple(&self) -> bool {
        self.never_throw_as_simple
    }

    /// The causing exception, if one was attached.
    pub fn inner(&self) -> Option<&AppException> {
        self.inner.as_deref()
    }

    pub fn meta(&self) -> &ExceptionMeta {
        &self.meta
    }

    pub fn reference_id(&self) -> Uuid {
        self.meta.reference_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.meta.created_at
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.meta.stack_trace.as_deref()
    }

    /// The localized, fully substituted user-facing message.
    ///
    /// Total under all inputs: a pattern/argument mismatch degrades to a
    /// diagnostic dump instead of failing, because an exception must
    /// never fail while being reported.
    pub fn full_message(&self) -> String {
        message::render(self)
    }
}

impl std::fmt::Display for AppException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_message())
    }
}

impl std::error::Error for AppException {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner
            .as_deref()
            .map(|inner| inner as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_matches_catalog_arity() {
        let exception = AppException::item_not_found("Order", "2024-0042");
        assert_eq!(exception.kind(), ExceptionKind::ItemNotFound);
        assert_eq!(exception.arguments(), ["Order", "2024-0042"]);
        assert_eq!(exception.arguments().len(), ExceptionKind::ItemNotFound.arity());
        assert_eq!(exception.code(), -1300);
        assert_eq!(exception.severity(), Severity::Medium);
    }

    #[test]
    fn test_metadata_is_stamped() {
        let exception = AppException::service_unavailable("billing");
        assert!(!exception.meta().host_name.is_empty());
        assert!(!exception.meta().process_name.is_empty());
        assert!(!exception.reference_id().is_nil());
    }

    #[test]
    fn test_aggregate_severity_is_member_maximum() {
        let aggregate = AppException::aggregate(
            vec![
                AppException::mandatory_field_missing("Name"),
                AppException::license_expired("payroll"),
                AppException::email_address_invalid("x"),
            ],
            false,
        );
        assert_eq!(aggregate.severity(), Severity::Critical);
    }

    #[test]
    fn test_empty_aggregate_uses_catalog_severity() {
        let aggregate = AppException::aggregate(Vec::new(), false);
        assert_eq!(aggregate.severity(), ExceptionKind::BrokenRules.base_severity());
    }

    #[test]
    fn test_wrap_records_type_and_message() {
        let io_error = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let wrapped = AppException::wrap(&io_error);
        assert_eq!(wrapped.kind(), ExceptionKind::Wrapper);
        assert!(wrapped.arguments()[0].contains("io"));
        assert_eq!(wrapped.arguments()[1], "disk on fire");
    }

    #[test]
    fn test_inner_is_reachable_through_error_source() {
        use std::error::Error;
        let exception = AppException::operation_aborted("posting", "storage gone")
            .with_inner(AppException::connection_failed("erp-main"));
        let source = exception.source().expect("inner should be the source");
        assert!(source.to_string().contains("erp-main"));
    }
}
