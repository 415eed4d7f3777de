//! Publication and database fault mapping.

use thiserror::Error;

use crate::exception::AppException;

/// Database error numbers that map to a specific catalog exception.
/// Everything else stays unmapped and is reported as-is by the caller.
const SQL_NOT_UNIQUE: &[i32] = &[2601, 2627, 11045];
const SQL_MANDATORY_FIELD: &[i32] = &[515];
const SQL_FIELD_TRUNCATED: &[i32] = &[2628, 8152];
const SQL_FOREIGN_KEY: &[i32] = &[547];
const SQL_OBJECT_MISSING: &[i32] = &[208];
const SQL_CONNECTION: &[i32] = &[4060, 18456];

/// Database error numbers worth retrying: lock escalation, deadlock
/// victim, lock timeout, client-side command timeout.
const SQL_RETRYABLE: &[i32] = &[1204, 1205, 1222, -2];

/// Neutral carrier for a database error number and message. The database
/// client itself lives outside this crate; its adapters translate driver
/// errors into this shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SQL error {number}: {message}")]
pub struct SqlErrorInfo {
    pub number: i32,
    pub message: String,
}

impl SqlErrorInfo {
    pub fn new(number: i32, message: impl Into<String>) -> Self {
        Self {
            number,
            message: message.into(),
        }
    }
}

/// Write an exception to the log sink: message, stack trace, and up to two
/// levels of causing exception. Never fails and never rethrows.
pub fn publish(exception: &AppException) {
    tracing::error!(
        code = exception.code(),
        severity = %exception.severity(),
        reference_id = %exception.reference_id(),
        stack_trace = exception.stack_trace().unwrap_or(""),
        "{}",
        exception.full_message()
    );

    // Two levels of cause detail; deeper chains are reachable through the
    // reference id and the wire projection.
    let mut cause = exception.inner();
    for level in 1..=2 {
        let Some(inner) = cause else { break };
        tracing::error!(
            code = inner.code(),
            level,
            reference_id = %exception.reference_id(),
            stack_trace = inner.stack_trace().unwrap_or(""),
            "caused by: {}",
            inner.full_message()
        );
        cause = inner.inner();
    }
}

/// Map a database error to its specific catalog exception, or `None` when
/// no mapping exists; callers treat `None` as "report the raw error".
pub fn wrap_from_sql(error: &SqlErrorInfo) -> Option<AppException> {
    let number = error.number;
    if SQL_NOT_UNIQUE.contains(&number) {
        Some(AppException::not_unique("database record", &error.message))
    } else if SQL_MANDATORY_FIELD.contains(&number) {
        Some(AppException::mandatory_field_missing(&error.message))
    } else if SQL_FIELD_TRUNCATED.contains(&number) {
        Some(AppException::field_truncated("database record", &error.message))
    } else if SQL_FOREIGN_KEY.contains(&number) {
        Some(AppException::foreign_key_violation(
            "database record",
            &error.message,
        ))
    } else if SQL_OBJECT_MISSING.contains(&number) {
        Some(AppException::storage_object_missing(&error.message))
    } else if SQL_CONNECTION.contains(&number) {
        Some(AppException::connection_failed(&error.message))
    } else {
        None
    }
}

/// Whether an error justifies a retry of the failed operation.
///
/// Only database errors carry that information: locking, deadlock, and
/// timeout numbers are retryable, everything else is not. A non-database
/// input is a caller contract violation and yields an invalid-parameter
/// exception rather than `false`.
pub fn is_retry_justified(
    error: &(dyn std::error::Error + 'static),
) -> Result<bool, AppException> {
    match error.downcast_ref::<SqlErrorInfo>() {
        Some(sql_error) => Ok(SQL_RETRYABLE.contains(&sql_error.number)),
        None => Err(AppException::invalid_parameter(
            "error",
            "retry classification is defined for SQL errors only",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExceptionKind;

    #[test]
    fn test_duplicate_key_maps_to_not_unique() {
        let mapped = wrap_from_sql(&SqlErrorInfo::new(11045, "duplicate key 'ACME'")).unwrap();
        assert_eq!(mapped.kind(), ExceptionKind::NotUnique);
        assert_eq!(mapped.arguments()[1], "duplicate key 'ACME'");
    }

    #[test]
    fn test_unmapped_number_returns_none() {
        assert!(wrap_from_sql(&SqlErrorInfo::new(99999, "vendor oddity")).is_none());
    }

    #[test]
    fn test_truncation_and_missing_object_mappings() {
        let truncated = wrap_from_sql(&SqlErrorInfo::new(8152, "string data right truncation"));
        assert_eq!(truncated.unwrap().kind(), ExceptionKind::FieldTruncated);

        let missing = wrap_from_sql(&SqlErrorInfo::new(208, "invalid object 'dbo.Orders'"));
        assert_eq!(missing.unwrap().kind(), ExceptionKind::StorageObjectMissing);
    }

    #[test]
    fn test_deadlock_is_retryable() {
        let deadlock = SqlErrorInfo::new(1205, "chosen as deadlock victim");
        assert!(is_retry_justified(&deadlock).unwrap());

        let duplicate = SqlErrorInfo::new(2601, "duplicate key");
        assert!(!is_retry_justified(&duplicate).unwrap());
    }

    #[test]
    fn test_non_sql_input_is_a_contract_violation() {
        let io_error = std::io::Error::new(std::io::ErrorKind::Other, "not a database problem");
        let result = is_retry_justified(&io_error);
        let raised = result.unwrap_err();
        assert_eq!(raised.kind(), ExceptionKind::InvalidParameter);
    }

    #[test]
    fn test_publish_accepts_nested_exceptions() {
        let exception = AppException::operation_aborted("posting", "storage gone")
            .with_inner(
                AppException::transaction_rolled_back("posting")
                    .with_inner(AppException::connection_failed("erp-main")),
            );
        // Must not panic regardless of subscriber state.
        publish(&exception);
    }
}
