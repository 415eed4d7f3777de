//! The transport-safe exception projection.
//!
//! A [`SerializableException`] is the flat record that crosses process and
//! service boundaries: discriminator, CSV-joined arguments, pattern,
//! identity metadata, and a tree of inner records. Inner chains are
//! attacker/bug-controlled data in a multi-tier service, so the projection
//! is depth-bounded: past the bound a sentinel leaf is emitted instead of
//! recursing further.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ExceptionKind;
use crate::decoder::join_arguments;
use crate::exception::AppException;
use crate::severity::Severity;

/// Default bound on the depth of projected inner-exception trees.
pub const DEFAULT_MAX_DEPTH: usize = 15;

/// Wire discriminator recorded for foreign inner errors whose concrete
/// type is not recoverable from the error chain.
const FOREIGN_INNER_TYPE: &str = "UnknownException";

/// Flat, transport-safe projection of one exception and its inner tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableException {
    /// Runtime type name; the decode discriminator.
    pub exception_type: String,
    /// Rendered message at projection time.
    pub message: String,
    /// Catalog code, or `-1` for foreign errors.
    pub code: i32,
    pub severity: Severity,
    /// Positional arguments joined for transport; see
    /// [`crate::decoder::split_arguments`] for the tolerant split.
    pub raw_parameters_csv: String,
    /// The message pattern in force at projection time.
    pub raw_pattern: String,
    pub host_name: String,
    pub process_name: String,
    pub thread_identity: String,
    pub os_identity: String,
    pub created_at: DateTime<Utc>,
    /// Correlation id; `None` for foreign errors and sentinel leaves keeps
    /// decode from inventing server-side correlations.
    pub reference_id: Option<Uuid>,
    pub stack_trace: Option<String>,
    /// Inner projections: the aggregate members for broken rules, the
    /// cause chain otherwise.
    pub inner: Vec<SerializableException>,
}

/// Project an exception with the default policy: inner tree and stack
/// trace included, bounded at [`DEFAULT_MAX_DEPTH`].
pub fn serialize_exception(exception: &AppException) -> SerializableException {
    serialize_exception_with(exception, true, Utc::now(), true, DEFAULT_MAX_DEPTH)
}

/// Project an exception with explicit policy.
///
/// `created_at` is only recorded on nodes that have no timestamp of their
/// own (foreign errors reached through the chain); application exceptions
/// keep their throw-site timestamp. `max_depth` bounds the projected tree;
/// at the bound a "maximum number of inner exceptions exceeded" sentinel
/// leaf is emitted, so the projection terminates for any input.
pub fn serialize_exception_with(
    exception: &AppException,
    include_inner: bool,
    created_at: DateTime<Utc>,
    include_stack: bool,
    max_depth: usize,
) -> SerializableException {
    let projector = Projector {
        include_inner,
        include_stack,
        max_depth,
        foreign_created_at: created_at,
    };
    projector.project_app(exception, max_depth)
}

/// Project a foreign error: message and type name only, code `-1`,
/// severity [`Severity::None`]. The `source()` chain is projected as
/// inner records under the same depth bound; chain members that are
/// application exceptions are projected in full.
pub fn serialize_foreign<E>(
    error: &E,
    created_at: DateTime<Utc>,
    max_depth: usize,
) -> SerializableException
where
    E: std::error::Error + 'static,
{
    let projector = Projector {
        include_inner: true,
        include_stack: false,
        max_depth,
        foreign_created_at: created_at,
    };
    projector.project_dyn(error, std::any::type_name::<E>(), max_depth)
}

struct Projector {
    include_inner: bool,
    include_stack: bool,
    max_depth: usize,
    foreign_created_at: DateTime<Utc>,
}

impl Projector {
    fn project_app(&self, exception: &AppException, depth: usize) -> SerializableException {
        let mut record = self.flat_app(exception);
        if !self.include_inner {
            return record;
        }

        if exception.kind() == ExceptionKind::BrokenRules {
            record.inner = exception
                .aggregated()
                .iter()
                .map(|member| self.child_app(member, depth))
                .collect();
        } else if let Some(inner) = exception.inner() {
            record.inner = vec![self.child_app(inner, depth)];
        }
        record
    }

    fn child_app(&self, exception: &AppException, depth: usize) -> SerializableException {
        if depth <= 1 {
            self.sentinel_leaf()
        } else {
            self.project_app(exception, depth - 1)
        }
    }

    fn project_dyn(
        &self,
        error: &(dyn std::error::Error + 'static),
        type_label: &str,
        depth: usize,
    ) -> SerializableException {
        if let Some(application) = error.downcast_ref::<AppException>() {
            return self.project_app(application, depth);
        }

        let mut record = self.flat_foreign(error, type_label);
        if self.include_inner {
            if let Some(source) = error.source() {
                record.inner = vec![if depth <= 1 {
                    self.sentinel_leaf()
                } else {
                    self.project_dyn(source, FOREIGN_INNER_TYPE, depth - 1)
                }];
            }
        }
        record
    }

    /// The parent of a broken-rules aggregate carries no pattern or
    /// argument data; it is a pure container for its members.
    fn flat_app(&self, exception: &AppException) -> SerializableException {
        let is_aggregate = exception.kind() == ExceptionKind::BrokenRules;
        let meta = exception.meta();
        SerializableException {
            exception_type: exception.name().to_string(),
            message: exception.full_message(),
            code: exception.code(),
            severity: exception.severity(),
            raw_parameters_csv: if is_aggregate {
                String::new()
            } else {
                join_arguments(exception.arguments())
            },
            raw_pattern: if is_aggregate {
                String::new()
            } else {
                exception.kind().pattern().to_string()
            },
            host_name: meta.host_name.clone(),
            process_name: meta.process_name.clone(),
            thread_identity: meta.thread_identity.clone(),
            os_identity: meta.os_identity.clone(),
            created_at: meta.created_at,
            reference_id: Some(meta.reference_id),
            stack_trace: if self.include_stack {
                meta.stack_trace.clone()
            } else {
                None
            },
            inner: Vec::new(),
        }
    }

    fn flat_foreign(
        &self,
        error: &(dyn std::error::Error + 'static),
        type_label: &str,
    ) -> SerializableException {
        SerializableException {
            exception_type: type_label.to_string(),
            message: error.to_string(),
            code: -1,
            severity: Severity::None,
            raw_parameters_csv: String::new(),
            raw_pattern: String::new(),
            host_name: String::new(),
            process_name: String::new(),
            thread_identity: String::new(),
            os_identity: String::new(),
            created_at: self.foreign_created_at,
            reference_id: None,
            stack_trace: None,
            inner: Vec::new(),
        }
    }

    fn sentinel_leaf(&self) -> SerializableException {
        let sentinel =
            AppException::maximum_exceptions_exceeded(self.max_depth.to_string());
        self.flat_app(&sentinel)
    }
}
