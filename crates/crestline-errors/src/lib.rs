//! Typed application exceptions for the crestline suite.
//!
//! Every fault a suite application raises is a catalog entry: a stable
//! negative code, a severity, and a positional message pattern, carried by
//! [`AppException`]. Around the catalog sit the pieces the tiers share:
//!
//! - [`decoder`], the wire codec: type name + string arguments in, typed
//!   exception out, total over unknown names;
//! - [`serializable`], the depth-bounded flat projection that crosses
//!   process boundaries;
//! - [`broken_rules`], accumulation of independent rule violations and
//!   the single-vs-aggregate collapse policies;
//! - [`helper`], the logging publication sink, database error mapping,
//!   and retry classification;
//! - [`message`], total message rendering with localization and runtime
//!   pattern dictionaries.
//!
//! Messages never fail to render and decode never rejects a type name:
//! this crate sits on every error path in the suite and must not add
//! failure modes of its own.

pub mod broken_rules;
pub mod catalog;
pub mod decoder;
pub mod exception;
pub mod fault;
pub mod helper;
pub mod message;
pub mod serializable;
pub mod severity;

pub use broken_rules::BrokenRulesBuilder;
pub use catalog::ExceptionKind;
pub use decoder::{
    decode, decode_definition, decode_serializable, encode, encode_definition, join_arguments,
    split_arguments,
};
pub use exception::{AppException, ExceptionMeta};
pub use fault::FaultContract;
pub use helper::{is_retry_justified, publish, wrap_from_sql, SqlErrorInfo};
pub use message::{
    clear_external_pattern_provider, clear_message_translator, clear_validation_patterns,
    register_validation_pattern, set_external_pattern_provider, set_message_translator,
    ExternalPatternProvider, MessageTranslator,
};
pub use serializable::{
    serialize_exception, serialize_exception_with, serialize_foreign, SerializableException,
    DEFAULT_MAX_DEPTH,
};
pub use severity::Severity;

/// Result alias for operations that fail with an application exception.
pub type Result<T> = std::result::Result<T, AppException>;
