//! The exception wire codec.
//!
//! Decode maps a wire type name plus positional string arguments back to a
//! typed [`AppException`]; encode is its inverse. The mapping is a registry
//! of factories populated once from the catalog, with hand-written entries
//! for the kinds whose reconstruction is not uniform.
//!
//! Two contracts are deliberate and load-bearing:
//!
//! - decode is **total over type names**: an unknown name produces an
//!   [`Unexpected`](ExceptionKind::Unexpected) exception wrapping the raw
//!   name, never an error, so tiers on different versions keep
//!   interoperating;
//! - decode is **not defensive over arguments**: values are consumed
//!   positionally without a length check, and an under-filled record
//!   faults at the indexing site. Malformed wire input is a bug to surface,
//!   not a state to model; the typed catalog constructors are the
//!   arity-safe path.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::catalog::ExceptionKind;
use crate::exception::AppException;
use crate::serializable::SerializableException;

/// Delimiter used when joining arguments for transport.
pub const PRIMARY_DELIMITER: char = ';';

/// Delimiter accepted on decode for records produced by older tiers.
pub const FALLBACK_DELIMITER: char = ',';

/// Kinds that historically crossed the wire with their whole argument
/// list comma-joined into a single value. When such a record arrives with
/// exactly one argument, the blob is split back into the positional list
/// before materialization. Preserved literally; do not extend.
const LEGACY_RESPLIT_KINDS: &[ExceptionKind] = &[
    ExceptionKind::AccessDenied,
    ExceptionKind::AddEntityNotAllowed,
    ExceptionKind::ExternalPatternBusinessLogic,
    ExceptionKind::Anomaly,
];

/// Join positional arguments for transport.
pub fn join_arguments(arguments: &[String]) -> String {
    arguments.join(&PRIMARY_DELIMITER.to_string())
}

/// Split a transported argument string.
///
/// Splits on `;` when present, otherwise on `,`; both delimiters exist in
/// the wild and decode must accept either.
pub fn split_arguments(csv: &str) -> Vec<String> {
    if csv.is_empty() {
        return Vec::new();
    }
    let delimiter = if csv.contains(PRIMARY_DELIMITER) {
        PRIMARY_DELIMITER
    } else {
        FALLBACK_DELIMITER
    };
    csv.split(delimiter).map(str::to_string).collect()
}

type Factory = Box<dyn Fn(&[String]) -> AppException + Send + Sync>;

static REGISTRY: Lazy<HashMap<&'static str, Factory>> = Lazy::new(build_registry);

fn build_registry() -> HashMap<&'static str, Factory> {
    let mut registry: HashMap<&'static str, Factory> = HashMap::new();

    for &kind in ExceptionKind::ALL {
        registry.insert(
            kind.name(),
            Box::new(move |arguments| materialize(kind, arguments)),
        );
    }

    for &kind in LEGACY_RESPLIT_KINDS {
        registry.insert(
            kind.name(),
            Box::new(move |arguments| {
                if arguments.len() == 1 && kind.arity() > 1 {
                    let resplit: Vec<String> = arguments[0]
                        .split(FALLBACK_DELIMITER)
                        .map(str::to_string)
                        .collect();
                    materialize(kind, &resplit)
                } else {
                    materialize(kind, arguments)
                }
            }),
        );
    }

    // The string-argument path cannot restore aggregate members; a bare
    // broken-rules record decodes to an empty aggregate. The serializable
    // path reconstructs the members; see `decode_serializable`.
    registry.insert(
        ExceptionKind::BrokenRules.name(),
        Box::new(|_arguments| AppException::aggregate(Vec::new(), false)),
    );

    registry
}

/// Positional, unchecked materialization: consumes exactly the catalog
/// arity, faulting on under-filled input.
fn materialize(kind: ExceptionKind, arguments: &[String]) -> AppException {
    let arguments: Vec<String> = (0..kind.arity()).map(|i| arguments[i].clone()).collect();
    AppException::from_parts(kind, arguments)
}

/// Decode a wire type name and argument list into an exception.
///
/// Total over names: unknown names produce an `Unexpected` exception
/// carrying the raw name. Not defensive over arguments; see the module
/// docs.
pub fn decode(type_name: &str, arguments: &[String]) -> AppException {
    match REGISTRY.get(type_name) {
        Some(factory) => factory(arguments),
        None => AppException::unexpected(type_name, arguments.join("; ")),
    }
}

/// Encode an exception as its wire name and positional arguments.
pub fn encode(exception: &AppException) -> (String, Vec<String>) {
    (exception.name().to_string(), exception.arguments().to_vec())
}

/// Encode an exception as a single definition string
/// (`Name:arg0;arg1;…`), the form embedded in fault contracts.
pub fn encode_definition(exception: &AppException) -> String {
    let (name, arguments) = encode(exception);
    format!("{}:{}", name, join_arguments(&arguments))
}

/// Parse a definition string produced by [`encode_definition`]. A string
/// with no separator is treated as a bare type name.
pub fn decode_definition(definition: &str) -> AppException {
    let (name, csv) = definition.split_once(':').unwrap_or((definition, ""));
    decode(name, &split_arguments(csv))
}

/// Reconstruct an exception from its wire projection.
///
/// Broken-rules records are rebuilt by recursively decoding every inner
/// record and re-aggregating; every other known kind goes through the
/// string-argument path after the tolerant CSV split; unknown kinds
/// become `Unexpected` carrying the transported message. The four
/// identity fields and the timestamp are then restored from the record,
/// and the correlation id is preserved when the record has one.
pub fn decode_serializable(record: &SerializableException) -> AppException {
    let mut exception = if record.exception_type == ExceptionKind::BrokenRules.name() {
        let members = record.inner.iter().map(decode_serializable).collect();
        AppException::aggregate(members, false)
    } else if REGISTRY.contains_key(record.exception_type.as_str()) {
        decode(
            &record.exception_type,
            &split_arguments(&record.raw_parameters_csv),
        )
    } else {
        AppException::unexpected(&record.exception_type, &record.message)
    };

    exception.meta.host_name = record.host_name.clone();
    exception.meta.process_name = record.process_name.clone();
    exception.meta.thread_identity = record.thread_identity.clone();
    exception.meta.os_identity = record.os_identity.clone();
    exception.meta.created_at = record.created_at;
    exception.meta.stack_trace = record.stack_trace.clone();
    if let Some(reference_id) = record.reference_id {
        exception.meta.reference_id = reference_id;
    }
    exception
}
