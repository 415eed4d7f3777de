//! The application exception catalog.
//!
//! Every exception the suite can raise is declared here exactly once, with
//! its wire name, stable negative code, severity, positional argument list,
//! and message pattern. The [`define_exceptions!`] macro turns the catalog
//! into the [`ExceptionKind`] enum, its lookup tables, and one typed
//! constructor per kind on [`AppException`] whose parameter list is the
//! argument layout.
//!
//! # Code ranges
//!
//! | Range        | Area                                    |
//! |--------------|-----------------------------------------|
//! | -1000..-1099 | General and infrastructure              |
//! | -1100..-1199 | Security and authentication             |
//! | -1200..-1299 | Field and rule validation               |
//! | -1300..-1399 | Persistence and data access             |
//! | -1400..-1499 | Concurrency and locking                 |
//! | -1500..-1599 | Workflow and business operations        |
//! | -1600..-1699 | Import and export                       |
//! | -1700..-1799 | Localization                            |
//! | -1800..-1899 | Configuration and licensing             |
//! | -1900..-1999 | Integration and messaging               |
//!
//! Codes are load-bearing: the other tiers correlate faults by them, so a
//! code is never reused or renumbered.

use crate::exception::AppException;
use crate::severity::Severity;

macro_rules! count_args {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count_args!($($tail)*) };
}

/// Declares the whole catalog in one place; see the module docs.
///
/// Entry form:
/// `Variant / constructor(arg, ...) => (code, Severity, "pattern");`
/// The `/ constructor(...)` part is optional: kinds with non-positional
/// construction (aggregates) omit it and get a hand-written constructor.
macro_rules! define_exceptions {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident $(/ $ctor:ident ( $($arg:ident),* ) )? => ($code:literal, $severity:ident, $pattern:literal);
        )+
    ) => {
        /// Discriminant for every application exception in the catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum ExceptionKind {
            $( $(#[$meta])* $variant, )+
        }

        impl ExceptionKind {
            /// Every kind, in catalog order. Used by the decode registry
            /// and the catalog invariant tests.
            pub const ALL: &'static [ExceptionKind] = &[ $(ExceptionKind::$variant,)+ ];

            /// Stable negative code, unique per kind.
            pub const fn code(&self) -> i32 {
                match self { $(Self::$variant => $code,)+ }
            }

            /// Severity assigned in the catalog. For an aggregate the
            /// effective severity is computed from its members instead;
            /// see [`AppException::severity`].
            pub const fn base_severity(&self) -> Severity {
                match self { $(Self::$variant => Severity::$severity,)+ }
            }

            /// Message pattern with positional `{0}..{n}` placeholders.
            pub const fn pattern(&self) -> &'static str {
                match self { $(Self::$variant => $pattern,)+ }
            }

            /// Wire discriminator: the `…Exception` type name shared with
            /// the other tiers of the suite.
            pub const fn name(&self) -> &'static str {
                match self { $(Self::$variant => concat!(stringify!($variant), "Exception"),)+ }
            }

            /// Number of positional arguments the kind carries. Matches the
            /// highest placeholder index + 1 of [`pattern`](Self::pattern).
            pub const fn arity(&self) -> usize {
                match self { $(Self::$variant => 0usize $( + count_args!($($arg)*) )?,)+ }
            }

            /// Look a kind up by its wire name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().find(|kind| kind.name() == name).copied()
            }
        }

        impl AppException {
            $(
                $(
                    pub fn $ctor( $($arg: impl Into<String>),* ) -> AppException {
                        AppException::from_parts(ExceptionKind::$variant, vec![ $($arg.into()),* ])
                    }
                )?
            )+
        }
    };
}

define_exceptions! {
    // ------------------------------------------------------------------
    // General and infrastructure (-1000..-1099)
    // ------------------------------------------------------------------

    /// Fallback for faults with no specific catalog entry, including wire
    /// records whose type name this tier does not know.
    Unexpected / unexpected(original_type, original_message) =>
        (-1000, Critical, "An unexpected error of type '{0}' occurred: {1}");
    /// A foreign error wrapped so that every escaping fault is typed.
    Wrapper / wrapper(original_type, original_message) =>
        (-1001, High, "An error of type '{0}' was wrapped and rethrown: {1}");
    /// Sentinel leaf emitted when the wire projection hits its depth bound.
    MaximumExceptionsExceeded / maximum_exceptions_exceeded(limit) =>
        (-1002, Warning, "The maximum number of serialized inner exceptions ({0}) was exceeded.");
    /// A caller violated an API contract.
    InvalidParameter / invalid_parameter(parameter_name, reason) =>
        (-1003, High, "Parameter '{0}' is invalid: {1}");
    NotImplementedFeature / not_implemented_feature(feature_name) =>
        (-1004, Medium, "The feature '{0}' is not implemented in this installation.");
    OperationAborted / operation_aborted(operation_name, reason) =>
        (-1005, Medium, "Operation '{0}' was aborted: {1}");
    OperationTimedOut / operation_timed_out(operation_name, timeout_seconds) =>
        (-1006, Medium, "Operation '{0}' did not complete within {1} seconds.");
    ServiceUnavailable / service_unavailable(service_name) =>
        (-1007, High, "The service '{0}' is currently unavailable.");
    ResourceExhausted / resource_exhausted(resource_name, limit) =>
        (-1008, High, "The resource '{0}' is exhausted (limit {1}).");
    SerializationFailed / serialization_failed(type_name, reason) =>
        (-1009, High, "Serialization of '{0}' failed: {1}");
    DeserializationFailed / deserialization_failed(type_name, reason) =>
        (-1010, High, "Deserialization of '{0}' failed: {1}");
    EncodingNotSupported / encoding_not_supported(encoding_name) =>
        (-1011, Medium, "The text encoding '{0}' is not supported.");
    FileNotFound / file_not_found(file_path) =>
        (-1012, Medium, "The file '{0}' was not found.");
    FileAccessDenied / file_access_denied(file_path) =>
        (-1013, Medium, "Access to the file '{0}' was denied.");
    DirectoryNotFound / directory_not_found(directory_path) =>
        (-1014, Medium, "The directory '{0}' was not found.");
    TemporaryStorageFull / temporary_storage_full(path) =>
        (-1015, High, "The temporary storage at '{0}' is full.");
    BackgroundJobFailed / background_job_failed(job_name, reason) =>
        (-1016, High, "Background job '{0}' failed: {1}");
    SchedulerUnavailable / scheduler_unavailable(scheduler_name) =>
        (-1017, High, "The scheduler '{0}' is not reachable.");

    // ------------------------------------------------------------------
    // Security and authentication (-1100..-1199)
    // ------------------------------------------------------------------

    /// The user may not perform the operation on the resource.
    AccessDenied / access_denied(user_name, resource, permission) =>
        (-1100, High, "User '{0}' is not allowed to access '{1}' (missing permission '{2}').");
    AuthenticationFailed / authentication_failed(user_name) =>
        (-1101, High, "Authentication failed for user '{0}'.");
    SessionExpired / session_expired(session_id) =>
        (-1102, Warning, "The session '{0}' has expired; sign in again.");
    SecurityTokenInvalid / security_token_invalid(token_hint) =>
        (-1103, High, "The security token '{0}' is not valid.");
    SecurityTokenExpired / security_token_expired(token_hint) =>
        (-1104, Warning, "The security token '{0}' has expired.");
    UserLockedOut / user_locked_out(user_name) =>
        (-1105, Warning, "The account '{0}' is locked out.");
    UserNotRegistered / user_not_registered(user_name) =>
        (-1106, Medium, "The user '{0}' is not registered in the suite.");
    PasswordExpired / password_expired(user_name) =>
        (-1107, Warning, "The password for '{0}' has expired.");
    PasswordPolicyViolation / password_policy_violation(rule_description) =>
        (-1108, Low, "The password does not satisfy the policy: {0}");
    PermissionNotGranted / permission_not_granted(user_name, permission) =>
        (-1109, Medium, "User '{0}' does not hold the permission '{1}'.");
    RoleNotAssigned / role_not_assigned(user_name, role_name) =>
        (-1110, Medium, "User '{0}' is not a member of the role '{1}'.");
    ImpersonationNotAllowed / impersonation_not_allowed(user_name, target_user) =>
        (-1111, High, "User '{0}' may not impersonate '{1}'.");
    CertificateInvalid / certificate_invalid(subject) =>
        (-1112, High, "The certificate for '{0}' is not valid.");
    SignatureMismatch / signature_mismatch(document_reference) =>
        (-1113, Critical, "The signature on document '{0}' does not match its content.");
    InformationOwnerMissing / information_owner_missing(user_name) =>
        (-1114, High, "No information owner is associated with user '{0}'.");
    CrossTenantAccessDenied / cross_tenant_access_denied(user_name, owner_code) =>
        (-1115, Critical, "User '{0}' attempted to access data of information owner '{1}'.");

    // ------------------------------------------------------------------
    // Field and rule validation (-1200..-1299)
    // ------------------------------------------------------------------

    /// Validation rule violation. The pattern usually comes from the
    /// runtime validation dictionary keyed by the rule code; the catalog
    /// pattern below is the fixed fallback used when no entry is
    /// registered. See `message::validation_pattern`.
    Validation / validation(rule_code, default_pattern, value, severity_number) =>
        (-1200, Medium, "{0}-{1} ({3}): {2}");
    MandatoryFieldMissing / mandatory_field_missing(field_name) =>
        (-1201, Medium, "The mandatory field '{0}' is missing.");
    FieldOutOfRange / field_out_of_range(field_name, minimum, maximum) =>
        (-1202, Medium, "The field '{0}' must be between {1} and {2}.");
    FieldFormatInvalid / field_format_invalid(field_name, expected_format) =>
        (-1203, Medium, "The field '{0}' does not match the expected format '{1}'.");
    FieldTooLong / field_too_long(field_name, maximum_length) =>
        (-1204, Low, "The field '{0}' exceeds the maximum length of {1} characters.");
    DateRangeInvalid / date_range_invalid(start_date, end_date) =>
        (-1205, Medium, "The start date {0} must not be later than the end date {1}.");
    DateInPast / date_in_past(field_name, value) =>
        (-1206, Low, "The date '{0}' ({1}) must not be in the past.");
    DateInFuture / date_in_future(field_name, value) =>
        (-1207, Low, "The date '{0}' ({1}) must not be in the future.");
    CodeFormatInvalid / code_format_invalid(code_value, expected_format) =>
        (-1208, Medium, "The code '{0}' does not match the format '{1}'.");
    ValueNotInDomain / value_not_in_domain(field_name, value, domain_name) =>
        (-1209, Medium, "The value '{1}' of field '{0}' is not part of the domain '{2}'.");
    DuplicateValue / duplicate_value(field_name, value) =>
        (-1210, Medium, "The value '{1}' of field '{0}' is already in use.");
    CrossFieldRuleViolated / cross_field_rule_violated(rule_description) =>
        (-1211, Medium, "A cross-field rule was violated: {0}");
    CheckDigitInvalid / check_digit_invalid(code_value) =>
        (-1212, Medium, "The check digit of '{0}' is not valid.");
    PercentageOutOfBounds / percentage_out_of_bounds(field_name, value) =>
        (-1213, Low, "The percentage '{0}' ({1}) must be between 0 and 100.");
    QuantityNotPositive / quantity_not_positive(field_name, value) =>
        (-1214, Medium, "The quantity '{0}' ({1}) must be greater than zero.");
    AmountExceedsLimit / amount_exceeds_limit(field_name, amount, limit) =>
        (-1215, Medium, "The amount {1} of '{0}' exceeds the limit of {2}.");
    IbanInvalid / iban_invalid(value) =>
        (-1216, Medium, "The IBAN '{0}' is not valid.");
    FiscalCodeInvalid / fiscal_code_invalid(value) =>
        (-1217, Medium, "The fiscal code '{0}' is not valid.");
    VatNumberInvalid / vat_number_invalid(value) =>
        (-1218, Medium, "The VAT number '{0}' is not valid.");
    EmailAddressInvalid / email_address_invalid(value) =>
        (-1219, Low, "The e-mail address '{0}' is not valid.");
    PhoneNumberInvalid / phone_number_invalid(value) =>
        (-1220, Low, "The phone number '{0}' is not valid.");

    // ------------------------------------------------------------------
    // Persistence and data access (-1300..-1399)
    // ------------------------------------------------------------------

    /// The requested entity does not exist in the store.
    ItemNotFound / item_not_found(entity_type, entity_key) =>
        (-1300, Medium, "Item of type '{0}' with key '{1}' was not found.");
    /// A uniqueness constraint rejected the operation.
    NotUnique / not_unique(entity_type, conflicting_value) =>
        (-1301, Medium, "An item of type '{0}' with the value '{1}' already exists.");
    FieldTruncated / field_truncated(entity_type, field_name) =>
        (-1302, Medium, "The value of field '{1}' on '{0}' would be truncated by the store.");
    MandatoryRelationMissing / mandatory_relation_missing(entity_type, relation_name) =>
        (-1303, Medium, "The mandatory relation '{1}' of '{0}' is not set.");
    ForeignKeyViolation / foreign_key_violation(entity_type, related_entity_type) =>
        (-1304, Medium, "The operation on '{0}' violates a reference to '{1}'.");
    DeleteNotAllowed / delete_not_allowed(entity_type, entity_key, reason) =>
        (-1305, Medium, "Item '{1}' of type '{0}' cannot be deleted: {2}");
    UpdateNotAllowed / update_not_allowed(entity_type, entity_key, reason) =>
        (-1306, Medium, "Item '{1}' of type '{0}' cannot be updated: {2}");
    StorageObjectMissing / storage_object_missing(object_name) =>
        (-1307, High, "The storage object '{0}' does not exist.");
    ConnectionFailed / connection_failed(data_source) =>
        (-1308, Critical, "Could not open a connection to '{0}'.");
    TransactionRolledBack / transaction_rolled_back(operation_name) =>
        (-1309, High, "The transaction for '{0}' was rolled back.");
    BulkOperationFailed / bulk_operation_failed(operation_name, failed_count) =>
        (-1310, High, "Bulk operation '{0}' failed for {1} rows.");
    QueryTimedOut / query_timed_out(query_name) =>
        (-1311, Medium, "The query '{0}' timed out.");
    ArchiveNotAllowed / archive_not_allowed(entity_type, entity_key) =>
        (-1312, Low, "Item '{1}' of type '{0}' cannot be archived.");
    RestoreNotAllowed / restore_not_allowed(entity_type, entity_key) =>
        (-1313, Low, "Item '{1}' of type '{0}' cannot be restored.");
    EntityAlreadyExists / entity_already_exists(entity_type, entity_key) =>
        (-1314, Medium, "An item of type '{0}' with key '{1}' already exists.");
    EntityVersionMissing / entity_version_missing(entity_type, entity_key) =>
        (-1315, Medium, "No version information found for item '{1}' of type '{0}'.");
    SequenceExhausted / sequence_exhausted(sequence_name) =>
        (-1316, Critical, "The number sequence '{0}' is exhausted.");
    SnapshotCorrupted / snapshot_corrupted(entity_type, entity_key) =>
        (-1317, Critical, "The stored snapshot of item '{1}' of type '{0}' is corrupted.");

    // ------------------------------------------------------------------
    // Concurrency and locking (-1400..-1499)
    // ------------------------------------------------------------------

    /// Someone else changed the entity since it was read.
    ConcurrencyViolation / concurrency_violation(entity_type, entity_key) =>
        (-1400, Medium, "Item '{1}' of type '{0}' was modified by another user.");
    RecordLocked / record_locked(entity_type, entity_key, locked_by) =>
        (-1401, Medium, "Item '{1}' of type '{0}' is locked by '{2}'.");
    DeadlockDetected / deadlock_detected(operation_name) =>
        (-1402, High, "Operation '{0}' was chosen as a deadlock victim.");
    LockAcquisitionTimedOut / lock_acquisition_timed_out(resource_name, timeout_seconds) =>
        (-1403, Medium, "Could not lock '{0}' within {1} seconds.");
    StaleRevision / stale_revision(entity_type, entity_key, expected_revision) =>
        (-1404, Medium, "Item '{1}' of type '{0}' is not at the expected revision {2}.");
    EditSessionExpired / edit_session_expired(entity_type, entity_key) =>
        (-1405, Warning, "The edit session for item '{1}' of type '{0}' has expired.");

    // ------------------------------------------------------------------
    // Workflow and business operations (-1500..-1599)
    // ------------------------------------------------------------------

    /// Aggregate of independent rule violations from one logical
    /// operation. Constructed through [`AppException::aggregate`]; the
    /// members, not this row, determine the effective severity.
    BrokenRules =>
        (-1500, High, "One or more business rules were broken.");
    AddEntityNotAllowed / add_entity_not_allowed(entity_type, parent_entity, reason) =>
        (-1501, Medium, "An item of type '{0}' cannot be added to '{1}': {2}");
    /// Business rule whose message pattern lives outside the catalog and
    /// is resolved through the registered external pattern provider.
    ExternalPatternBusinessLogic / external_pattern_business_logic(pattern_key, detail) =>
        (-1502, Medium, "Business rule '{0}' was violated: {1}");
    /// Data anomaly detected by a background consistency check; the
    /// subtype provider may refine the message pattern.
    Anomaly / anomaly(subtype_code, detail) =>
        (-1503, High, "Anomaly '{0}' detected: {1}");
    StateTransitionNotAllowed / state_transition_not_allowed(entity_type, from_state, to_state) =>
        (-1504, Medium, "An item of type '{0}' cannot move from state '{1}' to state '{2}'.");
    OperationNotAllowedInState / operation_not_allowed_in_state(operation_name, current_state) =>
        (-1505, Medium, "Operation '{0}' is not allowed while in state '{1}'.");
    ApprovalRequired / approval_required(entity_type, entity_key) =>
        (-1506, Information, "Item '{1}' of type '{0}' requires approval before this operation.");
    ApprovalAlreadyGranted / approval_already_granted(entity_type, entity_key) =>
        (-1507, Information, "Item '{1}' of type '{0}' was already approved.");
    TaskAlreadyCompleted / task_already_completed(task_reference) =>
        (-1508, Information, "The task '{0}' was already completed.");
    TaskNotAssigned / task_not_assigned(task_reference, user_name) =>
        (-1509, Medium, "The task '{0}' is not assigned to user '{1}'.");
    DocumentAlreadyPosted / document_already_posted(document_reference) =>
        (-1510, Medium, "The document '{0}' was already posted.");
    DocumentNotPosted / document_not_posted(document_reference) =>
        (-1511, Medium, "The document '{0}' has not been posted yet.");
    PeriodClosed / period_closed(period_reference) =>
        (-1512, Medium, "The accounting period '{0}' is closed.");
    BudgetExceeded / budget_exceeded(budget_reference, amount, available) =>
        (-1513, High, "Budget '{0}' would be exceeded: requested {1}, available {2}.");
    WorkflowSuspended / workflow_suspended(workflow_reference) =>
        (-1514, Warning, "The workflow '{0}' is suspended.");
    WorkflowStepMissing / workflow_step_missing(workflow_reference, step_name) =>
        (-1515, High, "The workflow '{0}' has no step named '{1}'.");
    SignatureRequired / signature_required(document_reference) =>
        (-1516, Medium, "The document '{0}' must be signed before this operation.");
    QuotaExceeded / quota_exceeded(quota_name, limit) =>
        (-1517, Medium, "The quota '{0}' (limit {1}) was exceeded.");

    // ------------------------------------------------------------------
    // Import and export (-1600..-1699)
    // ------------------------------------------------------------------

    ImportFileMissing / import_file_missing(file_name) =>
        (-1600, Medium, "The import file '{0}' was not found.");
    ImportFormatInvalid / import_format_invalid(file_name, expected_format) =>
        (-1601, Medium, "The import file '{0}' is not in the expected format '{1}'.");
    ImportRowRejected / import_row_rejected(file_name, row_number, reason) =>
        (-1602, Low, "Row {1} of import file '{0}' was rejected: {2}");
    ImportAborted / import_aborted(file_name, processed_rows) =>
        (-1603, High, "The import of '{0}' was aborted after {1} rows.");
    ExportTargetUnavailable / export_target_unavailable(target_name) =>
        (-1604, Medium, "The export target '{0}' is not available.");
    ColumnMappingMissing / column_mapping_missing(column_name) =>
        (-1605, Medium, "No mapping is defined for column '{0}'.");
    TemplateNotFound / template_not_found(template_name) =>
        (-1606, Medium, "The template '{0}' was not found.");

    // ------------------------------------------------------------------
    // Localization (-1700..-1799)
    // ------------------------------------------------------------------

    TranslationMissing / translation_missing(resource_key, language) =>
        (-1700, Information, "No translation of '{0}' exists for language '{1}'.");
    CultureNotSupported / culture_not_supported(culture_name) =>
        (-1701, Low, "The culture '{0}' is not supported by this installation.");
    PatternResolutionFailed / pattern_resolution_failed(pattern_key) =>
        (-1702, Warning, "The message pattern '{0}' could not be resolved.");

    // ------------------------------------------------------------------
    // Configuration and licensing (-1800..-1899)
    // ------------------------------------------------------------------

    ConfigurationKeyMissing / configuration_key_missing(key_name) =>
        (-1800, High, "The configuration key '{0}' is not set.");
    ConfigurationValueInvalid / configuration_value_invalid(key_name, value) =>
        (-1801, High, "The configuration key '{0}' has the invalid value '{1}'.");
    EnvironmentNotConfigured / environment_not_configured(environment_name) =>
        (-1802, Critical, "The environment '{0}' is not configured.");
    FeatureDisabled / feature_disabled(feature_name) =>
        (-1803, Information, "The feature '{0}' is disabled in this installation.");
    LicenseExpired / license_expired(module_name) =>
        (-1804, Critical, "The license for module '{0}' has expired.");
    LicenseLimitExceeded / license_limit_exceeded(module_name, limit) =>
        (-1805, High, "The license for module '{0}' allows at most {1} users.");
    SettingsStoreUnavailable / settings_store_unavailable(store_name) =>
        (-1806, Critical, "The settings store '{0}' is not reachable.");

    // ------------------------------------------------------------------
    // Integration and messaging (-1900..-1999)
    // ------------------------------------------------------------------

    RemoteServiceFault / remote_service_fault(service_name, fault_detail) =>
        (-1900, High, "The remote service '{0}' returned a fault: {1}");
    RemoteServiceTimedOut / remote_service_timed_out(service_name, timeout_seconds) =>
        (-1901, Medium, "The remote service '{0}' did not answer within {1} seconds.");
    MessageQueueUnavailable / message_queue_unavailable(queue_name) =>
        (-1902, Critical, "The message queue '{0}' is not available.");
    FaultContractInvalid / fault_contract_invalid(detail) =>
        (-1903, High, "The received fault contract could not be interpreted: {0}");
    EndpointNotConfigured / endpoint_not_configured(endpoint_name) =>
        (-1904, High, "No endpoint is configured under the name '{0}'.");
    PayloadTooLarge / payload_too_large(endpoint_name, size_bytes, limit_bytes) =>
        (-1905, Medium, "The payload for '{0}' is {1} bytes; the limit is {2} bytes.");
    ProtocolVersionMismatch / protocol_version_mismatch(expected_version, actual_version) =>
        (-1906, High, "Expected protocol version {0} but the peer speaks {1}.");
    CorrelationLost / correlation_lost(reference_id) =>
        (-1907, Warning, "No server-side fault matches the reference '{0}'.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::placeholder_count;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_negative() {
        let mut seen = HashSet::new();
        for kind in ExceptionKind::ALL {
            assert!(kind.code() < 0, "{:?} has a non-negative code", kind);
            assert!(seen.insert(kind.code()), "duplicate code {}", kind.code());
        }
    }

    #[test]
    fn test_names_are_unique_and_resolve_back() {
        let mut seen = HashSet::new();
        for kind in ExceptionKind::ALL {
            assert!(seen.insert(kind.name()), "duplicate name {}", kind.name());
            assert_eq!(ExceptionKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(ExceptionKind::from_name("NoSuchException"), None);
    }

    #[test]
    fn test_arity_matches_pattern_placeholders() {
        for kind in ExceptionKind::ALL {
            assert_eq!(
                kind.arity(),
                placeholder_count(kind.pattern()),
                "{:?}: arity does not cover the pattern {:?}",
                kind,
                kind.pattern()
            );
        }
    }

    #[test]
    fn test_wire_names_carry_the_exception_suffix() {
        for kind in ExceptionKind::ALL {
            assert!(
                kind.name().ends_with("Exception"),
                "{:?} has wire name {}",
                kind,
                kind.name()
            );
        }
    }

    #[test]
    fn test_catalog_size_is_stable() {
        // Adding a kind is fine; bump this alongside. Removing one is a
        // wire compatibility break.
        assert_eq!(ExceptionKind::ALL.len(), 122);
    }
}
