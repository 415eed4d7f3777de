//! Context value keys.
//!
//! The double-underscore names are the wire/legacy spelling shared with the
//! other tiers of the suite; do not rename them without coordinating a
//! protocol change.

/// Authenticated user name.
pub const USER_NAME: &str = "__UserName";

/// Originating client IP address.
pub const USER_IP: &str = "__UserIp";

/// Opaque security token issued at sign-in.
pub const SECURITY_TOKEN: &str = "__SecurityToken";

/// Two-letter UI language code (e.g. `en`, `it`).
pub const USER_LANGUAGE: &str = "__UserLanguage";

/// Full culture identifier (e.g. `en-US`).
pub const USER_CULTURE: &str = "__UserCulture";

/// Logical session identifier.
pub const SESSION_ID: &str = "__SessionId";

/// Name of the client application inside the suite.
pub const APPLICATION_NAME: &str = "__ApplicationName";

/// Code of the information owner (tenant/organizational unit) the
/// request operates on behalf of.
pub const INFORMATION_OWNER_CODE: &str = "__InformationOwnerCode";

/// User name the background service runs under. A context carrying this
/// name is considered *not* authenticated by the accessors: service work
/// must never pass user-level permission checks by accident.
pub const SERVICE_ACCOUNT_NAME: &str = "crestline$service";

/// Language returned when neither the context nor the process configures
/// one.
pub const DEFAULT_LANGUAGE: &str = "en";
