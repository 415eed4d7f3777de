//! Message rendering.
//!
//! Turns an exception's pattern and positional arguments into the
//! user-facing text. Rendering is total: whatever the inputs, it returns a
//! string and never fails, because exceptions are rendered while being
//! reported and a failure here would mask the original fault.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::catalog::ExceptionKind;
use crate::exception::AppException;

/// Fallback template for validation messages when the rule code has no
/// entry in the runtime dictionary. Substitutes the full argument list:
/// rule code, default pattern (kept literal), value, severity number.
pub const VALIDATION_FALLBACK_PATTERN: &str = "{0}-{1} ({3}): {2}";

/// Translates message patterns and argument values into the user's
/// language. Registered once per process by the localization tier;
/// rendering works untranslated when none is registered.
pub trait MessageTranslator: Send + Sync {
    /// Return the translation of `text` for `language`, or `None` to keep
    /// the original.
    fn translate(&self, text: &str, language: &str) -> Option<String>;
}

/// Resolves message patterns that live outside the catalog: anomaly
/// subtypes and externally defined business rules, keyed by their first
/// argument.
pub trait ExternalPatternProvider: Send + Sync {
    fn resolve_pattern(&self, kind: ExceptionKind, key: &str) -> Option<String>;
}

static TRANSLATOR: Lazy<RwLock<Option<Arc<dyn MessageTranslator>>>> =
    Lazy::new(|| RwLock::new(None));

static EXTERNAL_PATTERNS: Lazy<RwLock<Option<Arc<dyn ExternalPatternProvider>>>> =
    Lazy::new(|| RwLock::new(None));

static VALIDATION_PATTERNS: Lazy<RwLock<HashMap<String, String>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register the process-wide message translator.
pub fn set_message_translator(translator: Arc<dyn MessageTranslator>) {
    *TRANSLATOR.write() = Some(translator);
}

/// Remove the registered translator (tests, shutdown).
pub fn clear_message_translator() {
    *TRANSLATOR.write() = None;
}

/// Register the process-wide external pattern provider.
pub fn set_external_pattern_provider(provider: Arc<dyn ExternalPatternProvider>) {
    *EXTERNAL_PATTERNS.write() = Some(provider);
}

/// Remove the registered external pattern provider.
pub fn clear_external_pattern_provider() {
    *EXTERNAL_PATTERNS.write() = None;
}

/// Register (or replace) the message pattern for a validation rule code.
pub fn register_validation_pattern(rule_code: impl Into<String>, pattern: impl Into<String>) {
    VALIDATION_PATTERNS
        .write()
        .insert(rule_code.into(), pattern.into());
}

/// Drop all registered validation patterns.
pub fn clear_validation_patterns() {
    VALIDATION_PATTERNS.write().clear();
}

fn validation_pattern(rule_code: &str) -> Option<String> {
    VALIDATION_PATTERNS.read().get(rule_code).cloned()
}

fn external_pattern(kind: ExceptionKind, key: &str) -> Option<String> {
    EXTERNAL_PATTERNS
        .read()
        .as_ref()
        .and_then(|provider| provider.resolve_pattern(kind, key))
}

fn translate(text: &str, language: &str) -> String {
    TRANSLATOR
        .read()
        .as_ref()
        .and_then(|translator| translator.translate(text, language))
        .unwrap_or_else(|| text.to_string())
}

/// Render the full message for an exception. Never fails.
pub(crate) fn render(exception: &AppException) -> String {
    let language = crestline_context::current_user_language();

    match exception.kind() {
        ExceptionKind::BrokenRules => render_broken_rules(exception),
        ExceptionKind::Validation => render_validation(exception, &language),
        ExceptionKind::Anomaly | ExceptionKind::ExternalPatternBusinessLogic => {
            render_external(exception, &language)
        }
        kind => render_pattern(kind.pattern(), exception.arguments(), &language),
    }
}

fn render_broken_rules(exception: &AppException) -> String {
    let mut message = exception.kind().pattern().to_string();
    for member in exception.aggregated() {
        message.push('\n');
        message.push_str("- ");
        message.push_str(&member.full_message());
    }
    message
}

/// Validation messages resolve their pattern from the runtime dictionary
/// keyed by the rule code (argument 0); the registered pattern substitutes
/// the offending value (argument 2). Without an entry the fixed fallback
/// template renders the raw rule data instead.
fn render_validation(exception: &AppException, language: &str) -> String {
    let arguments = exception.arguments();
    if let Some(pattern) = arguments.first().and_then(|code| validation_pattern(code)) {
        let value = arguments.get(2).cloned().unwrap_or_default();
        return render_pattern(&pattern, &[value], language);
    }
    render_pattern(VALIDATION_FALLBACK_PATTERN, arguments, language)
}

/// Anomaly and external business rule messages defer to the registered
/// provider, keyed by argument 0; the provider pattern substitutes the
/// remaining arguments. The catalog pattern is the fallback.
fn render_external(exception: &AppException, language: &str) -> String {
    let arguments = exception.arguments();
    if let Some(pattern) = arguments
        .first()
        .and_then(|key| external_pattern(exception.kind(), key))
    {
        return render_pattern(&pattern, &arguments[1..], language);
    }
    render_pattern(exception.kind().pattern(), arguments, language)
}

fn render_pattern(pattern: &str, arguments: &[String], language: &str) -> String {
    let pattern = translate(pattern, language);
    let arguments: Vec<String> = arguments
        .iter()
        .map(|argument| translate(argument, language))
        .collect();

    match format_positional(&pattern, &arguments) {
        Some(message) => message,
        None => fallback_dump(&pattern, &arguments),
    }
}

/// Diagnostic rendering for a pattern/argument mismatch: the raw pattern
/// followed by the raw arguments. Degraded but lossless.
fn fallback_dump(pattern: &str, arguments: &[String]) -> String {
    if arguments.is_empty() {
        return pattern.to_string();
    }
    format!("{} [{}]", pattern, arguments.join("; "))
}

/// Substitute `{0}..{n}` placeholders positionally. Returns `None` when
/// the placeholder count disagrees with the argument count (in either
/// direction), which callers turn into the diagnostic dump. `{{` and `}}`
/// escape literal braces.
pub(crate) fn format_positional(pattern: &str, arguments: &[String]) -> Option<String> {
    if placeholder_count(pattern) != arguments.len() {
        return None;
    }

    let mut output = String::with_capacity(pattern.len() + 16 * arguments.len());
    let mut chars = pattern.chars().peekable();
    while let Some(current) = chars.next() {
        match current {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '{' => {
                let mut digits = String::new();
                while let Some(digit) = chars.peek().filter(|c| c.is_ascii_digit()) {
                    digits.push(*digit);
                    chars.next();
                }
                // placeholder_count accepted the pattern, so the brace is
                // well-formed and the index is in range
                chars.next();
                let index: usize = digits.parse().ok()?;
                output.push_str(arguments.get(index)?);
            }
            other => output.push(other),
        }
    }
    Some(output)
}

/// Highest placeholder index + 1 referenced by `pattern`; 0 when the
/// pattern has no placeholders or is malformed.
pub(crate) fn placeholder_count(pattern: &str) -> usize {
    let mut highest: Option<usize> = None;
    let mut chars = pattern.chars().peekable();
    while let Some(current) = chars.next() {
        if current != '{' {
            continue;
        }
        if chars.peek() == Some(&'{') {
            chars.next();
            continue;
        }
        let mut digits = String::new();
        while let Some(digit) = chars.peek().filter(|c| c.is_ascii_digit()) {
            digits.push(*digit);
            chars.next();
        }
        if digits.is_empty() || chars.next() != Some('}') {
            return 0;
        }
        if let Ok(index) = digits.parse::<usize>() {
            highest = Some(highest.map_or(index, |current| current.max(index)));
        }
    }
    highest.map_or(0, |index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppException;

    // Tests touching the process-wide registries take this lock so they
    // cannot observe each other's registrations.
    static REGISTRY_GUARD: parking_lot::Mutex<()> = parking_lot::Mutex::new(());

    #[test]
    fn test_positional_substitution() {
        let arguments = vec!["Order".to_string(), "42".to_string()];
        assert_eq!(
            format_positional("Item of type '{0}' with key '{1}' was not found.", &arguments),
            Some("Item of type 'Order' with key '42' was not found.".to_string())
        );
    }

    #[test]
    fn test_mismatch_returns_none() {
        let arguments = vec!["only-one".to_string()];
        assert_eq!(format_positional("{0} and {1}", &arguments), None);
        assert_eq!(format_positional("no placeholders", &arguments), None);
    }

    #[test]
    fn test_escaped_braces() {
        let arguments = vec!["x".to_string()];
        assert_eq!(
            format_positional("{{literal}} {0}", &arguments),
            Some("{literal} x".to_string())
        );
    }

    #[test]
    fn test_placeholder_count_uses_highest_index() {
        assert_eq!(placeholder_count("{0}-{1} ({3}): {2}"), 4);
        assert_eq!(placeholder_count("plain text"), 0);
        assert_eq!(placeholder_count("{{escaped}}"), 0);
        assert_eq!(placeholder_count("{1} only"), 2);
    }

    #[test]
    fn test_mismatched_message_degrades_to_dump() {
        // Built through the uniform back door with the wrong arity on
        // purpose: rendering must not fail.
        let exception = AppException::from_parts(
            crate::ExceptionKind::ItemNotFound,
            vec!["Order".to_string()],
        );
        let message = exception.full_message();
        assert!(message.contains("Item of type"));
        assert!(message.contains("Order"));
    }

    #[test]
    fn test_validation_fallback_template() {
        let _guard = REGISTRY_GUARD.lock();
        clear_validation_patterns();
        let exception = AppException::validation("V001", "Value {0} invalid", "42", "3");
        assert_eq!(exception.full_message(), "V001-Value {0} invalid (3): 42");
    }

    #[test]
    fn test_validation_dictionary_pattern_wins() {
        let _guard = REGISTRY_GUARD.lock();
        register_validation_pattern("V777", "Quantity {0} is not allowed here");
        let exception = AppException::validation("V777", "unused default", "13", "2");
        assert_eq!(exception.full_message(), "Quantity 13 is not allowed here");
        clear_validation_patterns();
    }

    #[test]
    fn test_broken_rules_lists_members() {
        let aggregate = AppException::aggregate(
            vec![
                AppException::mandatory_field_missing("Name"),
                AppException::iban_invalid("XX00"),
            ],
            false,
        );
        let message = aggregate.full_message();
        assert!(message.starts_with("One or more business rules were broken."));
        assert!(message.contains("- The mandatory field 'Name' is missing."));
        assert!(message.contains("- The IBAN 'XX00' is not valid."));
    }

    #[test]
    fn test_translator_applies_to_pattern_and_arguments() {
        let _guard = REGISTRY_GUARD.lock();
        // Translates only the texts under test, so concurrently running
        // tests in other modules keep their untranslated messages.
        struct Shouting;
        impl MessageTranslator for Shouting {
            fn translate(&self, text: &str, _language: &str) -> Option<String> {
                let known = text == ExceptionKind::ServiceUnavailable.pattern() || text == "billing";
                known.then(|| text.to_uppercase())
            }
        }

        set_message_translator(std::sync::Arc::new(Shouting));
        let exception = AppException::service_unavailable("billing");
        assert_eq!(
            exception.full_message(),
            "THE SERVICE 'BILLING' IS CURRENTLY UNAVAILABLE."
        );
        clear_message_translator();
    }
}
