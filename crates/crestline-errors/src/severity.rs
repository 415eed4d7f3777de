//! Exception severity levels.

use serde::{Deserialize, Serialize};

/// How serious an application exception is, for logging and routing.
///
/// The declaration order is the severity order; an aggregate of broken
/// rules reports the maximum severity among its members.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Severity {
    #[default]
    None,
    Information,
    Warning,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Canonical display name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Information => "Information",
            Severity::Warning => "Warning",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// Parse a canonical name back into a level.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "None" => Some(Severity::None),
            "Information" => Some(Severity::Information),
            "Warning" => Some(Severity::Warning),
            "Low" => Some(Severity::Low),
            "Medium" => Some(Severity::Medium),
            "High" => Some(Severity::High),
            "Critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_matches_declaration() {
        assert!(Severity::None < Severity::Information);
        assert!(Severity::Information < Severity::Warning);
        assert!(Severity::Warning < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_parse_round_trip() {
        for severity in [
            Severity::None,
            Severity::Information,
            Severity::Warning,
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ] {
            assert_eq!(Severity::parse(severity.as_str()), Some(severity));
        }
        assert_eq!(Severity::parse("Fatal"), None);
    }
}
