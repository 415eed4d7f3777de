//! Classification of assertion calls.

use serde::{Deserialize, Serialize};

/// What an assertion checked. One counter per kind is kept for every test
/// method, so the reports can show how a suite actually exercises its
/// subject (all equality checks and never a failure path, for instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssertKind {
    Equality,
    Inequality,
    IsTrue,
    IsFalse,
    IsSome,
    IsNone,
    Contains,
    Fail,
    Inconclusive,
}

impl AssertKind {
    /// Every kind, for report columns.
    pub const ALL: &'static [AssertKind] = &[
        AssertKind::Equality,
        AssertKind::Inequality,
        AssertKind::IsTrue,
        AssertKind::IsFalse,
        AssertKind::IsSome,
        AssertKind::IsNone,
        AssertKind::Contains,
        AssertKind::Fail,
        AssertKind::Inconclusive,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            AssertKind::Equality => "Equality",
            AssertKind::Inequality => "Inequality",
            AssertKind::IsTrue => "IsTrue",
            AssertKind::IsFalse => "IsFalse",
            AssertKind::IsSome => "IsSome",
            AssertKind::IsNone => "IsNone",
            AssertKind::Contains => "Contains",
            AssertKind::Fail => "Fail",
            AssertKind::Inconclusive => "Inconclusive",
        }
    }
}
