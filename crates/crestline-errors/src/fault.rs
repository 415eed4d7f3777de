//! The service-boundary fault contract.
//!
//! The minimal two-field record older service endpoints exchange: a
//! rendered message for display plus a definition string the receiving
//! tier can decode back into a typed exception. Newer endpoints carry the
//! full [`SerializableException`](crate::SerializableException) instead.

use serde::{Deserialize, Serialize};

use crate::decoder::{decode_definition, encode_definition};
use crate::exception::AppException;

/// Flat fault record for service boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultContract {
    /// Rendered message at fault time, for direct display.
    pub error_message: String,
    /// `Name:arg0;arg1;…` definition, decodable on the receiving tier.
    pub exception_definition: String,
}

impl FaultContract {
    /// Build the fault record for an exception.
    pub fn from_exception(exception: &AppException) -> Self {
        Self {
            error_message: exception.full_message(),
            exception_definition: encode_definition(exception),
        }
    }

    /// Decode the definition back into a typed exception. Unknown
    /// definitions decode to an `Unexpected` exception, like every other
    /// wire path.
    pub fn to_exception(&self) -> AppException {
        decode_definition(&self.exception_definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExceptionKind;

    #[test]
    fn test_contract_round_trip() {
        let original = AppException::period_closed("2024-07");
        let contract = FaultContract::from_exception(&original);

        assert_eq!(contract.error_message, original.full_message());
        let decoded = contract.to_exception();
        assert_eq!(decoded.kind(), ExceptionKind::PeriodClosed);
        assert_eq!(decoded.arguments(), original.arguments());
    }

    #[test]
    fn test_contract_survives_json() {
        let contract =
            FaultContract::from_exception(&AppException::budget_exceeded("B-100", "900", "250"));
        let json = serde_json::to_string(&contract).unwrap();
        let restored: FaultContract = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, contract);
        assert_eq!(
            restored.to_exception().kind(),
            ExceptionKind::BudgetExceeded
        );
    }
}
