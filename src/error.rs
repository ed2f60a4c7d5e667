//! Validation error taxonomy
//!
//! All variants are recoverable and local to one field; none of them
//! prevents the configuration from being compiled.

use thiserror::Error;

use crate::keyvalue::{RowFault, RowId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", fault.message())]
    RowPairing { row: RowId, fault: RowFault },

    #[error("Please enter a valid URL")]
    UrlFormat(String),

    #[error("Invalid JSON format: {0}")]
    BodyParse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ValidationError::RowPairing {
            row: RowId(3),
            fault: RowFault::MissingValue,
        };
        assert_eq!(err.to_string(), "Value is required when key is provided");

        let err = ValidationError::UrlFormat("relative URL without a base".into());
        assert_eq!(err.to_string(), "Please enter a valid URL");
    }
}
