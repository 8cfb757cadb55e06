//! Error types for E2SM payload handling

use std::fmt;

use thiserror::Error;

use crate::validate::SchemaViolation;

/// Service-model payload that failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadPart {
    /// Indication header
    IndicationHeader,
    /// Indication message
    IndicationMessage,
    /// Subscription event trigger
    EventTrigger,
    /// Subscription action definition
    ActionDefinition,
}

impl fmt::Display for PayloadPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadPart::IndicationHeader => write!(f, "indication header"),
            PayloadPart::IndicationMessage => write!(f, "indication message"),
            PayloadPart::EventTrigger => write!(f, "event trigger"),
            PayloadPart::ActionDefinition => write!(f, "action definition"),
        }
    }
}

/// E2SM codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum E2smError {
    /// A constructed payload failed structural validation
    #[error("E2SM-{model} schema invalid: {violation}")]
    SchemaInvalid {
        /// Service model short name
        model: &'static str,
        /// The violated constraint
        #[source]
        violation: SchemaViolation,
    },

    /// A received payload could not be decoded
    #[error("E2SM-{model} {part} decode failed: {reason}")]
    DecodeFailed {
        /// Service model short name
        model: &'static str,
        /// Which payload failed
        part: PayloadPart,
        /// Description of the failure
        reason: String,
    },
}

impl E2smError {
    /// Returns the failing payload for decode failures.
    pub fn payload_part(&self) -> Option<PayloadPart> {
        match self {
            E2smError::DecodeFailed { part, .. } => Some(*part),
            E2smError::SchemaInvalid { .. } => None,
        }
    }
}
