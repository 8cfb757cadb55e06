//! Validated protobuf encoding and decoding
//!
//! Shared by the KPM and RC modules: encoding refuses messages that fail
//! schema validation, decoding rejects buffers that are not well-formed or
//! that decode into a structurally invalid message.

use nextgsim_common::logging::{log_e2sm_payload, Direction};
use prost::Message;

use crate::error::{E2smError, PayloadPart};
use crate::validate::Validate;

/// Validates `message` and encodes it.
///
/// # Arguments
/// * `model` - Service model short name, used in errors and logs
/// * `kind` - Payload kind, used in logs
/// * `message` - The message to encode
///
/// # Returns
/// * `Ok(Vec<u8>)` - The encoded bytes
/// * `Err(E2smError::SchemaInvalid)` - If validation fails
pub fn encode_validated<M>(model: &'static str, kind: &str, message: &M) -> Result<Vec<u8>, E2smError>
where
    M: Message + Validate,
{
    message
        .validate()
        .map_err(|violation| E2smError::SchemaInvalid { model, violation })?;

    let bytes = message.encode_to_vec();
    log_e2sm_payload(model, Direction::Tx, kind, &bytes);
    Ok(bytes)
}

/// Decodes a received payload and validates the result.
///
/// # Returns
/// * `Ok(M)` - The decoded message
/// * `Err(E2smError::DecodeFailed)` - If the bytes are malformed or the
///   decoded message violates the schema
pub fn decode_validated<M>(model: &'static str, part: PayloadPart, bytes: &[u8]) -> Result<M, E2smError>
where
    M: Message + Default + Validate,
{
    log_e2sm_payload(model, Direction::Rx, &part.to_string(), bytes);

    let message = M::decode(bytes).map_err(|e| E2smError::DecodeFailed {
        model,
        part,
        reason: e.to_string(),
    })?;

    message.validate().map_err(|violation| E2smError::DecodeFailed {
        model,
        part,
        reason: violation.to_string(),
    })?;

    Ok(message)
}
