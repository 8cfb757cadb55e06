//! E2SM-RC v1 (RAN Control)
//!
//! Only E2 node information reporting is covered: an event trigger that
//! fires on cell configuration and neighbor relation changes, and a style 3
//! report action asking for the serving cell SINR.

pub mod ies;

use crate::codec::{decode_validated, encode_validated};
use crate::descriptor::ServiceModelDescriptor;
use crate::error::{E2smError, PayloadPart};
use crate::validate::{SchemaViolation, Validate};

pub use ies::*;

/// Service model short name used in logs and errors.
pub const MODEL: &str = "RC";

/// RC v1 service model identity.
pub const DESCRIPTOR: ServiceModelDescriptor = ServiceModelDescriptor {
    oid: "1.3.6.1.4.1.53148.1.1.2.3",
    name: "oran-e2sm-rc",
    version: "v1",
};

/// Trigger condition and change id for cell configuration changes.
pub const CELL_CONFIGURATION_CHANGE: i32 = 1;

/// Trigger condition and change id for neighbor relation changes.
pub const CELL_NEIGHBOR_RELATION_CHANGE: i32 = 2;

/// Report style "E2 node information".
pub const E2_NODE_INFORMATION_STYLE: i32 = 3;

/// RAN parameter id of the serving cell SINR.
pub const PARAMETER_SINR: i64 = 12503;

/// A decoded RC indication.
#[derive(Debug, Clone, PartialEq)]
pub struct Indication {
    /// Indication header
    pub header: E2SmRcIndicationHeader,
    /// Indication message
    pub message: E2SmRcIndicationMessage,
}

fn schema_invalid(violation: SchemaViolation) -> E2smError {
    E2smError::SchemaInvalid {
        model: MODEL,
        violation,
    }
}

fn trigger_item(id: i32) -> E2SmRcEventTriggerFormat3Item {
    E2SmRcEventTriggerFormat3Item {
        ric_event_trigger_condition_id: Some(RicEventTriggerConditionId { value: id }),
        e2_node_info_change_id: id,
    }
}

/// Creates the E2 node information change trigger.
///
/// Carries two items, in order: cell configuration change, then cell
/// neighbor relation change. Each item uses the same code as its
/// condition id and change id.
pub fn create_event_trigger() -> Result<E2SmRcEventTrigger, E2smError> {
    let trigger = E2SmRcEventTrigger {
        ric_event_trigger_formats: Some(RicEventTriggerFormats::EventTriggerFormat3(
            E2SmRcEventTriggerFormat3 {
                e2_node_info_change_list: vec![
                    trigger_item(CELL_CONFIGURATION_CHANGE),
                    trigger_item(CELL_NEIGHBOR_RELATION_CHANGE),
                ],
            },
        )),
    };
    trigger.validate().map_err(schema_invalid)?;
    Ok(trigger)
}

/// Builds and encodes the E2 node information change trigger.
pub fn encode_event_trigger() -> Result<Vec<u8>, E2smError> {
    let trigger = create_event_trigger()?;
    encode_validated(MODEL, "event trigger", &trigger)
}

/// Creates a format 1 action definition reporting the given parameters.
///
/// # Arguments
/// * `ric_style_type` - Report style
/// * `parameter_ids` - RAN parameter ids, kept in order
pub fn create_action_definition(
    ric_style_type: i32,
    parameter_ids: &[i64],
) -> Result<E2SmRcActionDefinition, E2smError> {
    let definition = E2SmRcActionDefinition {
        ric_style_type: Some(RicStyleType {
            value: ric_style_type,
        }),
        ric_action_definition_formats: Some(RicActionDefinitionFormats::ActionDefinitionFormat1(
            E2SmRcActionDefinitionFormat1 {
                ran_p_to_be_reported_list: parameter_ids
                    .iter()
                    .map(|&value| E2SmRcActionDefinitionFormat1Item {
                        ran_parameter_id: Some(RanParameterId { value }),
                    })
                    .collect(),
            },
        )),
    };
    definition.validate().map_err(schema_invalid)?;
    Ok(definition)
}

/// Builds and encodes a format 1 action definition.
pub fn encode_action_definition(ric_style_type: i32, parameter_ids: &[i64]) -> Result<Vec<u8>, E2smError> {
    let definition = create_action_definition(ric_style_type, parameter_ids)?;
    encode_validated(MODEL, "action definition", &definition)
}

/// Decodes an encoded event trigger.
pub fn decode_event_trigger(bytes: &[u8]) -> Result<E2SmRcEventTrigger, E2smError> {
    decode_validated(MODEL, PayloadPart::EventTrigger, bytes)
}

/// Decodes an encoded action definition.
pub fn decode_action_definition(bytes: &[u8]) -> Result<E2SmRcActionDefinition, E2smError> {
    decode_validated(MODEL, PayloadPart::ActionDefinition, bytes)
}

/// Decodes an RC indication.
///
/// Header and message are decoded independently; the error names the part
/// that failed.
pub fn decode_indication(header: &[u8], message: &[u8]) -> Result<Indication, E2smError> {
    let header = decode_validated(MODEL, PayloadPart::IndicationHeader, header)?;
    let message = decode_validated(MODEL, PayloadPart::IndicationMessage, message)?;
    Ok(Indication { header, message })
}

/// Validates and encodes an indication header (E2 node side).
pub fn encode_indication_header(header: &E2SmRcIndicationHeader) -> Result<Vec<u8>, E2smError> {
    encode_validated(MODEL, "indication header", header)
}

/// Validates and encodes an indication message (E2 node side).
pub fn encode_indication_message(message: &E2SmRcIndicationMessage) -> Result<Vec<u8>, E2smError> {
    encode_validated(MODEL, "indication message", message)
}
