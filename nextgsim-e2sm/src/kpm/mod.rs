//! E2SM-KPM v2 (Key Performance Measurement)
//!
//! Builders for the periodic event trigger and the per-cell "format 1" action
//! definition, and decoding of KPM indications.
//!
//! # Example
//!
//! ```
//! use nextgsim_e2sm::kpm;
//!
//! let trigger = kpm::encode_event_trigger_definition(kpm::REPORT_PERIOD_INTERVAL_MS).unwrap();
//! let action = kpm::encode_action_definition(1, "cell-1", 1, &["DRB.UEThpDl"]).unwrap();
//! assert!(!trigger.is_empty());
//! assert!(!action.is_empty());
//! ```

pub mod ies;

use crate::codec::{decode_validated, encode_validated};
use crate::descriptor::ServiceModelDescriptor;
use crate::error::{E2smError, PayloadPart};
use crate::validate::Validate;

pub use ies::*;

/// Service model short name used in logs and errors.
pub const MODEL: &str = "KPM";

/// KPM v2 service model identity.
pub const DESCRIPTOR: ServiceModelDescriptor = ServiceModelDescriptor {
    oid: "1.3.6.1.4.1.53148.1.2.2.2",
    name: "oran-e2sm-kpm",
    version: "v2",
};

/// Reporting period of the event trigger (ms).
pub const REPORT_PERIOD_INTERVAL_MS: i64 = 1000;

/// Collection granularity of each action (ms).
pub const REPORT_PERIOD_GRANULARITY_MS: i64 = 1000;

/// A decoded KPM indication.
#[derive(Debug, Clone, PartialEq)]
pub struct Indication {
    /// Indication header
    pub header: E2SmKpmIndicationHeader,
    /// Indication message
    pub message: E2SmKpmIndicationMessage,
}

fn schema_invalid(violation: crate::validate::SchemaViolation) -> E2smError {
    E2smError::SchemaInvalid {
        model: MODEL,
        violation,
    }
}

/// Creates a periodic event trigger definition.
///
/// # Arguments
/// * `period_ms` - Reporting period in milliseconds
pub fn create_event_trigger_definition(period_ms: i64) -> Result<E2SmKpmEventTriggerDefinition, E2smError> {
    let definition = E2SmKpmEventTriggerDefinition {
        event_definition_formats: Some(EventDefinitionFormats::EventDefinitionFormat1(
            E2SmKpmEventTriggerDefinitionFormat1 {
                reporting_period: period_ms,
            },
        )),
    };
    definition.validate().map_err(schema_invalid)?;
    Ok(definition)
}

/// Builds and encodes a periodic event trigger definition.
pub fn encode_event_trigger_definition(period_ms: i64) -> Result<Vec<u8>, E2smError> {
    let definition = create_event_trigger_definition(period_ms)?;
    encode_validated(MODEL, "event trigger", &definition)
}

/// Creates a measurement info item for a named measurement, without labels.
pub fn create_measurement_info_item(name: &str) -> Result<MeasurementInfoItem, E2smError> {
    let item = MeasurementInfoItem {
        meas_type: Some(MeasurementType {
            measurement_type: Some(MeasurementTypeChoice::MeasName(MeasurementTypeName {
                value: name.to_string(),
            })),
        }),
        label_info_list: Some(LabelInfoList {
            value: vec![LabelInfoItem {
                meas_label: Some(MeasurementLabel::none()),
            }],
        }),
    };
    item.validate().map_err(schema_invalid)?;
    Ok(item)
}

/// Creates a measurement info list, keeping the order of `names`.
pub fn create_measurement_info_list(names: &[&str]) -> Result<MeasurementInfoList, E2smError> {
    let value = names
        .iter()
        .map(|name| create_measurement_info_item(name))
        .collect::<Result<Vec<_>, _>>()?;
    let list = MeasurementInfoList { value };
    list.validate().map_err(schema_invalid)?;
    Ok(list)
}

/// Creates a format 1 (per-cell) action definition body.
///
/// # Arguments
/// * `cell_obj_id` - Cell object identifier
/// * `meas_info_list` - Measurements to collect
/// * `granularity_ms` - Collection granularity in milliseconds
/// * `subscription_id` - Subscription sequence number (1-based)
pub fn create_action_definition_format1(
    cell_obj_id: &str,
    meas_info_list: MeasurementInfoList,
    granularity_ms: i64,
    subscription_id: i64,
) -> Result<E2SmKpmActionDefinitionFormat1, E2smError> {
    let format1 = E2SmKpmActionDefinitionFormat1 {
        cell_obj_id: Some(CellObjectId {
            value: cell_obj_id.to_string(),
        }),
        meas_info_list: Some(meas_info_list),
        granul_period: Some(GranularityPeriod {
            value: granularity_ms,
        }),
        subscript_id: Some(SubscriptionId {
            value: subscription_id,
        }),
    };
    format1.validate().map_err(schema_invalid)?;
    Ok(format1)
}

/// Wraps a format 1 body into an action definition for a report style.
pub fn create_action_definition(
    ric_style_type: i32,
    format1: E2SmKpmActionDefinitionFormat1,
) -> Result<E2SmKpmActionDefinition, E2smError> {
    let definition = E2SmKpmActionDefinition {
        ric_style_type,
        action_definition_formats: Some(ActionDefinitionFormats::ActionDefinitionFormat1(format1)),
    };
    definition.validate().map_err(schema_invalid)?;
    Ok(definition)
}

/// Builds and encodes the action definition for one cell.
///
/// The measurement info list holds one entry per name, in the given order.
/// Granularity is [`REPORT_PERIOD_GRANULARITY_MS`].
///
/// # Arguments
/// * `subscription_id` - Subscription sequence number (1-based)
/// * `cell_obj_id` - Cell object identifier
/// * `ric_style_type` - Report style type
/// * `measurements` - Measurement names of the report style
pub fn encode_action_definition(
    subscription_id: i64,
    cell_obj_id: &str,
    ric_style_type: i32,
    measurements: &[&str],
) -> Result<Vec<u8>, E2smError> {
    let meas_info_list = create_measurement_info_list(measurements)?;
    let format1 = create_action_definition_format1(
        cell_obj_id,
        meas_info_list,
        REPORT_PERIOD_GRANULARITY_MS,
        subscription_id,
    )?;
    let definition = create_action_definition(ric_style_type, format1)?;
    encode_validated(MODEL, "action definition", &definition)
}

/// Decodes an encoded action definition.
pub fn decode_action_definition(bytes: &[u8]) -> Result<E2SmKpmActionDefinition, E2smError> {
    decode_validated(MODEL, PayloadPart::ActionDefinition, bytes)
}

/// Decodes an encoded event trigger definition.
pub fn decode_event_trigger_definition(bytes: &[u8]) -> Result<E2SmKpmEventTriggerDefinition, E2smError> {
    decode_validated(MODEL, PayloadPart::EventTrigger, bytes)
}

/// Decodes a KPM indication.
///
/// The header and message are decoded independently; the error reports
/// which of the two failed. Formats are not normalized.
pub fn decode_indication(header: &[u8], message: &[u8]) -> Result<Indication, E2smError> {
    let header = decode_validated(MODEL, PayloadPart::IndicationHeader, header)?;
    let message = decode_validated(MODEL, PayloadPart::IndicationMessage, message)?;
    Ok(Indication { header, message })
}

/// Validates and encodes an indication header (E2 node side).
pub fn encode_indication_header(header: &E2SmKpmIndicationHeader) -> Result<Vec<u8>, E2smError> {
    encode_validated(MODEL, "indication header", header)
}

/// Validates and encodes an indication message (E2 node side).
pub fn encode_indication_message(message: &E2SmKpmIndicationMessage) -> Result<Vec<u8>, E2smError> {
    encode_validated(MODEL, "indication message", message)
}
