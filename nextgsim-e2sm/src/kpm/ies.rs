//! E2SM-KPM v2 information elements
//!
//! Protobuf message definitions for the KPM event trigger, action definition
//! and indication payloads, with their structural constraints.

use prost::{Message, Oneof};

use crate::validate::{check_range, check_size, require, validate_all, SchemaViolation, Validate};

/// Upper bound of the reporting and granularity periods (ms).
pub const MAX_PERIOD_MS: i64 = 4_294_967_295;
/// Maximum length of a cell object identifier.
pub const MAX_CELL_OBJECT_ID_LEN: usize = 400;
/// Maximum length of a measurement type name.
pub const MAX_MEAS_NAME_LEN: usize = 150;
/// Maximum number of measurements in one action definition or report.
pub const MAX_NO_OF_MEAS_INFO: usize = 65535;
/// Maximum number of labels per measurement.
pub const MAX_NO_OF_LABEL_INFO: usize = 2_147_483_647;
/// Maximum number of measurement records in one report.
pub const MAX_NO_OF_MEAS_RECORD: usize = 2_147_483_647;
/// Maximum number of conditional UE measurements.
pub const MAX_NO_OF_COND_UE: usize = 32768;
/// Maximum measurement type identifier.
pub const MAX_MEAS_TYPE_ID: i64 = 65536;

// ============================================================================
// Event Trigger Definition
// ============================================================================

/// KPM event trigger definition
#[derive(Clone, PartialEq, Message)]
pub struct E2SmKpmEventTriggerDefinition {
    /// Event trigger format choice
    #[prost(oneof = "EventDefinitionFormats", tags = "1")]
    pub event_definition_formats: Option<EventDefinitionFormats>,
}

/// KPM event trigger formats
#[derive(Clone, PartialEq, Oneof)]
pub enum EventDefinitionFormats {
    /// Periodic reporting
    #[prost(message, tag = "1")]
    EventDefinitionFormat1(E2SmKpmEventTriggerDefinitionFormat1),
}

/// Periodic report trigger
#[derive(Clone, PartialEq, Message)]
pub struct E2SmKpmEventTriggerDefinitionFormat1 {
    /// Reporting period in milliseconds
    #[prost(int64, tag = "1")]
    pub reporting_period: i64,
}

impl Validate for E2SmKpmEventTriggerDefinition {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("eventDefinitionFormats", &self.event_definition_formats)? {
            EventDefinitionFormats::EventDefinitionFormat1(format1) => format1.validate(),
        }
    }
}

impl Validate for E2SmKpmEventTriggerDefinitionFormat1 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("reportingPeriod", self.reporting_period, 1, MAX_PERIOD_MS)
    }
}

// ============================================================================
// Action Definition
// ============================================================================

/// KPM action definition
#[derive(Clone, PartialEq, Message)]
pub struct E2SmKpmActionDefinition {
    /// Report style this action belongs to
    #[prost(int32, tag = "1")]
    pub ric_style_type: i32,
    /// Action definition format choice
    #[prost(oneof = "ActionDefinitionFormats", tags = "2")]
    pub action_definition_formats: Option<ActionDefinitionFormats>,
}

/// KPM action definition formats
#[derive(Clone, PartialEq, Oneof)]
pub enum ActionDefinitionFormats {
    /// Per-cell measurement collection
    #[prost(message, tag = "2")]
    ActionDefinitionFormat1(E2SmKpmActionDefinitionFormat1),
}

/// Per-cell measurement collection
#[derive(Clone, PartialEq, Message)]
pub struct E2SmKpmActionDefinitionFormat1 {
    /// Cell the measurements are collected for
    #[prost(message, optional, tag = "1")]
    pub cell_obj_id: Option<CellObjectId>,
    /// Measurements to collect
    #[prost(message, optional, tag = "2")]
    pub meas_info_list: Option<MeasurementInfoList>,
    /// Collection granularity
    #[prost(message, optional, tag = "3")]
    pub granul_period: Option<GranularityPeriod>,
    /// Subscription sequence number
    #[prost(message, optional, tag = "4")]
    pub subscript_id: Option<SubscriptionId>,
}

impl Validate for E2SmKpmActionDefinition {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("actionDefinitionFormats", &self.action_definition_formats)? {
            ActionDefinitionFormats::ActionDefinitionFormat1(format1) => format1.validate(),
        }
    }
}

impl Validate for E2SmKpmActionDefinitionFormat1 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("cellObjID", &self.cell_obj_id)?.validate()?;
        require("measInfoList", &self.meas_info_list)?.validate()?;
        require("granulPeriod", &self.granul_period)?.validate()?;
        require("subscriptID", &self.subscript_id)?.validate()
    }
}

/// Cell object identifier
#[derive(Clone, PartialEq, Message)]
pub struct CellObjectId {
    /// Identifier value
    #[prost(string, tag = "1")]
    pub value: String,
}

impl Validate for CellObjectId {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("cellObjID", self.value.chars().count(), 1, MAX_CELL_OBJECT_ID_LEN)
    }
}

/// Granularity period in milliseconds
#[derive(Clone, PartialEq, Message)]
pub struct GranularityPeriod {
    /// Period value
    #[prost(int64, tag = "1")]
    pub value: i64,
}

impl Validate for GranularityPeriod {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("granulPeriod", self.value, 1, MAX_PERIOD_MS)
    }
}

/// Subscription sequence number
#[derive(Clone, PartialEq, Message)]
pub struct SubscriptionId {
    /// Sequence number value
    #[prost(int64, tag = "1")]
    pub value: i64,
}

impl Validate for SubscriptionId {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("subscriptID", self.value, 1, i64::MAX)
    }
}

/// Ordered list of measurements
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementInfoList {
    /// Measurement items
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<MeasurementInfoItem>,
}

impl Validate for MeasurementInfoList {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("measInfoList", self.value.len(), 1, MAX_NO_OF_MEAS_INFO)?;
        validate_all(&self.value)
    }
}

/// One measurement with its label set
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementInfoItem {
    /// Measurement type
    #[prost(message, optional, tag = "1")]
    pub meas_type: Option<MeasurementType>,
    /// Labels qualifying the measurement
    #[prost(message, optional, tag = "2")]
    pub label_info_list: Option<LabelInfoList>,
}

impl Validate for MeasurementInfoItem {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("measType", &self.meas_type)?.validate()?;
        require("labelInfoList", &self.label_info_list)?.validate()
    }
}

/// Measurement type, by name or by identifier
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementType {
    /// Measurement type choice
    #[prost(oneof = "MeasurementTypeChoice", tags = "1, 2")]
    pub measurement_type: Option<MeasurementTypeChoice>,
}

/// Measurement type choice
#[derive(Clone, PartialEq, Oneof)]
pub enum MeasurementTypeChoice {
    /// Measurement named as in 3GPP TS 28.552
    #[prost(message, tag = "1")]
    MeasName(MeasurementTypeName),
    /// Measurement by numeric identifier
    #[prost(message, tag = "2")]
    MeasId(MeasurementTypeId),
}

impl Validate for MeasurementType {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("measType", &self.measurement_type)? {
            MeasurementTypeChoice::MeasName(name) => name.validate(),
            MeasurementTypeChoice::MeasId(id) => id.validate(),
        }
    }
}

/// Measurement type name
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementTypeName {
    /// Name value
    #[prost(string, tag = "1")]
    pub value: String,
}

impl Validate for MeasurementTypeName {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("measName", self.value.chars().count(), 1, MAX_MEAS_NAME_LEN)
    }
}

/// Measurement type identifier
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementTypeId {
    /// Identifier value
    #[prost(int32, tag = "1")]
    pub value: i32,
}

impl Validate for MeasurementTypeId {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("measID", i64::from(self.value), 1, MAX_MEAS_TYPE_ID)
    }
}

/// Labels of a measurement
#[derive(Clone, PartialEq, Message)]
pub struct LabelInfoList {
    /// Label items
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<LabelInfoItem>,
}

impl Validate for LabelInfoList {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("labelInfoList", self.value.len(), 1, MAX_NO_OF_LABEL_INFO)?;
        validate_all(&self.value)
    }
}

/// One measurement label
#[derive(Clone, PartialEq, Message)]
pub struct LabelInfoItem {
    /// Label value
    #[prost(message, optional, tag = "1")]
    pub meas_label: Option<MeasurementLabel>,
}

impl Validate for LabelInfoItem {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("measLabel", &self.meas_label)?.validate()
    }
}

/// Measurement label. Only the "no label" dimension is carried.
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementLabel {
    /// Measurement is not qualified by any label
    #[prost(bool, tag = "1")]
    pub no_label: bool,
}

impl MeasurementLabel {
    /// The "no label" label.
    pub fn none() -> Self {
        Self { no_label: true }
    }
}

impl Validate for MeasurementLabel {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if !self.no_label {
            return Err(SchemaViolation::new("measLabel", "no label dimension set"));
        }
        Ok(())
    }
}

// ============================================================================
// Indication Header
// ============================================================================

/// KPM indication header
#[derive(Clone, PartialEq, Message)]
pub struct E2SmKpmIndicationHeader {
    /// Header format choice
    #[prost(oneof = "IndicationHeaderFormats", tags = "1")]
    pub indication_header_formats: Option<IndicationHeaderFormats>,
}

/// KPM indication header formats
#[derive(Clone, PartialEq, Oneof)]
pub enum IndicationHeaderFormats {
    /// Collection metadata
    #[prost(message, tag = "1")]
    IndicationHeaderFormat1(E2SmKpmIndicationHeaderFormat1),
}

impl E2SmKpmIndicationHeader {
    /// Returns the format 1 header, if this is one.
    pub fn format1(&self) -> Option<&E2SmKpmIndicationHeaderFormat1> {
        match &self.indication_header_formats {
            Some(IndicationHeaderFormats::IndicationHeaderFormat1(format1)) => Some(format1),
            None => None,
        }
    }
}

/// Collection metadata
#[derive(Clone, PartialEq, Message)]
pub struct E2SmKpmIndicationHeaderFormat1 {
    /// Start of the collection period
    #[prost(message, optional, tag = "1")]
    pub collet_start_time: Option<TimeStamp>,
    /// Measurement file format version
    #[prost(string, optional, tag = "2")]
    pub file_format_version: Option<String>,
    /// Name of the reporting entity
    #[prost(string, optional, tag = "3")]
    pub sender_name: Option<String>,
    /// Type of the reporting entity
    #[prost(string, optional, tag = "4")]
    pub sender_type: Option<String>,
    /// Vendor of the reporting entity
    #[prost(string, optional, tag = "5")]
    pub vendor_name: Option<String>,
    /// Global identity of the reporting node
    #[prost(message, optional, tag = "6")]
    pub kpm_node_id: Option<GlobalKpmNodeId>,
}

impl Validate for E2SmKpmIndicationHeader {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("indicationHeaderFormats", &self.indication_header_formats)? {
            IndicationHeaderFormats::IndicationHeaderFormat1(format1) => format1.validate(),
        }
    }
}

impl Validate for E2SmKpmIndicationHeaderFormat1 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("colletStartTime", &self.collet_start_time)?.validate()?;
        for (field, value) in [
            ("fileFormatversion", &self.file_format_version),
            ("senderName", &self.sender_name),
            ("senderType", &self.sender_type),
            ("vendorName", &self.vendor_name),
        ] {
            if let Some(value) = value {
                check_size(field, value.chars().count(), 0, 400)?;
            }
        }
        self.kpm_node_id.validate()
    }
}

/// NTP timestamp (seconds part, 4 octets)
#[derive(Clone, PartialEq, Message)]
pub struct TimeStamp {
    /// Big-endian seconds
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

impl TimeStamp {
    /// Creates a timestamp from seconds.
    pub fn from_secs(secs: u32) -> Self {
        Self {
            value: secs.to_be_bytes().to_vec(),
        }
    }

    /// Returns the timestamp as seconds.
    pub fn as_secs(&self) -> Option<u32> {
        let octets: [u8; 4] = self.value.as_slice().try_into().ok()?;
        Some(u32::from_be_bytes(octets))
    }
}

impl Validate for TimeStamp {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("timeStamp", self.value.len(), 4, 4)
    }
}

/// Global gNB identity of the reporting node
#[derive(Clone, PartialEq, Message)]
pub struct GlobalKpmNodeId {
    /// PLMN identity (3 octets)
    #[prost(bytes = "vec", tag = "1")]
    pub plmn_id: Vec<u8>,
    /// gNB identifier value
    #[prost(uint64, tag = "2")]
    pub gnb_id: u64,
    /// gNB identifier length in bits (22-32)
    #[prost(uint32, tag = "3")]
    pub gnb_id_length: u32,
}

impl Validate for GlobalKpmNodeId {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("plmnID", self.plmn_id.len(), 3, 3)?;
        check_range("gnbIDLength", i64::from(self.gnb_id_length), 22, 32)?;
        if self.gnb_id >> self.gnb_id_length != 0 {
            return Err(SchemaViolation::new(
                "gnbID",
                format!("value does not fit in {} bits", self.gnb_id_length),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Indication Message
// ============================================================================

/// KPM indication message
#[derive(Clone, PartialEq, Message)]
pub struct E2SmKpmIndicationMessage {
    /// Message format choice
    #[prost(oneof = "IndicationMessageFormats", tags = "1, 2")]
    pub indication_message_formats: Option<IndicationMessageFormats>,
}

/// KPM indication message formats
#[derive(Clone, PartialEq, Oneof)]
pub enum IndicationMessageFormats {
    /// Per-cell measurement report
    #[prost(message, tag = "1")]
    IndicationMessageFormat1(E2SmKpmIndicationMessageFormat1),
    /// Conditional per-UE measurement report
    #[prost(message, tag = "2")]
    IndicationMessageFormat2(E2SmKpmIndicationMessageFormat2),
}

impl E2SmKpmIndicationMessage {
    /// Returns the format 1 message, if this is one.
    pub fn format1(&self) -> Option<&E2SmKpmIndicationMessageFormat1> {
        match &self.indication_message_formats {
            Some(IndicationMessageFormats::IndicationMessageFormat1(format1)) => Some(format1),
            _ => None,
        }
    }

    /// Returns the format 2 message, if this is one.
    pub fn format2(&self) -> Option<&E2SmKpmIndicationMessageFormat2> {
        match &self.indication_message_formats {
            Some(IndicationMessageFormats::IndicationMessageFormat2(format2)) => Some(format2),
            _ => None,
        }
    }
}

/// Per-cell measurement report
#[derive(Clone, PartialEq, Message)]
pub struct E2SmKpmIndicationMessageFormat1 {
    /// Collected measurement data
    #[prost(message, optional, tag = "1")]
    pub meas_data: Option<MeasurementData>,
    /// Subscription sequence number the report answers
    #[prost(message, optional, tag = "2")]
    pub subscript_id: Option<SubscriptionId>,
    /// Reported cell
    #[prost(message, optional, tag = "3")]
    pub cell_obj_id: Option<CellObjectId>,
    /// Collection granularity
    #[prost(message, optional, tag = "4")]
    pub granul_period: Option<GranularityPeriod>,
    /// Measurements, in the order of the records
    #[prost(message, optional, tag = "5")]
    pub meas_info_list: Option<MeasurementInfoList>,
}

/// Conditional per-UE measurement report
#[derive(Clone, PartialEq, Message)]
pub struct E2SmKpmIndicationMessageFormat2 {
    /// Collected measurement data
    #[prost(message, optional, tag = "1")]
    pub meas_data: Option<MeasurementData>,
    /// Subscription sequence number the report answers
    #[prost(message, optional, tag = "2")]
    pub subscript_id: Option<SubscriptionId>,
    /// Reported cell
    #[prost(message, optional, tag = "3")]
    pub cell_obj_id: Option<CellObjectId>,
    /// Collection granularity
    #[prost(message, optional, tag = "4")]
    pub granul_period: Option<GranularityPeriod>,
    /// Measurements with the UEs matching each condition
    #[prost(message, optional, tag = "5")]
    pub meas_cond_ue_list: Option<MeasurementCondUeIdList>,
}

impl Validate for E2SmKpmIndicationMessage {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("indicationMessageFormats", &self.indication_message_formats)? {
            IndicationMessageFormats::IndicationMessageFormat1(format1) => format1.validate(),
            IndicationMessageFormats::IndicationMessageFormat2(format2) => format2.validate(),
        }
    }
}

impl Validate for E2SmKpmIndicationMessageFormat1 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("measData", &self.meas_data)?.validate()?;
        self.subscript_id.validate()?;
        self.cell_obj_id.validate()?;
        self.granul_period.validate()?;
        self.meas_info_list.validate()
    }
}

impl Validate for E2SmKpmIndicationMessageFormat2 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("measData", &self.meas_data)?.validate()?;
        self.subscript_id.validate()?;
        self.cell_obj_id.validate()?;
        self.granul_period.validate()?;
        require("measCondUEidList", &self.meas_cond_ue_list)?.validate()
    }
}

/// Conditional measurements
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementCondUeIdList {
    /// Condition items
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<MeasurementCondUeIdItem>,
}

impl Validate for MeasurementCondUeIdList {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("measCondUEidList", self.value.len(), 1, MAX_NO_OF_COND_UE)?;
        validate_all(&self.value)
    }
}

/// A measurement and the UEs it was collected for
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementCondUeIdItem {
    /// Measurement type
    #[prost(message, optional, tag = "1")]
    pub meas_type: Option<MeasurementType>,
    /// Identifiers of the matched UEs
    #[prost(string, repeated, tag = "2")]
    pub matched_ue_ids: Vec<String>,
}

impl Validate for MeasurementCondUeIdItem {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("measType", &self.meas_type)?.validate()
    }
}

/// Measurement data items, one per granularity period
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementData {
    /// Data items
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<MeasurementDataItem>,
}

impl Validate for MeasurementData {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("measData", self.value.len(), 1, MAX_NO_OF_MEAS_INFO)?;
        validate_all(&self.value)
    }
}

/// Records collected in one granularity period
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementDataItem {
    /// Measurement record
    #[prost(message, optional, tag = "1")]
    pub meas_record: Option<MeasurementRecord>,
    /// Collection was incomplete
    #[prost(bool, tag = "2")]
    pub incomplete_flag: bool,
}

impl Validate for MeasurementDataItem {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("measRecord", &self.meas_record)?.validate()
    }
}

/// Measurement record
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementRecord {
    /// Record items, in measurement order
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<MeasurementRecordItem>,
}

impl Validate for MeasurementRecord {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("measRecord", self.value.len(), 1, MAX_NO_OF_MEAS_RECORD)?;
        validate_all(&self.value)
    }
}

/// One measured value
#[derive(Clone, PartialEq, Message)]
pub struct MeasurementRecordItem {
    /// Value choice
    #[prost(oneof = "MeasurementRecordValue", tags = "1, 2, 3")]
    pub measurement_record_item: Option<MeasurementRecordValue>,
}

/// Measured value choice
#[derive(Clone, PartialEq, Oneof)]
pub enum MeasurementRecordValue {
    /// Integer value
    #[prost(int64, tag = "1")]
    Integer(i64),
    /// Real value
    #[prost(double, tag = "2")]
    Real(f64),
    /// No value was collected
    #[prost(int32, tag = "3")]
    NoValue(i32),
}

impl Validate for MeasurementRecordItem {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("measRecordItem", &self.measurement_record_item)?;
        Ok(())
    }
}
