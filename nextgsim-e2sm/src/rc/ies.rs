//! E2SM-RC v1 information elements
//!
//! Only the IEs needed for E2 node information change reporting are modeled:
//! event trigger format 3, action definition format 1, indication header
//! formats 1-2 and indication message formats 1 and 3.

use prost::{Message, Oneof};

use crate::validate::{check_range, check_size, require, validate_all, SchemaViolation, Validate};

/// Maximum number of E2 node information change items.
pub const MAX_NO_OF_E2_INFO_CHANGES: usize = 65535;
/// Maximum RIC event trigger condition identifier.
pub const MAX_EVENT_TRIGGER_CONDITION_ID: i64 = 65535;
/// Maximum E2 node information change identifier.
pub const MAX_E2_NODE_INFO_CHANGE_ID: i64 = 512;
/// Maximum number of RAN parameters to report.
pub const MAX_NO_OF_PARAMETERS_TO_REPORT: usize = 65535;
/// Maximum RAN parameter identifier.
pub const MAX_RAN_PARAMETER_ID: i64 = 4_294_967_295;
/// Maximum number of cells in an information report.
pub const MAX_NO_OF_CELL_INFO: usize = 65535;
/// Maximum number of neighbor cells per serving cell.
pub const MAX_NO_OF_NEIGHBOR_CELLS: usize = 65535;
/// Maximum NR physical cell identifier.
pub const MAX_NR_PCI: i64 = 1007;
/// Maximum NR absolute radio frequency channel number.
pub const MAX_NR_ARFCN: i64 = 3_279_165;
/// Length of an NR cell identity in bits.
pub const NR_CELL_IDENTITY_BITS: u32 = 36;

// ============================================================================
// Event Trigger
// ============================================================================

/// RC event trigger
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcEventTrigger {
    /// Event trigger format choice
    #[prost(oneof = "RicEventTriggerFormats", tags = "3")]
    pub ric_event_trigger_formats: Option<RicEventTriggerFormats>,
}

/// RC event trigger formats
#[derive(Clone, PartialEq, Oneof)]
pub enum RicEventTriggerFormats {
    /// E2 node information change
    #[prost(message, tag = "3")]
    EventTriggerFormat3(E2SmRcEventTriggerFormat3),
}

impl E2SmRcEventTrigger {
    /// Returns the format 3 trigger, if this is one.
    pub fn format3(&self) -> Option<&E2SmRcEventTriggerFormat3> {
        match &self.ric_event_trigger_formats {
            Some(RicEventTriggerFormats::EventTriggerFormat3(format3)) => Some(format3),
            None => None,
        }
    }
}

/// E2 node information change trigger
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcEventTriggerFormat3 {
    /// Information changes that fire the trigger, in order
    #[prost(message, repeated, tag = "1")]
    pub e2_node_info_change_list: Vec<E2SmRcEventTriggerFormat3Item>,
}

/// One information change trigger item
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcEventTriggerFormat3Item {
    /// Condition identifier echoed in indication headers
    #[prost(message, optional, tag = "1")]
    pub ric_event_trigger_condition_id: Option<RicEventTriggerConditionId>,
    /// Kind of information change
    #[prost(int32, tag = "2")]
    pub e2_node_info_change_id: i32,
}

/// RIC event trigger condition identifier
#[derive(Clone, PartialEq, Message)]
pub struct RicEventTriggerConditionId {
    /// Identifier value
    #[prost(int32, tag = "1")]
    pub value: i32,
}

impl Validate for E2SmRcEventTrigger {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("ricEventTriggerFormats", &self.ric_event_trigger_formats)? {
            RicEventTriggerFormats::EventTriggerFormat3(format3) => format3.validate(),
        }
    }
}

impl Validate for E2SmRcEventTriggerFormat3 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size(
            "e2NodeInfoChange-List",
            self.e2_node_info_change_list.len(),
            1,
            MAX_NO_OF_E2_INFO_CHANGES,
        )?;
        validate_all(&self.e2_node_info_change_list)
    }
}

impl Validate for E2SmRcEventTriggerFormat3Item {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("ric-eventTriggerCondition-ID", &self.ric_event_trigger_condition_id)?.validate()?;
        check_range(
            "e2NodeInfoChange-ID",
            i64::from(self.e2_node_info_change_id),
            1,
            MAX_E2_NODE_INFO_CHANGE_ID,
        )
    }
}

impl Validate for RicEventTriggerConditionId {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range(
            "ric-eventTriggerCondition-ID",
            i64::from(self.value),
            1,
            MAX_EVENT_TRIGGER_CONDITION_ID,
        )
    }
}

// ============================================================================
// Action Definition
// ============================================================================

/// RC action definition
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcActionDefinition {
    /// Report style
    #[prost(message, optional, tag = "1")]
    pub ric_style_type: Option<RicStyleType>,
    /// Action definition format choice
    #[prost(oneof = "RicActionDefinitionFormats", tags = "2")]
    pub ric_action_definition_formats: Option<RicActionDefinitionFormats>,
}

/// RC action definition formats
#[derive(Clone, PartialEq, Oneof)]
pub enum RicActionDefinitionFormats {
    /// Parameters to report
    #[prost(message, tag = "2")]
    ActionDefinitionFormat1(E2SmRcActionDefinitionFormat1),
}

impl E2SmRcActionDefinition {
    /// Returns the format 1 definition, if this is one.
    pub fn format1(&self) -> Option<&E2SmRcActionDefinitionFormat1> {
        match &self.ric_action_definition_formats {
            Some(RicActionDefinitionFormats::ActionDefinitionFormat1(format1)) => Some(format1),
            None => None,
        }
    }
}

/// Parameters to report
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcActionDefinitionFormat1 {
    /// RAN parameters of interest, in order
    #[prost(message, repeated, tag = "1")]
    pub ran_p_to_be_reported_list: Vec<E2SmRcActionDefinitionFormat1Item>,
}

/// One RAN parameter of interest
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcActionDefinitionFormat1Item {
    /// Parameter identifier
    #[prost(message, optional, tag = "1")]
    pub ran_parameter_id: Option<RanParameterId>,
}

/// RIC style type
#[derive(Clone, PartialEq, Message)]
pub struct RicStyleType {
    /// Style code
    #[prost(int32, tag = "1")]
    pub value: i32,
}

/// RAN parameter identifier
#[derive(Clone, PartialEq, Message)]
pub struct RanParameterId {
    /// Identifier value
    #[prost(int64, tag = "1")]
    pub value: i64,
}

impl Validate for E2SmRcActionDefinition {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("ric-Style-Type", &self.ric_style_type)?;
        match require("ric-actionDefinition-formats", &self.ric_action_definition_formats)? {
            RicActionDefinitionFormats::ActionDefinitionFormat1(format1) => format1.validate(),
        }
    }
}

impl Validate for E2SmRcActionDefinitionFormat1 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size(
            "ranP-ToBeReported-List",
            self.ran_p_to_be_reported_list.len(),
            1,
            MAX_NO_OF_PARAMETERS_TO_REPORT,
        )?;
        validate_all(&self.ran_p_to_be_reported_list)
    }
}

impl Validate for E2SmRcActionDefinitionFormat1Item {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("ranParameter-ID", &self.ran_parameter_id)?.validate()
    }
}

impl Validate for RanParameterId {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("ranParameter-ID", self.value, 1, MAX_RAN_PARAMETER_ID)
    }
}

// ============================================================================
// Indication Header
// ============================================================================

/// RC indication header
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcIndicationHeader {
    /// Header format choice
    #[prost(oneof = "RicIndicationHeaderFormats", tags = "1, 2")]
    pub ric_indication_header_formats: Option<RicIndicationHeaderFormats>,
}

/// RC indication header formats
#[derive(Clone, PartialEq, Oneof)]
pub enum RicIndicationHeaderFormats {
    /// Event trigger condition
    #[prost(message, tag = "1")]
    IndicationHeaderFormat1(E2SmRcIndicationHeaderFormat1),
    /// UE-associated insert indication
    #[prost(message, tag = "2")]
    IndicationHeaderFormat2(E2SmRcIndicationHeaderFormat2),
}

impl E2SmRcIndicationHeader {
    /// Returns the format 1 header, if this is one.
    pub fn format1(&self) -> Option<&E2SmRcIndicationHeaderFormat1> {
        match &self.ric_indication_header_formats {
            Some(RicIndicationHeaderFormats::IndicationHeaderFormat1(format1)) => Some(format1),
            _ => None,
        }
    }

    /// Returns the format 2 header, if this is one.
    pub fn format2(&self) -> Option<&E2SmRcIndicationHeaderFormat2> {
        match &self.ric_indication_header_formats {
            Some(RicIndicationHeaderFormats::IndicationHeaderFormat2(format2)) => Some(format2),
            _ => None,
        }
    }
}

/// Event trigger condition header
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcIndicationHeaderFormat1 {
    /// Condition that fired, if the trigger carried one
    #[prost(message, optional, tag = "1")]
    pub ric_event_trigger_condition_id: Option<RicEventTriggerConditionId>,
}

/// UE-associated insert indication header
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcIndicationHeaderFormat2 {
    /// UE identity
    #[prost(string, tag = "1")]
    pub ue_id: String,
    /// Insert style
    #[prost(message, optional, tag = "2")]
    pub ric_style_type: Option<RicStyleType>,
    /// Insert indication identifier
    #[prost(int32, tag = "3")]
    pub ric_insert_indication_id: i32,
}

impl Validate for E2SmRcIndicationHeader {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("ric-indicationHeader-formats", &self.ric_indication_header_formats)? {
            RicIndicationHeaderFormats::IndicationHeaderFormat1(format1) => {
                format1.ric_event_trigger_condition_id.validate()
            }
            RicIndicationHeaderFormats::IndicationHeaderFormat2(format2) => format2.validate(),
        }
    }
}

impl Validate for E2SmRcIndicationHeaderFormat2 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("ueID", self.ue_id.len(), 1, usize::MAX)?;
        require("ric-Style-Type", &self.ric_style_type)?;
        check_range("ric-InsertIndication-ID", i64::from(self.ric_insert_indication_id), 1, 65535)
    }
}

// ============================================================================
// Indication Message
// ============================================================================

/// RC indication message
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcIndicationMessage {
    /// Message format choice
    #[prost(oneof = "RicIndicationMessageFormats", tags = "1, 3")]
    pub ric_indication_message_formats: Option<RicIndicationMessageFormats>,
}

/// RC indication message formats
#[derive(Clone, PartialEq, Oneof)]
pub enum RicIndicationMessageFormats {
    /// Reported RAN parameters
    #[prost(message, tag = "1")]
    IndicationMessageFormat1(E2SmRcIndicationMessageFormat1),
    /// E2 node cell information
    #[prost(message, tag = "3")]
    IndicationMessageFormat3(E2SmRcIndicationMessageFormat3),
}

impl Validate for E2SmRcIndicationMessage {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("ric-indicationMessage-formats", &self.ric_indication_message_formats)? {
            RicIndicationMessageFormats::IndicationMessageFormat1(format1) => format1.validate(),
            RicIndicationMessageFormats::IndicationMessageFormat3(format3) => format3.validate(),
        }
    }
}

impl E2SmRcIndicationMessage {
    /// Returns the format 1 message, if this is one.
    pub fn format1(&self) -> Option<&E2SmRcIndicationMessageFormat1> {
        match &self.ric_indication_message_formats {
            Some(RicIndicationMessageFormats::IndicationMessageFormat1(format1)) => Some(format1),
            _ => None,
        }
    }

    /// Returns the format 3 message, if this is one.
    pub fn format3(&self) -> Option<&E2SmRcIndicationMessageFormat3> {
        match &self.ric_indication_message_formats {
            Some(RicIndicationMessageFormats::IndicationMessageFormat3(format3)) => Some(format3),
            _ => None,
        }
    }
}

/// Reported RAN parameters
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcIndicationMessageFormat1 {
    /// Reported parameters
    #[prost(message, repeated, tag = "1")]
    pub ran_p_reported: Vec<E2SmRcIndicationMessageFormat1Item>,
}

/// One reported RAN parameter
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcIndicationMessageFormat1Item {
    /// Parameter identifier
    #[prost(message, optional, tag = "1")]
    pub ran_parameter_id: Option<RanParameterId>,
    /// Parameter value
    #[prost(message, optional, tag = "2")]
    pub ran_parameter_value: Option<RanParameterValue>,
}

/// RAN parameter value
#[derive(Clone, PartialEq, Message)]
pub struct RanParameterValue {
    /// Value choice
    #[prost(oneof = "RanParameterValueChoice", tags = "1, 2, 3, 4, 5")]
    pub ran_parameter_value: Option<RanParameterValueChoice>,
}

/// RAN parameter value choice
#[derive(Clone, PartialEq, Oneof)]
pub enum RanParameterValueChoice {
    /// Boolean
    #[prost(bool, tag = "1")]
    ValueBoolean(bool),
    /// Integer
    #[prost(int64, tag = "2")]
    ValueInt(i64),
    /// Real
    #[prost(double, tag = "3")]
    ValueReal(f64),
    /// Octet string
    #[prost(bytes, tag = "4")]
    ValueOctS(Vec<u8>),
    /// Printable string
    #[prost(string, tag = "5")]
    ValuePrintS(String),
}

impl Validate for E2SmRcIndicationMessageFormat1 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size(
            "ranP-Reported-List",
            self.ran_p_reported.len(),
            1,
            MAX_NO_OF_PARAMETERS_TO_REPORT,
        )?;
        validate_all(&self.ran_p_reported)
    }
}

impl Validate for E2SmRcIndicationMessageFormat1Item {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("ranParameter-ID", &self.ran_parameter_id)?.validate()?;
        let value = require("ranParameter-value", &self.ran_parameter_value)?;
        require("ranParameter-value", &value.ran_parameter_value)?;
        Ok(())
    }
}

/// E2 node cell information
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcIndicationMessageFormat3 {
    /// Per-cell information
    #[prost(message, repeated, tag = "1")]
    pub cell_info_list: Vec<E2SmRcIndicationMessageFormat3Item>,
}

/// Information about one cell
#[derive(Clone, PartialEq, Message)]
pub struct E2SmRcIndicationMessageFormat3Item {
    /// Cell global identity
    #[prost(message, optional, tag = "1")]
    pub cell_global_id: Option<Cgi>,
    /// Encoded cell configuration
    #[prost(bytes = "vec", optional, tag = "2")]
    pub cell_context_information: Option<Vec<u8>>,
    /// Cell was removed from the node
    #[prost(bool, optional, tag = "3")]
    pub cell_deleted: Option<bool>,
    /// Neighbor relations of the cell
    #[prost(message, optional, tag = "4")]
    pub neighbor_relation_table: Option<NeighborRelationInfo>,
}

impl Validate for E2SmRcIndicationMessageFormat3 {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("cellInfo-List", self.cell_info_list.len(), 1, MAX_NO_OF_CELL_INFO)?;
        validate_all(&self.cell_info_list)
    }
}

impl Validate for E2SmRcIndicationMessageFormat3Item {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("cellGlobal-ID", &self.cell_global_id)?.validate()?;
        self.neighbor_relation_table.validate()
    }
}

/// Cell global identity
#[derive(Clone, PartialEq, Message)]
pub struct Cgi {
    /// Identity choice
    #[prost(oneof = "CgiChoice", tags = "1, 2")]
    pub cgi: Option<CgiChoice>,
}

/// Cell global identity choice
#[derive(Clone, PartialEq, Oneof)]
pub enum CgiChoice {
    /// NR cell global identity
    #[prost(message, tag = "1")]
    NrCgi(NrCgi),
    /// E-UTRA cell global identity
    #[prost(message, tag = "2")]
    EutraCgi(EutraCgi),
}

impl Cgi {
    /// Returns the NR CGI, if this is one.
    pub fn nr_cgi(&self) -> Option<&NrCgi> {
        match &self.cgi {
            Some(CgiChoice::NrCgi(nr_cgi)) => Some(nr_cgi),
            _ => None,
        }
    }
}

impl Validate for Cgi {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("cgi", &self.cgi)? {
            CgiChoice::NrCgi(nr_cgi) => nr_cgi.validate(),
            CgiChoice::EutraCgi(eutra_cgi) => eutra_cgi.validate(),
        }
    }
}

/// NR cell global identity
#[derive(Clone, PartialEq, Message)]
pub struct NrCgi {
    /// PLMN identity (3 octets)
    #[prost(bytes = "vec", tag = "1")]
    pub plmn_identity: Vec<u8>,
    /// NR cell identity (36 bits)
    #[prost(uint64, tag = "2")]
    pub nr_cell_identity: u64,
}

impl Validate for NrCgi {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("pLMNIdentity", self.plmn_identity.len(), 3, 3)?;
        if self.nr_cell_identity >> NR_CELL_IDENTITY_BITS != 0 {
            return Err(SchemaViolation::new(
                "nRCellIdentity",
                format!("value does not fit in {NR_CELL_IDENTITY_BITS} bits"),
            ));
        }
        Ok(())
    }
}

/// E-UTRA cell global identity
#[derive(Clone, PartialEq, Message)]
pub struct EutraCgi {
    /// PLMN identity (3 octets)
    #[prost(bytes = "vec", tag = "1")]
    pub plmn_identity: Vec<u8>,
    /// E-UTRA cell identity (28 bits)
    #[prost(uint32, tag = "2")]
    pub eutra_cell_identity: u32,
}

impl Validate for EutraCgi {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_size("pLMNIdentity", self.plmn_identity.len(), 3, 3)?;
        if self.eutra_cell_identity >> 28 != 0 {
            return Err(SchemaViolation::new(
                "eUTRACellIdentity",
                "value does not fit in 28 bits",
            ));
        }
        Ok(())
    }
}

/// Neighbor relation table of a serving cell
#[derive(Clone, PartialEq, Message)]
pub struct NeighborRelationInfo {
    /// Serving cell physical cell identifier
    #[prost(message, optional, tag = "1")]
    pub serving_cell_pci: Option<ServingCellPci>,
    /// Serving cell carrier
    #[prost(message, optional, tag = "2")]
    pub serving_cell_arfcn: Option<ServingCellArfcn>,
    /// Neighbor cells
    #[prost(message, repeated, tag = "3")]
    pub neighbor_cell_list: Vec<NeighborCellItem>,
}

impl Validate for NeighborRelationInfo {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("servingCellPCI", &self.serving_cell_pci)?.validate()?;
        require("servingCellARFCN", &self.serving_cell_arfcn)?.validate()?;
        check_size(
            "neighborCell-List",
            self.neighbor_cell_list.len(),
            0,
            MAX_NO_OF_NEIGHBOR_CELLS,
        )?;
        validate_all(&self.neighbor_cell_list)
    }
}

/// Serving cell physical cell identifier
#[derive(Clone, PartialEq, Message)]
pub struct ServingCellPci {
    /// PCI choice
    #[prost(oneof = "ServingCellPciChoice", tags = "1, 2")]
    pub serving_cell_pci: Option<ServingCellPciChoice>,
}

/// PCI choice
#[derive(Clone, PartialEq, Oneof)]
pub enum ServingCellPciChoice {
    /// NR PCI (0-1007)
    #[prost(int32, tag = "1")]
    Nr(i32),
    /// E-UTRA PCI (0-503)
    #[prost(int32, tag = "2")]
    Eutra(i32),
}

impl Validate for ServingCellPci {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("servingCellPCI", &self.serving_cell_pci)? {
            ServingCellPciChoice::Nr(pci) => check_range("nR-PCI", i64::from(*pci), 0, MAX_NR_PCI),
            ServingCellPciChoice::Eutra(pci) => check_range("eUTRA-PCI", i64::from(*pci), 0, 503),
        }
    }
}

/// Serving cell carrier
#[derive(Clone, PartialEq, Message)]
pub struct ServingCellArfcn {
    /// ARFCN choice
    #[prost(oneof = "ServingCellArfcnChoice", tags = "1, 2")]
    pub serving_cell_arfcn: Option<ServingCellArfcnChoice>,
}

/// ARFCN choice
#[derive(Clone, PartialEq, Oneof)]
pub enum ServingCellArfcnChoice {
    /// NR ARFCN
    #[prost(message, tag = "1")]
    Nr(NrArfcn),
    /// E-UTRA ARFCN (0-65535)
    #[prost(int32, tag = "2")]
    Eutra(i32),
}

impl ServingCellArfcn {
    /// Returns the NR ARFCN, if this is an NR carrier.
    pub fn nr(&self) -> Option<&NrArfcn> {
        match &self.serving_cell_arfcn {
            Some(ServingCellArfcnChoice::Nr(nr)) => Some(nr),
            _ => None,
        }
    }
}

impl Validate for ServingCellArfcn {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match require("servingCellARFCN", &self.serving_cell_arfcn)? {
            ServingCellArfcnChoice::Nr(nr) => nr.validate(),
            ServingCellArfcnChoice::Eutra(arfcn) => {
                check_range("eUTRA-ARFCN", i64::from(*arfcn), 0, 65535)
            }
        }
    }
}

/// NR ARFCN
#[derive(Clone, PartialEq, Message)]
pub struct NrArfcn {
    /// Channel number
    #[prost(int32, tag = "1")]
    pub n_rarfcn: i32,
}

impl Validate for NrArfcn {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("nRARFCN", i64::from(self.n_rarfcn), 0, MAX_NR_ARFCN)
    }
}

/// One neighbor cell
#[derive(Clone, PartialEq, Message)]
pub struct NeighborCellItem {
    /// Neighbor cell global identity
    #[prost(message, optional, tag = "1")]
    pub cgi: Option<Cgi>,
    /// Neighbor NR PCI
    #[prost(int32, tag = "2")]
    pub nr_pci: i32,
    /// Neighbor carrier
    #[prost(message, optional, tag = "3")]
    pub nr_arfcn: Option<NrArfcn>,
}

impl Validate for NeighborCellItem {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require("nR-CGI", &self.cgi)?.validate()?;
        check_range("nR-PCI", i64::from(self.nr_pci), 0, MAX_NR_PCI)?;
        require("nRARFCN", &self.nr_arfcn)?.validate()
    }
}
