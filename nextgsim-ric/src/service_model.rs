//! Service-model capability trait
//!
//! KPM and RC share the same lifecycle (build, subscribe, decode,
//! unsubscribe) and differ only in payloads. Each model implements
//! [`ServiceModel`]; the lifecycle and orchestrator are generic over it.

use nextgsim_e2sm::{kpm, rc, E2smError, ServiceModelDescriptor};
use tracing::info;

use crate::api::{Action, NodeId, RawIndication, SubscriptionName};
use crate::builder;
use crate::error::BuildError;
use crate::topology::{E2Cell, KpmReportStyle};

/// Payload capabilities of one E2 service model.
pub trait ServiceModel: Send + Sync + 'static {
    /// What a subscription is made for (beyond the node)
    type Target: Send + Sync + 'static;
    /// Decoded indication
    type Indication: Send;

    /// Returns the model identity.
    fn descriptor(&self) -> ServiceModelDescriptor;

    /// Returns the deterministic subscription name for `target` on `node`.
    fn subscription_name(&self, node: &NodeId, target: &Self::Target) -> SubscriptionName;

    /// Builds and encodes the event trigger.
    fn build_event_trigger(&self) -> Result<Vec<u8>, E2smError>;

    /// Builds the ordered actions for `target`.
    fn build_actions(&self, target: &Self::Target) -> Result<Vec<Action>, BuildError>;

    /// Decodes a raw indication.
    fn decode_indication(&self, raw: &RawIndication) -> Result<Self::Indication, E2smError>;

    /// Logs the interesting fields of a decoded indication.
    fn log_indication(&self, node: &NodeId, name: &SubscriptionName, indication: &Self::Indication);
}

// ============================================================================
// KPM
// ============================================================================

/// E2SM-KPM v2
#[derive(Debug, Clone, Copy, Default)]
pub struct KpmServiceModel;

/// A KPM subscription target: one report style over the node's cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpmTarget {
    /// Report style to subscribe to
    pub report_style: KpmReportStyle,
    /// Cells of the node, in any order
    pub cells: Vec<E2Cell>,
}

impl ServiceModel for KpmServiceModel {
    type Target = KpmTarget;
    type Indication = kpm::Indication;

    fn descriptor(&self) -> ServiceModelDescriptor {
        kpm::DESCRIPTOR
    }

    fn subscription_name(&self, node: &NodeId, target: &KpmTarget) -> SubscriptionName {
        SubscriptionName::new(format!("kpm-{}-{}", node, target.report_style.style_type))
    }

    fn build_event_trigger(&self) -> Result<Vec<u8>, E2smError> {
        kpm::encode_event_trigger_definition(kpm::REPORT_PERIOD_INTERVAL_MS)
    }

    fn build_actions(&self, target: &KpmTarget) -> Result<Vec<Action>, BuildError> {
        builder::build_kpm_actions(&target.report_style, &target.cells)
    }

    fn decode_indication(&self, raw: &RawIndication) -> Result<kpm::Indication, E2smError> {
        kpm::decode_indication(&raw.header, &raw.payload)
    }

    fn log_indication(&self, node: &NodeId, name: &SubscriptionName, indication: &kpm::Indication) {
        if let Some(header) = indication.header.format1() {
            info!(
                node = %node,
                subscription = %name,
                start_time = ?header.collet_start_time.as_ref().and_then(|t| t.as_secs()),
                sender = header.sender_name.as_deref().unwrap_or("-"),
                "KPM indication header"
            );
        }

        if let Some(message) = indication.message.format1() {
            info!(
                node = %node,
                subscription = %name,
                subscription_id = ?message.subscript_id.as_ref().map(|id| id.value),
                cell = message.cell_obj_id.as_ref().map(|c| c.value.as_str()).unwrap_or("-"),
                records = message.meas_data.as_ref().map_or(0, |d| d.value.len()),
                "KPM indication message (format 1)"
            );
        } else if let Some(message) = indication.message.format2() {
            info!(
                node = %node,
                subscription = %name,
                subscription_id = ?message.subscript_id.as_ref().map(|id| id.value),
                conditions = message.meas_cond_ue_list.as_ref().map_or(0, |l| l.value.len()),
                "KPM indication message (format 2)"
            );
        }
    }
}

// ============================================================================
// RC
// ============================================================================

/// E2SM-RC v1, E2 node information reporting
#[derive(Debug, Clone, Copy, Default)]
pub struct RcServiceModel;

impl ServiceModel for RcServiceModel {
    type Target = ();
    type Indication = rc::Indication;

    fn descriptor(&self) -> ServiceModelDescriptor {
        rc::DESCRIPTOR
    }

    fn subscription_name(&self, node: &NodeId, _target: &()) -> SubscriptionName {
        SubscriptionName::new(format!("rc-{node}-sinr"))
    }

    fn build_event_trigger(&self) -> Result<Vec<u8>, E2smError> {
        rc::encode_event_trigger()
    }

    fn build_actions(&self, _target: &()) -> Result<Vec<Action>, BuildError> {
        builder::build_rc_actions()
    }

    fn decode_indication(&self, raw: &RawIndication) -> Result<rc::Indication, E2smError> {
        rc::decode_indication(&raw.header, &raw.payload)
    }

    fn log_indication(&self, node: &NodeId, name: &SubscriptionName, indication: &rc::Indication) {
        if let Some(header) = indication.header.format1() {
            info!(
                node = %node,
                subscription = %name,
                condition = ?header.ric_event_trigger_condition_id.as_ref().map(|c| c.value),
                "RC indication header"
            );
        }

        if let Some(message) = indication.message.format3() {
            for cell in &message.cell_info_list {
                let nr_cgi = cell.cell_global_id.as_ref().and_then(|cgi| cgi.nr_cgi());
                let arfcn = cell
                    .neighbor_relation_table
                    .as_ref()
                    .and_then(|table| table.serving_cell_arfcn.as_ref())
                    .and_then(|arfcn| arfcn.nr());
                info!(
                    node = %node,
                    subscription = %name,
                    nr_cell_identity = ?nr_cgi.map(|cgi| cgi.nr_cell_identity),
                    serving_arfcn = ?arfcn.map(|a| a.n_rarfcn),
                    deleted = cell.cell_deleted.unwrap_or(false),
                    "RC cell information"
                );
            }
        } else if let Some(message) = indication.message.format1() {
            for parameter in &message.ran_p_reported {
                info!(
                    node = %node,
                    subscription = %name,
                    parameter = ?parameter.ran_parameter_id.as_ref().map(|id| id.value),
                    "RC reported parameter"
                );
            }
        }
    }
}
