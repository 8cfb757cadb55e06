//! Topology service interface
//!
//! The RIC discovers E2 nodes, the service models each node exposes and the
//! cells it serves from an external topology (R-NIB) service.

use std::time::Duration;

use nextgsim_e2sm::ServiceModelDescriptor;

use crate::api::NodeId;
use crate::error::TopologyError;

/// A measurement offered by a KPM report style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpmMeasurement {
    /// Measurement identifier
    pub id: String,
    /// Measurement name (e.g. "DRB.UEThpDl")
    pub name: String,
}

impl KpmMeasurement {
    /// Creates a measurement.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A KPM report style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpmReportStyle {
    /// Style name
    pub name: String,
    /// Style type code
    pub style_type: i32,
    /// Measurements, in the order the node lists them
    pub measurements: Vec<KpmMeasurement>,
}

/// An RC report style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcReportStyle {
    /// Style name
    pub name: String,
    /// Style type code
    pub style_type: i32,
}

/// A decoded RAN function description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RanFunction {
    /// KPM RAN function
    Kpm {
        /// Report styles offered
        report_styles: Vec<KpmReportStyle>,
    },
    /// RC RAN function
    Rc {
        /// Report styles offered
        report_styles: Vec<RcReportStyle>,
    },
}

/// A service model exposed by an E2 node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceModelInfo {
    /// Service model object identifier
    pub oid: String,
    /// Service model name
    pub name: String,
    /// RAN function IDs under which the model is registered
    pub ran_function_ids: Vec<u32>,
    /// Decoded RAN function descriptions
    pub ran_functions: Vec<RanFunction>,
}

impl ServiceModelInfo {
    /// Returns true if this entry describes the given service model.
    pub fn is(&self, descriptor: &ServiceModelDescriptor) -> bool {
        self.oid == descriptor.oid
    }
}

/// E2 node aspect of a topology entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct E2Node {
    /// Service models exposed by the node
    pub service_models: Vec<ServiceModelInfo>,
}

impl E2Node {
    /// Returns the KPM report styles of every RAN function of the service
    /// models matching `descriptor`.
    pub fn kpm_report_styles(&self, descriptor: &ServiceModelDescriptor) -> Vec<KpmReportStyle> {
        self.service_models
            .iter()
            .filter(|sm| sm.is(descriptor))
            .flat_map(|sm| sm.ran_functions.iter())
            .filter_map(|function| match function {
                RanFunction::Kpm { report_styles } => Some(report_styles.iter().cloned()),
                RanFunction::Rc { .. } => None,
            })
            .flatten()
            .collect()
    }
}

/// A cell served by an E2 node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2Cell {
    /// Cell object identifier, unique within the node
    pub cell_object_id: String,
    /// Cell global identity
    pub cell_global_id: String,
    /// Cell type (e.g. "NR")
    pub cell_type: String,
    /// Physical cell identifier
    pub pci: Option<u32>,
}

impl E2Cell {
    /// Creates an NR cell with only its identifiers set.
    pub fn new(cell_object_id: impl Into<String>, cell_global_id: impl Into<String>) -> Self {
        Self {
            cell_object_id: cell_object_id.into(),
            cell_global_id: cell_global_id.into(),
            cell_type: "NR".to_string(),
            pci: None,
        }
    }
}

/// Read access to the RAN topology.
#[async_trait::async_trait]
pub trait TopologyService: Send + Sync {
    /// Lists the IDs of all E2 nodes controlled by the RIC.
    async fn list_node_ids(&self) -> Result<Vec<NodeId>, TopologyError>;

    /// Returns the E2 node aspect of a node.
    async fn get_node(&self, node: &NodeId) -> Result<E2Node, TopologyError>;

    /// Lists the cells contained in a node.
    async fn list_cells(&self, node: &NodeId) -> Result<Vec<E2Cell>, TopologyError>;
}

/// Runs a topology query, failing with [`TopologyError::Timeout`] if it does
/// not complete within `limit`.
pub async fn with_timeout<T, F>(limit: Duration, query: F) -> Result<T, TopologyError>
where
    F: std::future::Future<Output = Result<T, TopologyError>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result,
        Err(_elapsed) => Err(TopologyError::Timeout(limit)),
    }
}
