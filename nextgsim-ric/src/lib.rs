//! nextgsim near-RT RIC application
//!
//! Subscribes to E2SM-KPM v2 and E2SM-RC v1 on every E2 node known to the
//! topology service, consumes a few indications per subscription and
//! unsubscribes.
//!
//! # Modules
//!
//! - `api` - E2 subscription types exchanged with the transport
//! - `topology` - Topology service interface and node/cell model
//! - `transport` - E2 subscription transport interface
//! - `service_model` - KPM and RC service-model capabilities
//! - `builder` - Subscription spec construction
//! - `lifecycle` - Per-subscription state machine
//! - `orchestrator` - Concurrent fan-out over nodes and report styles
//! - `config_loader` - Configuration loading and validation

pub mod api;
pub mod builder;
pub mod config_loader;
pub mod error;
pub mod lifecycle;
pub mod orchestrator;
pub mod service_model;
pub mod topology;
pub mod transport;

pub use api::{
    Action, ActionType, IndicationSender, IndicationStream, NodeId, RawIndication,
    SubscriptionName, SubscriptionSpec, SubsequentAction, SubsequentActionType, TimeToWait,
};
pub use builder::{build_kpm_actions, build_rc_actions, build_spec, sort_cells, RC_SINR_ACTION_ID};
pub use config_loader::{
    load_and_validate_ric_config, load_ric_config, load_ric_config_from_str, validate_ric_config,
    ConfigError, ConfigValidationError,
};
pub use error::{BuildError, E2Error, TopologyError, TransportError};
pub use lifecycle::{
    LifecycleFailure, LifecycleOutcome, LifecycleReport, NextIndication, SubscriptionLifecycle,
    SubscriptionState,
};
pub use orchestrator::{Orchestrator, OrchestratorConfig, OrchestratorReport};
pub use service_model::{KpmServiceModel, KpmTarget, RcServiceModel, ServiceModel};
pub use topology::{
    E2Cell, E2Node, KpmMeasurement, KpmReportStyle, RanFunction, RcReportStyle, ServiceModelInfo,
    TopologyService,
};
pub use transport::E2Transport;
