//! Subscription orchestrator
//!
//! Fans subscription lifecycles out over every discovered E2 node: one KPM
//! lifecycle per report style and one RC lifecycle per node. All lifecycles
//! run concurrently as tokio tasks and are joined before the sweep returns.
//! A failed lifecycle is recorded without cancelling its siblings.

use std::sync::Arc;
use std::time::Duration;

use nextgsim_common::RicConfig;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::api::NodeId;
use crate::error::{E2Error, TopologyError};
use crate::lifecycle::{
    LifecycleFailure, LifecycleOutcome, LifecycleReport, SubscriptionLifecycle, SubscriptionState,
};
use crate::service_model::{KpmServiceModel, KpmTarget, RcServiceModel, ServiceModel};
use crate::topology::{with_timeout, TopologyService};
use crate::transport::E2Transport;

/// Result of one orchestrator sweep.
#[derive(Debug, Default)]
pub struct OrchestratorReport {
    /// Lifecycles that consumed their quota (or were cancelled) and closed
    pub completed: Vec<LifecycleReport>,
    /// Lifecycles skipped because their spec had no actions
    pub skipped: Vec<LifecycleReport>,
    /// Failed lifecycles and node-level topology failures
    pub failures: Vec<LifecycleFailure>,
}

impl OrchestratorReport {
    /// Returns true if nothing failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the failures recorded for `node`.
    pub fn failures_for<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a LifecycleFailure> + 'a {
        self.failures.iter().filter(move |f| &f.node == node)
    }

    /// Returns the completed lifecycles of `node`.
    pub fn completed_for<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a LifecycleReport> + 'a {
        self.completed.iter().filter(move |r| &r.node == node)
    }
}

/// Sweep settings derived from [`RicConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Timeout of each topology query
    pub topology_timeout: Duration,
    /// Run KPM lifecycles
    pub kpm_enabled: bool,
    /// KPM indications per subscription
    pub kpm_indications: usize,
    /// Run RC lifecycles
    pub rc_enabled: bool,
    /// RC indications per subscription
    pub rc_indications: usize,
}

impl From<&RicConfig> for OrchestratorConfig {
    fn from(config: &RicConfig) -> Self {
        Self {
            topology_timeout: config.topology_timeout(),
            kpm_enabled: config.kpm.enabled,
            kpm_indications: config.kpm.indications,
            rc_enabled: config.rc.enabled,
            rc_indications: config.rc.indications,
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::from(&RicConfig::default())
    }
}

type LifecycleHandle = JoinHandle<Option<LifecycleReport>>;

/// Runs subscription lifecycles across the RAN.
///
/// Shutdown is final: once [`Orchestrator::shutdown`] has been called, the
/// running sweep stops starting lifecycles and any later [`Orchestrator::run`]
/// returns an empty report without contacting the RAN.
pub struct Orchestrator {
    topology: Arc<dyn TopologyService>,
    transport: Arc<dyn E2Transport>,
    config: OrchestratorConfig,
    kpm: Arc<KpmServiceModel>,
    rc: Arc<RcServiceModel>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Orchestrator {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(
        topology: Arc<dyn TopologyService>,
        transport: Arc<dyn E2Transport>,
        config: OrchestratorConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            topology,
            transport,
            config,
            kpm: Arc::new(KpmServiceModel),
            rc: Arc::new(RcServiceModel),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Returns a receiver for the shutdown signal.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Cancels every running lifecycle. Each one unsubscribes before it ends.
    /// Lifecycles not yet started are never started.
    pub fn shutdown(&self) {
        info!("Cancelling all subscription lifecycles");
        let _ = self.shutdown_tx.send(true);
    }

    /// Returns true once shutdown has been requested.
    pub fn is_shut_down(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Runs one sweep over all nodes and waits for every lifecycle to end.
    ///
    /// Fails only if the node list cannot be obtained. Per-node topology
    /// failures and lifecycle failures are collected in the report.
    pub async fn run(&self) -> Result<OrchestratorReport, E2Error> {
        if self.is_shut_down() {
            warn!("Orchestrator is shut down, sweep not started");
            return Ok(OrchestratorReport::default());
        }

        let limit = self.config.topology_timeout;
        let node_ids = with_timeout(limit, self.topology.list_node_ids())
            .await
            .map_err(E2Error::Discovery)?;
        info!("Discovered {} E2 node(s)", node_ids.len());

        let failures: Arc<Mutex<Vec<LifecycleFailure>>> = Arc::new(Mutex::new(Vec::new()));
        let mut handles: Vec<(NodeId, &'static str, LifecycleHandle)> = Vec::new();

        for node in node_ids {
            if self.is_shut_down() {
                info!(node = %node, "Shutdown requested, remaining nodes not subscribed");
                break;
            }

            if self.config.kpm_enabled {
                match self.kpm_targets(&node).await {
                    // Topology queries may outlast a shutdown
                    Ok(_) if self.is_shut_down() => break,
                    Ok(targets) => {
                        for target in targets {
                            let handle = self.spawn_lifecycle(
                                self.kpm.clone(),
                                node.clone(),
                                target,
                                self.config.kpm_indications,
                                failures.clone(),
                            );
                            handles.push((node.clone(), self.kpm.descriptor().name, handle));
                        }
                    }
                    Err(source) => {
                        let failure = LifecycleFailure {
                            node: node.clone(),
                            name: None,
                            model: self.kpm.descriptor().name,
                            state: SubscriptionState::Failed,
                            error: E2Error::Topology {
                                node: node.clone(),
                                source,
                            },
                        };
                        error!("{}", failure);
                        failures.lock().await.push(failure);
                    }
                }
            }

            if self.config.rc_enabled {
                let handle = self.spawn_lifecycle(
                    self.rc.clone(),
                    node.clone(),
                    (),
                    self.config.rc_indications,
                    failures.clone(),
                );
                handles.push((node.clone(), self.rc.descriptor().name, handle));
            }
        }

        info!("Started {} subscription lifecycle(s)", handles.len());
        let mut report = OrchestratorReport::default();

        for (node, model, handle) in handles {
            match handle.await {
                Ok(Some(lifecycle)) => match lifecycle.outcome {
                    LifecycleOutcome::Skipped => report.skipped.push(lifecycle),
                    LifecycleOutcome::Completed | LifecycleOutcome::Cancelled => {
                        report.completed.push(lifecycle)
                    }
                },
                Ok(None) => {}
                Err(join_error) => {
                    error!(node = %node, "Lifecycle task panicked: {}", join_error);
                    failures.lock().await.push(LifecycleFailure {
                        node,
                        name: None,
                        model,
                        state: SubscriptionState::Failed,
                        error: E2Error::TaskAborted(join_error.to_string()),
                    });
                }
            }
        }

        report.failures = std::mem::take(&mut *failures.lock().await);
        info!(
            completed = report.completed.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "Sweep finished"
        );
        Ok(report)
    }

    /// Queries the KPM report styles and cells of a node.
    async fn kpm_targets(&self, node: &NodeId) -> Result<Vec<KpmTarget>, TopologyError> {
        let limit = self.config.topology_timeout;
        let e2_node = with_timeout(limit, self.topology.get_node(node)).await?;
        let styles = e2_node.kpm_report_styles(&self.kpm.descriptor());
        if styles.is_empty() {
            warn!(node = %node, "Node exposes no KPM report styles");
            return Ok(Vec::new());
        }

        let cells = with_timeout(limit, self.topology.list_cells(node)).await?;
        Ok(styles
            .into_iter()
            .map(|report_style| KpmTarget {
                report_style,
                cells: cells.clone(),
            })
            .collect())
    }

    fn spawn_lifecycle<M: ServiceModel>(
        &self,
        model: Arc<M>,
        node: NodeId,
        target: M::Target,
        quota: usize,
        failures: Arc<Mutex<Vec<LifecycleFailure>>>,
    ) -> LifecycleHandle {
        let lifecycle = SubscriptionLifecycle::new(model, self.transport.clone(), node, target);
        let cancel = self.shutdown_rx.clone();
        tokio::spawn(async move {
            match lifecycle.run(quota, cancel).await {
                Ok(report) => Some(report),
                Err(failure) => {
                    error!("{}", failure);
                    failures.lock().await.push(failure);
                    None
                }
            }
        })
    }
}
