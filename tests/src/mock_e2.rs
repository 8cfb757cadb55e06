//! Mock E2 network for integration testing
//!
//! Plays both collaborators of the RIC: the topology service (nodes,
//! service models, cells) and the E2 subscription transport. Each accepted
//! subscription gets a producer task that emits fixture indications until
//! the subscription is removed. Per-node behavior allows failure injection,
//! and every subscribe/unsubscribe call is counted.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use nextgsim_e2sm::{kpm, rc};
use nextgsim_ric::{
    E2Cell, E2Node, E2Transport, IndicationSender, IndicationStream, NodeId, RawIndication,
    SubscriptionName, SubscriptionSpec, TopologyError, TopologyService, TransportError,
};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::test_fixtures::{garbage_indication, kpm_raw_indication, rc_raw_indication};

/// Default delay between two indications of a subscription.
pub const DEFAULT_INDICATION_INTERVAL: Duration = Duration::from_millis(10);

/// Failure injection for one node.
#[derive(Debug, Clone, Default)]
pub struct NodeBehavior {
    /// Refuse every subscribe
    pub fail_subscribe: bool,
    /// Fail `get_node` and `list_cells`
    pub fail_topology: bool,
    /// Delay topology answers by this much
    pub topology_delay: Option<Duration>,
    /// Accept subscriptions but never send indications
    pub silent: bool,
    /// Send an undecodable indication before the regular ones
    pub garbage_first: bool,
    /// Close the stream after this many indications
    pub close_after: Option<usize>,
}

/// A node registered in the mock network.
#[derive(Debug, Clone)]
pub struct MockE2Node {
    /// E2 node aspect returned by `get_node`
    pub node: E2Node,
    /// Cells returned by `list_cells`
    pub cells: Vec<E2Cell>,
    /// Failure injection
    pub behavior: NodeBehavior,
}

struct ActiveSubscription {
    producer: Option<JoinHandle<()>>,
    // Keeps the stream of silent subscriptions open
    _sender: Option<IndicationSender>,
}

#[derive(Default)]
struct MockE2State {
    nodes: BTreeMap<NodeId, MockE2Node>,
    fail_node_listing: bool,
    active: HashMap<(NodeId, SubscriptionName), ActiveSubscription>,
    submitted: Vec<(NodeId, SubscriptionName, SubscriptionSpec)>,
    subscribe_calls: HashMap<SubscriptionName, usize>,
    unsubscribe_calls: HashMap<SubscriptionName, usize>,
}

/// Mock E2 network: topology service and subscription transport.
#[derive(Clone)]
pub struct MockE2Network {
    state: Arc<RwLock<MockE2State>>,
    indication_interval: Duration,
}

impl Default for MockE2Network {
    fn default() -> Self {
        Self::new()
    }
}

impl MockE2Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockE2State::default())),
            indication_interval: DEFAULT_INDICATION_INTERVAL,
        }
    }

    /// Sets the delay between two indications of a subscription.
    pub fn with_indication_interval(mut self, interval: Duration) -> Self {
        self.indication_interval = interval;
        self
    }

    /// Registers a node with default behavior.
    pub async fn add_node(&self, id: impl Into<NodeId>, node: E2Node, cells: Vec<E2Cell>) {
        self.add_node_with_behavior(id, node, cells, NodeBehavior::default())
            .await;
    }

    /// Registers a node with the given behavior.
    pub async fn add_node_with_behavior(
        &self,
        id: impl Into<NodeId>,
        node: E2Node,
        cells: Vec<E2Cell>,
        behavior: NodeBehavior,
    ) {
        self.state.write().await.nodes.insert(
            id.into(),
            MockE2Node {
                node,
                cells,
                behavior,
            },
        );
    }

    /// Makes `list_node_ids` fail.
    pub async fn fail_node_listing(&self) {
        self.state.write().await.fail_node_listing = true;
    }

    /// Returns how many times `name` was subscribed.
    pub async fn subscribe_count(&self, name: &str) -> usize {
        let state = self.state.read().await;
        state
            .subscribe_calls
            .get(&SubscriptionName::new(name))
            .copied()
            .unwrap_or(0)
    }

    /// Returns how many times `name` was unsubscribed.
    pub async fn unsubscribe_count(&self, name: &str) -> usize {
        let state = self.state.read().await;
        state
            .unsubscribe_calls
            .get(&SubscriptionName::new(name))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the number of subscriptions currently held by nodes.
    pub async fn active_subscription_count(&self) -> usize {
        self.state.read().await.active.len()
    }

    /// Returns the last spec submitted under `name`.
    pub async fn submitted_spec(&self, name: &str) -> Option<SubscriptionSpec> {
        let state = self.state.read().await;
        state
            .submitted
            .iter()
            .rev()
            .find(|(_, submitted, _)| submitted.as_str() == name)
            .map(|(_, _, spec)| spec.clone())
    }

    /// Returns the names of all submitted subscriptions, in submission order.
    pub async fn submitted_names(&self) -> Vec<String> {
        let state = self.state.read().await;
        state
            .submitted
            .iter()
            .map(|(_, name, _)| name.to_string())
            .collect()
    }

    async fn node(&self, id: &NodeId) -> Result<MockE2Node, TopologyError> {
        let node = self
            .state
            .read()
            .await
            .nodes
            .get(id)
            .cloned()
            .ok_or_else(|| TopologyError::NodeNotFound(id.clone()))?;

        if let Some(delay) = node.behavior.topology_delay {
            tokio::time::sleep(delay).await;
        }
        if node.behavior.fail_topology {
            return Err(TopologyError::Unavailable(format!("node {id} not answering")));
        }
        Ok(node)
    }

    fn spawn_producer(
        &self,
        tx: IndicationSender,
        spec: &SubscriptionSpec,
        behavior: &NodeBehavior,
    ) -> JoinHandle<()> {
        let is_kpm = spec.service_model.oid == kpm::DESCRIPTOR.oid;
        let interval = self.indication_interval;
        let garbage_first = behavior.garbage_first;
        let close_after = behavior.close_after;

        tokio::spawn(async move {
            let mut sent = 0usize;
            if garbage_first {
                if tx.send(garbage_indication()).is_err() {
                    return;
                }
                sent += 1;
            }

            let mut sequence = 0i64;
            loop {
                if close_after.is_some_and(|limit| sent >= limit) {
                    // Dropping the sender closes the stream
                    return;
                }
                tokio::time::sleep(interval).await;
                sequence += 1;
                let indication: RawIndication = if is_kpm {
                    kpm_raw_indication(sequence)
                } else {
                    rc_raw_indication()
                };
                if tx.send(indication).is_err() {
                    return;
                }
                sent += 1;
            }
        })
    }
}

#[async_trait::async_trait]
impl TopologyService for MockE2Network {
    async fn list_node_ids(&self) -> Result<Vec<NodeId>, TopologyError> {
        let state = self.state.read().await;
        if state.fail_node_listing {
            return Err(TopologyError::Unavailable("topology service down".to_string()));
        }
        Ok(state.nodes.keys().cloned().collect())
    }

    async fn get_node(&self, node: &NodeId) -> Result<E2Node, TopologyError> {
        Ok(self.node(node).await?.node)
    }

    async fn list_cells(&self, node: &NodeId) -> Result<Vec<E2Cell>, TopologyError> {
        Ok(self.node(node).await?.cells)
    }
}

#[async_trait::async_trait]
impl E2Transport for MockE2Network {
    async fn subscribe(
        &self,
        node: &NodeId,
        name: &SubscriptionName,
        spec: SubscriptionSpec,
    ) -> Result<IndicationStream, TransportError> {
        let mut state = self.state.write().await;
        *state.subscribe_calls.entry(name.clone()).or_default() += 1;

        let behavior = match state.nodes.get(node) {
            Some(registered) => registered.behavior.clone(),
            None => return Err(TransportError::Unreachable(node.clone())),
        };
        if behavior.fail_subscribe {
            return Err(TransportError::Unreachable(node.clone()));
        }
        if state.active.contains_key(&(node.clone(), name.clone())) {
            return Err(TransportError::Rejected {
                name: name.clone(),
                reason: "duplicate subscription".to_string(),
            });
        }
        if spec.service_model.oid != kpm::DESCRIPTOR.oid && spec.service_model.oid != rc::DESCRIPTOR.oid {
            return Err(TransportError::Rejected {
                name: name.clone(),
                reason: format!("unsupported service model {}", spec.service_model),
            });
        }

        debug!(node = %node, subscription = %name, actions = spec.actions.len(), "Mock subscribe");
        let (tx, stream) = IndicationStream::channel();
        let subscription = if behavior.silent {
            ActiveSubscription {
                producer: None,
                _sender: Some(tx),
            }
        } else {
            ActiveSubscription {
                producer: Some(self.spawn_producer(tx, &spec, &behavior)),
                _sender: None,
            }
        };

        state.submitted.push((node.clone(), name.clone(), spec));
        state.active.insert((node.clone(), name.clone()), subscription);
        Ok(stream)
    }

    async fn unsubscribe(&self, node: &NodeId, name: &SubscriptionName) -> Result<(), TransportError> {
        let mut state = self.state.write().await;
        *state.unsubscribe_calls.entry(name.clone()).or_default() += 1;

        match state.active.remove(&(node.clone(), name.clone())) {
            Some(subscription) => {
                if let Some(producer) = subscription.producer {
                    producer.abort();
                }
                debug!(node = %node, subscription = %name, "Mock unsubscribe");
                Ok(())
            }
            None => Err(TransportError::UnknownSubscription(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{default_node, test_cells};
    use nextgsim_ric::{build_spec, RcServiceModel};

    #[tokio::test]
    async fn test_topology_answers() {
        let network = MockE2Network::new();
        network.add_node("n1", default_node(), test_cells(2)).await;

        let ids = network.list_node_ids().await.unwrap();
        assert_eq!(ids, vec![NodeId::from("n1")]);
        assert_eq!(network.list_cells(&ids[0]).await.unwrap().len(), 2);
        assert!(matches!(
            network.get_node(&NodeId::from("n2")).await,
            Err(TopologyError::NodeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_subscribe_streams_and_unsubscribe_stops() {
        let network = MockE2Network::new();
        network.add_node("n1", default_node(), vec![]).await;
        let node = NodeId::from("n1");
        let name = SubscriptionName::new("rc-n1-sinr");

        let spec = build_spec(&RcServiceModel, &()).unwrap();
        let mut stream = network.subscribe(&node, &name, spec.clone()).await.unwrap();
        assert!(stream.recv().await.is_some());

        assert!(matches!(
            network.subscribe(&node, &name, spec).await,
            Err(TransportError::Rejected { .. })
        ));

        network.unsubscribe(&node, &name).await.unwrap();
        assert_eq!(network.active_subscription_count().await, 0);
        assert!(matches!(
            network.unsubscribe(&node, &name).await,
            Err(TransportError::UnknownSubscription(_))
        ));
        assert_eq!(network.subscribe_count("rc-n1-sinr").await, 2);
        assert_eq!(network.unsubscribe_count("rc-n1-sinr").await, 2);
    }

    #[tokio::test]
    async fn test_close_after_ends_stream() {
        let network = MockE2Network::new().with_indication_interval(Duration::from_millis(1));
        network
            .add_node_with_behavior(
                "n1",
                default_node(),
                vec![],
                NodeBehavior {
                    close_after: Some(2),
                    ..Default::default()
                },
            )
            .await;

        let spec = build_spec(&RcServiceModel, &()).unwrap();
        let mut stream = network
            .subscribe(&NodeId::from("n1"), &SubscriptionName::new("s"), spec)
            .await
            .unwrap();
        assert!(stream.recv().await.is_some());
        assert!(stream.recv().await.is_some());
        assert!(stream.recv().await.is_none());
    }
}
