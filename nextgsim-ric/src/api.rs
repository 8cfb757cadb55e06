//! E2 subscription API types
//!
//! These are the values exchanged with the E2 transport: node and
//! subscription identifiers, the subscription specification (event trigger
//! plus ordered actions) and the raw indications delivered on a
//! subscription's stream.

use std::fmt;

use bytes::Bytes;
use nextgsim_e2sm::ServiceModelDescriptor;
use tokio::sync::mpsc;

/// E2 node identifier, as listed by the topology service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Subscription name, unique per node.
///
/// Names are derived deterministically from the service model, the node and
/// the report style, so re-running a logical subscription reuses its name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionName(String);

impl SubscriptionName {
    /// Creates a subscription name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// RIC action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    /// Report
    Report,
    /// Insert
    Insert,
    /// Policy
    Policy,
}

/// Subsequent action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsequentActionType {
    /// Continue with the next action
    Continue,
    /// Wait for further events
    Wait,
}

/// Time to wait before the subsequent action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TimeToWait {
    Zero,
    W1ms,
    W2ms,
    W5ms,
    W10ms,
    W20ms,
    W30ms,
    W40ms,
    W50ms,
    W100ms,
    W200ms,
    W500ms,
    W1s,
    W2s,
    W5s,
    W10s,
    W20s,
    W60s,
}

/// What the E2 node does after an action fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsequentAction {
    /// Subsequent action type
    pub action_type: SubsequentActionType,
    /// Time to wait
    pub time_to_wait: TimeToWait,
}

impl SubsequentAction {
    /// Continue without waiting.
    pub const CONTINUE_IMMEDIATELY: Self = Self {
        action_type: SubsequentActionType::Continue,
        time_to_wait: TimeToWait::Zero,
    };
}

/// One reporting directive of a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Action ID, unique within the subscription
    pub id: i32,
    /// Action type
    pub action_type: ActionType,
    /// Optional subsequent action
    pub subsequent_action: Option<SubsequentAction>,
    /// Encoded, validated action definition
    pub payload: Bytes,
}

/// A complete subscription request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionSpec {
    /// Service model the payloads belong to
    pub service_model: ServiceModelDescriptor,
    /// Encoded, validated event trigger definition
    pub event_trigger: Bytes,
    /// Actions, in ID order
    pub actions: Vec<Action>,
}

impl SubscriptionSpec {
    /// Returns true if the spec carries no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the action IDs, in order.
    pub fn action_ids(&self) -> Vec<i32> {
        self.actions.iter().map(|action| action.id).collect()
    }
}

/// An undecoded indication as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIndication {
    /// Encoded indication header
    pub header: Bytes,
    /// Encoded indication message
    pub payload: Bytes,
}

/// Sending half of an indication stream, held by the transport.
pub type IndicationSender = mpsc::UnboundedSender<RawIndication>;

/// Order-preserving, single-consumer stream of indications for one
/// subscription.
///
/// The stream ends when the transport drops its sender.
#[derive(Debug)]
pub struct IndicationStream {
    rx: mpsc::UnboundedReceiver<RawIndication>,
}

impl IndicationStream {
    /// Creates a connected sender and stream.
    pub fn channel() -> (IndicationSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// Waits for the next indication. Returns `None` once the stream is closed.
    pub async fn recv(&mut self) -> Option<RawIndication> {
        self.rx.recv().await
    }
}

impl From<mpsc::UnboundedReceiver<RawIndication>> for IndicationStream {
    fn from(rx: mpsc::UnboundedReceiver<RawIndication>) -> Self {
        Self { rx }
    }
}
