//! Error types for the RIC application

use std::time::Duration;

use nextgsim_e2sm::E2smError;
use thiserror::Error;

use crate::api::{NodeId, SubscriptionName};

/// Topology service errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// The topology service could not be reached
    #[error("Topology service unavailable: {0}")]
    Unavailable(String),

    /// The requested node is not known
    #[error("E2 node {0} not found")]
    NodeNotFound(NodeId),

    /// A topology query did not complete in time
    #[error("Topology query timed out after {0:?}")]
    Timeout(Duration),
}

/// E2 transport errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The E2 node or the subscription service could not be reached
    #[error("E2 node {0} unreachable")]
    Unreachable(NodeId),

    /// The subscription request was refused
    #[error("Subscription {name} rejected: {reason}")]
    Rejected {
        /// Subscription name
        name: SubscriptionName,
        /// Cause given by the peer
        reason: String,
    },

    /// Unsubscribe for a subscription the peer does not hold
    #[error("Unknown subscription {0}")]
    UnknownSubscription(SubscriptionName),

    /// The indication stream was closed by the peer
    #[error("Indication stream closed by peer")]
    StreamClosed,
}

/// Failure to assemble a subscription specification.
///
/// Any payload validation failure aborts the whole build; no partial action
/// lists are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The event trigger failed validation
    #[error("event trigger: {0}")]
    EventTrigger(#[source] E2smError),

    /// A per-cell action definition failed validation
    #[error("action {action_id} for cell {cell}: {source}")]
    CellAction {
        /// Action ID being built
        action_id: i32,
        /// Cell object identifier
        cell: String,
        /// Codec error
        source: E2smError,
    },

    /// An action definition failed validation
    #[error("action {action_id}: {source}")]
    Action {
        /// Action ID being built
        action_id: i32,
        /// Codec error
        source: E2smError,
    },
}

/// Errors of one subscription lifecycle
#[derive(Debug, Error)]
pub enum E2Error {
    /// The subscription could not be built
    #[error("Failed to build subscription {name} for node {node}: {source}")]
    Build {
        /// Target node
        node: NodeId,
        /// Subscription name
        name: SubscriptionName,
        /// Build failure
        source: BuildError,
    },

    /// An indication could not be decoded
    #[error("Indication on subscription {name} could not be decoded: {source}")]
    DecodeFailed {
        /// Subscription name
        name: SubscriptionName,
        /// Codec error
        source: E2smError,
    },

    /// Subscribe, unsubscribe or the indication stream failed
    #[error("Transport failure for subscription {name} on node {node}: {source}")]
    TransportFailure {
        /// Target node
        node: NodeId,
        /// Subscription name
        name: SubscriptionName,
        /// Transport error
        source: TransportError,
    },

    /// The subscription has no actions
    #[error("Subscription {name} for node {node} has no actions")]
    EmptySpec {
        /// Target node
        node: NodeId,
        /// Subscription name
        name: SubscriptionName,
    },

    /// The E2 node list could not be obtained
    #[error("E2 node discovery failed: {0}")]
    Discovery(#[source] TopologyError),

    /// A topology query for one node failed
    #[error("Topology query for node {node} failed: {source}")]
    Topology {
        /// Queried node
        node: NodeId,
        /// Topology error
        source: TopologyError,
    },

    /// The lifecycle task terminated abnormally
    #[error("Lifecycle task aborted: {0}")]
    TaskAborted(String),
}
