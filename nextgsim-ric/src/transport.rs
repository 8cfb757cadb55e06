//! E2 transport interface
//!
//! Connection handling, RPC framing and retries belong to the transport.
//! The RIC sees only subscribe and unsubscribe round-trips.

use crate::api::{IndicationStream, NodeId, SubscriptionName, SubscriptionSpec};
use crate::error::TransportError;

/// Subscription service of the E2 termination.
#[async_trait::async_trait]
pub trait E2Transport: Send + Sync {
    /// Submits a subscription to a node.
    ///
    /// On acceptance, returns the stream on which the node's indications for
    /// this subscription are delivered, in the order the node produced them.
    async fn subscribe(
        &self,
        node: &NodeId,
        name: &SubscriptionName,
        spec: SubscriptionSpec,
    ) -> Result<IndicationStream, TransportError>;

    /// Removes a subscription from a node.
    async fn unsubscribe(&self, node: &NodeId, name: &SubscriptionName) -> Result<(), TransportError>;
}
