//! Subscription lifecycle
//!
//! Drives one (node, report style) subscription through
//! `Building -> Active -> Draining -> Closed`, with `Failed` reachable from
//! any state on error.
//!
//! Once a subscribe has been accepted, [`SubscriptionLifecycle::run`]
//! unsubscribes on every exit path: quota reached, cancellation, stream
//! closed by the peer, or consumption error. Unsubscribe is sent at most once.
//! A lifecycle cancelled before its subscribe never contacts the transport.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{IndicationStream, NodeId, RawIndication, SubscriptionName, SubscriptionSpec};
use crate::builder::build_spec;
use crate::error::{E2Error, TransportError};
use crate::service_model::ServiceModel;
use crate::transport::E2Transport;

/// Subscription lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionState {
    /// Payloads under construction
    #[default]
    Building,
    /// Submitted and accepted, indication stream open
    Active,
    /// Consumption ended (quota, cancellation or closed stream), unsubscribe pending
    Draining,
    /// Unsubscribe acknowledged, or cancelled before subscribing
    Closed,
    /// Terminated by an error
    Failed,
}

impl fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionState::Building => write!(f, "Building"),
            SubscriptionState::Active => write!(f, "Active"),
            SubscriptionState::Draining => write!(f, "Draining"),
            SubscriptionState::Closed => write!(f, "Closed"),
            SubscriptionState::Failed => write!(f, "Failed"),
        }
    }
}

/// Result of waiting for the next indication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextIndication {
    /// An indication was delivered
    Indication(RawIndication),
    /// The lifecycle was cancelled while waiting
    Cancelled,
    /// The transport closed the stream
    Closed,
}

/// How a lifecycle that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOutcome {
    /// The indication quota was consumed and the subscription removed
    Completed,
    /// Cancelled before the quota was reached; the subscription was removed
    Cancelled,
    /// Nothing was submitted because the spec had no actions
    Skipped,
}

/// Summary of a finished lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Target node
    pub node: NodeId,
    /// Subscription name
    pub name: SubscriptionName,
    /// Service model name
    pub model: &'static str,
    /// How the lifecycle ended
    pub outcome: LifecycleOutcome,
    /// Final state
    pub state: SubscriptionState,
    /// Indications received
    pub indications: usize,
    /// Indications that failed to decode
    pub decode_failures: usize,
}

/// A failed lifecycle.
#[derive(Debug)]
pub struct LifecycleFailure {
    /// Target node
    pub node: NodeId,
    /// Subscription name, if the failure happened after naming
    pub name: Option<SubscriptionName>,
    /// Service model name
    pub model: &'static str,
    /// Final state
    pub state: SubscriptionState,
    /// The error
    pub error: E2Error,
}

impl fmt::Display for LifecycleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "[{}] {} on {}: {}", self.model, name, self.node, self.error),
            None => write!(f, "[{}] {}: {}", self.model, self.node, self.error),
        }
    }
}

/// One subscription, owned by the task that drives it.
pub struct SubscriptionLifecycle<M: ServiceModel> {
    model: Arc<M>,
    transport: Arc<dyn E2Transport>,
    node: NodeId,
    name: SubscriptionName,
    target: M::Target,
    state: SubscriptionState,
    stream: Option<IndicationStream>,
    subscribed: bool,
    unsubscribe_sent: bool,
    indications: usize,
    decode_failures: usize,
}

impl<M: ServiceModel> SubscriptionLifecycle<M> {
    /// Creates a lifecycle in the `Building` state.
    pub fn new(model: Arc<M>, transport: Arc<dyn E2Transport>, node: NodeId, target: M::Target) -> Self {
        let name = model.subscription_name(&node, &target);
        Self {
            model,
            transport,
            node,
            name,
            target,
            state: SubscriptionState::Building,
            stream: None,
            subscribed: false,
            unsubscribe_sent: false,
            indications: 0,
            decode_failures: 0,
        }
    }

    /// Returns the subscription name.
    pub fn name(&self) -> &SubscriptionName {
        &self.name
    }

    /// Returns the target node.
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Returns the current state.
    pub fn state(&self) -> SubscriptionState {
        self.state
    }

    fn model_name(&self) -> &'static str {
        self.model.descriptor().name
    }

    fn transport_failure(&self, source: TransportError) -> E2Error {
        E2Error::TransportFailure {
            node: self.node.clone(),
            name: self.name.clone(),
            source,
        }
    }

    /// Builds the subscription spec. A failure moves the lifecycle to `Failed`.
    pub fn build(&mut self) -> Result<SubscriptionSpec, E2Error> {
        build_spec(self.model.as_ref(), &self.target).map_err(|source| {
            self.state = SubscriptionState::Failed;
            E2Error::Build {
                node: self.node.clone(),
                name: self.name.clone(),
                source,
            }
        })
    }

    /// Submits `spec` to the transport.
    ///
    /// Moves `Building -> Active` on acceptance, or to `Failed` if the
    /// transport refuses. A spec without actions is refused locally with
    /// [`E2Error::EmptySpec`] and the state is left unchanged.
    pub async fn subscribe(&mut self, spec: SubscriptionSpec) -> Result<(), E2Error> {
        if spec.is_empty() {
            return Err(E2Error::EmptySpec {
                node: self.node.clone(),
                name: self.name.clone(),
            });
        }

        debug!(
            node = %self.node,
            subscription = %self.name,
            actions = spec.actions.len(),
            "Submitting subscription"
        );
        match self.transport.subscribe(&self.node, &self.name, spec).await {
            Ok(stream) => {
                self.stream = Some(stream);
                self.subscribed = true;
                self.state = SubscriptionState::Active;
                info!(node = %self.node, subscription = %self.name, "Subscription active");
                Ok(())
            }
            Err(e) => {
                self.state = SubscriptionState::Failed;
                Err(self.transport_failure(e))
            }
        }
    }

    /// Waits for the next indication, or for cancellation.
    ///
    /// Cancellation is signalled by `true` on `cancel`; it moves the
    /// lifecycle to `Draining`. A dropped cancel sender is never treated as
    /// cancellation.
    pub async fn next_indication(&mut self, cancel: &mut watch::Receiver<bool>) -> NextIndication {
        let Some(stream) = self.stream.as_mut() else {
            return NextIndication::Closed;
        };

        let mut cancel_open = true;
        loop {
            if *cancel.borrow_and_update() {
                self.state = SubscriptionState::Draining;
                return NextIndication::Cancelled;
            }

            tokio::select! {
                biased;
                changed = cancel.changed(), if cancel_open => {
                    if changed.is_err() {
                        cancel_open = false;
                    }
                }
                item = stream.recv() => {
                    return match item {
                        Some(indication) => NextIndication::Indication(indication),
                        None => NextIndication::Closed,
                    };
                }
            }
        }
    }

    /// Removes the subscription from the node.
    ///
    /// Sends at most one unsubscribe per lifecycle; later calls, and calls
    /// before a successful subscribe, return `Ok(())` without contacting the
    /// transport. The lifecycle is `Draining` while the request is in flight,
    /// then `Closed` on acknowledgement or `Failed` otherwise.
    pub async fn unsubscribe(&mut self) -> Result<(), E2Error> {
        if !self.subscribed || self.unsubscribe_sent {
            return Ok(());
        }
        self.unsubscribe_sent = true;
        self.stream = None;
        self.state = SubscriptionState::Draining;

        match self.transport.unsubscribe(&self.node, &self.name).await {
            Ok(()) => {
                self.state = SubscriptionState::Closed;
                info!(node = %self.node, subscription = %self.name, "Subscription closed");
                Ok(())
            }
            Err(e) => {
                self.state = SubscriptionState::Failed;
                Err(self.transport_failure(e))
            }
        }
    }

    /// Consumes up to `quota` indications, decoding and logging each.
    ///
    /// Decode failures are logged and counted but do not end consumption.
    async fn consume(
        &mut self,
        quota: usize,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<LifecycleOutcome, E2Error> {
        while self.indications < quota {
            match self.next_indication(cancel).await {
                NextIndication::Indication(raw) => {
                    self.indications += 1;
                    match self.model.decode_indication(&raw) {
                        Ok(indication) => self.model.log_indication(&self.node, &self.name, &indication),
                        Err(source) => {
                            self.decode_failures += 1;
                            let error = E2Error::DecodeFailed {
                                name: self.name.clone(),
                                source,
                            };
                            warn!(node = %self.node, "{}", error);
                        }
                    }
                }
                NextIndication::Cancelled => {
                    info!(
                        node = %self.node,
                        subscription = %self.name,
                        received = self.indications,
                        "Subscription cancelled"
                    );
                    return Ok(LifecycleOutcome::Cancelled);
                }
                NextIndication::Closed => {
                    return Err(self.transport_failure(TransportError::StreamClosed));
                }
            }
        }
        Ok(LifecycleOutcome::Completed)
    }

    fn report(&self, outcome: LifecycleOutcome) -> LifecycleReport {
        LifecycleReport {
            node: self.node.clone(),
            name: self.name.clone(),
            model: self.model_name(),
            outcome,
            state: self.state,
            indications: self.indications,
            decode_failures: self.decode_failures,
        }
    }

    fn failure(&self, error: E2Error) -> LifecycleFailure {
        LifecycleFailure {
            node: self.node.clone(),
            name: Some(self.name.clone()),
            model: self.model_name(),
            state: self.state,
            error,
        }
    }

    /// Runs the whole lifecycle: build, subscribe, consume `quota`
    /// indications, unsubscribe.
    ///
    /// A spec without actions is skipped with a warning. If both consumption
    /// and unsubscribe fail, the consumption error is reported.
    pub async fn run(
        mut self,
        quota: usize,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<LifecycleReport, LifecycleFailure> {
        let spec = match self.build() {
            Ok(spec) => spec,
            Err(e) => return Err(self.failure(e)),
        };

        if spec.is_empty() {
            warn!(
                node = %self.node,
                subscription = %self.name,
                "Subscription has no actions, skipping"
            );
            return Ok(self.report(LifecycleOutcome::Skipped));
        }

        if *cancel.borrow_and_update() {
            info!(
                node = %self.node,
                subscription = %self.name,
                "Cancelled before subscribe, nothing submitted"
            );
            self.state = SubscriptionState::Closed;
            return Ok(self.report(LifecycleOutcome::Cancelled));
        }

        if let Err(e) = self.subscribe(spec).await {
            return Err(self.failure(e));
        }

        let consumed = self.consume(quota, &mut cancel).await;
        let unsubscribed = self.unsubscribe().await;

        match (consumed, unsubscribed) {
            (Ok(outcome), Ok(())) => Ok(self.report(outcome)),
            (Err(e), unsubscribed) => {
                if let Err(unsub_err) = unsubscribed {
                    warn!(node = %self.node, "{}", unsub_err);
                }
                self.state = SubscriptionState::Failed;
                Err(self.failure(e))
            }
            (Ok(_), Err(e)) => Err(self.failure(e)),
        }
    }
}

impl<M: ServiceModel> Drop for SubscriptionLifecycle<M> {
    fn drop(&mut self) {
        if self.subscribed && !self.unsubscribe_sent {
            warn!(
                node = %self.node,
                subscription = %self.name,
                state = %self.state,
                "Subscription dropped without unsubscribe"
            );
        }
    }
}
