//! RC subscription integration tests
//!
//! Runs the SINR neighbor-relation subscription against the mock E2 network.

use std::sync::Arc;

use integration_tests::{
    default_node, init_test_logging, within, MockE2Network, NodeBehavior, DEFAULT_TEST_TIMEOUT,
};
use nextgsim_e2sm::rc;
use nextgsim_ric::{
    ActionType, E2Error, E2Transport, LifecycleOutcome, NodeId, RcServiceModel, SubscriptionLifecycle,
    SubscriptionState, TransportError, RC_SINR_ACTION_ID,
};
use tokio::sync::watch;

fn rc_lifecycle(network: &MockE2Network, node: &str) -> SubscriptionLifecycle<RcServiceModel> {
    let transport: Arc<dyn E2Transport> = Arc::new(network.clone());
    SubscriptionLifecycle::new(Arc::new(RcServiceModel), transport, NodeId::from(node), ())
}

/// Test the RC flow: one indication, then a single unsubscribe
#[tokio::test]
async fn test_rc_subscribe_one_indication() {
    init_test_logging();

    let network = MockE2Network::new();
    network.add_node("e2:1/5153", default_node(), vec![]).await;
    let (_cancel_tx, cancel_rx) = watch::channel(false);

    let lifecycle = rc_lifecycle(&network, "e2:1/5153");
    assert_eq!(lifecycle.name().as_str(), "rc-e2:1/5153-sinr");

    let report = within(DEFAULT_TEST_TIMEOUT, lifecycle.run(1, cancel_rx))
        .await
        .expect("lifecycle completes");

    assert_eq!(report.outcome, LifecycleOutcome::Completed);
    assert_eq!(report.state, SubscriptionState::Closed);
    assert_eq!(report.model, "oran-e2sm-rc");
    assert_eq!(report.indications, 1);
    assert_eq!(network.unsubscribe_count("rc-e2:1/5153-sinr").await, 1);
    assert_eq!(network.active_subscription_count().await, 0);
}

/// Test the submitted trigger and SINR action
#[tokio::test]
async fn test_rc_spec_contents() {
    init_test_logging();

    let network = MockE2Network::new();
    network.add_node("n1", default_node(), vec![]).await;
    let (_cancel_tx, cancel_rx) = watch::channel(false);

    within(DEFAULT_TEST_TIMEOUT, rc_lifecycle(&network, "n1").run(1, cancel_rx))
        .await
        .expect("lifecycle completes");

    let spec = network.submitted_spec("rc-n1-sinr").await.expect("spec submitted");
    assert_eq!(spec.service_model, rc::DESCRIPTOR);
    assert_eq!(spec.action_ids(), vec![RC_SINR_ACTION_ID]);

    let action = &spec.actions[0];
    assert_eq!(action.action_type, ActionType::Report);
    assert!(action.subsequent_action.is_none());

    let definition = rc::decode_action_definition(&action.payload).unwrap();
    assert_eq!(
        definition.ric_style_type.as_ref().unwrap().value,
        rc::E2_NODE_INFORMATION_STYLE
    );
    let parameters: Vec<i64> = definition
        .format1()
        .unwrap()
        .ran_p_to_be_reported_list
        .iter()
        .map(|item| item.ran_parameter_id.as_ref().unwrap().value)
        .collect();
    assert_eq!(parameters, vec![rc::PARAMETER_SINR]);

    let trigger = rc::decode_event_trigger(&spec.event_trigger).unwrap();
    let conditions: Vec<(i32, i32)> = trigger
        .format3()
        .unwrap()
        .e2_node_info_change_list
        .iter()
        .map(|item| {
            (
                item.ric_event_trigger_condition_id.as_ref().unwrap().value,
                item.e2_node_info_change_id,
            )
        })
        .collect();
    assert_eq!(
        conditions,
        vec![
            (1, rc::CELL_CONFIGURATION_CHANGE),
            (2, rc::CELL_NEIGHBOR_RELATION_CHANGE),
        ]
    );
}

/// Test that a refused subscribe fails without an unsubscribe
#[tokio::test]
async fn test_rc_subscribe_refused() {
    init_test_logging();

    let network = MockE2Network::new();
    network
        .add_node_with_behavior(
            "n1",
            default_node(),
            vec![],
            NodeBehavior {
                fail_subscribe: true,
                ..Default::default()
            },
        )
        .await;
    let (_cancel_tx, cancel_rx) = watch::channel(false);

    let failure = rc_lifecycle(&network, "n1").run(1, cancel_rx).await.unwrap_err();

    assert_eq!(failure.state, SubscriptionState::Failed);
    assert!(matches!(
        failure.error,
        E2Error::TransportFailure {
            source: TransportError::Unreachable(_),
            ..
        }
    ));
    assert_eq!(network.subscribe_count("rc-n1-sinr").await, 1);
    assert_eq!(network.unsubscribe_count("rc-n1-sinr").await, 0);
}

/// Test that an unknown node is reported as a transport failure
#[tokio::test]
async fn test_rc_unknown_node() {
    init_test_logging();

    let network = MockE2Network::new();
    let (_cancel_tx, cancel_rx) = watch::channel(false);

    let failure = rc_lifecycle(&network, "ghost").run(1, cancel_rx).await.unwrap_err();

    assert_eq!(failure.node, NodeId::from("ghost"));
    assert!(matches!(failure.error, E2Error::TransportFailure { .. }));
}

/// Test cancellation of an RC subscription that never receives anything
#[tokio::test]
async fn test_rc_cancel_silent_subscription() {
    init_test_logging();

    let network = MockE2Network::new();
    network
        .add_node_with_behavior(
            "n1",
            default_node(),
            vec![],
            NodeBehavior {
                silent: true,
                ..Default::default()
            },
        )
        .await;
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let task = tokio::spawn(rc_lifecycle(&network, "n1").run(1, cancel_rx));
    let observer = network.clone();
    within(DEFAULT_TEST_TIMEOUT, async move {
        while observer.active_subscription_count().await == 0 {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await;

    cancel_tx.send(true).unwrap();
    let report = within(DEFAULT_TEST_TIMEOUT, task)
        .await
        .expect("task joins")
        .expect("cancelled lifecycle ends cleanly");

    assert_eq!(report.outcome, LifecycleOutcome::Cancelled);
    assert_eq!(report.state, SubscriptionState::Closed);
    assert_eq!(report.indications, 0);
    assert_eq!(network.unsubscribe_count("rc-n1-sinr").await, 1);
}
