//! Orchestrator integration tests
//!
//! Full sweeps over a mock RAN: concurrent KPM and RC lifecycles, failure
//! isolation between nodes, topology timeouts and shutdown.

use std::sync::Arc;
use std::time::Duration;

use integration_tests::{
    default_node, init_test_logging, kpm_rc_node, kpm_report_style, test_cells, wait_for_condition, within,
    MockE2Network, NodeBehavior, DEFAULT_POLL_INTERVAL, SWEEP_TIMEOUT,
};
use nextgsim_common::RicConfig;
use nextgsim_ric::{
    E2Error, E2Transport, LifecycleOutcome, NodeId, Orchestrator, OrchestratorConfig, SubscriptionState,
    TopologyError, TopologyService, TransportError,
};

fn orchestrator(network: &MockE2Network, config: OrchestratorConfig) -> Orchestrator {
    let topology: Arc<dyn TopologyService> = Arc::new(network.clone());
    let transport: Arc<dyn E2Transport> = Arc::new(network.clone());
    Orchestrator::new(topology, transport, config)
}

fn fast_config() -> OrchestratorConfig {
    OrchestratorConfig {
        topology_timeout: Duration::from_millis(500),
        ..OrchestratorConfig::default()
    }
}

/// Test a sweep over two healthy nodes
#[tokio::test]
async fn test_sweep_two_nodes() {
    init_test_logging();

    let network = MockE2Network::new();
    network.add_node("n1", default_node(), test_cells(2)).await;
    network
        .add_node(
            "n2",
            kpm_rc_node(vec![
                kpm_report_style(1, &["DRB.UEThpDl"]),
                kpm_report_style(2, &["RRU.PrbUsedDl"]),
            ]),
            test_cells(1),
        )
        .await;

    let report = within(SWEEP_TIMEOUT, orchestrator(&network, fast_config()).run())
        .await
        .expect("sweep runs");

    assert!(report.is_success(), "unexpected failures: {:?}", report.failures);
    // n1: one KPM style + RC, n2: two KPM styles + RC
    assert_eq!(report.completed.len(), 5);
    assert!(report
        .completed
        .iter()
        .all(|lifecycle| lifecycle.state == SubscriptionState::Closed));

    for name in ["kpm-n1-1", "rc-n1-sinr", "kpm-n2-1", "kpm-n2-2", "rc-n2-sinr"] {
        assert_eq!(network.subscribe_count(name).await, 1, "{name}");
        assert_eq!(network.unsubscribe_count(name).await, 1, "{name}");
    }
    assert_eq!(network.active_subscription_count().await, 0);

    let kpm_indications: Vec<usize> = report
        .completed_for(&NodeId::from("n1"))
        .filter(|lifecycle| lifecycle.model == "oran-e2sm-kpm")
        .map(|lifecycle| lifecycle.indications)
        .collect();
    assert_eq!(kpm_indications, vec![3]);
}

/// Test that a node refusing subscriptions does not affect other nodes
#[tokio::test]
async fn test_failing_node_is_isolated() {
    init_test_logging();

    let network = MockE2Network::new();
    network
        .add_node_with_behavior(
            "x",
            default_node(),
            test_cells(2),
            NodeBehavior {
                fail_subscribe: true,
                ..Default::default()
            },
        )
        .await;
    network.add_node("y", default_node(), test_cells(2)).await;

    let report = within(SWEEP_TIMEOUT, orchestrator(&network, fast_config()).run())
        .await
        .expect("sweep runs");

    let x = NodeId::from("x");
    let y = NodeId::from("y");

    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures_for(&x).count(), 2);
    assert!(report.failures_for(&x).all(|failure| matches!(
        failure.error,
        E2Error::TransportFailure {
            source: TransportError::Unreachable(_),
            ..
        }
    )));
    assert_eq!(network.unsubscribe_count("kpm-x-1").await, 0);
    assert_eq!(network.unsubscribe_count("rc-x-sinr").await, 0);

    assert_eq!(report.failures_for(&y).count(), 0);
    assert_eq!(report.completed_for(&y).count(), 2);
    assert_eq!(network.unsubscribe_count("kpm-y-1").await, 1);
    assert_eq!(network.unsubscribe_count("rc-y-sinr").await, 1);
}

/// Test that a topology failure on one node only loses that node's KPM work
#[tokio::test]
async fn test_topology_failure_is_isolated() {
    init_test_logging();

    let network = MockE2Network::new();
    network
        .add_node_with_behavior(
            "broken",
            default_node(),
            test_cells(1),
            NodeBehavior {
                fail_topology: true,
                ..Default::default()
            },
        )
        .await;
    network.add_node("healthy", default_node(), test_cells(1)).await;

    let report = within(SWEEP_TIMEOUT, orchestrator(&network, fast_config()).run())
        .await
        .expect("sweep runs");

    let broken = NodeId::from("broken");
    let failures: Vec<_> = report.failures_for(&broken).collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].name.is_none());
    assert!(matches!(
        failures[0].error,
        E2Error::Topology {
            source: TopologyError::Unavailable(_),
            ..
        }
    ));
    assert_eq!(network.subscribe_count("kpm-broken-1").await, 0);

    assert_eq!(report.completed_for(&NodeId::from("healthy")).count(), 2);
}

/// Test that a slow topology answer is turned into a timeout failure
#[tokio::test]
async fn test_topology_timeout() {
    init_test_logging();

    let network = MockE2Network::new();
    network
        .add_node_with_behavior(
            "slow",
            default_node(),
            test_cells(1),
            NodeBehavior {
                topology_delay: Some(Duration::from_secs(2)),
                ..Default::default()
            },
        )
        .await;

    let config = OrchestratorConfig {
        topology_timeout: Duration::from_millis(50),
        rc_enabled: false,
        ..OrchestratorConfig::default()
    };
    let report = within(SWEEP_TIMEOUT, orchestrator(&network, config).run())
        .await
        .expect("sweep runs");

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        E2Error::Topology {
            source: TopologyError::Timeout(_),
            ..
        }
    ));
    assert!(network.submitted_names().await.is_empty());
}

/// Test that a failed node listing fails the whole sweep
#[tokio::test]
async fn test_discovery_failure() {
    init_test_logging();

    let network = MockE2Network::new();
    network.add_node("n1", default_node(), test_cells(1)).await;
    network.fail_node_listing().await;

    let result = orchestrator(&network, fast_config()).run().await;

    assert!(matches!(
        result,
        Err(E2Error::Discovery(TopologyError::Unavailable(_)))
    ));
    assert!(network.submitted_names().await.is_empty());
}

/// Test that an empty RAN produces an empty, successful report
#[tokio::test]
async fn test_empty_ran() {
    init_test_logging();

    let network = MockE2Network::new();
    let report = orchestrator(&network, fast_config()).run().await.unwrap();

    assert!(report.is_success());
    assert!(report.completed.is_empty());
    assert!(report.skipped.is_empty());
}

/// Test that a node without cells gets a skipped KPM lifecycle
#[tokio::test]
async fn test_node_without_cells() {
    init_test_logging();

    let network = MockE2Network::new();
    network.add_node("n1", default_node(), vec![]).await;

    let report = within(SWEEP_TIMEOUT, orchestrator(&network, fast_config()).run())
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name.as_str(), "kpm-n1-1");
    assert_eq!(network.subscribe_count("kpm-n1-1").await, 0);
    assert_eq!(report.completed.len(), 1);
}

/// Test that disabled service models are not subscribed
#[tokio::test]
async fn test_service_model_toggles() {
    init_test_logging();

    let mut ric_config = RicConfig::default();
    ric_config.rc.enabled = false;
    ric_config.kpm.indications = 1;

    let network = MockE2Network::new();
    network.add_node("n1", default_node(), test_cells(1)).await;

    let report = within(
        SWEEP_TIMEOUT,
        orchestrator(&network, OrchestratorConfig::from(&ric_config)).run(),
    )
    .await
    .unwrap();

    assert_eq!(report.completed.len(), 1);
    assert_eq!(report.completed[0].indications, 1);
    assert_eq!(network.submitted_names().await, vec!["kpm-n1-1"]);
}

/// Test shutdown while every lifecycle is waiting for indications
#[tokio::test]
async fn test_shutdown_unsubscribes_everything() {
    init_test_logging();

    let network = MockE2Network::new();
    for id in ["n1", "n2"] {
        network
            .add_node_with_behavior(
                id,
                default_node(),
                test_cells(2),
                NodeBehavior {
                    silent: true,
                    ..Default::default()
                },
            )
            .await;
    }

    let orchestrator = Arc::new(orchestrator(&network, fast_config()));
    let sweep = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.run().await }
    });

    let observer = network.clone();
    wait_for_condition(
        || {
            let observer = observer.clone();
            async move { observer.active_subscription_count().await == 4 }
        },
        SWEEP_TIMEOUT,
        DEFAULT_POLL_INTERVAL,
    )
    .await
    .expect("subscriptions were not established");

    orchestrator.shutdown();
    let report = within(SWEEP_TIMEOUT, sweep)
        .await
        .expect("sweep task joins")
        .expect("sweep runs");

    assert!(report.is_success(), "unexpected failures: {:?}", report.failures);
    assert_eq!(report.completed.len(), 4);
    for lifecycle in &report.completed {
        assert_eq!(lifecycle.outcome, LifecycleOutcome::Cancelled);
        assert_eq!(lifecycle.state, SubscriptionState::Closed);
        assert_eq!(network.unsubscribe_count(lifecycle.name.as_str()).await, 1);
    }
    assert_eq!(network.active_subscription_count().await, 0);
}

/// Test that a shut down orchestrator never subscribes
#[tokio::test]
async fn test_shutdown_before_run_submits_nothing() {
    init_test_logging();

    let network = MockE2Network::new();
    network.add_node("n1", default_node(), test_cells(2)).await;

    let orchestrator = orchestrator(&network, fast_config());
    orchestrator.shutdown();
    assert!(orchestrator.is_shut_down());

    let report = within(SWEEP_TIMEOUT, orchestrator.run()).await.expect("sweep runs");

    assert!(report.is_success());
    assert!(report.completed.is_empty());
    assert!(network.submitted_names().await.is_empty());
    assert_eq!(network.unsubscribe_count("kpm-n1-1").await, 0);
}

/// Test that shutdown during topology queries stops the remaining subscriptions
#[tokio::test]
async fn test_shutdown_during_topology_queries() {
    init_test_logging();

    let network = MockE2Network::new();
    for id in ["n1", "n2"] {
        network
            .add_node_with_behavior(
                id,
                default_node(),
                test_cells(1),
                NodeBehavior {
                    topology_delay: Some(Duration::from_millis(200)),
                    ..Default::default()
                },
            )
            .await;
    }

    let orchestrator = Arc::new(orchestrator(&network, fast_config()));
    let sweep = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.run().await }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    orchestrator.shutdown();

    let report = within(SWEEP_TIMEOUT, sweep)
        .await
        .expect("sweep task joins")
        .expect("sweep runs");

    assert!(report.is_success());
    assert!(report.completed.is_empty());
    assert!(network.submitted_names().await.is_empty());
}

/// Test that a second sweep after shutdown does nothing
#[tokio::test]
async fn test_run_after_shutdown_is_empty() {
    init_test_logging();

    let network = MockE2Network::new();
    network.add_node("n1", default_node(), test_cells(1)).await;

    let orchestrator = orchestrator(&network, fast_config());
    let first = within(SWEEP_TIMEOUT, orchestrator.run()).await.expect("sweep runs");
    assert_eq!(first.completed.len(), 2);

    orchestrator.shutdown();
    let second = within(SWEEP_TIMEOUT, orchestrator.run()).await.expect("sweep runs");

    assert!(second.completed.is_empty());
    let mut names = network.submitted_names().await;
    names.sort();
    assert_eq!(names, vec!["kpm-n1-1", "rc-n1-sinr"]);
}
