
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;

use mock_rpc::{MockBehavior, MockRpc};
use subnet_runner::cluster::Cluster;
use subnet_runner::domain::ids::{NodeId, SubnetId, VmId};
use subnet_runner::error::Error;
use subnet_runner::runner::{BootstrapConfig, Bootstrapper};

fn test_cluster(n: usize) -> Cluster {
    Cluster::from_parts(
        (0..n).map(|i| format!("mock://node-{}", i)).collect(),
        (0..n).map(|i| NodeId::new(format!("NodeID-{}", i))).collect(),
    )
    .unwrap()
}

fn fast_config(expected_subnet: SubnetId) -> BootstrapConfig {
    BootstrapConfig {
        expected_subnet,
        wait_time: Duration::from_millis(5),
        long_wait_time: Duration::from_millis(5),
        ..BootstrapConfig::default()
    }
}

fn genesis_file(payload: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(payload).unwrap();
    file
}

#[tokio::test]
async fn five_node_bootstrap_yields_one_record_per_node() {
    let behavior = MockBehavior::default();
    let expected_subnet = behavior.subnet_id.clone();
    let expected_chain = behavior.chain_id.clone();
    let rpc = Arc::new(MockRpc::new(behavior));

    let genesis = genesis_file(b"genesis-bytes");
    let vm = VmId::new("M1");
    let issued_before = Utc::now().timestamp() as u64;

    let bootstrapper = Bootstrapper::new(rpc.clone(), test_cluster(5), fast_config(expected_subnet.clone()));
    let records = bootstrapper.run(&CancellationToken::new(), &vm, genesis.path()).await.unwrap();

    assert_eq!(records.len(), 5);
    let urls: HashSet<_> = records.iter().map(|r| r.url.clone()).collect();
    let nodes: HashSet<_> = records.iter().map(|r| r.node.clone()).collect();
    assert_eq!(urls.len(), 5);
    assert_eq!(nodes.len(), 5);
    for record in &records {
        assert_eq!(record.vm, vm);
        assert_eq!(record.service_path, format!("/ext/bc/{}", expected_chain));
    }

    let state = rpc.state.lock().unwrap();

    // One subnet created with the funded address as sole control key.
    assert_eq!(state.subnet_creations.len(), 1);
    assert_eq!(state.subnet_creations[0].1, 1);

    // One registration per node, all bound to the expected subnet, with
    // windows strictly after issue time.
    assert_eq!(state.registrations.len(), 5);
    for reg in &state.registrations {
        assert_eq!(reg.subnet, expected_subnet);
        assert!(reg.start_time > issued_before);
        assert!(reg.end_time > reg.start_time);
    }

    // The deployed chain carries the caller's genesis payload.
    assert_eq!(state.chain_creations.len(), 1);
    assert_eq!(state.chain_creations[0].3, b"genesis-bytes");

    // Both convergence checks ran against every node.
    assert!(state.chain_status_polls >= 5);
    assert!(state.bootstrap_polls >= 5);
}

#[tokio::test]
async fn single_node_cluster_bootstraps() {
    let behavior = MockBehavior::default();
    let expected_subnet = behavior.subnet_id.clone();
    let rpc = Arc::new(MockRpc::new(behavior));

    let genesis = genesis_file(b"g");
    let vm = VmId::new("M1");

    let bootstrapper = Bootstrapper::new(rpc.clone(), test_cluster(1), fast_config(expected_subnet));
    let records = bootstrapper.run(&CancellationToken::new(), &vm, genesis.path()).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(rpc.state.lock().unwrap().registrations.len(), 1);
}

#[tokio::test]
async fn aborted_subnet_creation_stops_before_any_registration() {
    let behavior = MockBehavior { abort_subnet_tx: true, ..MockBehavior::default() };
    let expected_subnet = behavior.subnet_id.clone();
    let rpc = Arc::new(MockRpc::new(behavior));

    let genesis = genesis_file(b"g");
    let bootstrapper = Bootstrapper::new(rpc.clone(), test_cluster(5), fast_config(expected_subnet));
    let err = bootstrapper.run(&CancellationToken::new(), &VmId::new("M1"), genesis.path()).await.unwrap_err();

    assert!(matches!(err, Error::Aborted { .. }));

    let state = rpc.state.lock().unwrap();
    assert!(state.registrations.is_empty());
    assert!(state.chain_creations.is_empty());
}

#[tokio::test]
async fn rejected_subnet_creation_is_fatal() {
    let behavior = MockBehavior { reject_create_subnet: true, ..MockBehavior::default() };
    let expected_subnet = behavior.subnet_id.clone();
    let rpc = Arc::new(MockRpc::new(behavior));

    let genesis = genesis_file(b"g");
    let bootstrapper = Bootstrapper::new(rpc.clone(), test_cluster(3), fast_config(expected_subnet));
    let err = bootstrapper.run(&CancellationToken::new(), &VmId::new("M1"), genesis.path()).await.unwrap_err();

    assert!(matches!(err, Error::Rejected { op: "createSubnet", .. }));
    assert!(rpc.state.lock().unwrap().registrations.is_empty());
}

#[tokio::test]
async fn subnet_id_mismatch_names_both_ids() {
    let behavior = MockBehavior::default();
    let observed_subnet = behavior.subnet_id.clone();
    let rpc = Arc::new(MockRpc::new(behavior));

    let genesis = genesis_file(b"g");
    let expected = SubnetId::new("SUBNET-OTHER");
    let bootstrapper = Bootstrapper::new(rpc.clone(), test_cluster(5), fast_config(expected.clone()));
    let err = bootstrapper.run(&CancellationToken::new(), &VmId::new("M1"), genesis.path()).await.unwrap_err();

    match err {
        Error::SubnetMismatch { expected: e, observed: o } => {
            assert_eq!(e, expected);
            assert_eq!(o, observed_subnet);
        }
        other => panic!("expected SubnetMismatch, got {:?}", other.to_string()),
    }
    assert!(rpc.state.lock().unwrap().registrations.is_empty());
}

#[tokio::test]
async fn pre_populated_cluster_never_silently_succeeds() {
    // A second subnet beside the expected one means this bootstrap was
    // re-run against a cluster that already went through it.
    let expected = SubnetId::new("SUBNET-1");
    let behavior = MockBehavior {
        subnet_listing: Some(vec![expected.clone(), SubnetId::new("SUBNET-RERUN")]),
        ..MockBehavior::default()
    };
    let rpc = Arc::new(MockRpc::new(behavior));

    let genesis = genesis_file(b"g");
    let bootstrapper = Bootstrapper::new(rpc.clone(), test_cluster(5), fast_config(expected));
    let err = bootstrapper.run(&CancellationToken::new(), &VmId::new("M1"), genesis.path()).await.unwrap_err();

    assert!(matches!(err, Error::SubnetMismatch { .. }));
    assert!(rpc.state.lock().unwrap().registrations.is_empty());
}

#[tokio::test]
async fn missing_blockchain_listing_is_fatal() {
    let behavior = MockBehavior { omit_chain_listing: true, ..MockBehavior::default() };
    let expected_subnet = behavior.subnet_id.clone();
    let rpc = Arc::new(MockRpc::new(behavior));

    let genesis = genesis_file(b"g");
    let bootstrapper = Bootstrapper::new(rpc, test_cluster(2), fast_config(expected_subnet));
    let err = bootstrapper.run(&CancellationToken::new(), &VmId::new("M1"), genesis.path()).await.unwrap_err();

    assert!(matches!(err, Error::MissingBlockchain(_)));
}

#[tokio::test]
async fn unreadable_genesis_is_fatal() {
    let behavior = MockBehavior::default();
    let expected_subnet = behavior.subnet_id.clone();
    let rpc = Arc::new(MockRpc::new(behavior));

    let bootstrapper = Bootstrapper::new(rpc, test_cluster(2), fast_config(expected_subnet));
    let missing = std::path::Path::new("/nonexistent/genesis.json");
    let err = bootstrapper.run(&CancellationToken::new(), &VmId::new("M1"), missing).await.unwrap_err();

    assert!(matches!(err, Error::Genesis { .. }));
}

#[tokio::test]
async fn cancellation_during_convergence_returns_cancelled() {
    let mut behavior = MockBehavior::default();
    // Node 3 of 5 never finishes bootstrapping.
    behavior.never_bootstrap.insert("mock://node-2".to_string());
    let expected_subnet = behavior.subnet_id.clone();
    let rpc = Arc::new(MockRpc::new(behavior));

    let genesis = genesis_file(b"g");
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let watched = rpc.clone();
    tokio::spawn(async move {
        // Fire only once the workflow is demonstrably stuck on node 3's
        // bootstrap check.
        loop {
            if watched.state.lock().unwrap().bootstrap_polls >= 5 {
                trigger.cancel();
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    });

    let bootstrapper = Bootstrapper::new(rpc.clone(), test_cluster(5), fast_config(expected_subnet));
    let err = bootstrapper.run(&cancel, &VmId::new("M1"), genesis.path()).await.unwrap_err();

    assert!(err.is_cancelled());

    // The workflow got as far as deploying, but produced no record set.
    let state = rpc.state.lock().unwrap();
    assert_eq!(state.chain_creations.len(), 1);
    assert_eq!(state.registrations.len(), 5);
}
