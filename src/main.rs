use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use subnet_runner::cluster::{Cluster, NetworkConfig};
use subnet_runner::domain::ids::{SubnetId, VmId};
use subnet_runner::rpc::http::HttpRpc;
use subnet_runner::runner::{BootstrapConfig, Bootstrapper};
use subnet_runner::{constants, logger};

/// Deploys a custom VM onto a subnet of the local test network and waits
/// for every node to validate and bootstrap it.
#[derive(Parser, Debug)]
#[command(name = "subnet-runner", version, about)]
struct Args {
    /// Identifier of the VM to deploy.
    #[arg(long)]
    vm_id: String,

    /// Path to the VM's genesis payload.
    #[arg(long)]
    genesis: PathBuf,

    /// Number of cluster nodes to drive (at most the compiled-in topology).
    #[arg(long, default_value_t = constants::NUM_NODES)]
    nodes: usize,

    /// Host the node RPC ports are bound on.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// First node's HTTP port; later nodes follow at a fixed stride.
    #[arg(long, default_value_t = constants::BASE_HTTP_PORT)]
    base_port: u16,

    /// Subnet id the bootstrap is expected to produce. Overrides the
    /// compiled-in deployment constant.
    #[arg(long)]
    expected_subnet: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    logger::init();
    let args = Args::parse();

    let mut network = NetworkConfig::local();
    network.host = args.host.clone();
    network.base_http_port = args.base_port;
    if args.nodes == 0 || args.nodes > network.node_ids.len() {
        log::error!("--nodes must be between 1 and {}", network.node_ids.len());
        return ExitCode::FAILURE;
    }
    network.node_ids.truncate(args.nodes);

    let cluster = match Cluster::new(network) {
        Ok(cluster) => cluster,
        Err(e) => {
            log::error!("invalid cluster topology: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rpc = match HttpRpc::new() {
        Ok(rpc) => Arc::new(rpc),
        Err(e) => {
            log::error!("could not build RPC client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut config = BootstrapConfig::default();
    if let Some(expected) = args.expected_subnet {
        config.expected_subnet = SubnetId::new(expected);
    }

    // Ctrl-C flips the token; every polling loop unwinds within one interval.
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, cancelling bootstrap");
            trigger.cancel();
        }
    });

    let vm = VmId::new(args.vm_id);
    let bootstrapper = Bootstrapper::new(rpc, cluster, config);

    match bootstrapper.run(&cancel, &vm, &args.genesis).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if e.is_cancelled() => {
            log::warn!("bootstrap cancelled before completion");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("bootstrap failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
