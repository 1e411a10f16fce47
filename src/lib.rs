use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cluster::{Cluster, NetworkConfig};
use crate::domain::ids::VmId;
use crate::domain::outcome::VmEndpoint;
use crate::error::Result;
use crate::rpc::http::HttpRpc;
use crate::runner::{BootstrapConfig, Bootstrapper};

pub mod api;
pub mod cluster;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logger;
pub mod rpc;
pub mod runner;

/// Bootstraps `vm` from `genesis_path` onto the compiled-in local test
/// network with default settings. Thin wiring over [`Bootstrapper`] for
/// callers that do not need to customize the cluster or the config.
pub async fn run_bootstrap(cancel: &CancellationToken, vm: &VmId, genesis_path: &Path) -> Result<Vec<VmEndpoint>> {
    let cluster = Cluster::new(NetworkConfig::local())?;
    let rpc = Arc::new(HttpRpc::new()?);

    Bootstrapper::new(rpc, cluster, BootstrapConfig::default()).run(cancel, vm, genesis_path).await
}
