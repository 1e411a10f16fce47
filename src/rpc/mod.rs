pub mod endpoint;
pub mod http;

use async_trait::async_trait;

use crate::domain::ids::{ChainId, SubnetId, TxId, VmId};
use crate::domain::registration::ValidatorRegistration;
use crate::domain::status::{ChainStatus, TxStatus};
use crate::error::Result;

/// Keystore credentials authorizing mutating platform calls.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// One entry of the cluster's blockchain listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainListing {
    pub id: ChainId,
    pub name: String,
    pub subnet: SubnetId,
    pub vm: VmId,
}

/// The RPC surface the bootstrap workflow drives, one method per cluster
/// capability. Every method takes the base URL of the node to talk to;
/// mutations and listings go to the primary node, the two convergence
/// queries are issued per node.
///
/// Implemented over HTTP by [`http::HttpRpc`] and by a scripted mock in
/// the integration tests.
#[async_trait]
pub trait ClusterRpc: Send + Sync {
    async fn create_user(&self, url: &str, creds: &Credentials) -> Result<()>;

    /// Imports a private key into the node keystore and returns the
    /// address it controls.
    async fn import_key(&self, url: &str, creds: &Credentials, private_key: &str) -> Result<String>;

    async fn balance(&self, url: &str, address: &str) -> Result<String>;

    async fn create_subnet(&self, url: &str, creds: &Credentials, control_keys: &[String], threshold: u32) -> Result<TxId>;

    async fn add_subnet_validator(&self, url: &str, creds: &Credentials, registration: &ValidatorRegistration) -> Result<TxId>;

    async fn create_blockchain(
        &self,
        url: &str,
        creds: &Credentials,
        subnet: &SubnetId,
        vm: &VmId,
        name: &str,
        genesis: &[u8],
    ) -> Result<TxId>;

    async fn tx_status(&self, url: &str, tx: &TxId) -> Result<TxStatus>;

    async fn subnets(&self, url: &str) -> Result<Vec<SubnetId>>;

    async fn blockchains(&self, url: &str) -> Result<Vec<ChainListing>>;

    async fn chain_status(&self, url: &str, chain: &ChainId) -> Result<ChainStatus>;

    async fn is_bootstrapped(&self, url: &str, chain: &ChainId) -> Result<bool>;
}
