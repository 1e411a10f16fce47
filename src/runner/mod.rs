pub mod poll;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::cluster::Cluster;
use crate::constants;
use crate::domain::ids::{ChainId, SubnetId, TxId, VmId};
use crate::domain::outcome::VmEndpoint;
use crate::domain::registration::ValidatorRegistration;
use crate::domain::status::TxStatus;
use crate::error::{Error, Result};
use crate::rpc::{ClusterRpc, Credentials};
use poll::Probe;

/// Interval between status probes for single transactions.
const WAIT_TIME: Duration = Duration::from_secs(1);
/// Interval for cluster-wide convergence checks, an order of magnitude
/// slower than single-tx confirmation.
const LONG_WAIT_TIME: Duration = Duration::from_secs(10);

const VALIDATOR_WEIGHT: u64 = 50;
const VALIDATOR_START_DIFF_SECS: i64 = 30;
const VALIDATOR_END_DIFF_DAYS: i64 = 15;

/// Everything the workflow consumes but does not own: the expected subnet
/// identity, the funding key, keystore credentials, and the polling and
/// validator-window parameters.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Consistency guard: the subnet id this deployment is expected to
    /// produce. A different observed id means the cluster was not started
    /// from the expected genesis.
    pub expected_subnet: SubnetId,
    pub vm_name: String,
    pub credentials: Credentials,
    pub funded_key: String,
    pub validator_weight: u64,
    pub validator_start_offset: chrono::Duration,
    pub validator_end_offset: chrono::Duration,
    pub wait_time: Duration,
    pub long_wait_time: Duration,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        BootstrapConfig {
            expected_subnet: SubnetId::new(constants::EXPECTED_SUBNET_ID),
            vm_name: constants::VM_NAME.to_string(),
            credentials: Credentials { username: "test".to_string(), password: "vmsrkewl".to_string() },
            funded_key: constants::FUNDED_KEY.to_string(),
            validator_weight: VALIDATOR_WEIGHT,
            validator_start_offset: chrono::Duration::seconds(VALIDATOR_START_DIFF_SECS),
            validator_end_offset: chrono::Duration::days(VALIDATOR_END_DIFF_DAYS),
            wait_time: WAIT_TIME,
            long_wait_time: LONG_WAIT_TIME,
        }
    }
}

/// Drives the scripted bootstrap against a running cluster: create the
/// subnet, register every node as a validator, deploy the VM, and wait for
/// the whole cluster to converge on the result.
///
/// Strictly sequential; each step's success is a precondition for the
/// next, and identifiers flow forward only. No cleanup is attempted on
/// failure, the process supervisor owns teardown.
pub struct Bootstrapper {
    rpc: Arc<dyn ClusterRpc>,
    cluster: Cluster,
    config: BootstrapConfig,
}

impl Bootstrapper {
    pub fn new(rpc: Arc<dyn ClusterRpc>, cluster: Cluster, config: BootstrapConfig) -> Self {
        Bootstrapper { rpc, cluster, config }
    }

    /// Runs the whole workflow. On success, returns one record per node
    /// describing where the deployed VM is now reachable.
    pub async fn run(&self, cancel: &CancellationToken, vm: &VmId, genesis_path: &Path) -> Result<Vec<VmEndpoint>> {
        log::info!("creating subnet");

        let funded_address = self.import_funding().await?;
        let subnet = self.create_subnet(cancel, &funded_address).await?;
        self.register_validators(cancel, &subnet).await?;
        let chain = self.deploy_vm(cancel, &subnet, vm, genesis_path).await?;
        self.await_convergence(cancel, &chain).await?;

        let records: Vec<VmEndpoint> = self
            .cluster
            .node_ids()
            .iter()
            .zip(self.cluster.endpoints())
            .map(|(node, url)| VmEndpoint::new(node.clone(), url, &chain, vm.clone()))
            .collect();

        log::info!("Custom VM endpoints now accessible at:");
        for record in &records {
            log::info!("{}", record);
        }
        log::info!("Custom VM ID: {}", vm);

        Ok(records)
    }

    /// Creates the keystore user and imports the pre-funded genesis key,
    /// returning the address that owns the subnet and pays every fee.
    async fn import_funding(&self) -> Result<String> {
        let url = self.cluster.primary();
        let creds = &self.config.credentials;

        self.rpc.create_user(url, creds).await?;
        let address = self.rpc.import_key(url, creds, &self.config.funded_key).await?;
        let balance = self.rpc.balance(url, &address).await?;
        log::info!("found {} on address {}", balance, address);

        Ok(address)
    }

    async fn create_subnet(&self, cancel: &CancellationToken, funded_address: &str) -> Result<SubnetId> {
        let url = self.cluster.primary();

        let tx = self
            .rpc
            .create_subnet(url, &self.config.credentials, &[funded_address.to_string()], 1)
            .await?;
        self.wait_committed(cancel, &tx, "subnet creation").await?;
        log::info!("subnet creation tx ({}) accepted", tx);

        // Confirm the created subnet appears in the subnet list under the
        // identity this deployment expects. Any listed subnet with a
        // different id means the cluster was already populated or started
        // from the wrong genesis.
        let expected = &self.config.expected_subnet;
        let subnets = self.rpc.subnets(url).await?;
        if subnets.is_empty() {
            return Err(Error::MissingSubnet(expected.clone()));
        }
        if let Some(observed) = subnets.into_iter().find(|subnet| subnet != expected) {
            return Err(Error::SubnetMismatch { expected: expected.clone(), observed });
        }

        Ok(expected.clone())
    }

    /// Registers every cluster node as a validator of `subnet`, one at a
    /// time. Serialized on purpose: each registration spends from the same
    /// funded address, and interleaving them races on transaction ordering.
    async fn register_validators(&self, cancel: &CancellationToken, subnet: &SubnetId) -> Result<()> {
        for node in self.cluster.node_ids() {
            let registration = ValidatorRegistration::new(
                node.clone(),
                subnet.clone(),
                self.config.validator_weight,
                Utc::now(),
                self.config.validator_start_offset,
                self.config.validator_end_offset,
            );

            let tx = self
                .rpc
                .add_subnet_validator(self.cluster.primary(), &self.config.credentials, &registration)
                .await?;
            self.wait_committed(cancel, &tx, &format!("add subnet validator ({})", node)).await?;
            log::info!("add subnet validator ({}) tx ({}) accepted", node, tx);
        }

        Ok(())
    }

    /// Deploys the VM onto the subnet from the genesis payload and returns
    /// the chain id the cluster assigned to the new blockchain. The chain
    /// id is discovered by listing, it is not the same as the VM id.
    async fn deploy_vm(&self, cancel: &CancellationToken, subnet: &SubnetId, vm: &VmId, genesis_path: &Path) -> Result<ChainId> {
        let genesis = tokio::fs::read(genesis_path)
            .await
            .map_err(|e| Error::Genesis { path: genesis_path.display().to_string(), source: e })?;

        let url = self.cluster.primary();
        let tx = self
            .rpc
            .create_blockchain(url, &self.config.credentials, subnet, vm, &self.config.vm_name, &genesis)
            .await?;
        self.wait_committed(cancel, &tx, "create blockchain").await?;
        log::info!("create blockchain tx ({}) accepted", tx);

        let chains = self.rpc.blockchains(url).await?;
        chains
            .into_iter()
            .find(|chain| &chain.subnet == subnet)
            .map(|chain| chain.id)
            .ok_or_else(|| Error::MissingBlockchain(subnet.clone()))
    }

    /// Waits until every node reports the chain as validating, then until
    /// every node reports it bootstrapped. Per-node and sequential: total
    /// wall clock scales with cluster size, which is single digits here.
    async fn await_convergence(&self, cancel: &CancellationToken, chain: &ChainId) -> Result<()> {
        let rpc = &self.rpc;

        for (node, url) in self.cluster.node_ids().iter().zip(self.cluster.endpoints()) {
            poll::wait_for(cancel, self.config.long_wait_time, || async move {
                match rpc.chain_status(url, chain).await {
                    Ok(status) if status.is_validating() => Ok(Probe::Ready(())),
                    Ok(_) => Ok(Probe::Pending(format!("waiting for validating status for {}", node))),
                    Err(e) => {
                        log::debug!("blockchain status query on {} failed, retrying: {}", url, e);
                        Ok(Probe::Pending(format!("waiting for validating status for {}", node)))
                    }
                }
            })
            .await?;
            log::info!("{} validating blockchain {}", node, chain);
        }

        for (node, url) in self.cluster.node_ids().iter().zip(self.cluster.endpoints()) {
            poll::wait_for(cancel, self.config.wait_time, || async move {
                match rpc.is_bootstrapped(url, chain).await {
                    Ok(true) => Ok(Probe::Ready(())),
                    Ok(false) => Ok(Probe::Pending(format!("waiting for {} to bootstrap {}", node, chain))),
                    Err(e) => {
                        log::debug!("bootstrap status query on {} failed, retrying: {}", url, e);
                        Ok(Probe::Pending(format!("waiting for {} to bootstrap {}", node, chain)))
                    }
                }
            })
            .await?;
            log::info!("{} bootstrapped {}", node, chain);
        }

        Ok(())
    }

    /// Polls a submitted transaction until the cluster reports it
    /// committed. An aborted transaction is fatal; a failed status query
    /// is not, the next interval simply probes again.
    async fn wait_committed(&self, cancel: &CancellationToken, tx: &TxId, what: &str) -> Result<()> {
        let rpc = &self.rpc;
        let url = self.cluster.primary();

        poll::wait_for(cancel, self.config.wait_time, || async move {
            match rpc.tx_status(url, tx).await {
                Ok(TxStatus::Committed) => Ok(Probe::Ready(())),
                Ok(TxStatus::Aborted) => Err(Error::Aborted { tx: tx.clone() }),
                Ok(_) => Ok(Probe::Pending(format!("waiting for {} tx ({}) to be accepted", what, tx))),
                Err(e) => {
                    log::debug!("tx status query failed, retrying: {}", e);
                    Ok(Probe::Pending(format!("waiting for {} tx ({}) to be accepted", what, tx)))
                }
            }
        })
        .await
    }
}
