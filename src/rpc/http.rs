use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::envelope::{RpcRequest, RpcResponse};
use crate::api::info_dto::{IsBootstrappedArgs, IsBootstrappedReply};
use crate::api::keystore_dto::{CreateUserArgs, ImportKeyArgs, ImportKeyReply, SuccessReply};
use crate::api::platform_dto::{
    AddSubnetValidatorArgs, CreateBlockchainArgs, CreateSubnetArgs, GetBalanceArgs, GetBalanceReply, GetBlockchainStatusArgs,
    GetBlockchainStatusReply, GetBlockchainsReply, GetSubnetsArgs, GetSubnetsReply, GetTxStatusArgs, TxReply, TxStatusReply,
};
use crate::constants::HTTP_TIMEOUT;
use crate::domain::ids::{ChainId, SubnetId, TxId, VmId};
use crate::domain::registration::ValidatorRegistration;
use crate::domain::status::{ChainStatus, TxStatus};
use crate::error::{Error, Result};
use crate::rpc::endpoint::ApiEndpoint;
use crate::rpc::{ChainListing, ClusterRpc, Credentials};

/// JSON-RPC client for a live cluster. Stateless apart from the request
/// id counter; one instance serves every node URL.
pub struct HttpRpc {
    client: reqwest::Client,
    next_id: AtomicU32,
}

impl HttpRpc {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(HttpRpc { client, next_id: AtomicU32::new(1) })
    }

    async fn call<P, R>(&self, url: &str, api: ApiEndpoint, method: &str, params: P, op: &'static str) -> Result<R>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        let request = RpcRequest::new(self.next_id.fetch_add(1, Ordering::Relaxed), method, params);
        log::debug!("POST {}{} {}", url, api.path(), request.method);

        let response = self.client.post(format!("{}{}", url, api.path())).json(&request).send().await?;
        let reply: RpcResponse<R> = response.json().await?;
        reply.into_result(op)
    }
}

#[async_trait]
impl ClusterRpc for HttpRpc {
    async fn create_user(&self, url: &str, creds: &Credentials) -> Result<()> {
        let args = CreateUserArgs { username: creds.username.clone(), password: creds.password.clone() };
        let reply: SuccessReply = self.call(url, ApiEndpoint::Keystore, "keystore.createUser", args, "createUser").await?;
        if !reply.success {
            return Err(Error::Rejected { op: "createUser", reason: "keystore reported failure".to_string() });
        }
        Ok(())
    }

    async fn import_key(&self, url: &str, creds: &Credentials, private_key: &str) -> Result<String> {
        let args = ImportKeyArgs {
            username: creds.username.clone(),
            password: creds.password.clone(),
            private_key: private_key.to_string(),
        };
        let reply: ImportKeyReply = self.call(url, ApiEndpoint::Platform, "platform.importKey", args, "importKey").await?;
        Ok(reply.address)
    }

    async fn balance(&self, url: &str, address: &str) -> Result<String> {
        let args = GetBalanceArgs { addresses: vec![address.to_string()] };
        let reply: GetBalanceReply = self.call(url, ApiEndpoint::Platform, "platform.getBalance", args, "getBalance").await?;
        Ok(reply.balance)
    }

    async fn create_subnet(&self, url: &str, creds: &Credentials, control_keys: &[String], threshold: u32) -> Result<TxId> {
        let args = CreateSubnetArgs {
            username: creds.username.clone(),
            password: creds.password.clone(),
            control_keys: control_keys.to_vec(),
            threshold,
        };
        let reply: TxReply = self.call(url, ApiEndpoint::Platform, "platform.createSubnet", args, "createSubnet").await?;
        Ok(reply.tx_id)
    }

    async fn add_subnet_validator(&self, url: &str, creds: &Credentials, registration: &ValidatorRegistration) -> Result<TxId> {
        let args = AddSubnetValidatorArgs {
            username: creds.username.clone(),
            password: creds.password.clone(),
            subnet_id: registration.subnet.clone(),
            node_id: registration.node.to_string(),
            weight: registration.weight,
            start_time: registration.start_time,
            end_time: registration.end_time,
        };
        let reply: TxReply = self.call(url, ApiEndpoint::Platform, "platform.addSubnetValidator", args, "addSubnetValidator").await?;
        Ok(reply.tx_id)
    }

    async fn create_blockchain(
        &self,
        url: &str,
        creds: &Credentials,
        subnet: &SubnetId,
        vm: &VmId,
        name: &str,
        genesis: &[u8],
    ) -> Result<TxId> {
        let args = CreateBlockchainArgs {
            username: creds.username.clone(),
            password: creds.password.clone(),
            subnet_id: subnet.clone(),
            vm_id: vm.clone(),
            name: name.to_string(),
            genesis_data: format!("0x{}", hex::encode(genesis)),
            encoding: "hex".to_string(),
        };
        let reply: TxReply = self.call(url, ApiEndpoint::Platform, "platform.createBlockchain", args, "createBlockchain").await?;
        Ok(reply.tx_id)
    }

    async fn tx_status(&self, url: &str, tx: &TxId) -> Result<TxStatus> {
        let args = GetTxStatusArgs { tx_id: tx.clone() };
        let reply: TxStatusReply = self.call(url, ApiEndpoint::Platform, "platform.getTxStatus", args, "getTxStatus").await?;
        Ok(reply.status)
    }

    async fn subnets(&self, url: &str) -> Result<Vec<SubnetId>> {
        let args = GetSubnetsArgs::default();
        let reply: GetSubnetsReply = self.call(url, ApiEndpoint::Platform, "platform.getSubnets", args, "getSubnets").await?;
        Ok(reply.subnets.into_iter().map(|s| s.id).collect())
    }

    async fn blockchains(&self, url: &str) -> Result<Vec<ChainListing>> {
        let args = serde_json::json!({});
        let reply: GetBlockchainsReply = self.call(url, ApiEndpoint::Platform, "platform.getBlockchains", args, "getBlockchains").await?;
        Ok(reply
            .blockchains
            .into_iter()
            .map(|b| ChainListing { id: b.id, name: b.name, subnet: b.subnet_id, vm: b.vm_id })
            .collect())
    }

    async fn chain_status(&self, url: &str, chain: &ChainId) -> Result<ChainStatus> {
        let args = GetBlockchainStatusArgs { blockchain_id: chain.clone() };
        let reply: GetBlockchainStatusReply =
            self.call(url, ApiEndpoint::Platform, "platform.getBlockchainStatus", args, "getBlockchainStatus").await?;
        Ok(reply.status)
    }

    async fn is_bootstrapped(&self, url: &str, chain: &ChainId) -> Result<bool> {
        let args = IsBootstrappedArgs { chain: chain.clone() };
        let reply: IsBootstrappedReply = self.call(url, ApiEndpoint::Info, "info.isBootstrapped", args, "isBootstrapped").await?;
        Ok(reply.is_bootstrapped)
    }
}
