use serde::{Deserialize, Serialize};

use crate::domain::ids::{ChainId, SubnetId, TxId, VmId};
use crate::domain::status::{ChainStatus, TxStatus};

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubnetArgs {
    pub username: String,
    pub password: String,
    pub control_keys: Vec<String>,
    pub threshold: u32,
}

/// Reply shape shared by every mutating platform call.
#[derive(Deserialize, Debug, Clone)]
pub struct TxReply {
    #[serde(rename = "txID")]
    pub tx_id: TxId,
}

#[derive(Serialize, Debug, Clone)]
pub struct GetTxStatusArgs {
    #[serde(rename = "txID")]
    pub tx_id: TxId,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TxStatusReply {
    pub status: TxStatus,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct GetSubnetsArgs {
    pub ids: Vec<SubnetId>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GetSubnetsReply {
    pub subnets: Vec<SubnetDto>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubnetDto {
    pub id: SubnetId,
    #[serde(default)]
    pub control_keys: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddSubnetValidatorArgs {
    pub username: String,
    pub password: String,
    #[serde(rename = "subnetID")]
    pub subnet_id: SubnetId,
    #[serde(rename = "nodeID")]
    pub node_id: String,
    pub weight: u64,
    pub start_time: u64,
    pub end_time: u64,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockchainArgs {
    pub username: String,
    pub password: String,
    #[serde(rename = "subnetID")]
    pub subnet_id: SubnetId,
    #[serde(rename = "vmID")]
    pub vm_id: VmId,
    pub name: String,
    pub genesis_data: String,
    pub encoding: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GetBlockchainsReply {
    pub blockchains: Vec<BlockchainDto>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainDto {
    pub id: ChainId,
    pub name: String,
    #[serde(rename = "subnetID")]
    pub subnet_id: SubnetId,
    #[serde(rename = "vmID")]
    pub vm_id: VmId,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GetBlockchainStatusArgs {
    #[serde(rename = "blockchainID")]
    pub blockchain_id: ChainId,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GetBlockchainStatusReply {
    pub status: ChainStatus,
}

#[derive(Serialize, Debug, Clone)]
pub struct GetBalanceArgs {
    pub addresses: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GetBalanceReply {
    /// Serialized as a decimal string on the wire.
    pub balance: String,
}
