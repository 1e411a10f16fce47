use serde::{Deserialize, Serialize};

use crate::domain::ids::ChainId;

#[derive(Serialize, Debug, Clone)]
pub struct IsBootstrappedArgs {
    pub chain: ChainId,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IsBootstrappedReply {
    pub is_bootstrapped: bool,
}
