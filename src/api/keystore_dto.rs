use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone)]
pub struct CreateUserArgs {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SuccessReply {
    pub success: bool,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ImportKeyArgs {
    pub username: String,
    pub password: String,
    pub private_key: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ImportKeyReply {
    pub address: String,
}
