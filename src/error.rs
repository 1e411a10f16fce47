use thiserror::Error;

use crate::domain::ids::{SubnetId, TxId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("RPC transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{op} rejected by the network: {reason}")]
    Rejected { op: &'static str, reason: String },

    #[error("operation {tx} aborted by the network")]
    Aborted { tx: TxId },

    #[error("expected subnet {expected} but got {observed}")]
    SubnetMismatch { expected: SubnetId, observed: SubnetId },

    #[error("subnet {0} not visible in the cluster's subnet listing")]
    MissingSubnet(SubnetId),

    #[error("no blockchain found for subnet {0}")]
    MissingBlockchain(SubnetId),

    #[error("could not read genesis file '{path}': {source}")]
    Genesis { path: String, source: std::io::Error },

    #[error("bootstrap cancelled")]
    Cancelled,

    #[error("invalid cluster topology: {0}")]
    Topology(String),

    #[error("file not found or could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode RPC response: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is a deliberate caller-initiated abort rather
    /// than a cluster-side failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
