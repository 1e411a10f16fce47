use serde::Deserialize;
use std::fmt;

/// Observed state of a submitted operation. Everything that is neither
/// committed nor aborted keeps the confirmation poll alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TxStatus {
    #[serde(alias = "Processing")]
    Pending,
    Committed,
    #[serde(alias = "Dropped")]
    Aborted,
    #[serde(other)]
    Unknown,
}

impl TxStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Committed | TxStatus::Aborted)
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxStatus::Pending => "Pending",
            TxStatus::Committed => "Committed",
            TxStatus::Aborted => "Aborted",
            TxStatus::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Per-node view of a deployed chain. A node reports `Validating` once it
/// participates in consensus for the chain; every earlier phase (created,
/// preferred, syncing) counts as not validating yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ChainStatus {
    Validating,
    #[serde(other)]
    NotValidating,
}

impl ChainStatus {
    pub fn is_validating(&self) -> bool {
        matches!(self, ChainStatus::Validating)
    }
}
