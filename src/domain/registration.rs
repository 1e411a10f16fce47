use chrono::{DateTime, Duration, Utc};

use crate::domain::ids::{NodeId, SubnetId};

/// Binds one node to a subnet as a validator, with a weight and a validity
/// window anchored at issue time. The window must open strictly after the
/// issuing instant so the network never rejects it as already started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorRegistration {
    pub node: NodeId,
    pub subnet: SubnetId,
    pub weight: u64,
    /// Unix seconds at which the node becomes an active validator.
    pub start_time: u64,
    /// Unix seconds at which the registration expires.
    pub end_time: u64,
}

impl ValidatorRegistration {
    /// Computes the validity window relative to `issued_at`.
    pub fn new(
        node: NodeId,
        subnet: SubnetId,
        weight: u64,
        issued_at: DateTime<Utc>,
        start_offset: Duration,
        end_offset: Duration,
    ) -> Self {
        ValidatorRegistration {
            node,
            subnet,
            weight,
            start_time: (issued_at + start_offset).timestamp() as u64,
            end_time: (issued_at + end_offset).timestamp() as u64,
        }
    }
}
