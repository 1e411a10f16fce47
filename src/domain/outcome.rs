use std::fmt;

use crate::domain::ids::{ChainId, NodeId, VmId};

/// One per cluster node after a successful bootstrap: where the deployed
/// VM is now reachable on that node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmEndpoint {
    pub node: NodeId,
    pub url: String,
    pub service_path: String,
    pub vm: VmId,
}

impl VmEndpoint {
    pub fn new(node: NodeId, url: impl Into<String>, chain: &ChainId, vm: VmId) -> Self {
        VmEndpoint { node, url: url.into(), service_path: format!("/ext/bc/{}", chain), vm }
    }

    /// Full URL at which the VM answers on this node.
    pub fn service_url(&self) -> String {
        format!("{}{}", self.url, self.service_path)
    }
}

impl fmt::Display for VmEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.node, self.service_url())
    }
}
