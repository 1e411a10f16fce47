use crate::constants;
use crate::domain::ids::NodeId;
use crate::error::{Error, Result};

/// Static description of the running test network: how many nodes, where
/// their RPC ports start, and which identities they carry.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub host: String,
    pub base_http_port: u16,
    pub http_port_stride: u16,
    pub node_ids: Vec<NodeId>,
}

impl NetworkConfig {
    /// The compiled-in five-node local topology.
    pub fn local() -> Self {
        NetworkConfig {
            host: "127.0.0.1".to_string(),
            base_http_port: constants::BASE_HTTP_PORT,
            http_port_stride: constants::HTTP_PORT_STRIDE,
            node_ids: constants::LOCAL_NODE_IDS.iter().map(|id| NodeId::new(*id)).collect(),
        }
    }
}

/// Handle onto the already-running cluster: the ordered, immutable sets of
/// RPC endpoints and node identities, one-to-one in the same order.
#[derive(Debug, Clone)]
pub struct Cluster {
    endpoints: Vec<String>,
    node_ids: Vec<NodeId>,
}

impl Cluster {
    pub fn new(config: NetworkConfig) -> Result<Self> {
        if config.node_ids.is_empty() {
            return Err(Error::Topology("cluster needs at least one node".to_string()));
        }

        let endpoints = (0..config.node_ids.len())
            .map(|i| format!("http://{}:{}", config.host, config.base_http_port + (i as u16) * config.http_port_stride))
            .collect();

        Ok(Cluster { endpoints, node_ids: config.node_ids })
    }

    /// Builds a handle from explicit endpoint/identity lists.
    pub fn from_parts(endpoints: Vec<String>, node_ids: Vec<NodeId>) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(Error::Topology("cluster needs at least one node".to_string()));
        }
        if endpoints.len() != node_ids.len() {
            return Err(Error::Topology(format!("{} endpoints but {} node ids", endpoints.len(), node_ids.len())));
        }
        Ok(Cluster { endpoints, node_ids })
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// The node every mutating request is issued against.
    pub fn primary(&self) -> &str {
        &self.endpoints[0]
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
