use std::time::Duration;

use lazy_static::lazy_static;

// Deployment constants for the compiled-in local test network. The subnet
// id below is the id the five-node local genesis deterministically assigns
// to the first created subnet; bootstrap fails loudly if the cluster
// reports anything else.
pub const EXPECTED_SUBNET_ID: &str = "BKBZ6xXTnT86B4L5fp8rvtcmNSpvtNz8En9jG61ywV2uWyeHy";

/// Display name the deployed VM is registered under.
pub const VM_NAME: &str = "custom vm";

/// Pre-funded key baked into the local test genesis. Worthless outside of
/// throwaway test networks.
pub const FUNDED_KEY: &str = "ewoqjP7PxY4yr3iLTpLisriqt94hdyDFNgchSxGGztUrTXtNN";

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const BASE_HTTP_PORT: u16 = 9650;
pub const HTTP_PORT_STRIDE: u16 = 2;
pub const NUM_NODES: usize = 5;

lazy_static! {
    /// Stable identities of the five local staking keys, in node order.
    pub static ref LOCAL_NODE_IDS: Vec<&'static str> = vec![
        "NodeID-7Xhw2mDxuDS44j42TCB6U5579esbSt3Lg",
        "NodeID-MFrZFVCXPv5iCn6M9K6XduxGTYp891xXZ",
        "NodeID-NFBbbJ4qCmNaCzeW7sxErhvWqvEQMnYcN",
        "NodeID-GWPcbFJZFfZreETSoWjPimr846mXEKCtu",
        "NodeID-P7oB2McjBGgW2NXXWVYjV8JEDFoW9xDE5",
    ];
}
