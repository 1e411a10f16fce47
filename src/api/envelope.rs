use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// JSON-RPC 2.0 request envelope.
#[derive(Serialize, Debug)]
pub struct RpcRequest<P> {
    pub jsonrpc: &'static str,
    pub id: u32,
    pub method: String,
    pub params: P,
}

impl<P> RpcRequest<P> {
    pub fn new(id: u32, method: impl Into<String>, params: P) -> Self {
        RpcRequest { jsonrpc: "2.0", id, method: method.into(), params }
    }
}

/// JSON-RPC 2.0 response envelope. Exactly one of `result`/`error` is set.
#[derive(Deserialize, Debug)]
pub struct RpcResponse<R> {
    pub result: Option<R>,
    pub error: Option<RpcError>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl<R> RpcResponse<R> {
    /// An explicit error object means the cluster refused the request,
    /// which is a rejection, not a transport failure.
    pub fn into_result(self, op: &'static str) -> Result<R> {
        if let Some(e) = self.error {
            return Err(Error::Rejected { op, reason: format!("{} (code {})", e.message, e.code) });
        }
        self.result.ok_or(Error::Rejected { op, reason: "response carried neither result nor error".to_string() })
    }
}
