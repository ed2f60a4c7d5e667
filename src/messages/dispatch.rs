//! Dispatch messages - communication between App and Dispatch layers

use crate::compiler::RequestConfig;

/// Commands sent from App layer to Dispatch layer
#[derive(Debug, Clone)]
pub enum DispatchCommand {
    /// Hand a compiled configuration to the (simulated) external client
    Dispatch { id: u64, config: RequestConfig },
    /// Shutdown the dispatch actor
    Shutdown,
}

/// Responses sent from Dispatch layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResponse {
    Completed { id: u64, elapsed_ms: u64 },
}

impl DispatchResponse {
    pub fn id(&self) -> u64 {
        match self {
            DispatchResponse::Completed { id, .. } => *id,
        }
    }
}
