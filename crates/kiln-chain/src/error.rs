//! Error types for the development chain.

use kiln_core::Address;

/// Failure modes of dev-node operations.
///
/// Every operation is attempt-once: nothing in kiln retries a failed
/// deployment or transaction.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The constructor reverted; nothing was deployed.
    #[error("deployment of {contract} reverted: {reason}")]
    Deploy {
        contract: &'static str,
        reason: String,
    },

    /// A mutating or view invocation reverted.
    #[error("{method} on {address} reverted: {reason}")]
    Revert {
        address: Address,
        method: String,
        reason: String,
    },

    /// No contract is deployed at the given address.
    #[error("no contract deployed at {0}")]
    UnknownContract(Address),

    /// The sending account is not part of the node's genesis account list.
    #[error("unknown account {0}")]
    UnknownAccount(Address),

    /// A typed binding could not decode a contract's return value.
    #[error("could not decode return value of {method}: {value}")]
    Decode {
        method: String,
        value: serde_json::Value,
    },

    /// The node task is no longer running.
    #[error("dev node is no longer running")]
    NodeGone,
}
