//! kiln — lightweight smart-contract development harness.
//!
//! A minimal scaffold for contract development: project configuration
//! (networks, named accounts, compiler pin, secrets), an embedded in-memory
//! dev chain, typed contract bindings, and a memoizing fixture factory for
//! tests. This crate re-exports the member crates' surface so integration
//! harnesses and downstream tools can import everything via `kiln::`.
//!
//! # Architecture
//!
//! ```text
//! kiln.toml + secrets.toml ──► ProjectConfig / Secrets
//!                                    │
//! Genesis ──► dev node task ◄── NodeHandle ◄── Greeter binding ◄── Fixtures
//! ```
//!
//! All communication with the node uses `tokio` channels; the node task
//! serializes every transaction.

pub use kiln_core::config::{NetworkProfile, ProjectConfig, Secrets};
pub use kiln_core::{Address, ChainId, GasPolicy, TxHash, Wei};

pub use kiln_chain::contracts::{Greeter, GreeterContract};
pub use kiln_chain::{
    spawn, ChainError, ContractState, ContractType, Fixtures, Genesis, NodeHandle, Revert,
    TxReceipt, DEV_MNEMONIC,
};
pub use kiln_chain::node::{derive_account, Deployed};
