//! kiln-chain — the embedded development chain.
//!
//! This crate provides the test backend contracts are deployed against: a
//! single background task owning all chain state, typed contract bindings,
//! and the memoizing fixture factory used by test harnesses.
//!
//! # Architecture
//!
//! ```text
//! Genesis ──► DevNode task (owns all chain state)
//!                 ▲
//!                 │ tokio mpsc + oneshot
//!                 │
//!            NodeHandle ◄── typed bindings (Greeter) ◄── Fixtures
//! ```
//!
//! All communication with the node uses `tokio` channels. The node task
//! serializes every transaction, so a caller that awaits `deploy` or `send`
//! is suspended until its transaction is confirmed and no two transactions
//! ever interleave.

pub mod contract;
pub mod contracts;
pub mod error;
pub mod fixtures;
pub mod node;

pub use contract::{ContractState, ContractType, Revert};
pub use error::ChainError;
pub use fixtures::Fixtures;
pub use node::{spawn, Deployed, Genesis, NodeHandle, TxReceipt, DEV_MNEMONIC};
