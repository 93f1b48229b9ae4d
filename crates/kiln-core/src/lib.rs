//! kiln-core — shared chain types and project configuration.
//!
//! This crate holds the types every other layer speaks in ([`Address`],
//! [`Wei`], [`ChainId`], [`TxHash`], [`GasPolicy`]) plus the project
//! configuration loaded from `kiln.toml` and the optional `secrets.toml`.
//!
//! Configuration loading is an explicit function invoked once at startup;
//! the result is passed to whatever consumes it. There is no ambient global
//! configuration state anywhere in kiln.

pub mod config;
pub mod types;

pub use types::{Address, ChainId, GasPolicy, TxHash, Wei};
