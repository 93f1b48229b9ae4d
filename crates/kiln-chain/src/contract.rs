//! Contract traits — the typed replacement for name-keyed factory lookup.
//!
//! A contract is an ordinary Rust state machine. [`ContractState`] is the
//! dynamic call surface the node stores and dispatches against;
//! [`ContractType`] adds the static pieces a deployment needs (name,
//! constructor argument type, constructor). Deployment is
//! `node.deploy::<C>(args, from)` — the contract is named by its type, so
//! there is no runtime string lookup to get a factory.

use serde_json::Value;

/// A contract-level failure: unknown method, bad arguments, or a
/// constructor that refuses its input.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{reason}")]
pub struct Revert {
    pub reason: String,
}

impl Revert {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn unknown_method(method: &str) -> Self {
        Self::new(format!("unknown method '{method}'"))
    }
}

/// Dynamic call surface of a deployed contract instance.
///
/// The node owns one boxed `ContractState` per deployed address and routes
/// every invocation through it. Arguments and return values are
/// [`serde_json::Value`]s, the stand-in for ABI-encoded calldata.
pub trait ContractState: Send + 'static {
    /// Pure read. Must not mutate state.
    fn call(&self, method: &str, args: &[Value]) -> Result<Value, Revert>;

    /// Mutating invocation, executed inside a transaction.
    fn send(&mut self, method: &str, args: &[Value]) -> Result<Value, Revert>;
}

/// Static description of a deployable contract.
pub trait ContractType: ContractState + Sized {
    /// Contract name used in receipts and error messages.
    const NAME: &'static str;

    /// Constructor argument type.
    type InitArgs: Send + 'static;

    /// Run the constructor. A `Revert` here surfaces to the deployer as
    /// [`ChainError::Deploy`](crate::ChainError::Deploy).
    fn construct(args: Self::InitArgs) -> Result<Self, Revert>;
}
