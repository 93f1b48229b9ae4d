//! Test-support contracts exercising failure modes the built-in contracts
//! never hit.

use kiln::{ContractState, ContractType, Revert};
use serde_json::Value;

/// A contract whose constructor always reverts, for exercising
/// `ChainError::Deploy`.
pub struct FailingConstructor;

impl ContractState for FailingConstructor {
    fn call(&self, method: &str, _args: &[Value]) -> Result<Value, Revert> {
        Err(Revert::unknown_method(method))
    }

    fn send(&mut self, method: &str, _args: &[Value]) -> Result<Value, Revert> {
        Err(Revert::unknown_method(method))
    }
}

impl ContractType for FailingConstructor {
    const NAME: &'static str = "FailingConstructor";
    type InitArgs = ();

    fn construct(_args: ()) -> Result<Self, Revert> {
        Err(Revert::new("constructor always reverts"))
    }
}
