//! The Greeter contract: a single greeting string behind a getter/setter.
//!
//! The constructor sets the initial greeting, `greet` returns it exactly,
//! and `setGreeting` replaces it exactly — no validation, no normalization,
//! no access control. After a successful `setGreeting(s)`, `greet()` returns
//! exactly `s`.

use crate::contract::{ContractState, ContractType, Revert};
use crate::error::ChainError;
use crate::node::{Deployed, NodeHandle, TxReceipt};
use kiln_core::Address;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Contract state machine
// ---------------------------------------------------------------------------

/// On-chain state of one Greeter instance.
#[derive(Debug, Clone)]
pub struct GreeterContract {
    greeting: String,
}

impl ContractState for GreeterContract {
    fn call(&self, method: &str, _args: &[Value]) -> Result<Value, Revert> {
        match method {
            "greet" => Ok(Value::String(self.greeting.clone())),
            _ => Err(Revert::unknown_method(method)),
        }
    }

    fn send(&mut self, method: &str, args: &[Value]) -> Result<Value, Revert> {
        match method {
            "setGreeting" => {
                let greeting = args
                    .first()
                    .and_then(Value::as_str)
                    .ok_or_else(|| Revert::new("setGreeting expects one string argument"))?;
                self.greeting = greeting.to_string();
                Ok(Value::Null)
            }
            _ => Err(Revert::unknown_method(method)),
        }
    }
}

impl ContractType for GreeterContract {
    const NAME: &'static str = "Greeter";
    type InitArgs = String;

    fn construct(greeting: String) -> Result<Self, Revert> {
        Ok(Self { greeting })
    }
}

// ---------------------------------------------------------------------------
// Typed binding
// ---------------------------------------------------------------------------

/// Typed async binding over a deployed [`GreeterContract`].
#[derive(Debug, Clone)]
pub struct Greeter {
    contract: Deployed<GreeterContract>,
}

impl Greeter {
    /// Deploy a fresh Greeter with the given initial greeting, suspending
    /// until the deployment is confirmed.
    pub async fn deploy(
        node: &NodeHandle,
        greeting: impl Into<String>,
        from: Address,
    ) -> Result<Self, ChainError> {
        let contract = node.deploy::<GreeterContract>(greeting.into(), from).await?;
        Ok(Self { contract })
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// Receipt of the deployment transaction.
    pub fn receipt(&self) -> &TxReceipt {
        self.contract.receipt()
    }

    /// Read the current greeting.
    pub async fn greet(&self) -> Result<String, ChainError> {
        let value = self.contract.call("greet", Vec::new()).await?;
        match value {
            Value::String(greeting) => Ok(greeting),
            other => Err(ChainError::Decode {
                method: "greet".to_string(),
                value: other,
            }),
        }
    }

    /// Replace the greeting, suspending until the transaction is mined.
    pub async fn set_greeting(&self, greeting: &str) -> Result<TxReceipt, ChainError> {
        self.contract
            .send("setGreeting", vec![Value::String(greeting.to_string())])
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
