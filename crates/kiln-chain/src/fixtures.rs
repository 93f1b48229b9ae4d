//! Memoizing fixture factory for contract deployments.
//!
//! A fixture is an async function that stands up a ready-to-use deployment
//! against a node. [`Fixtures::load`] runs it once and memoizes the result
//! by the fixture's type, so repeated loads of the same fixture within one
//! [`Fixtures`] return the same deployed instance instead of redeploying.
//! Two separate `Fixtures` values never share a cache; dropping the
//! `Fixtures` together with its node is the harness's reset.
//!
//! The factory allocates chain resources (accounts, transactions, contract
//! storage) but never reclaims them — that is the surrounding harness's job.

use crate::error::ChainError;
use crate::node::NodeHandle;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::Mutex;

/// Per-test fixture cache bound to one node.
pub struct Fixtures {
    node: NodeHandle,
    cache: Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl Fixtures {
    pub fn new(node: NodeHandle) -> Self {
        Self {
            node,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn node(&self) -> &NodeHandle {
        &self.node
    }

    /// Run `fixture` against the node, memoized by the fixture's type.
    ///
    /// The first load deploys; subsequent loads of the same fixture function
    /// return a clone of the cached result without touching the chain.
    /// Failures are not cached — a failed fixture is re-attempted on the
    /// next load.
    pub async fn load<F, Fut, T>(&self, fixture: F) -> Result<T, ChainError>
    where
        F: FnOnce(NodeHandle) -> Fut + 'static,
        Fut: Future<Output = Result<T, ChainError>>,
        T: Clone + Send + Sync + 'static,
    {
        let key = TypeId::of::<F>();
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.get(&key).and_then(|hit| hit.downcast_ref::<T>()) {
            return Ok(cached.clone());
        }

        let value = fixture(self.node.clone()).await?;
        cache.insert(key, Box::new(value.clone()));
        Ok(value)
    }
}
