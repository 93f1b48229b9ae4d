//! Fixture factory harness.
//!
//! # What this covers
//!
//! - **Memoization**: loading the same fixture twice from one `Fixtures`
//!   returns the same deployed instance — same address, no second
//!   deployment, shared state.
//! - **Isolation**: instances from two separate fixture invocations do not
//!   share state, whether they live on two nodes or side by side on one.
//! - **Failure propagation**: a failing fixture surfaces its error and is
//!   not cached.
//!
//! # What this does NOT cover
//!
//! - Greeter behavior itself (see `greeter_harness`)
//! - Receipt and gas semantics (see `node_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test fixture_harness
//! ```

#[macro_use]
mod common;
use common::*;

use kiln::{ChainError, Fixtures, Greeter, NodeHandle};

// ---------------------------------------------------------------------------
// Memoization
// ---------------------------------------------------------------------------

/// Two loads of the same fixture return the same deployed instance: the
/// address matches and the chain height shows a single deployment.
#[tokio::test]
async fn identical_fixture_loads_reuse_the_deployment() {
    within_run_timeout(async {
        let fixtures = Fixtures::new(dev_node());

        let first = fixtures.load(greeter_fixture).await.unwrap();
        let height_after_first = fixtures.node().block_number().await.unwrap();

        let second = fixtures.load(greeter_fixture).await.unwrap();
        let height_after_second = fixtures.node().block_number().await.unwrap();

        assert_eq!(first.address(), second.address());
        assert_eq!(
            height_after_first, height_after_second,
            "second load must not mine another deployment"
        );
    })
    .await;
}

/// The memoized handles point at one instance: a write through the first
/// handle is visible through the second.
#[tokio::test]
async fn memoized_handles_share_state() {
    within_run_timeout(async {
        let fixtures = Fixtures::new(dev_node());
        let first = fixtures.load(greeter_fixture).await.unwrap();
        let second = fixtures.load(greeter_fixture).await.unwrap();

        first.set_greeting(HOLA).await.unwrap();
        assert_greeting!(second, HOLA);
    })
    .await;
}

// ---------------------------------------------------------------------------
// Isolation
// ---------------------------------------------------------------------------

/// Instances from two separate fixture caches (each on its own node) do
/// not share state: setting the greeting on one leaves the other at its
/// constructor value.
#[tokio::test]
async fn separate_fixture_sets_do_not_share_state() {
    within_run_timeout(async {
        let left = Fixtures::new(dev_node());
        let right = Fixtures::new(dev_node());

        let left_greeter = left.load(greeter_fixture).await.unwrap();
        let right_greeter = right.load(greeter_fixture).await.unwrap();

        left_greeter.set_greeting(HOLA).await.unwrap();

        assert_greeting!(left_greeter, HOLA);
        assert_greeting!(right_greeter, HELLO);
    })
    .await;
}

/// Two independent deployments on one node land at distinct addresses and
/// keep independent state.
#[tokio::test]
async fn independent_deployments_on_one_node_are_isolated() {
    within_run_timeout(async {
        let node = dev_node();
        let from = deployer(&node).await;

        let first = Greeter::deploy(&node, HELLO, from).await.unwrap();
        let second = Greeter::deploy(&node, HELLO, from).await.unwrap();
        assert_ne!(first.address(), second.address());

        first.set_greeting(HOLA).await.unwrap();
        assert_greeting!(first, HOLA);
        assert_greeting!(second, HELLO);
    })
    .await;
}

// ---------------------------------------------------------------------------
// Failure propagation
// ---------------------------------------------------------------------------

async fn failing_fixture(node: NodeHandle) -> Result<Greeter, ChainError> {
    let from = deployer(&node).await;
    node.deploy::<FailingConstructor>((), from).await?;
    unreachable!("the constructor always reverts");
}

/// A fixture whose deployment reverts surfaces the error on every load —
/// failures are not memoized.
#[tokio::test]
async fn failing_fixture_is_not_cached() {
    within_run_timeout(async {
        let fixtures = Fixtures::new(dev_node());

        let first = fixtures.load(failing_fixture).await;
        assert_reverts!(first, "constructor always reverts");

        let second = fixtures.load(failing_fixture).await;
        assert_reverts!(second, "constructor always reverts");
    })
    .await;
}
