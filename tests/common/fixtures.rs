//! Shared fixtures: node setup, the canonical Greeter deployment, and the
//! whole-run timeout wrapper.

use kiln::{Address, ChainError, Genesis, Greeter, NodeHandle, ProjectConfig};
use std::time::Duration;

/// The constructor argument used by the canonical Greeter fixture.
pub const HELLO: &str = "Hello, world!";
/// The replacement greeting used by the concrete scenario.
pub const HOLA: &str = "Hola, mundo!";

/// Spawn a fresh dev node with the default genesis (dev mnemonic, ten
/// funded accounts, chain id 31337).
pub fn dev_node() -> NodeHandle {
    kiln::spawn(Genesis::default())
}

/// Resolve the configured `deployer` named account against `node`.
pub async fn deployer(node: &NodeHandle) -> Address {
    let index = ProjectConfig::defaults()
        .named_account("deployer")
        .expect("default config names a deployer") as usize;
    node.accounts().await.expect("node must answer")[index]
}

/// The canonical Greeter fixture: deploys with `"Hello, world!"` from the
/// deployer account. Pass this to [`kiln::Fixtures::load`]; repeated loads
/// within one `Fixtures` reuse the same deployed instance.
pub async fn greeter_fixture(node: NodeHandle) -> Result<Greeter, ChainError> {
    let from = deployer(&node).await;
    Greeter::deploy(&node, HELLO, from).await
}

/// Run `fut` under the configured whole-run timeout (60 s by default).
/// The budget covers a whole test, not each operation.
pub async fn within_run_timeout<F: std::future::Future>(fut: F) -> F::Output {
    let budget = Duration::from_millis(ProjectConfig::defaults().test.timeout_ms);
    tokio::time::timeout(budget, fut)
        .await
        .expect("test exceeded the configured run timeout")
}
