//! Project configuration for kiln.
//!
//! [`ProjectConfig::load`] reads a `kiln.toml` layered on top of hardcoded
//! defaults. [`ProjectConfig::defaults`] returns the same defaults without
//! touching the filesystem (useful in tests). [`Secrets::load_or_default`]
//! reads an optional `secrets.toml` and degrades to empty-string defaults
//! when the file is missing or unreadable — a missing secrets file never
//! aborts configuration loading, it only makes remote profiles unusable.

use crate::types::{ChainId, GasPolicy};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[solc]
version = "0.8.3"

[solc.optimizer]
enabled = true
runs    = 200

[paths]
sources = "./contracts"

[named_accounts]
deployer = 1

[test]
timeout_ms = 60000

[networks.local]
chain_id = 31337
accounts = 10
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level project configuration, loaded from `kiln.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub solc: SolcConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    /// Logical role name (e.g. `"deployer"`) to account index.
    #[serde(default = "default_named_accounts")]
    pub named_accounts: HashMap<String, u32>,
    #[serde(default)]
    pub networks: HashMap<String, NetworkProfile>,
    #[serde(default)]
    pub test: TestConfig,

    // Pass-through reporting integrations. kiln owns no logic for these;
    // they are handed verbatim to the external tools that consume them.
    #[serde(default)]
    pub gas_reporter: Option<GasReporterConfig>,
    #[serde(default)]
    pub etherscan: Option<EtherscanConfig>,
    #[serde(default)]
    pub contract_sizer: Option<ContractSizerConfig>,
    #[serde(default)]
    pub spdx: Option<SpdxConfig>,
    #[serde(default)]
    pub docgen: Option<DocgenConfig>,
    #[serde(default)]
    pub bindings: Option<BindingsConfig>,
}

/// `[solc]` section: one compiler pin and optimizer setting for all sources.
#[derive(Debug, Clone, Deserialize)]
pub struct SolcConfig {
    #[serde(default = "default_solc_version")]
    pub version: String,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

/// `[solc.optimizer]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default = "default_optimizer_enabled")]
    pub enabled: bool,
    #[serde(default = "default_optimizer_runs")]
    pub runs: u32,
}

/// `[paths]` section: the single root scanned for contract sources.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_sources")]
    pub sources: PathBuf,
}

/// `[test]` section: one timeout budget for a whole test run, not per
/// operation.
#[derive(Debug, Clone, Deserialize)]
pub struct TestConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// `[networks.<name>]` section: one named network profile.
///
/// A profile without a `url` is the in-memory dev chain; it never needs
/// secrets. Remote profiles need a funding account, supplied either inline
/// (`from` / `mnemonic`) or via `secrets.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkProfile {
    /// JSON-RPC HTTPS endpoint. `None` means the in-memory dev chain.
    #[serde(default)]
    pub url: Option<String>,
    pub chain_id: ChainId,
    /// Explicit funding account, overriding the secrets file.
    #[serde(default)]
    pub from: Option<String>,
    /// Mnemonic deriving the profile's accounts, overriding the secrets file.
    #[serde(default)]
    pub mnemonic: Option<String>,
    #[serde(default)]
    pub gas: GasPolicy,
    #[serde(default)]
    pub gas_price: GasPolicy,
    /// Number of funded accounts a dev chain starts with.
    #[serde(default = "default_accounts")]
    pub accounts: u32,
}

impl NetworkProfile {
    /// `true` for the in-memory dev chain (no JSON-RPC endpoint).
    pub fn is_local(&self) -> bool {
        self.url.is_none()
    }

    /// Whether this profile can be used with the available secrets.
    ///
    /// Local profiles are always usable. A remote profile needs a funding
    /// account from somewhere: an inline `from` or `mnemonic`, or a
    /// non-empty secrets file.
    pub fn is_usable(&self, secrets: &Secrets) -> bool {
        self.is_local()
            || self.from.is_some()
            || self.mnemonic.is_some()
            || !secrets.account.is_empty()
            || !secrets.mnemonic.is_empty()
    }
}

/// `[gas_reporter]` pass-through: gas cost reporting against a
/// currency-conversion API.
#[derive(Debug, Clone, Deserialize)]
pub struct GasReporterConfig {
    pub currency: String,
    #[serde(default)]
    pub coinmarketcap_key: Option<String>,
}

/// `[etherscan]` pass-through: block-explorer verification credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct EtherscanConfig {
    pub api_key: String,
}

/// `[contract_sizer]` pass-through: compiled contract size reporting.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractSizerConfig {
    #[serde(default)]
    pub run_on_compile: bool,
}

/// `[spdx]` pass-through: license-header injection.
#[derive(Debug, Clone, Deserialize)]
pub struct SpdxConfig {
    #[serde(default)]
    pub run_on_compile: bool,
}

/// `[docgen]` pass-through: documentation generation.
#[derive(Debug, Clone, Deserialize)]
pub struct DocgenConfig {
    #[serde(default)]
    pub clear: bool,
    #[serde(default)]
    pub run_on_compile: bool,
}

/// `[bindings]` pass-through: type-binding generation target.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingsConfig {
    pub target: String,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_solc_version() -> String {
    "0.8.3".to_string()
}
fn default_optimizer_enabled() -> bool {
    true
}
fn default_optimizer_runs() -> u32 {
    200
}
fn default_sources() -> PathBuf {
    PathBuf::from("./contracts")
}
fn default_timeout_ms() -> u64 {
    60_000
}
fn default_accounts() -> u32 {
    10
}
fn default_named_accounts() -> HashMap<String, u32> {
    HashMap::from([("deployer".to_string(), 1)])
}

impl Default for SolcConfig {
    fn default() -> Self {
        Self {
            version: default_solc_version(),
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: default_optimizer_enabled(),
            runs: default_optimizer_runs(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl ProjectConfig {
    /// Load from `path`, layered on top of the built-in defaults. A missing
    /// file yields the defaults; a malformed file is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Look up a network profile by name.
    pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
        self.networks.get(name)
    }

    /// Resolve a logical role name to its account index.
    pub fn named_account(&self, role: &str) -> Option<u32> {
        self.named_accounts.get(role).copied()
    }
}

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

/// Deployment account and mnemonic from an optional local `secrets.toml`.
///
/// Both fields default to empty strings when the file is absent; nothing in
/// kiln crashes on missing secrets, but remote network profiles that depend
/// on them become unusable (see [`NetworkProfile::is_usable`]).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub mnemonic: String,
}

impl Secrets {
    /// Load from `path`, substituting empty defaults if the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .build()
            .and_then(|raw| raw.try_deserialize())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
