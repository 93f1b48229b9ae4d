use clap::{Parser, Subcommand};
use kiln_core::config::{NetworkProfile, ProjectConfig, Secrets};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kiln", about = "kiln — lightweight smart-contract development harness")]
struct Cli {
    /// Write debug logs to /tmp/kiln-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Path to the project configuration file.
    #[arg(long, default_value = "kiln.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the project configuration and report network usability.
    Check,
    /// Print the derived accounts for an in-memory network profile.
    Accounts {
        #[arg(long, default_value = "local")]
        network: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/kiln-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("kiln debug log started — tail -f /tmp/kiln-debug.log");
    }

    let config = ProjectConfig::load(&cli.config)?;
    let secrets = Secrets::load_or_default(&secrets_path(&cli.config));

    match cli.command {
        Command::Check => check(&config, &secrets),
        Command::Accounts { network } => accounts(&config, &network),
    }
}

/// secrets.toml sits next to the project config file.
fn secrets_path(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("secrets.toml")
}

fn check(config: &ProjectConfig, secrets: &Secrets) -> anyhow::Result<()> {
    println!(
        "solc {} (optimizer: {}, runs: {})",
        config.solc.version,
        if config.solc.optimizer.enabled { "on" } else { "off" },
        config.solc.optimizer.runs
    );
    println!("sources: {}", config.paths.sources.display());
    println!();

    let mut names: Vec<&String> = config.networks.keys().collect();
    names.sort();
    for name in names {
        println!("{}", profile_line(name, &config.networks[name], secrets));
    }
    Ok(())
}

/// One report line per network profile: chain id, both gas policies,
/// endpoint, and usability with the available secrets.
fn profile_line(name: &str, profile: &NetworkProfile, secrets: &Secrets) -> String {
    let endpoint = profile.url.as_deref().unwrap_or("in-memory");
    let usable = if profile.is_usable(secrets) {
        "usable"
    } else {
        "unusable (no funding account or secrets)"
    };
    format!(
        "{name:12} chain {:<8} gas {:<12} gas_price {:<16} {endpoint}  [{usable}]",
        profile.chain_id.to_string(),
        profile.gas.to_string(),
        profile.gas_price.to_string(),
    )
}

fn accounts(config: &ProjectConfig, network: &str) -> anyhow::Result<()> {
    let profile = config
        .network(network)
        .ok_or_else(|| anyhow::anyhow!("unknown network '{network}'"))?;
    if !profile.is_local() {
        anyhow::bail!("accounts can only be derived for in-memory profiles; '{network}' is remote");
    }

    let mnemonic = profile
        .mnemonic
        .as_deref()
        .unwrap_or(kiln_chain::DEV_MNEMONIC);

    // Invert the named-accounts map so roles annotate their index.
    let roles: Vec<(u32, &str)> = config
        .named_accounts
        .iter()
        .map(|(role, index)| (*index, role.as_str()))
        .collect();

    for index in 0..profile.accounts {
        let address = kiln_chain::node::derive_account(mnemonic, index);
        let role = roles
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, role)| format!("  ({role})"))
            .unwrap_or_default();
        println!("[{index}] {address}{role}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{GasPolicy, Wei};

    #[test]
    fn profile_line_reports_both_gas_policies() {
        let config = ProjectConfig::defaults();
        let secrets = Secrets::default();

        let local = config.network("local").unwrap();
        let line = profile_line("local", local, &secrets);
        assert!(line.contains("gas auto"));
        assert!(line.contains("gas_price auto"));
        assert!(line.contains("in-memory"));
        assert!(line.ends_with("[usable]"));

        let mut mainnet = local.clone();
        mainnet.url = Some("https://rpc.example.com".to_string());
        mainnet.gas_price = GasPolicy::Fixed(Wei(84_000_000_100));
        let line = profile_line("mainnet", &mainnet, &secrets);
        assert!(line.contains("gas auto"));
        assert!(line.contains("gas_price 84000000100 wei"));
        assert!(line.contains("unusable"));
    }
}
