//! goodhaul daemon — entry point for running the donation-handoff service.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::Deserialize;

use goodhaul_otp::RandomIssuer;
use goodhaul_rpc::{RpcServer, ServiceState};
use goodhaul_store::DonationStore;
use goodhaul_store_memory::MemoryStore;
use goodhaul_types::HandoffParams;

#[derive(Parser)]
#[command(name = "goodhaul-daemon", about = "goodhaul donation-handoff service daemon")]
struct Cli {
    /// Port for the REST API.
    #[arg(long, env = "GOODHAUL_PORT")]
    port: Option<u16>,

    /// Seconds a handoff code stays valid.
    #[arg(long, env = "GOODHAUL_OTP_TTL_SECS")]
    otp_ttl_secs: Option<u64>,

    /// Minimum seconds between code issuances for one request.
    #[arg(long, env = "GOODHAUL_REISSUE_COOLDOWN_SECS")]
    reissue_cooldown_secs: Option<u64>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
struct DaemonConfig {
    port: u16,
    otp_ttl_secs: u64,
    reissue_cooldown_secs: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            port: 7070,
            otp_ttl_secs: HandoffParams::DEFAULT_TTL_SECS,
            reissue_cooldown_secs: HandoffParams::DEFAULT_COOLDOWN_SECS,
        }
    }
}

fn load_file_config(path: &PathBuf) -> Option<DaemonConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<DaemonConfig>(&contents) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", path.display());
                Some(cfg)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {e}, using defaults");
                None
            }
        },
        Err(e) => {
            tracing::warn!(
                "Failed to read config file {}: {e}, using defaults",
                path.display()
            );
            None
        }
    }
}

fn resolve_config(cli: &Cli) -> DaemonConfig {
    let base = cli
        .config
        .as_ref()
        .and_then(load_file_config)
        .unwrap_or_default();
    DaemonConfig {
        port: cli.port.unwrap_or(base.port),
        otp_ttl_secs: cli.otp_ttl_secs.unwrap_or(base.otp_ttl_secs),
        reissue_cooldown_secs: cli
            .reissue_cooldown_secs
            .unwrap_or(base.reissue_cooldown_secs),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    goodhaul_utils::init_tracing();

    let cli = Cli::parse();
    let config = resolve_config(&cli);

    let params = HandoffParams {
        otp_ttl_secs: config.otp_ttl_secs,
        reissue_cooldown_secs: config.reissue_cooldown_secs,
    };
    let store: Arc<dyn DonationStore> = Arc::new(MemoryStore::new());
    let issuer = Arc::new(RandomIssuer::new(params));
    let state = Arc::new(ServiceState::new(store, issuer));

    tracing::info!(
        "Starting goodhaul daemon (RPC:{}, code TTL:{}s, reissue cooldown:{}s)",
        config.port,
        params.otp_ttl_secs,
        params.reissue_cooldown_secs,
    );
    RpcServer::new(config.port).serve(state).await?;

    tracing::info!("goodhaul daemon exited cleanly");
    Ok(())
}
