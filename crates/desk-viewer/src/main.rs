//! Remote Desk viewer: command-line entry point.
//!
//! The library does the real work; this binary exposes the parts of it that
//! are useful from a terminal:
//!
//! - `signal` performs one signaling round-trip: it reads an SDP offer (from a
//!   file or stdin), POSTs it to the configured endpoint, and prints the SDP
//!   answer.  Handy for checking that a controlled machine is reachable.
//! - `show-config` prints the effective configuration (file + environment +
//!   flags) as TOML.
//!
//! # Usage
//!
//! ```text
//! desk-viewer [OPTIONS] <COMMAND>
//!
//! Commands:
//!   signal       Exchange an SDP offer for an answer
//!   show-config  Print the effective configuration as TOML
//!
//! Options:
//!   --config <PATH>          Config file [default: platform config dir]
//!   --signaling-url <URL>    Signaling endpoint
//!   --screen <N>             Remote screen index
//!   --capability <KIND>      pointer-fine | touch-primary
//!   --log-level <LEVEL>      error | warn | info | debug | trace
//! ```
//!
//! # Precedence
//!
//! Flags beat `DESK_*` environment variables, which beat the config file,
//! which beats the built-in defaults.  For logging, `RUST_LOG` beats all of
//! them.
//!
//! | Variable             | Flag               |
//! |----------------------|--------------------|
//! | `DESK_CONFIG`        | `--config`         |
//! | `DESK_SIGNALING_URL` | `--signaling-url`  |
//! | `DESK_SCREEN`        | `--screen`         |
//! | `DESK_CAPABILITY`    | `--capability`     |
//! | `DESK_LOG_LEVEL`     | `--log-level`      |

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use desk_viewer::application::SignalingClient;
use desk_viewer::domain::{InputCapability, ScreenSelector, ViewerConfig};
use desk_viewer::infrastructure::storage::config::{
    load_config, load_config_from, to_toml, ConfigError,
};
use desk_viewer::infrastructure::HttpSignalingClient;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Remote Desk viewer.
#[derive(Debug, Parser)]
#[command(
    name = "desk-viewer",
    about = "Viewer-side tools for Remote Desk sessions",
    version
)]
struct Cli {
    /// Path to a TOML config file.
    ///
    /// When omitted, the platform config directory is used; a missing file
    /// means "all defaults".
    #[arg(long, env = "DESK_CONFIG")]
    config: Option<PathBuf>,

    /// Signaling endpoint that accepts `{offer, screen}` and returns `{answer}`.
    #[arg(long, env = "DESK_SIGNALING_URL")]
    signaling_url: Option<String>,

    /// Index of the remote screen to request.
    #[arg(long, env = "DESK_SCREEN")]
    screen: Option<u32>,

    /// Local input capability: `pointer-fine` or `touch-primary`.
    #[arg(long, env = "DESK_CAPABILITY")]
    capability: Option<String>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, env = "DESK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Exchange an SDP offer for an answer and print the answer.
    Signal {
        /// File holding the offer SDP, or `-` for stdin.
        #[arg(long, default_value = "-")]
        offer_file: String,
    },
    /// Print the effective configuration as TOML.
    ShowConfig,
}

impl Cli {
    /// Loads the base configuration from `--config` or the platform default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load_base_config(&self) -> anyhow::Result<ViewerConfig> {
        match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from '{}'", path.display())),
            None => match load_config() {
                Ok(config) => Ok(config),
                Err(ConfigError::NoPlatformConfigDir) => Ok(ViewerConfig::default()),
                Err(e) => Err(e).context("failed to load config from the platform directory"),
            },
        }
    }

    /// Applies flag/environment overrides on top of `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `--signaling-url` is not a valid URL or
    /// `--capability` names an unknown capability.
    fn apply_overrides(&self, mut base: ViewerConfig) -> anyhow::Result<ViewerConfig> {
        if let Some(url) = &self.signaling_url {
            reqwest::Url::parse(url)
                .with_context(|| format!("invalid signaling URL: '{url}'"))?;
            base.signaling_url = url.clone();
        }
        if let Some(screen) = self.screen {
            base.screen = ScreenSelector(screen);
        }
        if let Some(capability) = &self.capability {
            base.capability = parse_capability(capability)?;
        }
        if let Some(level) = &self.log_level {
            base.log_level = level.clone();
        }
        Ok(base)
    }

    /// Produces the effective [`ViewerConfig`] for this invocation.
    fn into_viewer_config(self) -> anyhow::Result<(ViewerConfig, Command)> {
        let base = self.load_base_config()?;
        let config = self.apply_overrides(base)?;
        Ok((config, self.command))
    }
}

fn parse_capability(value: &str) -> anyhow::Result<InputCapability> {
    match value {
        "pointer-fine" => Ok(InputCapability::PointerFine),
        "touch-primary" => Ok(InputCapability::TouchPrimary),
        other => bail!("unknown capability '{other}' (expected pointer-fine or touch-primary)"),
    }
}

async fn read_offer(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut offer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut offer)
            .await
            .context("failed to read offer from stdin")?;
        Ok(offer)
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("failed to read offer from '{source}'"))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, command) = cli.into_viewer_config()?;

    // RUST_LOG wins; otherwise the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .init();

    match command {
        Command::ShowConfig => {
            print!("{}", to_toml(&config).context("failed to render config")?);
        }
        Command::Signal { offer_file } => {
            let offer = read_offer(&offer_file).await?;
            if offer.trim().is_empty() {
                bail!("offer is empty");
            }

            let client = HttpSignalingClient::new(config.signaling_url.clone())
                .context("failed to build signaling client")?;
            info!(
                "exchanging offer with {} for screen {}",
                client.endpoint(),
                config.screen
            );
            let answer = client
                .exchange(offer, config.screen)
                .await
                .with_context(|| format!("signaling via {} failed", client.endpoint()))?;
            println!("{answer}");
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
