// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slackr - Slack channel activity recon and archiver.
//!
//! `slackr recon` refreshes the channel ledger; `slackr archive <mode>`
//! classifies it and reports, notifies, or archives inactive channels.

mod archive;
mod prompt;
mod recon;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use slackr_core::RunMode;

/// Slackr - track channel activity and archive channels that have gone quiet.
#[derive(Parser, Debug)]
#[command(name = "slackr", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default lookup.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample recent activity in every channel and update the ledger.
    Recon,
    /// Classify the ledger and report, notify, or archive inactive channels.
    Archive(ArchiveArgs),
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["dry_run", "notify", "active"])
))]
struct ArchiveArgs {
    /// Report what would happen; no channels are notified or archived.
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Post a warning to channels approaching the archive threshold.
    #[arg(short = 'n', long)]
    notify: bool,

    /// Archive inactive channels.
    #[arg(short = 'a', long, visible_alias = "archive", alias = "live")]
    active: bool,

    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
}

impl ArchiveArgs {
    fn mode(&self) -> RunMode {
        if self.active {
            RunMode::Active
        } else if self.notify {
            RunMode::Notify
        } else {
            RunMode::Dry
        }
    }
}

/// Treats a bare `?` argument as `--help`.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "?" {
                OsString::from("--help")
            } else {
                arg
            }
        })
        .collect()
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let config = match slackr_config::load_and_validate(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            slackr_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.general.log_level);

    let result = match cli.command {
        Commands::Recon => recon::run_recon(&config).await,
        Commands::Archive(args) => archive::run_archive(&config, args.mode(), args.yes).await,
    };

    if let Err(e) = result {
        eprintln!("slackr: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "slackr={log_level},slackr_engine={log_level},slackr_slack={log_level},slackr_storage={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
