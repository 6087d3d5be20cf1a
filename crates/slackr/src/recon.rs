// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `slackr recon` command implementation.

use std::io::IsTerminal;
use std::path::Path;

use chrono::Utc;
use slackr_config::SlackrConfig;
use slackr_core::SlackrError;
use slackr_engine::{MinIntervalGate, PacedGateway, ReconReport, ReconRunner};
use slackr_slack::SlackGateway;
use slackr_storage::CsvLedgerStore;

/// Run the `slackr recon` command.
///
/// Requires `SLACK_API_TOKEN`. Every Slack call is spaced by
/// `recon.call_interval_ms`.
pub async fn run_recon(config: &SlackrConfig) -> Result<(), SlackrError> {
    let token = slackr_config::api_token_from_env()?;
    let gateway = PacedGateway::new(
        SlackGateway::new(&config.slack, token)?,
        MinIntervalGate::from_millis(config.recon.call_interval_ms),
    );
    let store = CsvLedgerStore::from_config(&config.storage);

    let report = ReconRunner::from_config(&config.recon)
        .run(&gateway, &store, Utc::now())
        .await?;

    let use_color = std::io::stdout().is_terminal();
    for line in summary_lines(&report, store.path(), use_color) {
        println!("{line}");
    }
    Ok(())
}

fn summary_lines(report: &ReconReport, ledger_path: &Path, use_color: bool) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "  slackr recon".to_string(),
        format!("  {}", "-".repeat(35)),
    ];

    let rows = [
        ("Channels processed", report.processed),
        ("Active", report.active),
        ("Idle", report.idle),
        ("New", report.new),
        ("No longer listed", report.unlisted),
    ];
    for (label, count) in rows {
        lines.push(format!("    {label:<20} {count}"));
    }

    let saved = format!("Ledger saved to {}", ledger_path.display());
    if use_color {
        use colored::Colorize;
        lines.push(format!("    {} {saved}", "✓".green()));
    } else {
        lines.push(format!("    [OK] {saved}"));
    }
    lines.push(String::new());
    lines
}
