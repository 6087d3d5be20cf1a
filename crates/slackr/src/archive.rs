// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `slackr archive` command implementation.

use std::io::IsTerminal;

use chrono::Local;
use slackr_config::SlackrConfig;
use slackr_core::{RunMode, SlackrError};
use slackr_engine::{ActionSummary, ArchiveRunner, MinIntervalGate, PacedGateway};
use slackr_slack::SlackGateway;
use slackr_storage::{CsvLedgerStore, FileAuditLog, FileWhitelistStore};

/// Run the `slackr archive` command in `mode`.
///
/// `Notify` and `Active` ask for confirmation unless `assume_yes` is set.
/// Declining returns `Ok(())` without touching anything.
pub async fn run_archive(
    config: &SlackrConfig,
    mode: RunMode,
    assume_yes: bool,
) -> Result<(), SlackrError> {
    let token = slackr_config::api_token_from_env()?;
    let runner = ArchiveRunner::from_config(&config.archiver)?;

    if let Some(question) = confirmation_question(mode)
        && !assume_yes
        && !crate::prompt::confirm(question)?
    {
        println!("Aborted. No channels were changed.");
        return Ok(());
    }

    let gateway = PacedGateway::new(
        SlackGateway::new(&config.slack, token)?,
        MinIntervalGate::from_millis(config.archiver.call_interval_ms),
    );
    let ledger = CsvLedgerStore::from_config(&config.storage);
    let whitelist = FileWhitelistStore::from_config(&config.storage);
    let mut audit = FileAuditLog::from_config(&config.storage)?;

    let report = runner
        .run(mode, &gateway, &ledger, &whitelist, &mut audit, &Local::now())
        .await?;

    let use_color = std::io::stdout().is_terminal();
    for line in summary_lines(&report.summary, use_color) {
        println!("{line}");
    }
    Ok(())
}

fn confirmation_question(mode: RunMode) -> Option<&'static str> {
    match mode {
        RunMode::Dry => None,
        RunMode::Notify => Some(
            "This will post a notice to every channel due for archival. Do you want to proceed?",
        ),
        RunMode::Active => Some(
            "This will immediately archive channels. Make sure you've done a dry run first. Do you want to proceed?",
        ),
    }
}

fn summary_lines(summary: &ActionSummary, use_color: bool) -> Vec<String> {
    let (archived_label, notified_label) = match summary.mode {
        RunMode::Dry => ("Would be archived", "Would be notified"),
        RunMode::Notify | RunMode::Active => ("Archived", "Notified"),
    };

    let mut lines = vec![
        String::new(),
        format!("  slackr archive ({})", summary.mode),
        format!("  {}", "-".repeat(35)),
        format!("    {:<20} {}", "Active channels", summary.active_count),
        count_line(archived_label, summary.archived_count, &summary.archived, use_color),
        count_line(notified_label, summary.notified_count, &summary.notified, use_color),
    ];

    if summary.mode == RunMode::Dry {
        let note = "Dry run: no channels were notified or archived.";
        if use_color {
            use colored::Colorize;
            lines.push(format!("    {}", note.yellow()));
        } else {
            lines.push(format!("    {note}"));
        }
    }
    lines.push(String::new());
    lines
}

fn count_line(label: &str, count: usize, names: &[String], use_color: bool) -> String {
    let list = names.join(", ");
    if names.is_empty() {
        format!("    {label:<20} {count}")
    } else if use_color {
        use colored::Colorize;
        format!("    {label:<20} {count}  {}", list.cyan())
    } else {
        format!("    {label:<20} {count}  {list}")
    }
}
