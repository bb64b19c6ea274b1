//! Academy - enrollment reconciliation command line
//!
//! Main entry point for the `academy` binary.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;

use academy_domain::ClassNameFix;
use academy_infra::{config, init_tracing};
use academy_lib::{
    apply_class_name_fixes, delete_enrollments, get_app_health, parse_enrollment_ref,
    scan_class_mismatches, set_enrollment_holds, sync_all_students, sync_student_status,
    AppContext,
};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

mod cli;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables before reading configuration
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone())),
        None => config::load(),
    }
    .context("failed to load configuration")?;

    init_tracing(&config.logging).context("failed to initialize logging")?;
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let ctx = AppContext::new_with_config(config).await.context("failed to start")?;

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    run(&ctx, cli.command, &cancel).await
}

async fn run(ctx: &AppContext, command: Command, cancel: &CancellationToken) -> Result<ExitCode> {
    match command {
        Command::Scan { subject } => {
            let mismatches = scan_class_mismatches(ctx, subject, cancel).await?;
            print_json(&mismatches)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Fix { enrollment, class_name, file } => {
            let fixes = match (file, enrollment, class_name) {
                (Some(path), _, _) => read_fixes(&path)?,
                (None, Some(enrollment), Some(class_name)) => {
                    vec![ClassNameFix::new(parse_enrollment_ref(&enrollment)?, class_name)]
                }
                _ => anyhow::bail!("either --file or ENROLLMENT and CLASS_NAME are required"),
            };
            let result = apply_class_name_fixes(ctx, fixes, cancel).await?;
            print_json(&result)?;
            Ok(batch_exit_code(result.is_complete_success()))
        }
        Command::Delete { enrollments } => {
            let references = enrollments
                .iter()
                .map(String::as_str)
                .map(parse_enrollment_ref)
                .collect::<academy_domain::Result<Vec<_>>>()?;
            let result = delete_enrollments(ctx, references, cancel).await?;
            print_json(&result)?;
            Ok(batch_exit_code(result.is_complete_success()))
        }
        Command::Sync { student_id } => {
            let report = sync_student_status(ctx, &student_id).await?;
            print_json(&report)?;
            Ok(batch_exit_code(report.success))
        }
        Command::SyncAll => {
            let result = sync_all_students(ctx, cancel).await?;
            print_json(&result)?;
            Ok(batch_exit_code(result.is_complete_success()))
        }
        Command::Hold { student_id, enrollment_ids, release } => {
            let updates: BTreeMap<String, bool> =
                enrollment_ids.into_iter().map(|id| (id, !release)).collect();
            let report = set_enrollment_holds(ctx, &student_id, updates, None).await?;
            print_json(&report)?;
            Ok(batch_exit_code(report.success))
        }
        Command::Health => {
            let health = get_app_health(ctx).await;
            print_json(&health)?;
            Ok(batch_exit_code(health.is_healthy))
        }
    }
}

/// Cancel in-flight batches on Ctrl-C; items already written stay written.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current item");
            cancel.cancel();
        }
    });
}

fn read_fixes(path: &Path) -> Result<Vec<ClassNameFix>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixes from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid fixes file {}", path.display()))
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn batch_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
