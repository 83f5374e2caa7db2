//! Work entry command implementations.
//!
//! Commands:
//! - `fiberwork entry submit <draft.json>` - Validate and persist a draft
//! - `fiberwork entry validate <draft.json>` - Dry-run the validator
//! - `fiberwork entry show <id>` / `fiberwork entry list` - Inspect entries
//! - `fiberwork entry approve|reject|resubmit <id>` - Lifecycle transitions
//!
//! Submission is the API-time gate: a draft that fails its stage's
//! requirements is rejected outright and never persisted. The approval
//! state machine only sees entries that passed this gate.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::{ColoredString, Colorize};

use crate::catalog::StageCatalog;
use crate::error::WorkflowError;
use crate::lifecycle::{Clock, LifecycleManager, SystemClock};
use crate::models::entry::{WorkEntry, WorkEntryDraft, WorkEntryStatus};
use crate::store::{FileEntryStore, FsPhotoStorage, WorkEntryStore};
use crate::validator;
use crate::validator::StageValidationResult;

/// Get the .fiberwork data directory, creating it when `create` is set
fn data_dir(create: bool) -> Result<PathBuf> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let dir = cwd.join(".fiberwork");

    if !dir.exists() && !create {
        bail!(".fiberwork data directory not found. Submit an entry first.");
    }

    Ok(dir)
}

fn open_manager(
    dir: &Path,
) -> Result<LifecycleManager<FileEntryStore, SystemClock, FsPhotoStorage>> {
    Ok(LifecycleManager::new(
        FileEntryStore::open(dir)?,
        SystemClock,
        FsPhotoStorage::open(dir),
    ))
}

fn read_draft(path: &Path) -> Result<WorkEntryDraft> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse draft file: {}", path.display()))
}

fn status_indicator(status: WorkEntryStatus) -> ColoredString {
    match status {
        WorkEntryStatus::Pending => "●".yellow().bold(),
        WorkEntryStatus::Approved => "✓".green().bold(),
        WorkEntryStatus::Rejected => "✗".red().bold(),
    }
}

fn parse_status(raw: &str) -> Result<WorkEntryStatus> {
    match raw {
        "pending" => Ok(WorkEntryStatus::Pending),
        "approved" => Ok(WorkEntryStatus::Approved),
        "rejected" => Ok(WorkEntryStatus::Rejected),
        other => bail!("unknown status '{other}'. Use pending, approved, or rejected."),
    }
}

fn print_findings(result: &StageValidationResult) {
    for error in &result.errors {
        println!("{} [{}] {}", "✗".red(), error.code.red(), error.message);
    }
    for warning in &result.warnings {
        println!(
            "{} [{}] {}",
            "⚠".yellow(),
            warning.code.yellow(),
            warning.message
        );
    }
}

/// Run a draft through the submission gate without persisting anything.
/// Returns the candidate entry and its validation result.
fn gate(draft: WorkEntryDraft) -> Result<(WorkEntry, StageValidationResult)> {
    draft.check()?;

    let catalog = StageCatalog::load()?;
    let stage = catalog.get(&draft.stage_code)?;
    if !stage.is_active {
        bail!(
            "stage '{}' is not active and cannot be selected for new entries",
            stage.code
        );
    }

    let entry = draft.into_entry(SystemClock.now());
    let result = validator::validate(stage, &entry);
    Ok((entry, result))
}

/// Validate a draft and persist it as a pending work entry
pub fn submit(draft_path: &Path, json: bool) -> Result<()> {
    let draft = read_draft(draft_path)?;
    let (entry, result) = gate(draft)?;

    print_findings(&result);
    if !result.can_submit {
        return Err(WorkflowError::ValidationFailed(result.errors).into());
    }

    let dir = data_dir(true)?;
    let store = FileEntryStore::open(&dir)?;
    store.insert(&entry)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    println!(
        "{} Submitted work entry '{}' for {} ({})",
        "✓".green(),
        entry.id.cyan(),
        entry.stage_code,
        entry.status
    );
    Ok(())
}

/// Dry-run a draft against its stage's requirements
pub fn validate(draft_path: &Path, json: bool) -> Result<()> {
    let draft = read_draft(draft_path)?;
    let (entry, result) = gate(draft)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_findings(&result);
        if result.is_valid {
            println!(
                "{} Draft satisfies all requirements of {}",
                "✓".green(),
                entry.stage_code
            );
        }
    }

    if result.can_submit {
        Ok(())
    } else {
        Err(WorkflowError::ValidationFailed(result.errors).into())
    }
}

/// Show a stored work entry
pub fn show(entry_id: &str, json: bool) -> Result<()> {
    let dir = data_dir(false)?;
    let store = FileEntryStore::open(&dir)?;
    let entry = store.load(entry_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    println!(
        "{} {} [{}]",
        status_indicator(entry.status),
        entry.id.cyan().bold(),
        entry.status
    );
    println!("  stage:   {}", entry.stage_code);
    println!("  project: {}", entry.project_id);
    if let Some(segment) = &entry.segment_id {
        println!("  segment: {segment}");
    }
    if let Some(house) = &entry.house_id {
        println!("  house:   {house}");
    }
    println!("  worker:  {}", entry.user_id);
    println!("  date:    {}", entry.date);
    println!("  meters:  {}", entry.meters_done);
    println!("  photos:  {}", entry.photos.len());

    match entry.status {
        WorkEntryStatus::Approved => {
            if let (Some(by), Some(at)) = (&entry.approved_by, entry.approved_at) {
                println!("  approved by {by} at {}", at.format("%Y-%m-%d %H:%M UTC"));
            }
        }
        WorkEntryStatus::Rejected => {
            if let (Some(by), Some(at)) = (&entry.rejected_by, entry.rejected_at) {
                println!("  rejected by {by} at {}", at.format("%Y-%m-%d %H:%M UTC"));
            }
            if let Some(reason) = &entry.rejection_reason {
                println!("  reason: {}", reason.red());
            }
        }
        WorkEntryStatus::Pending => {}
    }

    if entry.was_rejected_before {
        println!("  {}", "rejected at least once before".yellow());
    }

    Ok(())
}

/// List stored work entries, optionally filtered by status
pub fn list(status: Option<&str>, json: bool) -> Result<()> {
    let filter = status.map(parse_status).transpose()?;

    let dir = data_dir(false)?;
    let store = FileEntryStore::open(&dir)?;
    let mut entries = store.list()?;
    entries.retain(|e| filter.map_or(true, |f| e.status == f));
    entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        match status {
            Some(status) => println!("{} No {status} work entries", "ℹ".blue()),
            None => println!("{} No work entries", "ℹ".blue()),
        }
        return Ok(());
    }

    println!(
        "  {:36} {:24} {:10} {:10}",
        "ID".bold(),
        "STAGE".bold(),
        "DATE".bold(),
        "STATUS".bold()
    );
    println!("  {}", "─".repeat(84));
    for entry in &entries {
        let audit = if entry.was_rejected_before {
            " ↻".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "{} {:36} {:24} {:10} {:10}{audit}",
            status_indicator(entry.status),
            entry.id,
            entry.stage_code,
            entry.date.to_string(),
            entry.status.to_string()
        );
    }

    Ok(())
}

/// Approve a pending entry
pub fn approve(entry_id: &str, approver: &str) -> Result<()> {
    let dir = data_dir(false)?;
    let manager = open_manager(&dir)?;
    let entry = manager.approve(entry_id, approver)?;

    println!(
        "{} Approved work entry '{}' ({} by {approver})",
        "✓".green(),
        entry.id.cyan(),
        entry.stage_code
    );
    if entry.was_rejected_before {
        println!("  {}", "note: this entry had been rejected before".dimmed());
    }
    Ok(())
}

/// Reject a pending entry with a reason, optionally attaching evidence
pub fn reject(entry_id: &str, approver: &str, reason: &str, photos: Vec<PathBuf>) -> Result<()> {
    let dir = data_dir(false)?;
    let manager = open_manager(&dir)?;
    let entry = manager.reject(entry_id, approver, reason, &photos)?;

    println!(
        "{} Rejected work entry '{}': {}",
        "✗".red(),
        entry.id.cyan(),
        reason
    );
    if !photos.is_empty() {
        println!(
            "  {} evidence photo(s) handed to photo storage",
            photos.len()
        );
    }
    Ok(())
}

/// Return a rejected entry to pending for another review round
pub fn resubmit(entry_id: &str) -> Result<()> {
    let dir = data_dir(false)?;
    let manager = open_manager(&dir)?;
    let entry = manager.resubmit(entry_id)?;

    println!(
        "{} Work entry '{}' returned to {} for review",
        "✓".green(),
        entry.id.cyan(),
        entry.status
    );
    println!(
        "  {}",
        "the prior rejection stays on record for reviewers".dimmed()
    );
    Ok(())
}
