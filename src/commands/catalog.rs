//! Catalog command implementations for browsing the stage catalog.
//!
//! Commands:
//! - `fiberwork catalog list` - List stages in progression order
//! - `fiberwork catalog show <code>` - Show one stage with requirements
//! - `fiberwork catalog next [<code>]` - Stages available for a new entry
//! - `fiberwork catalog check` - Run the structural self-check

use anyhow::Result;
use colored::{ColoredString, Colorize};

use crate::catalog::{Stage, StageCatalog, StageRequirements};
use crate::error::WorkflowError;

fn active_indicator(stage: &Stage) -> ColoredString {
    if stage.is_active {
        "●".green().bold()
    } else {
        "⊘".white().dimmed()
    }
}

fn photo_bounds(req: &StageRequirements) -> String {
    match req.max_photos {
        Some(max) => format!("{}-{max}", req.min_photos),
        None => format!("{}+", req.min_photos),
    }
}

/// List all stages in catalog order
pub fn list(lang: &str, json: bool) -> Result<()> {
    let catalog = StageCatalog::load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(catalog.stages())?);
        return Ok(());
    }

    println!(
        "  {:24} {:16} {:8} {:9} {}",
        "CODE".bold(),
        "NAME".bold(),
        "PHOTOS".bold(),
        "DURATION".bold(),
        "NEXT".bold()
    );
    println!("  {}", "─".repeat(76));

    for stage in catalog.stages() {
        let next = if stage.is_terminal() {
            "(terminal)".dimmed().to_string()
        } else {
            stage.next_stages.join(", ")
        };
        println!(
            "{} {:24} {:16} {:8} {:>6}min {}",
            active_indicator(stage),
            stage.code,
            stage.display_name(lang),
            photo_bounds(&stage.requirements),
            stage.estimated_duration_minutes,
            next
        );
    }

    Ok(())
}

/// Show one stage with its full requirement set
pub fn show(code: &str, lang: &str, json: bool) -> Result<()> {
    let catalog = StageCatalog::load()?;
    let stage = catalog.get(code)?;

    if json {
        println!("{}", serde_json::to_string_pretty(stage)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        active_indicator(stage),
        stage.code.cyan().bold(),
        stage.display_name(lang)
    );
    let description = stage.display_description(lang);
    if !description.is_empty() {
        println!("  {description}");
    }
    println!(
        "  {} ~{} minutes",
        "estimated:".dimmed(),
        stage.estimated_duration_minutes
    );

    let req = &stage.requirements;
    println!("\n{}", "Requirements".bold());
    println!("  photos: {}", photo_bounds(req));
    if !req.required_measurements.is_empty() {
        println!("  measurements: {}", req.required_measurements.join(", "));
    }
    if req.required_gps {
        println!("  GPS coordinate required");
    }
    if !req.quality_checks.is_empty() {
        println!("  quality checks: {}", req.quality_checks.join(", "));
    }
    for material in &req.material_usage {
        let optional = if material.is_optional {
            " (optional)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  material: {} {} {}{optional}",
            material.material_code, material.quantity, material.unit
        );
    }
    for restriction in &req.weather_restrictions {
        println!(
            "  {} {} {} {} {} - {}",
            "weather:".yellow(),
            restriction.condition,
            restriction.operator,
            restriction.value,
            restriction.unit,
            restriction.reason
        );
    }
    for restriction in &req.time_of_day_restrictions {
        println!(
            "  {} no work {}-{} - {}",
            "time:".yellow(),
            restriction.start_time.format("%H:%M"),
            restriction.end_time.format("%H:%M"),
            restriction.reason
        );
    }

    if !stage.required_tools.is_empty() {
        println!("\n{} {}", "Tools:".bold(), stage.required_tools.join(", "));
    }
    if !stage.safety_requirements.is_empty() {
        println!(
            "{} {}",
            "Safety:".bold(),
            stage.safety_requirements.join(", ")
        );
    }
    if !stage.quality_standards.is_empty() {
        println!(
            "{} {}",
            "Standards:".bold(),
            stage.quality_standards.join(", ")
        );
    }

    if stage.is_terminal() {
        println!("\n{}", "Terminal stage - no successors".dimmed());
    } else {
        println!("\n{} {}", "Next stages:".bold(), stage.next_stages.join(", "));
    }

    Ok(())
}

/// Show the stages available for a new work entry
pub fn next(code: Option<&str>, project: &str, lang: &str) -> Result<()> {
    let catalog = StageCatalog::load()?;
    let available = catalog.available_stages(project, code)?;

    if available.is_empty() {
        match code {
            Some(code) => println!(
                "{} Stage '{code}' has no active successors (terminal or all inactive)",
                "ℹ".blue()
            ),
            None => println!("{} No active entry-point stages in the catalog", "ℹ".blue()),
        }
        return Ok(());
    }

    match code {
        Some(code) => println!("Stages reachable from {}:", code.cyan()),
        None => println!("Entry-point stages:"),
    }
    for stage in available {
        println!(
            "{} {:24} {}",
            active_indicator(stage),
            stage.code,
            stage.display_name(lang)
        );
    }

    Ok(())
}

/// Run the catalog structural self-check
pub fn check() -> Result<()> {
    println!("{}\n", crate::LOGO);

    match StageCatalog::load() {
        Ok(catalog) => {
            let terminal = catalog.stages().iter().filter(|s| s.is_terminal()).count();
            println!(
                "{} Catalog is structurally sound: {} stage(s), {} entry point(s), {} terminal",
                "✓".green(),
                catalog.stages().len(),
                catalog.entry_points().len(),
                terminal
            );
            Ok(())
        }
        Err(WorkflowError::InvalidCatalog(issues)) => {
            for issue in &issues {
                eprintln!("{} {issue}", "✗".red());
            }
            Err(WorkflowError::InvalidCatalog(issues).into())
        }
        Err(other) => Err(other.into()),
    }
}
