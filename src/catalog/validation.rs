//! Startup self-check for the stage catalog
//!
//! A defect found here is a programming error in the static stage table,
//! not a user error: the catalog refuses to load rather than surfacing
//! broken lookups per-request.

use std::collections::{HashMap, HashSet};

use super::types::{Stage, StageTable};
use crate::validation::validate_id;

/// Catalog defect with context.
#[derive(Debug, Clone)]
pub struct CatalogIssue {
    pub message: String,
    pub stage_code: Option<String>,
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(code) = &self.stage_code {
            write!(f, "Stage '{}': {}", code, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for CatalogIssue {}

fn issue(message: impl Into<String>, stage_code: Option<&str>) -> CatalogIssue {
    CatalogIssue {
        message: message.into(),
        stage_code: stage_code.map(str::to_string),
    }
}

/// Validate the full stage table. Collects every defect rather than
/// stopping at the first one.
pub(super) fn check(table: &StageTable) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    if table.version != 1 {
        issues.push(issue(
            format!(
                "Unsupported stage table version: {}. Only version 1 is supported.",
                table.version
            ),
            None,
        ));
    }

    if table.stages.is_empty() {
        issues.push(issue("No stages defined", None));
    }

    let codes: HashSet<&str> = table.stages.iter().map(|s| s.code.as_str()).collect();
    if codes.len() != table.stages.len() {
        issues.push(issue("Duplicate stage codes detected", None));
    }

    for stage in &table.stages {
        if stage.code.is_empty() {
            issues.push(issue("Stage code cannot be empty", None));
            continue;
        }

        if let Err(e) = validate_id(&stage.code) {
            issues.push(issue(format!("Invalid stage code: {e}"), Some(&stage.code)));
        }

        if !stage.name.contains_key("en") {
            issues.push(issue(
                "Stage has no English display name",
                Some(&stage.code),
            ));
        }

        if let Some(max) = stage.requirements.max_photos {
            if stage.requirements.min_photos > max {
                issues.push(issue(
                    format!(
                        "min_photos ({}) exceeds max_photos ({max})",
                        stage.requirements.min_photos
                    ),
                    Some(&stage.code),
                ));
            }
        }

        for material in &stage.requirements.material_usage {
            if material.quantity <= 0.0 {
                issues.push(issue(
                    format!(
                        "Material '{}' has non-positive quantity",
                        material.material_code
                    ),
                    Some(&stage.code),
                ));
            }
        }

        for next in &stage.next_stages {
            if next == &stage.code {
                issues.push(issue(
                    "Stage cannot list itself as a successor",
                    Some(&stage.code),
                ));
            }
            if !codes.contains(next.as_str()) {
                issues.push(issue(
                    format!("Unknown successor stage: '{next}'"),
                    Some(&stage.code),
                ));
            }
        }
    }

    if let Some(cycle) = detect_cycle(&table.stages) {
        issues.push(issue(
            format!("Circular stage progression: {}", cycle.join(" -> ")),
            None,
        ));
    }

    issues
}

/// Detect a cycle in the successor graph using DFS. Returns the cycle
/// path if one exists.
fn detect_cycle(stages: &[Stage]) -> Option<Vec<String>> {
    let successors: HashMap<&str, &[String]> = stages
        .iter()
        .map(|s| (s.code.as_str(), s.next_stages.as_slice()))
        .collect();

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for stage in stages {
        if !visited.contains(stage.code.as_str()) {
            if let Some(cycle) = dfs_cycle(
                &successors,
                &stage.code,
                &mut visited,
                &mut rec_stack,
                &mut path,
            ) {
                return Some(cycle);
            }
        }
    }

    None
}

fn dfs_cycle(
    successors: &HashMap<&str, &[String]>,
    code: &str,
    visited: &mut HashSet<String>,
    rec_stack: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> Option<Vec<String>> {
    visited.insert(code.to_string());
    rec_stack.insert(code.to_string());
    path.push(code.to_string());

    if let Some(nexts) = successors.get(code) {
        for next in nexts.iter() {
            if !visited.contains(next.as_str()) {
                if let Some(cycle) = dfs_cycle(successors, next, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(next.as_str()) {
                // Found a cycle - reconstruct the path back to the repeat
                let mut cycle = vec![next.clone()];
                for p in path.iter().rev() {
                    cycle.push(p.clone());
                    if p == next {
                        break;
                    }
                }
                cycle.reverse();
                return Some(cycle);
            }
        }
    }

    path.pop();
    rec_stack.remove(code);
    None
}
