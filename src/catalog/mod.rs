//! Stage catalog: the authoritative, ordered set of construction stages
//!
//! The catalog is built once from the embedded stage table and is
//! read-only thereafter. Every load runs the structural self-check;
//! a defective table fails with `InvalidCatalog` instead of producing
//! a catalog that would break per-request lookups later.

mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use types::{
    MaterialRequirement, RestrictionOperator, Stage, StageRequirements, StageTable,
    TimeRestriction, WeatherCondition, WeatherRestriction,
};
pub use validation::CatalogIssue;

use std::collections::HashMap;

use crate::error::WorkflowError;

/// Embedded declarative stage table for fiber-optic installation.
const STAGE_TABLE_YAML: &str = include_str!("stages.yaml");

/// Immutable, validated stage catalog.
#[derive(Debug, Clone)]
pub struct StageCatalog {
    stages: Vec<Stage>,
    by_code: HashMap<String, usize>,
}

impl StageCatalog {
    /// Load and validate the embedded stage table.
    pub fn load() -> Result<Self, WorkflowError> {
        Self::from_yaml(STAGE_TABLE_YAML)
    }

    /// Build a catalog from a YAML stage table, running the self-check.
    pub fn from_yaml(yaml: &str) -> Result<Self, WorkflowError> {
        let table: StageTable = serde_yaml::from_str(yaml).map_err(|e| {
            WorkflowError::InvalidCatalog(vec![CatalogIssue {
                message: format!("Malformed stage table: {e}"),
                stage_code: None,
            }])
        })?;
        Self::from_table(table)
    }

    /// Build a catalog from an already-parsed table, running the self-check.
    pub fn from_table(table: StageTable) -> Result<Self, WorkflowError> {
        let issues = validation::check(&table);
        if !issues.is_empty() {
            return Err(WorkflowError::InvalidCatalog(issues));
        }

        let by_code = table
            .stages
            .iter()
            .enumerate()
            .map(|(i, s)| (s.code.clone(), i))
            .collect();

        Ok(Self {
            stages: table.stages,
            by_code,
        })
    }

    /// All stages in catalog order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Look up a stage by code.
    ///
    /// # Errors
    /// `StageNotFound` for an unknown code - always caller error (a stale
    /// or malformed stage code), never retried automatically.
    pub fn get(&self, code: &str) -> Result<&Stage, WorkflowError> {
        self.by_code
            .get(code)
            .map(|&i| &self.stages[i])
            .ok_or_else(|| WorkflowError::StageNotFound {
                code: code.to_string(),
            })
    }

    /// Resolve a stage's successors to full stage records, in declared order.
    ///
    /// A dangling successor reference is `InvalidCatalog`: the self-check
    /// rejects such tables at load time, so hitting it here means the
    /// catalog was constructed without validation.
    pub fn next_stages(&self, code: &str) -> Result<Vec<&Stage>, WorkflowError> {
        let stage = self.get(code)?;
        stage
            .next_stages
            .iter()
            .map(|next| {
                self.by_code.get(next).map(|&i| &self.stages[i]).ok_or_else(|| {
                    WorkflowError::InvalidCatalog(vec![CatalogIssue {
                        message: format!("Unknown successor stage: '{next}'"),
                        stage_code: Some(code.to_string()),
                    }])
                })
            })
            .collect()
    }

    /// Stages available for a new work entry.
    ///
    /// Without a current stage this returns the entry points: active stages
    /// that no other stage lists as a successor. With a current stage it
    /// returns that stage's successors filtered to active ones.
    ///
    /// `project_id` is accepted as an opaque filter key for deployments
    /// that configure project-specific stage exclusions; the base catalog
    /// applies no such exclusions.
    pub fn available_stages(
        &self,
        _project_id: &str,
        current_stage: Option<&str>,
    ) -> Result<Vec<&Stage>, WorkflowError> {
        match current_stage {
            None => Ok(self.entry_points()),
            Some(code) => Ok(self
                .next_stages(code)?
                .into_iter()
                .filter(|s| s.is_active)
                .collect()),
        }
    }

    /// Active stages with no predecessor in the catalog.
    pub fn entry_points(&self) -> Vec<&Stage> {
        let mut has_predecessor: HashMap<&str, bool> =
            self.stages.iter().map(|s| (s.code.as_str(), false)).collect();
        for stage in &self.stages {
            for next in &stage.next_stages {
                if let Some(flag) = has_predecessor.get_mut(next.as_str()) {
                    *flag = true;
                }
            }
        }

        self.stages
            .iter()
            .filter(|s| s.is_active && !has_predecessor[s.code.as_str()])
            .collect()
    }
}
