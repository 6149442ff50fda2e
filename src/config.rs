use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    column_family::DEFAULT_COLUMN_FAMILY_NAME,
    filter::FilterPolicy,
    store::InstanceName,
    util::{Result, Status},
};

/// Identifiers and knobs for one demo run
///
/// Loaded from JSON; every field is optional and falls back to
/// `StoreConfig::default()`.
///
/// ```json
/// {
///   "project_id": "demo-project",
///   "instance_id": "demo-instance",
///   "table_id": "test-table",
///   "column_family": "cf1",
///   "greetings": ["World", "Store", "Rust"],
///   "cells_per_column": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub project_id: String,
    pub instance_id: String,
    pub table_id: String,
    pub column_family: String,
    /// One row is written per name
    pub greetings: Vec<String>,
    /// K for the "limit cells per column" policy
    pub cells_per_column: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            project_id: "demo-project".to_string(),
            instance_id: "demo-instance".to_string(),
            table_id: "test-table".to_string(),
            column_family: DEFAULT_COLUMN_FAMILY_NAME.to_string(),
            greetings: vec!["World".to_string(), "Store".to_string(), "Rust".to_string()],
            cells_per_column: 1,
        }
    }
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            Status::io_error(format!("Failed to read config {}: {e}", path.display()))
        })?;
        StoreConfig::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("project_id", &self.project_id),
            ("instance_id", &self.instance_id),
            ("table_id", &self.table_id),
            ("column_family", &self.column_family),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Status::invalid_argument(format!("{field} must not be empty")));
            }
        }
        if self.cells_per_column == 0 {
            return Err(Status::invalid_argument("cells_per_column must be positive"));
        }
        Ok(())
    }

    pub fn instance_name(&self) -> InstanceName {
        InstanceName::new(self.project_id.clone(), self.instance_id.clone())
    }

    pub fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy::limit_cells_per_column(self.cells_per_column)
    }
}
