//! # Project Data Structures
//!
//! The `Project` struct is the root container for footing data.
//! Projects serialize to `.ftg` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: FootingSettings (partial factors, design defaults)
//! └── items: HashMap<Uuid, CalculationItem> (all footings)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use footing_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{CalculationItem, CalculationResult};
use crate::errors::CalcResult;
use crate::loads::LimitStateFactors;
use crate::materials::DesignParameters;

/// Current schema version for .ftg files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Defaults applied to new footings
    pub settings: FootingSettings,

    /// All footings, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use footing_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: FootingSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a footing to the project and return its UUID.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a footing by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Mutable access. Marks the project as modified when the item exists.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut CalculationItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items ordered by label, then id
    pub fn sorted_items(&self) -> Vec<(&Uuid, &CalculationItem)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label().cmp(b.1.label()).then(a.0.cmp(b.0)));
        items
    }

    /// Run every footing, in label order. One failing item does not stop the rest.
    pub fn calculate_all(&self) -> Vec<(Uuid, CalcResult<CalculationResult>)> {
        self.sorted_items()
            .into_iter()
            .map(|(id, item)| (*id, item.calculate()))
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Project-wide defaults for new footings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingSettings {
    /// Design code reference shown on reports
    pub code: String,

    /// Partial factors copied into new footings
    #[serde(default)]
    pub factors: LimitStateFactors,

    /// Material and detailing defaults copied into new footings
    #[serde(default)]
    pub design: DesignParameters,
}

impl Default for FootingSettings {
    fn default() -> Self {
        FootingSettings {
            code: "EN 1992-1-1".to_string(),
            factors: LimitStateFactors::default(),
            design: DesignParameters::default(),
        }
    }
}
