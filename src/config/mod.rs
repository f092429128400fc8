mod manifest;
mod throttle;

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use manifest::{
    default_categories, default_memoized, default_throttle_assignments, CategoryGroup,
    ThrottleAssignment,
};
pub use throttle::{ThrottleClass, ThrottleTable, TickCounter};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("throttle class '{class}' has divisor 0; divisors must be at least 1")]
    ZeroDivisor { class: ThrottleClass },

    #[error("component '{0}' is assigned more than one throttle class")]
    DuplicateAssignment(String),

    #[error("category file '{0}' is listed more than once")]
    DuplicateCategory(String),

    #[error("category with description '{0}' has an empty file name")]
    EmptyFileName(String),

    #[error("helper names do not form a valid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Text the rewriter emits and recognizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteStyle {
    /// `if (!<guard_helper>(n)) return;`
    pub guard_helper: String,
    /// `<counter_helper>();` in the orchestrator's tick callback.
    pub counter_helper: String,
    /// Module both helpers are imported from.
    pub helper_module: String,
    /// Call inserted by the memoization pass.
    pub memo_callee: String,
    /// Initializer prefixes that count as already memoized.
    pub memo_callees: Vec<String>,
}

impl Default for RewriteStyle {
    fn default() -> Self {
        Self {
            guard_helper: "shouldRunThisFrame".to_string(),
            counter_helper: "incrementGlobalFrame".to_string(),
            helper_module: "../utils/frameThrottle".to_string(),
            memo_callee: "React.memo".to_string(),
            memo_callees: vec!["React.memo".to_string(), "memo".to_string()],
        }
    }
}

impl RewriteStyle {
    pub fn guard_statement(&self, divisor: u32) -> String {
        format!("if (!{}({})) return;", self.guard_helper, divisor)
    }

    pub fn counter_statement(&self) -> String {
        format!("{}();", self.counter_helper)
    }

    pub fn import_line(&self) -> String {
        format!(
            "import {{ {}, {} }} from '{}';",
            self.guard_helper, self.counter_helper, self.helper_module
        )
    }
}

/// Everything the passes need besides the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides of the built-in divisor per throttle class.
    pub throttle_divisors: BTreeMap<ThrottleClass, u32>,
    pub throttle: Vec<ThrottleAssignment>,
    pub memoize: Vec<String>,
    /// Top-level component owning the shared tick clock.
    pub orchestrator: Option<String>,
    /// Names of per-tick callback registration calls.
    pub registrations: Vec<String>,
    pub style: RewriteStyle,
    pub categories: Vec<CategoryGroup>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            throttle_divisors: BTreeMap::new(),
            throttle: default_throttle_assignments(),
            memoize: default_memoized(),
            orchestrator: Some("TruckBay".to_string()),
            registrations: vec!["useFrame".to_string()],
            style: RewriteStyle::default(),
            categories: default_categories(),
        }
    }
}

impl Config {
    /// Read a JSON config; fields it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((class, _)) = self.throttle_divisors.iter().find(|(_, d)| **d == 0) {
            return Err(ConfigError::ZeroDivisor { class: *class });
        }

        let mut seen = HashSet::new();
        for assignment in &self.throttle {
            if !seen.insert(assignment.component.as_str()) {
                return Err(ConfigError::DuplicateAssignment(assignment.component.clone()));
            }
        }

        let mut files = HashSet::new();
        for group in &self.categories {
            if group.file_name.trim().is_empty() {
                return Err(ConfigError::EmptyFileName(group.description.clone()));
            }
            if !files.insert(group.file_name.as_str()) {
                return Err(ConfigError::DuplicateCategory(group.file_name.clone()));
            }
        }

        Ok(())
    }

    pub fn throttle_table(&self) -> ThrottleTable {
        ThrottleTable::with_overrides(&self.throttle_divisors)
    }
}
