//! Sift filter stages: the `Filter` trait, chain configuration, and the
//! built-in stages.

#![forbid(unsafe_code)]

pub mod compact;

use serde::Deserialize;
use sift_core::FieldAccess;

pub use compact::{Compact, CompactSpec};

/// A single transformation stage. Stages are configured once at construction,
/// hold no mutable state, and never fail: an event a stage cannot act on
/// passes through untouched.
pub trait Filter: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, event: &mut dyn FieldAccess);
}

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid field path: {0:?}")]
    InvalidField(String),
    #[error("chain config: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Declarative stage description as it appears in a chain config file,
/// keyed by stage name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum FilterSpec {
    /// Recursively prune empty values from one mapping-valued field.
    Compact(CompactSpec),
}

impl FilterSpec {
    /// Validate the stage configuration and build the stage.
    pub fn build(self) -> Result<Box<dyn Filter>, FilterError> {
        match self {
            FilterSpec::Compact(spec) => Ok(Box::new(Compact::new(spec.field)?)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChainFile {
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    filters: Vec<FilterSpec>,
}

/// Parse a YAML chain config and build its stages in order.
///
/// ```yaml
/// filters:
///   - compact:
///       field: nested
/// ```
pub fn load_chain(yaml: &str) -> Result<Vec<Box<dyn Filter>>, FilterError> {
    let file: ChainFile = serde_yaml::from_str(yaml)?;
    file.filters.into_iter().map(FilterSpec::build).collect()
}
