//! Recursive empty-value pruning for one mapping-valued event field.
//!
//! Upstream enrichment sources routinely emit placeholder text (`"-"`,
//! `"(empty)"`) for fields they have no data for. This stage strips those
//! placeholders, nulls, and any structure that becomes empty once its
//! members are gone, leaving only fields that carry content.

use metrics::counter;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{Filter, FilterError};
use sift_core::{paths, FieldAccess};

/// Config for the `compact` stage: the single recognized option is the path
/// of the field to prune.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompactSpec {
    pub field: String,
}

/// Text carrying no information: the empty string and the two placeholder
/// sentinels upstream systems emit for missing data.
fn is_empty_text(s: &str) -> bool {
    s.is_empty() || s == "-" || s == "(empty)"
}

/// Sequence elements worth dropping: null and empty text only. Nested
/// mappings or sequences inside a sequence pass through verbatim; sequence
/// filtering is shallow.
fn is_discardable(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => is_empty_text(s),
        _ => false,
    }
}

/// Rebuild `map` without its empty members.
///
/// Entries keep their original order. Nested mappings are pruned recursively
/// and dropped when they come back empty; sequences are filtered shallowly
/// and dropped when nothing survives; nulls and empty text never make it to
/// the output. Numbers and booleans always survive unchanged.
pub fn compact(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (k, v) in map {
        match v {
            Value::Object(inner) => {
                let pruned = compact(inner);
                if !pruned.is_empty() {
                    out.insert(k.clone(), Value::Object(pruned));
                }
            }
            Value::String(s) => {
                if !is_empty_text(s) {
                    out.insert(k.clone(), v.clone());
                }
            }
            Value::Array(items) => {
                let kept: Vec<Value> =
                    items.iter().filter(|e| !is_discardable(e)).cloned().collect();
                if !kept.is_empty() {
                    out.insert(k.clone(), Value::Array(kept));
                }
            }
            Value::Null => {}
            other => {
                out.insert(k.clone(), other.clone());
            }
        }
    }
    out
}

/// Stage that prunes one configured field. The field path is validated at
/// construction and immutable afterwards, so a single instance is safe to
/// share across workers.
#[derive(Debug, Clone)]
pub struct Compact {
    field: String,
}

impl Compact {
    pub fn new(field: impl Into<String>) -> Result<Self, FilterError> {
        let field = field.into();
        if paths::split(&field).is_none() {
            return Err(FilterError::InvalidField(field));
        }
        Ok(Self { field })
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Filter for Compact {
    fn name(&self) -> &'static str {
        "compact"
    }

    /// Replace the configured field with its pruned form when it holds a
    /// mapping; otherwise leave the event untouched. Never fails.
    fn apply(&self, event: &mut dyn FieldAccess) {
        let pruned = match event.get_field(&self.field) {
            Some(Value::Object(map)) => compact(map),
            _ => {
                counter!("compact_noop", 1u64);
                debug!(field = %self.field, "field absent or not a mapping; event left untouched");
                return;
            }
        };
        counter!("compact_applied", 1u64);
        event.set_field(&self.field, Value::Object(pruned));
    }
}
