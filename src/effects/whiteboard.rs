//! Per-resolution scratch space shared between steps.
//!
//! Keys are strings chosen by effect authors. A read with the wrong type
//! logs a warning and yields the type's default instead of failing.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::targeting::Target;

/// A value stored on the whiteboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhiteboardValue {
    Int(i64),
    Targets(Vec<Target>),
}

impl WhiteboardValue {
    fn type_name(&self) -> &'static str {
        match self {
            WhiteboardValue::Int(_) => "int",
            WhiteboardValue::Targets(_) => "targets",
        }
    }
}

/// Key/value store for one effect resolution.
#[derive(Clone, Debug, Default)]
pub struct Whiteboard {
    entries: FxHashMap<String, WhiteboardValue>,
}

impl Whiteboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: WhiteboardValue) {
        self.entries.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&WhiteboardValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<WhiteboardValue> {
        self.entries.remove(key)
    }

    /// Integer at `key`; 0 if absent or not an integer.
    #[must_use]
    pub fn get_int(&self, key: &str) -> i64 {
        match self.entries.get(key) {
            Some(WhiteboardValue::Int(value)) => *value,
            Some(other) => {
                warn!(key, found = other.type_name(), "whiteboard value is not an int");
                0
            }
            None => 0,
        }
    }

    /// Targets at `key`.
    ///
    /// `None` if the key was never written. A value of the wrong type
    /// reads as an empty list.
    #[must_use]
    pub fn get_targets(&self, key: &str) -> Option<Vec<Target>> {
        match self.entries.get(key)? {
            WhiteboardValue::Targets(targets) => Some(targets.clone()),
            other => {
                warn!(key, found = other.type_name(), "whiteboard value is not a target list");
                Some(Vec::new())
            }
        }
    }
}
