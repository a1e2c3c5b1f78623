use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A host-delivered message targeting the attached app component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub action: Option<String>,
    pub data: Option<String>,
    #[serde(default)]
    pub extras: BTreeMap<String, Value>,
}

impl Intent {
    pub fn with_action(action: &str) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn put_extra(&mut self, key: &str, value: Value) {
        self.extras.insert(key.into(), value);
    }

    /// Reads a boolean extra; missing or non-boolean values read as `false`.
    pub fn bool_extra(&self, key: &str) -> bool {
        matches!(self.extras.get(key), Some(Value::Bool(true)))
    }
}

/// Saved instance state for the attached host component, written by
/// save-state listeners and handed back on restore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    values: BTreeMap<String, Value>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Outcome of a single entry in a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}
