use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::{ActivityRecord, BehaviorExperiment, JournalEntry};

pub const JOURNAL_KEY: &str = "columnEntries";
pub const ACTIVITY_KEY: &str = "activityRecords";
pub const EXPERIMENT_KEY: &str = "behaviorExperiments";
/// Older backup layouts kept thought records under these keys.
pub const LEGACY_JOURNAL_KEYS: [&str; 2] = ["records", "data"];

/// The records found in a backup or recovery file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Export {
    pub journal: Vec<JournalEntry>,
    pub activity: Vec<ActivityRecord>,
    pub experiments: Vec<BehaviorExperiment>,
}

impl Export {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Accepts a bare array of thought records, or an object whose
    /// `columnEntries` / `activityRecords` / `behaviorExperiments` hold either
    /// arrays or the JSON-encoded strings local storage keeps. Without
    /// `columnEntries`, an array under `records` or `data` is read instead.
    pub fn from_json(content: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(content).context("invalid JSON")?;
        match root {
            Value::Array(items) => Ok(Self {
                journal: decode_list(Value::Array(items), JOURNAL_KEY)?,
                ..Default::default()
            }),
            Value::Object(mut map) => {
                let journal = match take_journal(&mut map) {
                    Some((key, v)) => decode_list(v, key)?,
                    None => {
                        if !map.contains_key(ACTIVITY_KEY) && !map.contains_key(EXPERIMENT_KEY) {
                            bail!("no thought, activity or experiment records in export");
                        }
                        Vec::new()
                    }
                };
                let activity = match map.remove(ACTIVITY_KEY) {
                    Some(v) => decode_list(v, ACTIVITY_KEY)?,
                    None => Vec::new(),
                };
                let experiments = match map.remove(EXPERIMENT_KEY) {
                    Some(v) => decode_list(v, EXPERIMENT_KEY)?,
                    None => Vec::new(),
                };
                Ok(Self {
                    journal,
                    activity,
                    experiments,
                })
            }
            _ => bail!("expected an array or an object at the top level"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.journal.is_empty() && self.activity.is_empty() && self.experiments.is_empty()
    }
}

fn take_journal(map: &mut Map<String, Value>) -> Option<(&'static str, Value)> {
    if let Some(v) = map.remove(JOURNAL_KEY) {
        return Some((JOURNAL_KEY, v));
    }
    let key = LEGACY_JOURNAL_KEYS
        .into_iter()
        .find(|key| matches!(map.get(*key), Some(Value::Array(_))))?;
    map.remove(key).map(|v| (key, v))
}

fn decode_list<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>> {
    let value = match value {
        Value::String(raw) => {
            serde_json::from_str(&raw).with_context(|| format!("`{key}` holds invalid JSON"))?
        }
        Value::Null => return Ok(Vec::new()),
        other => other,
    };
    serde_json::from_value(value).with_context(|| format!("`{key}` is not a list of records"))
}
