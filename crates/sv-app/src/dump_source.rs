//! File-backed sources for offline analysis.
//!
//! A history dump is a JSON object keyed `"<entity>/<attribute>"`, each
//! value a list of `{"timestamp", "value"}` samples. A relay dump holds the
//! two relay series directly.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sv_series::Signal;

use crate::error::{AppError, AppResult, SourceError};
use crate::source::{HistoryQuery, HistorySource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryDump {
    series: BTreeMap<String, Signal>,
}

impl HistoryDump {
    pub fn key(entity_id: &str, attribute: &str) -> String {
        format!("{entity_id}/{attribute}")
    }

    pub fn insert(&mut self, entity_id: &str, attribute: &str, signal: Signal) {
        self.series.insert(Self::key(entity_id, attribute), signal);
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        read_json(path)
    }
}

impl HistorySource for HistoryDump {
    fn fetch(&self, query: &HistoryQuery) -> Result<Signal, SourceError> {
        let key = Self::key(&query.entity_id, &query.attribute);
        let signal = self
            .series
            .get(&key)
            .ok_or_else(|| SourceError::NotFound(key.clone()))?;
        Ok(signal
            .iter()
            .copied()
            .filter(|s| s.timestamp >= query.from)
            .collect())
    }
}

/// The two relay series of the switch entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayDump {
    pub relay_a: Signal,
    pub relay_b: Signal,
}

impl RelayDump {
    pub fn load(path: &Path) -> AppResult<Self> {
        read_json(path)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::InvalidInput(format!("Failed to parse {}: {}", path.display(), e)))
}
