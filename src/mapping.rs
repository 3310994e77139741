use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
pub struct RawMappingRecord {
    pub client_id: Option<i64>,
    pub project_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRecord {
    pub client_id: i64,
    pub project_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    MissingField { key: String, field: &'static str },
    InvalidKey(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::MissingField { key, field } => {
                write!(f, "Project mapping '{key}' is missing required field '{field}'")
            }
            MappingError::InvalidKey(key) => {
                write!(f, "Project mapping key '{key}' is not a numeric Toggl project id")
            }
        }
    }
}

impl Error for MappingError {}

#[derive(Debug, Clone, Default)]
pub struct ProjectMapping {
    records: BTreeMap<u64, MappingRecord>,
}

impl ProjectMapping {
    pub fn from_raw(raw: &BTreeMap<String, RawMappingRecord>) -> Result<Self, MappingError> {
        let mut records = BTreeMap::new();

        for (key, record) in raw {
            let pid: u64 = key
                .parse()
                .map_err(|_| MappingError::InvalidKey(key.clone()))?;
            let client_id = record.client_id.ok_or_else(|| MappingError::MissingField {
                key: key.clone(),
                field: "client_id",
            })?;
            let project_id = record.project_id.ok_or_else(|| MappingError::MissingField {
                key: key.clone(),
                field: "project_id",
            })?;
            records.insert(
                pid,
                MappingRecord {
                    client_id,
                    project_id,
                },
            );
        }

        Ok(Self { records })
    }

    pub fn contains(&self, pid: u64) -> bool {
        self.records.contains_key(&pid)
    }

    pub fn resolve(&self, pid: u64) -> Option<&MappingRecord> {
        self.records.get(&pid)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
