use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailedReport {
    pub data: Vec<TimeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntry {
    pub pid: Option<u64>,
    #[serde(default)]
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub client: Option<String>,
    pub project: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub description: String,
    pub time_log: Vec<[i64; 2]>,
    pub client_id: i64,
    pub project_id: i64,
}
