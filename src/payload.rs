use std::error::Error;
use std::fmt;

use crate::mapping::ProjectMapping;
use crate::models::{Task, TimeEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    MissingProjectId,
    UnmappedProject(u64),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::MissingProjectId => {
                write!(f, "Time entry has no project id")
            }
            PayloadError::UnmappedProject(pid) => {
                write!(f, "No mapping record for Toggl project {pid}")
            }
        }
    }
}

impl Error for PayloadError {}

pub fn build_task(entry: &TimeEntry, mapping: &ProjectMapping) -> Result<Task, PayloadError> {
    let pid = entry.pid.ok_or(PayloadError::MissingProjectId)?;
    let record = mapping
        .resolve(pid)
        .ok_or(PayloadError::UnmappedProject(pid))?;

    Ok(Task {
        description: entry.description.clone(),
        time_log: vec![[entry.start.timestamp(), entry.end.timestamp()]],
        client_id: record.client_id,
        project_id: record.project_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::collections::BTreeMap;

    fn entry(pid: Option<u64>, description: &str, start: i64, end: i64) -> TimeEntry {
        TimeEntry {
            pid,
            description: description.to_string(),
            start: DateTime::from_timestamp(start, 0).unwrap(),
            end: DateTime::from_timestamp(end, 0).unwrap(),
            client: None,
            project: None,
        }
    }

    fn mapping() -> ProjectMapping {
        let raw: BTreeMap<String, crate::mapping::RawMappingRecord> =
            serde_json::from_str(r#"{"42": {"client_id": 5, "project_id": 9}}"#).unwrap();
        ProjectMapping::from_raw(&raw).unwrap()
    }

    #[test]
    fn builds_task_from_entry_and_record() {
        let task = build_task(&entry(Some(42), "Fix bug", 1000, 2000), &mapping()).unwrap();
        assert_eq!(
            task,
            Task {
                description: "Fix bug".to_string(),
                time_log: vec![[1000, 2000]],
                client_id: 5,
                project_id: 9,
            }
        );
    }

    #[test]
    fn description_is_copied_verbatim() {
        let task = build_task(&entry(Some(42), "  padded  ", 1000, 2000), &mapping()).unwrap();
        assert_eq!(task.description, "  padded  ");
    }

    #[test]
    fn time_log_serializes_as_array_of_arrays() {
        let task = build_task(&entry(Some(42), "Fix bug", 1000, 2000), &mapping()).unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["time_log"], serde_json::json!([[1000, 2000]]));
    }

    #[test]
    fn unmapped_project_is_an_error() {
        let err = build_task(&entry(Some(99), "Fix bug", 1000, 2000), &mapping()).unwrap_err();
        assert_eq!(err, PayloadError::UnmappedProject(99));
    }

    #[test]
    fn entry_without_project_id_is_an_error() {
        let err = build_task(&entry(None, "Fix bug", 1000, 2000), &mapping()).unwrap_err();
        assert_eq!(err, PayloadError::MissingProjectId);
    }
}
