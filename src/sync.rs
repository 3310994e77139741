use std::error::Error;
use std::fmt;

use crate::dates::RunWindow;
use crate::invoice_ninja::NinjaError;
use crate::mapping::ProjectMapping;
use crate::models::{DetailedReport, Task, TimeEntry, Workspace};
use crate::payload::{build_task, PayloadError};
use crate::toggl::TogglError;

pub trait TimeReportSource {
    fn workspaces(&self) -> Result<Vec<Workspace>, TogglError>;

    fn detailed_report(
        &self,
        workspace_id: u64,
        window: &RunWindow,
    ) -> Result<DetailedReport, TogglError>;
}

pub trait TaskSink {
    fn save_new_task(&self, task: &Task) -> Result<(), NinjaError>;
}

#[derive(Debug)]
pub enum SyncError {
    NoWorkspaces,
    Toggl(TogglError),
    InvoiceNinja(NinjaError),
    Payload(PayloadError),
    Serialize(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::NoWorkspaces => write!(f, "No workspaces to sync."),
            SyncError::Toggl(err) => write!(f, "{err}"),
            SyncError::InvoiceNinja(err) => write!(f, "{err}"),
            SyncError::Payload(err) => write!(f, "{err}"),
            SyncError::Serialize(message) => write!(f, "Serialize error: {message}"),
        }
    }
}

impl Error for SyncError {}

impl From<TogglError> for SyncError {
    fn from(err: TogglError) -> Self {
        SyncError::Toggl(err)
    }
}

impl From<NinjaError> for SyncError {
    fn from(err: NinjaError) -> Self {
        SyncError::InvoiceNinja(err)
    }
}

impl From<PayloadError> for SyncError {
    fn from(err: PayloadError) -> Self {
        SyncError::Payload(err)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub submitted: u32,
    pub previewed: u32,
    pub skipped: u32,
}

pub fn is_eligible(entry: &TimeEntry, mapping: &ProjectMapping) -> bool {
    entry.pid.is_some_and(|pid| mapping.contains(pid))
}

pub struct Syncer<'a, S, K> {
    source: &'a S,
    sink: &'a K,
    mapping: &'a ProjectMapping,
    dry_run: bool,
}

impl<'a, S: TimeReportSource, K: TaskSink> Syncer<'a, S, K> {
    pub fn new(source: &'a S, sink: &'a K, mapping: &'a ProjectMapping, dry_run: bool) -> Self {
        Self {
            source,
            sink,
            mapping,
            dry_run,
        }
    }

    pub fn run(&self, window: &RunWindow) -> Result<SyncOutcome, SyncError> {
        let workspaces = self.source.workspaces()?;
        if workspaces.is_empty() {
            return Err(SyncError::NoWorkspaces);
        }

        let mut outcome = SyncOutcome::default();

        for workspace in &workspaces {
            log::debug!(
                "fetching detailed report for workspace {} ({})",
                workspace.id,
                workspace.name
            );
            let report = self.source.detailed_report(workspace.id, window)?;

            for entry in &report.data {
                if !is_eligible(entry, self.mapping) {
                    outcome.skipped += 1;
                    continue;
                }

                self.send(entry, &mut outcome)?;
                println!(
                    "TimeEntry ({}/{} - {}) sent to InvoiceNinja",
                    entry.client.as_deref().unwrap_or(""),
                    entry.project.as_deref().unwrap_or(""),
                    entry.description
                );
            }
        }

        Ok(outcome)
    }

    fn send(&self, entry: &TimeEntry, outcome: &mut SyncOutcome) -> Result<(), SyncError> {
        let task = build_task(entry, self.mapping)?;

        if self.dry_run {
            let json = serde_json::to_string(&task)
                .map_err(|err| SyncError::Serialize(err.to_string()))?;
            println!("Would have sent {json} to InvoiceNinja");
            outcome.previewed += 1;
            return Ok(());
        }

        self.sink.save_new_task(&task)?;
        outcome.submitted += 1;
        Ok(())
    }
}
