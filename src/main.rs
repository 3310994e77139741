use std::error::Error;

use chrono::NaiveDate;
use clap::Parser;

mod config;
mod dates;
mod invoice_ninja;
mod mapping;
mod models;
mod payload;
mod sync;
mod toggl;

use dates::RunWindow;
use invoice_ninja::NinjaClient;
use mapping::ProjectMapping;
use sync::{SyncError, Syncer};
use toggl::TogglClient;

#[derive(Debug, Parser)]
#[command(name = "toggl2ninja", version, about = "Syncs Toggl Track time entries into InvoiceNinja as billable tasks")]
struct Cli {
    /// First day of the report window (YYYY-MM-DD, 'today' or 'yesterday')
    #[arg(long, default_value = "yesterday", value_parser = dates::parse_day)]
    since: NaiveDate,

    /// Last day of the report window (YYYY-MM-DD, 'today' or 'yesterday')
    #[arg(long, default_value = "today", value_parser = dates::parse_day)]
    until: NaiveDate,

    /// Build payloads but do not submit them to InvoiceNinja
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = config::load()?;
    let mapping = ProjectMapping::from_raw(&config.projects)?;
    if mapping.is_empty() {
        log::warn!("no projects configured; every time entry will be skipped");
    }
    log::debug!("loaded {} project mappings", mapping.len());

    let window = RunWindow::new(cli.since, cli.until);
    let toggl = TogglClient::new(config.toggl_api_token);
    let ninja = NinjaClient::new(config.invoice_ninja_url, config.invoice_ninja_token);
    let syncer = Syncer::new(&toggl, &ninja, &mapping, cli.dry_run);

    match syncer.run(&window) {
        Ok(outcome) => {
            log::info!(
                "run finished: {} submitted, {} previewed, {} skipped",
                outcome.submitted,
                outcome.previewed,
                outcome.skipped
            );
            Ok(())
        }
        Err(SyncError::NoWorkspaces) => {
            eprintln!("No workspaces to sync.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
