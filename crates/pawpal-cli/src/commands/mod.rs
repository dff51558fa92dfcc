pub mod config;
pub mod demo;
pub mod plan;
pub mod view;

use clap::Args;
use pawpal_core::{Household, PlannerConfig, Scheduler, Task};
use std::path::{Path, PathBuf};

/// Arguments shared by every command that reads a household file.
#[derive(Args)]
pub struct HouseholdArgs {
    /// Household file (TOML, or JSON with a .json extension)
    pub file: PathBuf,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Read a household file into a scheduler configured from `config`.
pub fn load_scheduler(
    path: &Path,
    config: &PlannerConfig,
) -> Result<Scheduler, Box<dyn std::error::Error>> {
    let household = Household::load(path)?;
    Ok(household.into_scheduler(config.scheduler_options())?)
}

/// One table row: status, name, time label, duration and priority.
pub fn task_line(task: &Task) -> String {
    let status = if task.completed { "x" } else { " " };
    format!(
        "[{status}] {:<20} | {:<5} | {:>3} min | Priority: {}",
        task.name,
        task.time.as_deref().unwrap_or("--"),
        task.duration,
        task.priority
    )
}

pub fn print_tasks(tasks: &[&Task], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        return Ok(());
    }
    if tasks.is_empty() {
        println!("(no tasks)");
    }
    for (i, task) in tasks.iter().enumerate() {
        println!("{}. {}", i + 1, task_line(task));
    }
    Ok(())
}
