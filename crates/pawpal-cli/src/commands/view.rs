//! Derived views over a household file: sorting, filtering, conflicts and
//! completion.

use clap::Args;
use pawpal_core::{PlannerConfig, TaskInterval};
use serde_json::json;

use super::{load_scheduler, print_tasks, task_line, HouseholdArgs};

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub household: HouseholdArgs,
    /// Keep only tasks with this completion status
    #[arg(long)]
    pub completed: Option<bool>,
    /// Keep tasks only if the household pet has this name (case-insensitive)
    #[arg(long)]
    pub pet: Option<String>,
}

#[derive(Args)]
pub struct CompleteArgs {
    #[command(flatten)]
    pub household: HouseholdArgs,
    /// Name of the task to complete (first match)
    pub name: String,
}

pub fn sort(args: HouseholdArgs, config: &PlannerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = load_scheduler(&args.file, config)?;
    print_tasks(&scheduler.sort_by_time(), args.json)
}

pub fn filter(args: FilterArgs, config: &PlannerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = load_scheduler(&args.household.file, config)?;
    let tasks = scheduler.filter_tasks(args.completed, args.pet.as_deref());
    print_tasks(&tasks, args.household.json)
}

pub fn conflicts(args: HouseholdArgs, config: &PlannerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = load_scheduler(&args.file, config)?;
    let conflicts = scheduler.detect_conflicts();

    if args.json {
        let output: Vec<_> = conflicts
            .iter()
            .map(|(a, b)| {
                let overlap = match (TaskInterval::of(a), TaskInterval::of(b)) {
                    (Some(ia), Some(ib)) => ia.overlap_minutes(&ib),
                    _ => 0,
                };
                json!({ "first": a, "second": b, "overlap_minutes": overlap })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if conflicts.is_empty() {
        println!("No conflicts detected.");
        return Ok(());
    }

    println!("Found {} conflict(s):", conflicts.len());
    for (a, b) in &conflicts {
        for task in [a, b] {
            if let Some(interval) = TaskInterval::of(task) {
                println!(
                    "  {} {} - {}",
                    task.name,
                    interval.start.format("%Y-%m-%d %H:%M"),
                    interval.end.format("%H:%M")
                );
            }
        }
        println!();
    }
    Ok(())
}

pub fn complete(args: CompleteArgs, config: &PlannerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut scheduler = load_scheduler(&args.household.file, config)?;
    let id = scheduler
        .find_by_name(&args.name)
        .map(|t| t.id)
        .ok_or_else(|| format!("task not found: {}", args.name))?;

    let successor = scheduler.complete_task(id)?.cloned();

    if args.household.json {
        println!("{}", serde_json::to_string_pretty(&json!({ "next": successor }))?);
        return Ok(());
    }

    match successor {
        Some(next) => {
            println!("Completed '{}'; next occurrence:", args.name);
            println!("{}", task_line(&next));
            if let Some(due) = next.due_date {
                println!("Due: {}", due.format("%Y-%m-%d %H:%M"));
            }
        }
        None => println!("Completed '{}' (one-off, no follow-up)", args.name),
    }
    Ok(())
}
