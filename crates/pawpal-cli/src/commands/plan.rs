//! Daily plan generation for a household file.

use clap::Args;
use pawpal_core::PlannerConfig;
use serde_json::json;

use super::{load_scheduler, print_tasks, HouseholdArgs};

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub household: HouseholdArgs,
    /// Override the owner's available time (minutes)
    #[arg(long)]
    pub budget: Option<i64>,
}

pub fn run(args: PlanArgs, config: &PlannerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut scheduler = load_scheduler(&args.household.file, config)?;
    if let Some(minutes) = args.budget {
        scheduler.owner_mut().set_available_minutes(minutes);
    }

    scheduler.generate_plan();
    let tasks = scheduler.plan_tasks();
    if args.household.json {
        let output = json!({
            "tasks": tasks,
            "explanation": scheduler.plan().decisions.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "time_used": scheduler.plan().time_used,
            "available_minutes": scheduler.plan().available_minutes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_tasks(&tasks, false)?;
    let plan = scheduler.plan();
    println!();
    println!(
        "{} of {} minutes used, {} left",
        plan.time_used,
        plan.available_minutes,
        plan.time_remaining()
    );
    let explanation = scheduler.explain_plan();
    if !explanation.is_empty() {
        println!();
        println!("{explanation}");
    }
    Ok(())
}
