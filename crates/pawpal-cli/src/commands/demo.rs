//! Scripted walk-through over a built-in household.

use chrono::{Local, NaiveDateTime};
use pawpal_core::household::AVAILABLE_TIME_KEY;
use pawpal_core::{Owner, Pet, PlannerConfig, Preferences, Recurrence, Scheduler, Task, TaskInterval};

use super::print_tasks;

fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "-".repeat(60));
}

fn today_at(hour: u32, minute: u32) -> Option<NaiveDateTime> {
    Local::now().date_naive().and_hms_opt(hour, minute, 0)
}

pub fn run(config: &PlannerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let owner = Owner::new(
        "Alex",
        Preferences::from([(AVAILABLE_TIME_KEY.to_string(), serde_json::json!(180))]),
    );
    let pet = Pet::new("Buddy", "Dog", 5);

    let mut morning_walk = Task::new("Morning walk", 30, 3).with_time("08:00");
    let mut lunch = Task::new("Lunch feeding", 15, 3).with_time("12:00");
    morning_walk.mark_complete();
    lunch.mark_complete();

    let tasks = vec![
        Task::new("Evening walk", 30, 2).with_time("18:00"),
        morning_walk,
        lunch,
        Task::new("Afternoon play", 45, 1).with_time("15:30"),
        Task::new("Grooming session", 60, 2).with_time("10:00"),
        Task::new("Bedtime routine", 20, 2).with_time("21:00"),
    ];
    let mut scheduler =
        Scheduler::with_tasks(owner, pet, tasks).with_options(config.scheduler_options());
    let pet_name = scheduler.pet().name.clone();

    section("Tasks as added");
    print_tasks(&scheduler.tasks().iter().collect::<Vec<_>>(), false)?;

    section("Sorted by time");
    print_tasks(&scheduler.sort_by_time(), false)?;

    section("Completed tasks");
    print_tasks(&scheduler.filter_tasks(Some(true), None), false)?;

    section("Incomplete tasks");
    print_tasks(&scheduler.filter_tasks(Some(false), None), false)?;

    section(&format!("Tasks for {pet_name}"));
    print_tasks(&scheduler.filter_tasks(None, Some(pet_name.as_str())), false)?;

    section("Generated plan");
    scheduler.generate_plan();
    print_tasks(&scheduler.plan_tasks(), false)?;
    println!();
    println!("{}", scheduler.explain_plan());

    section("Recurring tasks");
    let daily = scheduler.add_task(
        Task::new("Daily morning walk", 30, 3)
            .with_time("07:00")
            .with_recurrence(Recurrence::Daily)
            .with_due_date(today_at(7, 0).ok_or("invalid demo time")?),
    );
    let weekly = scheduler.add_task(
        Task::new("Weekly vet checkup", 45, 2)
            .with_time("14:00")
            .with_recurrence(Recurrence::Weekly)
            .with_due_date(today_at(14, 0).ok_or("invalid demo time")?),
    );
    println!("Total tasks before completion: {}", scheduler.len());
    for id in [daily, weekly] {
        if let Some(next) = scheduler.complete_task(id)? {
            let due = next
                .due_date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            println!("  '{}' ({}) next due {due}", next.name, next.recurrence);
        }
    }
    println!("Total tasks after completion: {}", scheduler.len());

    section("Conflict detection");
    scheduler.add_task(
        Task::new("Dog training", 60, 3)
            .with_time("10:00")
            .with_due_date(today_at(10, 0).ok_or("invalid demo time")?),
    );
    scheduler.add_task(
        Task::new("Vet appointment", 45, 3)
            .with_time("10:30")
            .with_due_date(today_at(10, 30).ok_or("invalid demo time")?),
    );
    scheduler.add_task(
        Task::new("Grooming", 30, 2)
            .with_time("12:00")
            .with_due_date(today_at(12, 0).ok_or("invalid demo time")?),
    );

    let conflicts = scheduler.detect_conflicts();
    if conflicts.is_empty() {
        println!("No conflicts detected.");
    }
    for (a, b) in conflicts {
        let (Some(ia), Some(ib)) = (TaskInterval::of(a), TaskInterval::of(b)) else {
            continue;
        };
        println!(
            "CONFLICT: {} {}-{} / {} {}-{}",
            a.name,
            ia.start.format("%H:%M"),
            ia.end.format("%H:%M"),
            b.name,
            ib.start.format("%H:%M"),
            ib.end.format("%H:%M"),
        );
    }
    Ok(())
}
