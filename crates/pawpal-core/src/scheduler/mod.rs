//! Daily scheduler for one owner and one pet.
//!
//! The [`Scheduler`] is the single owner of task data. Every structural
//! change (add, remove, recurrence expansion) goes through it and updates
//! the pet's task list in the same call, so the two never drift apart.
//!
//! Views (`sort_by_time`, `filter_tasks`, `detect_conflicts`, `pet_tasks`)
//! borrow from the canonical collection and never fail, even when it is
//! empty.

pub mod conflict;
pub mod plan;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CoreError, Result};
use crate::household::{Owner, Pet, FULL_DAY_MINUTES};
use crate::task::{compare_labels, Task, TaskId, TimeOrdering};

pub use conflict::TaskInterval;
pub use plan::{DailyPlan, PlanDecision};

/// Scheduler behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerOptions {
    /// Comparison used by `sort_by_time`
    pub time_ordering: TimeOrdering,
    /// Leave completed tasks out of generated plans
    pub skip_completed: bool,
    /// Budget used when the owner has no `available_time` preference
    pub default_available_minutes: i64,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            time_ordering: TimeOrdering::Lexical,
            skip_completed: false,
            default_available_minutes: FULL_DAY_MINUTES,
        }
    }
}

/// Task collection plus the plan derived from it.
#[derive(Debug, Clone)]
pub struct Scheduler {
    owner: Owner,
    pet: Pet,
    tasks: Vec<Task>,
    options: SchedulerOptions,
    plan: DailyPlan,
}

impl Scheduler {
    /// Create an empty scheduler with default options.
    pub fn new(owner: Owner, pet: Pet) -> Self {
        Self {
            owner,
            pet,
            tasks: Vec::new(),
            options: SchedulerOptions::default(),
            plan: DailyPlan::default(),
        }
    }

    /// Create a scheduler seeded with `tasks`, in order.
    pub fn with_tasks(owner: Owner, pet: Pet, tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut scheduler = Self::new(owner, pet);
        for task in tasks {
            scheduler.add_task(task);
        }
        scheduler
    }

    pub fn with_options(mut self, options: SchedulerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SchedulerOptions) {
        self.options = options;
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn owner_mut(&mut self) -> &mut Owner {
        &mut self.owner
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn pet_mut(&mut self) -> &mut Pet {
        &mut self.pet
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// First task with exactly this name, in insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Append a task and record it for the pet.
    ///
    /// A task whose id is already held gets a fresh id so every member stays
    /// addressable.
    pub fn add_task(&mut self, mut task: Task) -> TaskId {
        if self.task(task.id).is_some() {
            task.id = TaskId::new();
        }
        let id = task.id;
        self.pet.add_task(id);
        self.tasks.push(task);
        id
    }

    /// Remove a task from both the scheduler and the pet.
    pub fn remove_task(&mut self, id: TaskId) -> Result<Task> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            warn!(task = %id, "remove requested for unknown task");
            return Err(CoreError::TaskNotFound(id));
        };

        self.pet.remove_task(id);
        let removed = self.tasks.remove(index);
        info!(task = %id, name = %removed.name, "task removed");
        Ok(removed)
    }

    /// Tasks recorded for the pet, resolved against the canonical collection.
    pub fn pet_tasks(&self) -> Vec<&Task> {
        self.pet
            .task_ids()
            .iter()
            .filter_map(|id| self.task(*id))
            .collect()
    }

    /// Build a plan from scratch against the owner's time budget and cache it.
    pub fn generate_plan(&mut self) -> Vec<&Task> {
        let available = self
            .owner
            .available_minutes_or(self.options.default_available_minutes);
        self.plan = plan::build_plan(&self.tasks, available, self.options.skip_completed);

        info!(
            planned = self.plan.len(),
            visited = self.plan.decisions.len(),
            time_used = self.plan.time_used,
            available,
            "generated plan"
        );
        self.plan_tasks()
    }

    /// Explanation of the latest plan; empty before the first one.
    pub fn explain_plan(&self) -> String {
        self.plan.explanation()
    }

    /// Latest plan state.
    pub fn plan(&self) -> &DailyPlan {
        &self.plan
    }

    /// Tasks of the latest plan, skipping any removed since.
    pub fn plan_tasks(&self) -> Vec<&Task> {
        self.plan
            .task_ids
            .iter()
            .filter_map(|id| self.task(*id))
            .collect()
    }

    /// Tasks with a time label ordered by that label (stable), followed by
    /// the unlabelled ones in insertion order. `due_date` is not consulted.
    pub fn sort_by_time(&self) -> Vec<&Task> {
        let (mut timed, untimed): (Vec<&Task>, Vec<&Task>) =
            self.tasks.iter().partition(|t| t.time.is_some());

        let ordering = self.options.time_ordering;
        timed.sort_by(|a, b| {
            compare_labels(
                a.time.as_deref().unwrap_or_default(),
                b.time.as_deref().unwrap_or_default(),
                ordering,
            )
        });

        timed.extend(untimed);
        timed
    }

    /// Filter by pet name (does this scheduler belong to that pet?) and then
    /// by completion flag.
    pub fn filter_tasks(&self, completed: Option<bool>, pet_name: Option<&str>) -> Vec<&Task> {
        if let Some(name) = pet_name {
            // Full Unicode case folding; names like "Ümit" must match "ümit".
            if self.pet.name.to_lowercase() != name.to_lowercase() {
                return Vec::new();
            }
        }

        match completed {
            Some(flag) => self.tasks.iter().filter(|t| t.completed == flag).collect(),
            None => self.tasks.iter().collect(),
        }
    }

    /// Complete a task; a recurring task's successor is appended to the
    /// scheduler and the pet and returned.
    pub fn complete_task(&mut self, id: TaskId) -> Result<Option<&Task>> {
        self.complete_task_at(id, Local::now().naive_local())
    }

    /// Same as [`Scheduler::complete_task`] with an explicit "now", used as
    /// the roll-forward base for recurring tasks without a due date.
    pub fn complete_task_at(&mut self, id: TaskId, now: NaiveDateTime) -> Result<Option<&Task>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            warn!(task = %id, "complete requested for unknown task");
            return Err(CoreError::TaskNotFound(id));
        };

        let Some(next) = task.mark_complete_at(now) else {
            info!(task = %id, name = %task.name, "task completed");
            return Ok(None);
        };

        info!(
            task = %id,
            name = %next.name,
            recurrence = %next.recurrence,
            next_due = ?next.due_date,
            "task completed, next occurrence scheduled"
        );
        let next_id = self.add_task(next);
        Ok(self.task(next_id))
    }

    /// Strictly overlapping pairs among tasks with a due date.
    pub fn detect_conflicts(&self) -> Vec<(&Task, &Task)> {
        let conflicts = conflict::find_conflicts(&self.tasks);
        if !conflicts.is_empty() {
            info!(count = conflicts.len(), "schedule conflicts found");
        }
        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{Preferences, AVAILABLE_TIME_KEY};
    use crate::task::Recurrence;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn make_scheduler(budget: Option<i64>) -> Scheduler {
        let mut prefs = Preferences::new();
        if let Some(minutes) = budget {
            prefs.insert(AVAILABLE_TIME_KEY.to_string(), json!(minutes));
        }
        Scheduler::new(Owner::new("Alex", prefs), Pet::new("Buddy", "Dog", 5))
    }

    fn names<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn empty_scheduler_views_are_empty() {
        let mut scheduler = make_scheduler(None);
        assert!(scheduler.generate_plan().is_empty());
        assert_eq!(scheduler.explain_plan(), "");
        assert!(scheduler.sort_by_time().is_empty());
        assert!(scheduler.filter_tasks(None, None).is_empty());
        assert!(scheduler.detect_conflicts().is_empty());
        assert!(scheduler.pet_tasks().is_empty());
    }

    #[test]
    fn explain_before_generate_is_empty() {
        let mut scheduler = make_scheduler(Some(60));
        scheduler.add_task(Task::new("Walk", 30, 2));
        assert_eq!(scheduler.explain_plan(), "");
    }

    #[test]
    fn plan_orders_by_priority_then_insertion() {
        let mut scheduler = make_scheduler(Some(180));
        scheduler.add_task(Task::new("Evening walk", 30, 2));
        scheduler.add_task(Task::new("Morning walk", 30, 3));
        scheduler.add_task(Task::new("Lunch feeding", 15, 3));
        scheduler.add_task(Task::new("Afternoon play", 45, 1));
        scheduler.add_task(Task::new("Grooming session", 60, 2));
        scheduler.add_task(Task::new("Bedtime routine", 20, 2));

        let plan = scheduler.generate_plan();
        assert_eq!(
            names(&plan),
            [
                "Morning walk",
                "Lunch feeding",
                "Evening walk",
                "Grooming session",
                "Bedtime routine",
            ]
        );
        assert_eq!(scheduler.plan().time_used, 155);
        assert!(scheduler
            .explain_plan()
            .ends_with("Skipped 'Afternoon play' (not enough time left)"));
    }

    #[test]
    fn plan_includes_completed_tasks_by_default() {
        let mut scheduler = make_scheduler(Some(60));
        scheduler.add_task(Task::new("Walk", 30, 3).with_completed(true));
        scheduler.add_task(Task::new("Feed", 10, 1));
        assert_eq!(scheduler.generate_plan().len(), 2);

        scheduler.set_options(SchedulerOptions {
            skip_completed: true,
            ..SchedulerOptions::default()
        });
        assert_eq!(names(&scheduler.generate_plan()), ["Feed"]);
    }

    #[test]
    fn default_budget_option_applies_only_when_key_missing() {
        let options = SchedulerOptions {
            default_available_minutes: 20,
            ..SchedulerOptions::default()
        };
        let mut scheduler = make_scheduler(None).with_options(options);
        scheduler.add_task(Task::new("Walk", 30, 3));
        assert!(scheduler.generate_plan().is_empty());

        scheduler.owner_mut().set_available_minutes(30);
        assert_eq!(scheduler.generate_plan().len(), 1);
    }

    #[test]
    fn plan_is_recomputed_each_call() {
        let mut scheduler = make_scheduler(Some(30));
        scheduler.add_task(Task::new("Walk", 30, 3));
        assert_eq!(scheduler.generate_plan().len(), 1);

        scheduler.owner_mut().set_available_minutes(0);
        assert!(scheduler.generate_plan().is_empty());
        assert_eq!(scheduler.explain_plan(), "Skipped 'Walk' (not enough time left)");
    }

    #[test]
    fn sort_by_time_puts_unlabelled_last() {
        let mut scheduler = make_scheduler(None);
        scheduler.add_task(Task::new("A", 10, 1));
        scheduler.add_task(Task::new("B", 10, 1).with_time("08:00"));
        scheduler.add_task(Task::new("C", 10, 1));
        scheduler.add_task(Task::new("D", 10, 1).with_time("18:00"));

        assert_eq!(names(&scheduler.sort_by_time()), ["B", "D", "A", "C"]);
    }

    #[test]
    fn sort_by_time_is_stable_for_equal_labels() {
        let mut scheduler = make_scheduler(None);
        scheduler.add_task(Task::new("Second", 10, 1).with_time("09:00"));
        scheduler.add_task(Task::new("Early", 10, 1).with_time("07:00"));
        scheduler.add_task(Task::new("Third", 10, 1).with_time("09:00"));

        assert_eq!(names(&scheduler.sort_by_time()), ["Early", "Second", "Third"]);
    }

    #[test]
    fn sort_by_time_respects_ordering_option() {
        let mut scheduler = make_scheduler(None);
        scheduler.add_task(Task::new("Ten", 10, 1).with_time("10:00"));
        scheduler.add_task(Task::new("Nine", 10, 1).with_time("9:00"));

        assert_eq!(names(&scheduler.sort_by_time()), ["Ten", "Nine"]);

        scheduler.set_options(SchedulerOptions {
            time_ordering: TimeOrdering::Chronological,
            ..SchedulerOptions::default()
        });
        assert_eq!(names(&scheduler.sort_by_time()), ["Nine", "Ten"]);
        assert_eq!(scheduler.tasks()[1].time.as_deref(), Some("9:00"));
    }

    #[test]
    fn filter_by_pet_name_is_case_insensitive() {
        let mut scheduler = make_scheduler(None);
        scheduler.add_task(Task::new("Walk", 30, 3).with_completed(true));
        scheduler.add_task(Task::new("Feed", 10, 1));

        assert_eq!(scheduler.filter_tasks(None, Some("buddy")).len(), 2);
        assert!(scheduler.filter_tasks(None, Some("Max")).is_empty());
        assert!(scheduler.filter_tasks(Some(true), Some("Max")).is_empty());
        assert!(scheduler.filter_tasks(Some(false), Some("Max")).is_empty());
    }

    #[test]
    fn filter_by_non_ascii_pet_name() {
        let mut scheduler = make_scheduler(None);
        scheduler.pet_mut().update_info(Some("Ümit"), None, None);
        scheduler.add_task(Task::new("Walk", 30, 3));

        assert_eq!(scheduler.filter_tasks(None, Some("ümit")).len(), 1);
        assert_eq!(scheduler.filter_tasks(None, Some("ÜMIT")).len(), 1);
        assert!(scheduler.filter_tasks(None, Some("umit")).is_empty());
    }

    #[test]
    fn filter_by_completion() {
        let mut scheduler = make_scheduler(None);
        scheduler.add_task(Task::new("Walk", 30, 3).with_completed(true));
        scheduler.add_task(Task::new("Feed", 10, 1));
        scheduler.add_task(Task::new("Groom", 60, 2));

        assert_eq!(names(&scheduler.filter_tasks(Some(true), None)), ["Walk"]);
        assert_eq!(
            names(&scheduler.filter_tasks(Some(false), Some("BUDDY"))),
            ["Feed", "Groom"]
        );
        assert_eq!(scheduler.filter_tasks(None, None).len(), 3);
    }

    #[test]
    fn complete_recurring_task_appends_to_both_lists() {
        let mut scheduler = make_scheduler(None);
        let id = scheduler.add_task(
            Task::new("Walk", 30, 3)
                .with_recurrence(Recurrence::Daily)
                .with_due_date(at(2024, 2, 14, 8, 0)),
        );
        let tasks_before = scheduler.len();
        let pet_before = scheduler.pet().task_ids().len();

        let next_id = scheduler.complete_task(id).unwrap().unwrap().id;

        assert_eq!(scheduler.len(), tasks_before + 1);
        assert_eq!(scheduler.pet().task_ids().len(), pet_before + 1);
        assert_eq!(scheduler.pet().task_ids().last(), Some(&next_id));
        assert!(scheduler.task(id).unwrap().completed);
        assert_eq!(
            scheduler.task(next_id).unwrap().due_date,
            Some(at(2024, 2, 15, 8, 0))
        );
    }

    #[test]
    fn complete_one_off_task_adds_nothing() {
        let mut scheduler = make_scheduler(None);
        let id = scheduler.add_task(Task::new("Bath", 20, 1));

        assert!(scheduler.complete_task(id).unwrap().is_none());
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.task(id).unwrap().completed);
    }

    #[test]
    fn complete_unknown_task_is_rejected() {
        let mut scheduler = make_scheduler(None);
        scheduler.add_task(Task::new("Walk", 30, 3).with_recurrence(Recurrence::Daily));

        let stray = TaskId::new();
        let err = scheduler.complete_task(stray).unwrap_err();
        assert!(matches!(err, CoreError::TaskNotFound(id) if id == stray));
        assert_eq!(scheduler.len(), 1);
        assert!(!scheduler.tasks()[0].completed);
    }

    #[test]
    fn complete_without_due_date_uses_injected_now() {
        let mut scheduler = make_scheduler(None);
        let id = scheduler.add_task(Task::new("Walk", 30, 3).with_recurrence(Recurrence::Weekly));

        let next = scheduler
            .complete_task_at(id, at(2024, 3, 1, 9, 0))
            .unwrap()
            .unwrap();
        assert_eq!(next.due_date, Some(at(2024, 3, 8, 9, 0)));
    }

    #[test]
    fn remove_task_updates_both_lists() {
        let mut scheduler = make_scheduler(None);
        let walk = scheduler.add_task(Task::new("Walk", 30, 3));
        let feed = scheduler.add_task(Task::new("Feed", 10, 1));

        let removed = scheduler.remove_task(walk).unwrap();
        assert_eq!(removed.name, "Walk");
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.pet().task_ids(), &[feed]);
        assert!(scheduler.remove_task(walk).is_err());
    }

    #[test]
    fn add_task_with_duplicate_id_gets_fresh_id() {
        let mut scheduler = make_scheduler(None);
        let task = Task::new("Walk", 30, 3);
        let first = scheduler.add_task(task.clone());
        let second = scheduler.add_task(task);

        assert_ne!(first, second);
        assert_eq!(scheduler.len(), 2);
    }

    #[test]
    fn plan_tasks_skip_removed_members() {
        let mut scheduler = make_scheduler(None);
        let walk = scheduler.add_task(Task::new("Walk", 30, 3));
        scheduler.add_task(Task::new("Feed", 10, 1));
        scheduler.generate_plan();

        scheduler.remove_task(walk).unwrap();
        assert_eq!(names(&scheduler.plan_tasks()), ["Feed"]);
    }

    #[test]
    fn pet_tasks_view_follows_scheduler() {
        let mut scheduler = make_scheduler(None);
        scheduler.add_task(Task::new("Walk", 30, 3));
        scheduler.pet_mut().add_task(TaskId::new());

        assert_eq!(names(&scheduler.pet_tasks()), ["Walk"]);
    }

    #[test]
    fn task_mut_edits_in_place() {
        let mut scheduler = make_scheduler(None);
        let id = scheduler.add_task(Task::new("Walk", 30, 3));

        scheduler.task_mut(id).unwrap().edit(Some("Long walk"), Some(45), None);
        assert_eq!(scheduler.find_by_name("Long walk").unwrap().duration, 45);
        assert!(scheduler.find_by_name("Walk").is_none());
    }

    #[test]
    fn conflicts_require_strict_overlap() {
        let mut scheduler = make_scheduler(None);
        scheduler.add_task(Task::new("Training", 60, 3).with_due_date(at(2024, 1, 1, 10, 0)));
        scheduler.add_task(Task::new("Walk", 60, 2).with_due_date(at(2024, 1, 1, 11, 0)));
        assert!(scheduler.detect_conflicts().is_empty());

        scheduler.add_task(Task::new("Vet", 45, 3).with_due_date(at(2024, 1, 1, 10, 30)));
        let conflicts = scheduler.detect_conflicts();
        let pairs: Vec<_> = conflicts
            .iter()
            .map(|(a, b)| (a.name.as_str(), b.name.as_str()))
            .collect();
        assert_eq!(pairs, [("Training", "Vet"), ("Walk", "Vet")]);
    }
}
