//! Household scenario document.
//!
//! A TOML (or JSON) description of one owner, one pet and their tasks, used
//! to seed a [`Scheduler`]. It is read-only input; nothing writes it back.
//!
//! ```toml
//! [owner]
//! name = "Alex"
//! [owner.preferences]
//! available_time = 180
//!
//! [pet]
//! name = "Buddy"
//! species = "Dog"
//! age = 5
//!
//! [[tasks]]
//! name = "Morning walk"
//! duration = 30
//! priority = 3
//! time = "08:00"
//! recurrence = "daily"
//! due_date = "2024-02-14T08:00"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Owner, Pet};
use crate::error::{Result, ValidationError};
use crate::scheduler::{Scheduler, SchedulerOptions};
use crate::task::{parse_due_date, Recurrence, Task};

/// One task entry of a household document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub duration: u32,
    pub priority: i32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub recurrence: Option<String>,
    /// `YYYY-MM-DDTHH:MM[:SS]`
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TaskSpec {
    /// Build the task, validating recurrence and due date.
    pub fn to_task(&self) -> Result<Task, ValidationError> {
        let recurrence = match self.recurrence.as_deref() {
            Some(label) => label.parse::<Recurrence>()?,
            None => Recurrence::None,
        };

        let mut task = Task::new(self.name.clone(), self.duration, self.priority)
            .with_recurrence(recurrence)
            .with_completed(self.completed);
        if let Some(time) = &self.time {
            task = task.with_time(time.clone());
        }
        if let Some(due) = &self.due_date {
            task = task.with_due_date(parse_due_date(due)?);
        }
        Ok(task)
    }
}

/// Owner, pet and tasks as read from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub owner: Owner,
    pub pet: Pet,
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
}

impl Household {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a household file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let household = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            tasks = household.tasks.len(),
            "loaded household"
        );
        Ok(household)
    }

    /// Build a scheduler holding every task of the document, in file order.
    pub fn into_scheduler(self, options: SchedulerOptions) -> Result<Scheduler> {
        let tasks = self
            .tasks
            .iter()
            .map(TaskSpec::to_task)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scheduler::with_tasks(self.owner, self.pet, tasks).with_options(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[owner]
name = "Alex"
[owner.preferences]
available_time = 180

[pet]
name = "Buddy"
species = "Dog"
age = 5

[[tasks]]
name = "Evening walk"
duration = 30
priority = 2
time = "18:00"

[[tasks]]
name = "Morning walk"
duration = 30
priority = 3
time = "08:00"
completed = true
recurrence = "daily"
due_date = "2024-02-14T08:00"
"#;

    #[test]
    fn parses_toml_household() {
        let household = Household::from_toml_str(SAMPLE).unwrap();
        assert_eq!(household.owner.name, "Alex");
        assert_eq!(household.owner.available_minutes(), 180.0);
        assert_eq!(household.pet.get_details().age, 5);
        assert_eq!(household.tasks.len(), 2);
        assert!(household.tasks[1].completed);
    }

    #[test]
    fn into_scheduler_keeps_file_order_and_pet_list() {
        let scheduler = Household::from_toml_str(SAMPLE)
            .unwrap()
            .into_scheduler(SchedulerOptions::default())
            .unwrap();

        let names: Vec<_> = scheduler.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Evening walk", "Morning walk"]);
        assert_eq!(scheduler.pet().task_ids().len(), 2);
        assert_eq!(scheduler.tasks()[1].recurrence, Recurrence::Daily);
        assert!(scheduler.tasks()[1].due_date.is_some());
    }

    #[test]
    fn float_budget_limits_the_plan() {
        let doc = SAMPLE.replace("available_time = 180", "available_time = 60.0")
            + "\n[[tasks]]\nname = \"Groom\"\nduration = 120\npriority = 5\n";
        let mut scheduler = Household::from_toml_str(&doc)
            .unwrap()
            .into_scheduler(SchedulerOptions::default())
            .unwrap();

        let names: Vec<_> = scheduler
            .generate_plan()
            .iter()
            .map(|t| t.name.clone())
            .collect();
        assert_eq!(names, ["Morning walk", "Evening walk"]);
        assert_eq!(scheduler.plan().available_minutes, 60.0);
        assert!(scheduler.explain_plan().starts_with("Skipped 'Groom'"));
    }

    #[test]
    fn document_pet_task_ids_are_ignored() {
        let doc = SAMPLE.replace(
            "age = 5",
            "age = 5\ntasks = [\"00000000-0000-0000-0000-000000000000\"]",
        );
        let scheduler = Household::from_toml_str(&doc)
            .unwrap()
            .into_scheduler(SchedulerOptions::default())
            .unwrap();

        assert_eq!(scheduler.pet().task_ids().len(), 2);
        assert_eq!(scheduler.pet_tasks().len(), 2);
    }

    #[test]
    fn rejects_unknown_recurrence() {
        let bad = SAMPLE.replace("\"daily\"", "\"hourly\"");
        let result = Household::from_toml_str(&bad)
            .unwrap()
            .into_scheduler(SchedulerOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"owner": {{"name": "Sam"}}, "pet": {{"name": "Tom", "species": "cat", "age": 2}},
               "tasks": [{{"name": "Feed", "duration": 10, "priority": 1}}]}}"#
        )
        .unwrap();

        let household = Household::load(file.path()).unwrap();
        assert_eq!(household.owner.available_minutes(), 1440.0);
        assert_eq!(household.tasks[0].name, "Feed");
    }
}
