//! Care task entity and its recurrence roll-forward rule.
//!
//! A [`Task`] is a single care item (walk, feeding, grooming...) with the
//! attributes the planner needs: duration, priority, an optional time-of-day
//! label and an optional due instant. Completing a recurring task never
//! rewrites it; it produces a fresh successor the caller decides where to
//! store (see [`crate::Scheduler::complete_task`]).

pub mod time_label;

use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub use time_label::{compare_labels, parse_time_label, TimeOrdering};

/// Stable task identifier.
///
/// Successors created by recurrence always get a fresh id, so ids identify
/// one occurrence, not the recurring series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(uuid::Uuid);

impl TaskId {
    /// Generate a new random id.
    pub fn new() -> Self {
        TaskId(uuid::Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        TaskId::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// How often a task repeats once completed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// One-off task (default)
    #[default]
    None,
    /// Repeats the next day
    Daily,
    /// Repeats seven days later
    Weekly,
}

impl Recurrence {
    /// Offset between an occurrence and its successor.
    pub fn period(&self) -> Option<Duration> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily => Some(Duration::days(1)),
            Recurrence::Weekly => Some(Duration::days(7)),
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::None => write!(f, "none"),
            Recurrence::Daily => write!(f, "daily"),
            Recurrence::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for Recurrence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            _ => Err(ValidationError::UnknownRecurrence(s.to_string())),
        }
    }
}

/// A pet care task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    #[serde(default)]
    pub id: TaskId,
    /// Display label
    pub name: String,
    /// Duration in minutes
    pub duration: u32,
    /// Higher number = more important
    pub priority: i32,
    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,
    /// Time-of-day label ("09:00", "after dinner"); only used for ordering
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Start instant used for conflict detection and recurrence
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
}

impl Task {
    /// Create an incomplete, non-recurring task with no time label or due date.
    pub fn new(name: impl Into<String>, duration: u32, priority: i32) -> Self {
        Task {
            id: TaskId::new(),
            name: name.into(),
            duration,
            priority,
            completed: false,
            time: None,
            recurrence: Recurrence::None,
            due_date: None,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDateTime) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Partial update.
    ///
    /// `duration` and `priority` are applied whenever present, zero included.
    /// An empty `name` is ignored.
    pub fn edit(&mut self, name: Option<&str>, duration: Option<u32>, priority: Option<i32>) {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(duration) = duration {
            self.duration = duration;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
    }

    /// True iff the task fits in `available_minutes`.
    pub fn satisfies_time_budget(&self, available_minutes: i64) -> bool {
        i64::from(self.duration) <= available_minutes
    }

    /// Instant at which the task ends, if it has a due date.
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.due_date
            .map(|start| start + Duration::minutes(i64::from(self.duration)))
    }

    /// Mark the task complete, rolling recurring tasks forward from the
    /// current local time when no due date is set.
    ///
    /// Returns the next occurrence for daily/weekly tasks, `None` otherwise.
    pub fn mark_complete(&mut self) -> Option<Task> {
        self.mark_complete_at(Local::now().naive_local())
    }

    /// Same as [`Task::mark_complete`] with an explicit "now".
    ///
    /// Completion is idempotent on the flag; every call on a recurring task
    /// yields a new successor.
    pub fn mark_complete_at(&mut self, now: NaiveDateTime) -> Option<Task> {
        self.completed = true;

        let period = self.recurrence.period()?;
        let base = self.due_date.unwrap_or(now);

        Some(Task {
            id: TaskId::new(),
            name: self.name.clone(),
            duration: self.duration,
            priority: self.priority,
            completed: false,
            time: self.time.clone(),
            recurrence: self.recurrence,
            due_date: Some(base + period),
        })
    }
}

/// Parse a naive local timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]` and the same with a space separator.
pub fn parse_due_date(input: &str) -> Result<NaiveDateTime, ValidationError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    let trimmed = input.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "due_date".to_string(),
            message: format!("cannot parse '{input}' as YYYY-MM-DDTHH:MM"),
        })
}
