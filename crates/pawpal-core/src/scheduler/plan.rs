//! Greedy daily plan.
//!
//! Tasks are visited once, highest priority first (ties in insertion order),
//! and accepted while they still fit in the remaining budget. A skipped task
//! is never reconsidered.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

use crate::task::{Task, TaskId};

/// Outcome for one task visited by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PlanDecision {
    Added {
        task_id: TaskId,
        name: String,
        priority: i32,
        duration: u32,
    },
    Skipped {
        task_id: TaskId,
        name: String,
    },
}

impl PlanDecision {
    pub fn task_id(&self) -> TaskId {
        match self {
            PlanDecision::Added { task_id, .. } | PlanDecision::Skipped { task_id, .. } => *task_id,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, PlanDecision::Added { .. })
    }
}

impl fmt::Display for PlanDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanDecision::Added {
                name,
                priority,
                duration,
                ..
            } => write!(f, "Added '{name}' (priority {priority}, {duration} min)"),
            PlanDecision::Skipped { name, .. } => {
                write!(f, "Skipped '{name}' (not enough time left)")
            }
        }
    }
}

/// The most recently generated plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Accepted tasks, in plan order
    pub task_ids: Vec<TaskId>,
    /// One entry per visited task, in traversal order
    pub decisions: Vec<PlanDecision>,
    /// Budget the plan was built against
    pub available_minutes: f64,
    /// Sum of accepted durations
    pub time_used: i64,
}

impl DailyPlan {
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    pub fn time_remaining(&self) -> f64 {
        self.available_minutes - self.time_used as f64
    }

    /// Newline-joined decision lines; empty when nothing was visited.
    pub fn explanation(&self) -> String {
        self.decisions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build a plan over `tasks` for the given budget.
pub(crate) fn build_plan(tasks: &[Task], available_minutes: f64, skip_completed: bool) -> DailyPlan {
    let mut ordered: Vec<&Task> = tasks
        .iter()
        .filter(|t| !(skip_completed && t.completed))
        .collect();
    // Stable: equal priorities keep insertion order.
    ordered.sort_by_key(|t| Reverse(t.priority));

    let mut plan = DailyPlan {
        available_minutes,
        ..DailyPlan::default()
    };

    for task in ordered {
        let duration = i64::from(task.duration);
        let decision = if (plan.time_used + duration) as f64 <= available_minutes {
            plan.time_used += duration;
            plan.task_ids.push(task.id);
            PlanDecision::Added {
                task_id: task.id,
                name: task.name.clone(),
                priority: task.priority,
                duration: task.duration,
            }
        } else {
            PlanDecision::Skipped {
                task_id: task.id,
                name: task.name.clone(),
            }
        };
        tracing::debug!(task = %task.id, "{decision}");
        plan.decisions.push(decision);
    }

    plan
}
