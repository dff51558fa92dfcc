//! Pairwise overlap detection between dated tasks.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Half-open interval `[start, end)` occupied by a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TaskInterval {
    /// Interval of a task with a due date; `None` otherwise.
    pub fn of(task: &Task) -> Option<Self> {
        let start = task.due_date?;
        Some(TaskInterval {
            start,
            end: start + Duration::minutes(i64::from(task.duration)),
        })
    }

    /// Strict overlap; intervals that only touch do not overlap.
    pub fn overlaps(&self, other: &TaskInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Minutes shared by both intervals (0 when disjoint).
    pub fn overlap_minutes(&self, other: &TaskInterval) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end - start).num_minutes().max(0)
    }
}

/// Every overlapping pair among tasks with a due date, in `(i, j)`, `i < j`
/// discovery order over the input sequence.
pub(crate) fn find_conflicts(tasks: &[Task]) -> Vec<(&Task, &Task)> {
    let dated: Vec<(&Task, TaskInterval)> = tasks
        .iter()
        .filter_map(|t| TaskInterval::of(t).map(|iv| (t, iv)))
        .collect();

    let mut conflicts = Vec::new();
    for (i, (first, first_iv)) in dated.iter().enumerate() {
        for (second, second_iv) in &dated[i + 1..] {
            if first_iv.overlaps(second_iv) {
                tracing::debug!(
                    first = %first.name,
                    second = %second.name,
                    overlap_minutes = first_iv.overlap_minutes(second_iv),
                    "conflict detected"
                );
                conflicts.push((*first, *second));
            }
        }
    }
    conflicts
}
