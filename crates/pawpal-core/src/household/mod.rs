//! Owner and pet value holders.
//!
//! Neither type owns task data. The pet keeps the ids of the tasks recorded
//! for it; the [`crate::Scheduler`] holds the tasks themselves.

mod document;

pub use document::{Household, TaskSpec};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::task::TaskId;

/// Preference key holding the daily time budget in minutes.
pub const AVAILABLE_TIME_KEY: &str = "available_time";

/// Budget used when the owner has not set one.
pub const FULL_DAY_MINUTES: i64 = 24 * 60;

/// Free-form owner preferences.
pub type Preferences = BTreeMap<String, serde_json::Value>;

/// The pet owner and their scheduling preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Snapshot returned by [`Owner::get_info`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerInfo {
    pub name: String,
    pub preferences: Preferences,
}

impl Owner {
    pub fn new(name: impl Into<String>, preferences: Preferences) -> Self {
        Owner {
            name: name.into(),
            preferences,
        }
    }

    /// Merge `new_preferences` into the existing ones, overwriting on collision.
    pub fn update_preferences(&mut self, new_preferences: Preferences) {
        self.preferences.extend(new_preferences);
    }

    pub fn get_info(&self) -> OwnerInfo {
        OwnerInfo {
            name: self.name.clone(),
            preferences: self.preferences.clone(),
        }
    }

    /// Daily time budget; a full day when unset.
    pub fn available_minutes(&self) -> f64 {
        self.available_minutes_or(FULL_DAY_MINUTES)
    }

    /// Daily time budget, falling back to `default` only when the key is
    /// missing. Fractional budgets are kept as-is; a stored value that is not
    /// a number admits nothing.
    pub fn available_minutes_or(&self, default: i64) -> f64 {
        let Some(value) = self.preferences.get(AVAILABLE_TIME_KEY) else {
            return default as f64;
        };
        value.as_f64().unwrap_or_else(|| {
            tracing::warn!(%value, "available_time is not a number, planning with no time");
            0.0
        })
    }

    /// Set the daily time budget.
    pub fn set_available_minutes(&mut self, minutes: i64) {
        self.preferences
            .insert(AVAILABLE_TIME_KEY.to_string(), serde_json::Value::from(minutes));
    }
}

/// The pet being cared for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub species: String,
    pub age: u32,
    /// Ids of tasks recorded for this pet, in insertion order. Filled by the
    /// scheduler, never read from a document.
    #[serde(skip)]
    tasks: Vec<TaskId>,
}

/// Snapshot returned by [`Pet::get_details`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetDetails {
    pub name: String,
    pub species: String,
    pub age: u32,
}

impl Pet {
    pub fn new(name: impl Into<String>, species: impl Into<String>, age: u32) -> Self {
        Pet {
            name: name.into(),
            species: species.into(),
            age,
            tasks: Vec::new(),
        }
    }

    /// Record a task for this pet.
    pub fn add_task(&mut self, id: TaskId) {
        self.tasks.push(id);
    }

    /// Forget a task. Returns whether it was recorded.
    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| *t != id);
        self.tasks.len() != before
    }

    pub fn task_ids(&self) -> &[TaskId] {
        &self.tasks
    }

    /// Partial update. Empty `name`/`species` are ignored; `age` is applied
    /// whenever present, zero included.
    pub fn update_info(&mut self, name: Option<&str>, species: Option<&str>, age: Option<u32>) {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(species) = species.filter(|s| !s.is_empty()) {
            self.species = species.to_string();
        }
        if let Some(age) = age {
            self.age = age;
        }
    }

    pub fn get_details(&self) -> PetDetails {
        PetDetails {
            name: self.name.clone(),
            species: self.species.clone(),
            age: self.age,
        }
    }
}
