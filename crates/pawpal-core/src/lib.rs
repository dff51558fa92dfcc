//! # PawPal Core Library
//!
//! Daily care planning for one owner and one pet. All planning logic lives
//! here; the `pawpal` CLI is a thin driver over the same library.
//!
//! ## Architecture
//!
//! - **Task**: care item with duration, priority, optional time label, due
//!   date and recurrence; completing a recurring task yields its successor
//! - **Household**: owner (time budget preference) and pet value holders,
//!   plus the scenario document used to seed a scheduler
//! - **Scheduler**: single owner of the task collection; greedy plan
//!   generation, time sorting, filtering, completion and conflict detection
//! - **Config**: TOML planner configuration
//!
//! ## Key Components
//!
//! - [`Scheduler`]: planning service
//! - [`Task`]: care task entity
//! - [`PlannerConfig`]: configuration management

pub mod config;
pub mod error;
pub mod household;
pub mod scheduler;
pub mod task;

pub use config::PlannerConfig;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use household::{Household, Owner, OwnerInfo, Pet, PetDetails, Preferences};
pub use scheduler::{DailyPlan, PlanDecision, Scheduler, SchedulerOptions, TaskInterval};
pub use task::{Recurrence, Task, TaskId, TimeOrdering};
