//! Domain models.
//!
//! Core data types for the day-task tracker: employees, the tasks
//! assigned to them, and the time ranges those tasks occupy.
//!
//! All types (de)serialize to the task store's JSON wire format
//! (camelCase field names, RFC 3339 timestamps).

mod employee;
mod task;

pub use employee::{Employee, NewEmployee};
pub use task::{Task, TaskDraft, TimeRange};
