//! Core library for an employee day-task tracker.
//!
//! Employees are assigned tasks with a time range, subject to a daily
//! 8-hour allocation rule. This crate provides the domain models, the
//! pure validation logic behind that rule, and the client for the
//! task-store REST service — everything a presentation layer needs
//! except the presentation itself.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Employee`, `Task`, `TaskDraft`, `TimeRange`
//! - **`validation`**: The daily-quota validator — `validate_range`,
//!   `remaining_hours`, day bucketing
//! - **`client`**: Async REST client for the task store, with per-employee
//!   cache invalidation
//! - **`countdown`**: Once-per-second remaining-time ticker with cancellation
//! - **`config`**: Process-environment configuration (API/media URLs, title)
//!
//! # Time Model
//!
//! All timestamps are `chrono::DateTime<Utc>`. Calendar-day bucketing
//! compares UTC dates; converting wall-clock input to UTC is the caller's
//! responsibility.

pub mod client;
pub mod config;
pub mod countdown;
pub mod models;
pub mod validation;
