//! Daily task-duration validation.
//!
//! The tracker enforces an 8-hour allocation rule per employee per
//! calendar day. Given a candidate time range and the employee's
//! existing tasks, the validator detects:
//! - Inverted or zero-length ranges
//! - Single tasks longer than 8 hours
//! - Day totals that exceed the 8-hour quota
//!
//! Everything here is pure: no I/O, no hidden state, deterministic for
//! identical inputs. The presentation layer calls [`validate_range`] on
//! every field change and again before submission, so the same inputs
//! must always produce the same violation list.
//!
//! # Day bucketing
//!
//! Tasks are grouped by the UTC calendar date of their `from` timestamp.
//! When editing an existing task, its id is passed as `exclude_id` so it
//! does not count against itself.
//!
//! # Rounding
//!
//! Durations are exact minutes. The single-task cap compares exactly
//! (8h00m passes, 8h01m fails). The daily total is rounded to the
//! nearest whole hour before comparing against the quota, so a day
//! summing to 8h24m still passes while 8h30m fails.

use chrono::{DateTime, Utc};

use crate::models::{Task, TimeRange};

/// Hours an employee may be allocated per calendar day.
pub const DAILY_QUOTA_HOURS: i64 = 8;

const DAILY_QUOTA_MINUTES: i64 = DAILY_QUOTA_HOURS * 60;

/// A reason a candidate time range was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Human-readable description, suitable for inline display.
    pub message: String,
}

/// Categories of time-range violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// `to` is not strictly after `from` (includes zero-length ranges).
    InvertedRange,
    /// The candidate alone is longer than the daily quota.
    SingleTaskTooLong,
    /// The candidate plus the day's other tasks exceed the quota.
    DailyQuotaExceeded,
    /// A timestamp could not be parsed.
    InvalidInput,
}

impl Violation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn inverted_range() -> Self {
        Self::new(
            ViolationKind::InvertedRange,
            "From date is later than To date. Please adjust the dates.",
        )
    }

    fn single_task_too_long() -> Self {
        Self::new(
            ViolationKind::SingleTaskTooLong,
            format!("Task duration cannot exceed {DAILY_QUOTA_HOURS} hours. Please adjust the time."),
        )
    }

    fn daily_quota_exceeded() -> Self {
        Self::new(
            ViolationKind::DailyQuotaExceeded,
            format!(
                "Total task duration for this day exceeds {DAILY_QUOTA_HOURS} hours. Please adjust the time."
            ),
        )
    }

    fn invalid_input(field: &str) -> Self {
        Self::new(
            ViolationKind::InvalidInput,
            format!("The {field} date is not a valid timestamp."),
        )
    }
}

/// Whether two timestamps fall on the same UTC calendar date.
#[inline]
pub fn is_same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// The day bucket: tasks whose `from` shares `reference`'s UTC calendar
/// date, excluding `exclude_id` (the task currently being edited).
pub fn day_bucket<'a>(
    tasks: &'a [Task],
    reference: DateTime<Utc>,
    exclude_id: Option<&str>,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| is_same_calendar_day(t.from, reference))
        .filter(|t| exclude_id != Some(t.id.as_str()))
        .collect()
}

/// Validates a candidate time range against an employee's tasks.
///
/// `existing` is a snapshot of the employee's tasks (any day; bucketing
/// happens here). `exclude_id` names the task being edited, if any, so
/// re-submitting a task unchanged never conflicts with itself.
///
/// Returns all detected violations; an empty list means the range is
/// acceptable. An exactly-8-hour task, alone or completing a day at
/// exactly 8 hours, is acceptable.
///
/// An inverted range short-circuits the length and quota checks — a
/// non-positive duration has no meaningful total to compare.
pub fn validate_range(
    candidate: &TimeRange,
    existing: &[Task],
    exclude_id: Option<&str>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !candidate.is_positive() {
        violations.push(Violation::inverted_range());
        return violations;
    }

    let candidate_minutes = candidate.duration_minutes();
    if candidate_minutes > DAILY_QUOTA_MINUTES {
        violations.push(Violation::single_task_too_long());
    }

    let day_minutes: i64 = day_bucket(existing, candidate.from, exclude_id)
        .iter()
        .map(|t| t.duration_minutes().max(0))
        .sum();
    if round_to_hours(day_minutes + candidate_minutes) > DAILY_QUOTA_HOURS {
        violations.push(Violation::daily_quota_exceeded());
    }

    violations
}

/// Validates a candidate given as RFC 3339 strings, as received from a
/// form field. Unparseable input yields an [`ViolationKind::InvalidInput`]
/// violation instead of an error; the validator never fails.
pub fn validate_range_str(
    from: &str,
    to: &str,
    existing: &[Task],
    exclude_id: Option<&str>,
) -> Vec<Violation> {
    let from = from.parse::<DateTime<Utc>>();
    let to = to.parse::<DateTime<Utc>>();

    match (from, to) {
        (Ok(from), Ok(to)) => validate_range(&TimeRange::new(from, to), existing, exclude_id),
        (from, to) => {
            let mut violations = Vec::new();
            if from.is_err() {
                violations.push(Violation::invalid_input("From"));
            }
            if to.is_err() {
                violations.push(Violation::invalid_input("To"));
            }
            violations
        }
    }
}

/// Hours still available for the given day bucket: `8 - Σ durations`,
/// floored at zero. Display hint only — [`validate_range`] is the
/// authoritative check.
pub fn remaining_hours(existing_for_day: &[Task]) -> f64 {
    let used_minutes: i64 = existing_for_day
        .iter()
        .map(|t| t.duration_minutes().max(0))
        .sum();
    (DAILY_QUOTA_HOURS as f64 - used_minutes as f64 / 60.0).max(0.0)
}

/// Rounds minutes to the nearest whole hour, half away from zero.
#[inline]
fn round_to_hours(minutes: i64) -> i64 {
    (minutes + 30) / 60
}
