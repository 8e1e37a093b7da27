//! Task and time-range models.
//!
//! A task is a unit of work assigned to one employee, occupying the
//! interval `[from, to]` on a single working day. Durations are handled
//! in whole minutes; the validator applies its rounding rule only when
//! comparing a day's total against the quota.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task, as stored by the task store.
///
/// The owning employee is implicit: tasks are fetched and created per
/// employee (`GET /tasks/employee/{id}`, `POST /tasks` with `employeeId`),
/// and the store does not echo the association back in the task body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier assigned by the task store.
    pub id: String,
    /// Free-text description.
    pub description: String,
    /// Whether the task has been marked done.
    pub is_completed: bool,
    /// Start of the task's time range.
    pub from: DateTime<Utc>,
    /// End of the task's time range.
    pub to: DateTime<Utc>,
}

impl Task {
    /// The task's time range.
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.from, self.to)
    }

    /// Duration in whole minutes. Negative if the stored range is inverted.
    pub fn duration_minutes(&self) -> i64 {
        self.range().duration_minutes()
    }
}

/// Request body for creating or updating a task.
///
/// Same fields as [`Task`] minus the store-assigned id. For creates the
/// client adds the owning `employeeId` alongside these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub description: String,
    pub is_completed: bool,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TaskDraft {
    /// Creates a draft for a not-yet-completed task.
    pub fn new(description: impl Into<String>, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            description: description.into(),
            is_completed: false,
            from,
            to,
        }
    }

    /// Marks the draft completed.
    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    /// The draft's time range, for validation before submission.
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.from, self.to)
    }
}

/// A candidate time range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a new time range.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Duration in whole minutes (`to - from`). Negative if inverted.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.to - self.from).num_minutes()
    }

    /// Whether `to` is strictly after `from`.
    ///
    /// A zero-length range is not positive; the validator rejects it the
    /// same way as an inverted one.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.to > self.from
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_task_wire_format() {
        let json = r#"{
            "id": "t1",
            "description": "Quarterly report",
            "isCompleted": false,
            "from": "2024-01-10T09:00:00Z",
            "to": "2024-01-10T13:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "t1");
        assert!(!task.is_completed);
        assert_eq!(task.duration_minutes(), 240);

        // camelCase survives the round back out
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("isCompleted").is_some());
        assert!(value.get("is_completed").is_none());
    }

    #[test]
    fn test_draft_builder() {
        let draft = TaskDraft::new(
            "Standup",
            ts("2024-01-10T09:00:00Z"),
            ts("2024-01-10T09:30:00Z"),
        )
        .completed();
        assert!(draft.is_completed);
        assert_eq!(draft.range().duration_minutes(), 30);
    }

    #[test]
    fn test_time_range_direction() {
        let from = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 10, 17, 0, 0).unwrap();

        let forward = TimeRange::new(from, to);
        assert!(forward.is_positive());
        assert_eq!(forward.duration_minutes(), 480);

        let inverted = TimeRange::new(to, from);
        assert!(!inverted.is_positive());
        assert_eq!(inverted.duration_minutes(), -480);

        let empty = TimeRange::new(from, from);
        assert!(!empty.is_positive());
        assert_eq!(empty.duration_minutes(), 0);
    }
}
