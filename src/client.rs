//! Task-store REST client.
//!
//! Async client for the remote service holding `Employee` and `Task`
//! records. Responses arrive in a `{ code, message, data }` envelope;
//! `code` is an HTTP-style status and anything outside 200–299 is
//! treated as an API failure even when the transport status is 200.
//!
//! # Caching
//!
//! Task lists are cached per employee. A successful create, update, or
//! delete invalidates only the affected employee's entry, so the next
//! validation run never sees a list made stale by this session's own
//! write, and untouched employees are not refetched. Update and delete
//! requests carry no employee id on the wire, so the owner is located by
//! scanning the cached lists for the task id.
//!
//! No retries: a failed request surfaces as a [`StoreError`] and the
//! caller decides what to render. Snapshots may still be stale relative
//! to other sessions' writes; the store is last-write-wins and this
//! client does not attempt conflict detection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::{Employee, NewEmployee, Task, TaskDraft};

/// Errors from the task-store client.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success HTTP status.
    #[error("task store returned HTTP {0}")]
    Status(reqwest::StatusCode),
    /// Envelope `code` outside 200–299.
    #[error("task store error {code}: {message}")]
    Api { code: u16, message: String },
    /// Success code but no `data` payload.
    #[error("task store response had no data")]
    EmptyResponse,
    /// Request rejected before it was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Response envelope used by every task-store endpoint.
///
/// `data` may be null when the store reports an error code.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    code: u16,
    message: String,
    #[serde(default)]
    data: Option<T>,
}

/// `POST /tasks` body: a draft plus the owning employee.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskBody<'a> {
    #[serde(flatten)]
    draft: &'a TaskDraft,
    employee_id: &'a str,
}

/// Client for the task store, with a per-employee task-list cache.
pub struct TaskStore {
    http: reqwest::Client,
    base_url: String,
    tasks: Mutex<HashMap<String, Vec<Task>>>,
}

impl TaskStore {
    /// Creates a client for the store at `base_url` (no trailing slash
    /// required).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    // ── Employees ──────────────────────────────────────────────────────

    /// `GET /employees`
    pub async fn employees(&self) -> Result<Vec<Employee>, StoreError> {
        let url = self.url("employees");
        debug!(%url, "fetching employees");
        let resp = self.http.get(&url).send().await?;
        unwrap_envelope(resp).await
    }

    /// `POST /employees`
    pub async fn create_employee(&self, body: &NewEmployee) -> Result<Employee, StoreError> {
        require_name(&body.name)?;
        let url = self.url("employees");
        debug!(%url, name = %body.name, "creating employee");
        let resp = self.http.post(&url).json(body).send().await?;
        unwrap_envelope(resp).await
    }

    /// `PUT /employees/{id}`
    pub async fn update_employee(
        &self,
        id: &str,
        body: &NewEmployee,
    ) -> Result<Employee, StoreError> {
        require_name(&body.name)?;
        let url = self.url(&format!("employees/{id}"));
        debug!(%url, "updating employee");
        let resp = self.http.put(&url).json(body).send().await?;
        unwrap_envelope(resp).await
    }

    /// `DELETE /employees/{id}`
    ///
    /// Also drops the employee's cached task list.
    pub async fn delete_employee(&self, id: &str) -> Result<(), StoreError> {
        let url = self.url(&format!("employees/{id}"));
        debug!(%url, "deleting employee");
        let resp = self.http.delete(&url).send().await?;
        check_status(&resp)?;
        self.tasks.lock().await.remove(id);
        Ok(())
    }

    // ── Tasks ──────────────────────────────────────────────────────────

    /// `GET /tasks/employee/{employee_id}`, served from cache when the
    /// employee's list has not been invalidated since the last fetch.
    pub async fn tasks_for_employee(&self, employee_id: &str) -> Result<Vec<Task>, StoreError> {
        if let Some(cached) = self.tasks.lock().await.get(employee_id) {
            debug!(employee_id, "task list served from cache");
            return Ok(cached.clone());
        }

        let url = self.url(&format!("tasks/employee/{employee_id}"));
        debug!(%url, "fetching tasks");
        let resp = self.http.get(&url).send().await?;
        let list: Vec<Task> = unwrap_envelope(resp).await?;

        self.tasks
            .lock()
            .await
            .insert(employee_id.to_string(), list.clone());
        Ok(list)
    }

    /// `POST /tasks`
    ///
    /// Invalidates the owning employee's cached list.
    pub async fn create_task(
        &self,
        employee_id: &str,
        draft: &TaskDraft,
    ) -> Result<Task, StoreError> {
        let url = self.url("tasks");
        debug!(%url, employee_id, "creating task");
        let body = CreateTaskBody { draft, employee_id };
        let resp = self.http.post(&url).json(&body).send().await?;
        let task = unwrap_envelope(resp).await?;
        self.tasks.lock().await.remove(employee_id);
        Ok(task)
    }

    /// `PUT /tasks/{id}`
    ///
    /// Invalidates the cached list of whichever employee owns the task.
    pub async fn update_task(&self, id: &str, draft: &TaskDraft) -> Result<Task, StoreError> {
        let url = self.url(&format!("tasks/{id}"));
        debug!(%url, "updating task");
        let resp = self.http.put(&url).json(draft).send().await?;
        let task = unwrap_envelope(resp).await?;
        self.invalidate_task(id).await;
        Ok(task)
    }

    /// `DELETE /tasks/{id}`
    pub async fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        let url = self.url(&format!("tasks/{id}"));
        debug!(%url, "deleting task");
        let resp = self.http.delete(&url).send().await?;
        check_status(&resp)?;
        self.invalidate_task(id).await;
        Ok(())
    }

    /// Drops the cached list containing `task_id`, if any. A task cached
    /// nowhere has no stale entry to drop.
    async fn invalidate_task(&self, task_id: &str) {
        let mut cache = self.tasks.lock().await;
        let owner = cache
            .iter()
            .find(|(_, list)| list.iter().any(|t| t.id == task_id))
            .map(|(employee_id, _)| employee_id.clone());
        if let Some(employee_id) = owner {
            debug!(task_id, %employee_id, "invalidating cached task list");
            cache.remove(&employee_id);
        }
    }
}

fn require_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidRequest(
            "employee name must not be empty".into(),
        ));
    }
    Ok(())
}

fn check_status(resp: &reqwest::Response) -> Result<(), StoreError> {
    let status = resp.status();
    if !status.is_success() {
        warn!(%status, url = %resp.url(), "task store request failed");
        return Err(StoreError::Status(status));
    }
    Ok(())
}

async fn unwrap_envelope<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, StoreError> {
    check_status(&resp)?;
    let envelope: Envelope<T> = resp.json().await?;
    if !(200..300).contains(&envelope.code) {
        warn!(code = envelope.code, message = %envelope.message, "task store reported an error");
        return Err(StoreError::Api {
            code: envelope.code,
            message: envelope.message,
        });
    }
    envelope.data.ok_or(StoreError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_employee_name_rejected() {
        let store = TaskStore::new("http://localhost:0");

        let err = store
            .create_employee(&NewEmployee::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRequest(_)));

        let err = store
            .update_employee("e1", &NewEmployee::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRequest(_)));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let store = TaskStore::new("http://store.local/api/");
        assert_eq!(store.url("employees"), "http://store.local/api/employees");
    }

    #[test]
    fn test_create_task_body_shape() {
        let draft = TaskDraft::new(
            "Review",
            "2024-01-10T09:00:00Z".parse().unwrap(),
            "2024-01-10T10:00:00Z".parse().unwrap(),
        );
        let body = serde_json::to_value(CreateTaskBody {
            draft: &draft,
            employee_id: "e1",
        })
        .unwrap();

        assert_eq!(body["employeeId"], "e1");
        assert_eq!(body["description"], "Review");
        assert_eq!(body["isCompleted"], false);
    }
}
