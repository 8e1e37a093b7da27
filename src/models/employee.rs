//! Employee model.

use serde::{Deserialize, Serialize};

/// An employee, as stored by the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque identifier assigned by the task store.
    pub id: String,
    /// Display name. Non-empty for create/update requests.
    pub name: String,
}

/// Request body for creating or renaming an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
}

impl NewEmployee {
    /// Creates a new employee request body.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_wire_format() {
        let e: Employee = serde_json::from_str(r#"{"id":"e1","name":"Alice"}"#).unwrap();
        assert_eq!(e.id, "e1");
        assert_eq!(e.name, "Alice");
    }

    #[test]
    fn test_new_employee_body() {
        let body = serde_json::to_value(NewEmployee::new("Bob")).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Bob" }));
    }
}
