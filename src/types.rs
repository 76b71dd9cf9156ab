//! Common types and data structures

use serde::{Deserialize, Serialize};

/// A single task as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub user_id: u32,
    pub title: String,
    pub completed: bool,
}

/// Request body for creating a todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub user_id: u32,
    pub title: String,
    pub completed: bool,
}

impl NewTodo {
    pub fn new(user_id: u32, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Partial update sent with PATCH, unset fields are left out of the body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Which todos the list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    pub const ALL: [TodoFilter; 3] = [TodoFilter::All, TodoFilter::Active, TodoFilter::Completed];

    pub fn label(self) -> &'static str {
        match self {
            TodoFilter::All => "All",
            TodoFilter::Active => "Active",
            TodoFilter::Completed => "Completed",
        }
    }

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !todo.completed,
            TodoFilter::Completed => todo.completed,
        }
    }
}

/// User-facing failures shown in the error banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoError {
    UnableToLoad,
    EmptyTitle,
    UnableToAdd,
    UnableToDelete,
    UnableToUpdate,
}

impl TodoError {
    pub fn message(self) -> &'static str {
        match self {
            TodoError::UnableToLoad => "Unable to load todos",
            TodoError::EmptyTitle => "Title should not be empty",
            TodoError::UnableToAdd => "Unable to add a todo",
            TodoError::UnableToDelete => "Unable to delete a todo",
            TodoError::UnableToUpdate => "Unable to update a todo",
        }
    }
}

/// Title edit in progress for a single todo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: u64,
    pub draft: String,
    pub request_focus: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_uses_camel_case_user_id() {
        let json = r#"{"id":7,"userId":41,"title":"buy milk","completed":true}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.user_id, 41);
        assert!(todo.completed);

        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["userId"], 41);
    }

    #[test]
    fn patch_skips_unset_fields() {
        let body = serde_json::to_string(&TodoPatch::completed(true)).unwrap();
        assert_eq!(body, r#"{"completed":true}"#);

        let body = serde_json::to_string(&TodoPatch::title("x")).unwrap();
        assert_eq!(body, r#"{"title":"x"}"#);
    }

    #[test]
    fn new_todo_starts_incomplete() {
        let body = serde_json::to_value(NewTodo::new(41, "walk")).unwrap();
        assert_eq!(body["completed"], false);
        assert_eq!(body["userId"], 41);
    }
}
