//! Results of background requests and how they change the app state

use super::{App, Inbox};
use crate::api::ApiError;
use crate::types::*;
use tracing::{error, info, warn};

/// Outcome of one API call, produced on the runtime and applied on the UI thread
#[derive(Debug)]
pub enum TodoEvent {
    Loaded(Result<Vec<Todo>, ApiError>),
    Created(Result<Todo, ApiError>),
    Toggled { id: u64, result: Result<Todo, ApiError> },
    Renamed { id: u64, result: Result<Todo, ApiError> },
    Deleted { id: u64, result: Result<(), ApiError> },
}

pub(crate) fn push_event(inbox: &Inbox, event: TodoEvent) {
    inbox
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(event);
}

impl App {
    /// Apply every event queued since the last frame, in arrival order.
    pub fn poll_events(&mut self) {
        let events = std::mem::take(
            &mut *self
                .inbox
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
        for event in events {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: TodoEvent) {
        match event {
            TodoEvent::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(mut todos) => {
                        info!(count = todos.len(), "Todos loaded");
                        // Todos created while the load was in flight may be missing from it
                        let local: Vec<Todo> = std::mem::take(&mut self.todos)
                            .into_iter()
                            .filter(|t| !todos.iter().any(|loaded| loaded.id == t.id))
                            .collect();
                        todos.extend(local);
                        self.todos = todos;
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to load todos");
                        self.show_error(TodoError::UnableToLoad);
                    }
                }
            }
            TodoEvent::Created(result) => {
                match result {
                    Ok(todo) => {
                        info!(id = todo.id, "Todo created");
                        self.todos.push(todo);
                        self.new_title.clear();
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to create todo");
                        self.show_error(TodoError::UnableToAdd);
                    }
                }
                self.temp_todo = None;
                self.input_disabled = false;
                self.focus_input = true;
            }
            TodoEvent::Toggled { id, result } => {
                self.processing.remove(&id);
                match result {
                    Ok(todo) => self.replace_todo(id, todo),
                    Err(e) => {
                        warn!(id, error = %e, "Failed to toggle todo");
                        self.show_error(TodoError::UnableToUpdate);
                    }
                }
            }
            TodoEvent::Renamed { id, result } => {
                self.processing.remove(&id);
                match result {
                    Ok(todo) => {
                        self.replace_todo(id, todo);
                        if self.editing.as_ref().is_some_and(|e| e.id == id) {
                            self.editing = None;
                        }
                    }
                    Err(e) => {
                        warn!(id, error = %e, "Failed to rename todo");
                        self.show_error(TodoError::UnableToUpdate);
                        if let Some(edit) = self.editing.as_mut().filter(|e| e.id == id) {
                            edit.request_focus = true;
                        }
                    }
                }
            }
            TodoEvent::Deleted { id, result } => {
                self.processing.remove(&id);
                match result {
                    Ok(()) => {
                        info!(id, "Todo deleted");
                        self.todos.retain(|t| t.id != id);
                        if self.editing.as_ref().is_some_and(|e| e.id == id) {
                            self.editing = None;
                        }
                        self.focus_input = true;
                    }
                    Err(e) => {
                        warn!(id, error = %e, "Failed to delete todo");
                        self.show_error(TodoError::UnableToDelete);
                    }
                }
            }
        }
        self.apply_filters();
    }

    fn replace_todo(&mut self, id: u64, updated: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
            *slot = updated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use reqwest::StatusCode;

    fn failure() -> ApiError {
        ApiError::Status(StatusCode::BAD_GATEWAY)
    }

    #[test]
    fn todo_created_during_load_survives_the_load() {
        let mut app = test_app(Vec::new());
        app.loading = true;
        app.temp_todo = Some(todo(crate::constants::TEMP_TODO_ID, "new", false));
        app.input_disabled = true;

        app.handle_event(TodoEvent::Created(Ok(todo(9, "new", false))));
        app.handle_event(TodoEvent::Loaded(Ok(vec![todo(1, "old", false)])));

        let ids: Vec<u64> = app.todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 9]);
        assert_eq!(app.filtered_indices, vec![0, 1]);
        assert!(!app.loading);
    }

    #[test]
    fn load_does_not_duplicate_todos_it_already_has() {
        let mut app = test_app(vec![todo(9, "new", false)]);
        app.loading = true;

        app.handle_event(TodoEvent::Loaded(Ok(vec![todo(1, "old", false), todo(9, "new", true)])));

        assert_eq!(app.todos.len(), 2);
        assert!(app.todo(9).unwrap().completed);
    }

    #[test]
    fn load_success_replaces_list() {
        let mut app = test_app(Vec::new());
        app.loading = true;
        app.handle_event(TodoEvent::Loaded(Ok(vec![todo(1, "a", false), todo(2, "b", true)])));

        assert!(!app.loading);
        assert_eq!(app.todos.len(), 2);
        assert_eq!(app.filtered_indices, vec![0, 1]);
        assert!(!app.error_visible);
    }

    #[test]
    fn load_failure_shows_banner() {
        let mut app = test_app(Vec::new());
        app.handle_event(TodoEvent::Loaded(Err(failure())));

        assert!(app.todos.is_empty());
        assert!(app.error_visible);
        assert_eq!(app.error_message, TodoError::UnableToLoad);
    }

    #[test]
    fn create_success_appends_and_clears_input() {
        let mut app = test_app(vec![todo(1, "a", false)]);
        app.new_title = "b".into();
        app.input_disabled = true;
        app.temp_todo = Some(todo(0, "b", false));

        app.handle_event(TodoEvent::Created(Ok(todo(2, "b", false))));

        assert_eq!(app.todos.len(), 2);
        assert_eq!(app.todos[1].id, 2);
        assert!(app.temp_todo.is_none());
        assert!(app.new_title.is_empty());
        assert!(!app.input_disabled);
        assert!(app.focus_input);
    }

    #[test]
    fn create_failure_keeps_title() {
        let mut app = test_app(Vec::new());
        app.new_title = "keep me".into();
        app.input_disabled = true;
        app.temp_todo = Some(todo(0, "keep me", false));

        app.handle_event(TodoEvent::Created(Err(failure())));

        assert!(app.todos.is_empty());
        assert!(app.temp_todo.is_none());
        assert_eq!(app.new_title, "keep me");
        assert!(!app.input_disabled);
        assert_eq!(app.error_message, TodoError::UnableToAdd);
    }

    #[test]
    fn toggle_result_replaces_todo_and_refilters() {
        let mut app = test_app(vec![todo(1, "a", false), todo(2, "b", false)]);
        app.filter = TodoFilter::Active;
        app.apply_filters();
        app.processing.insert(1);

        app.handle_event(TodoEvent::Toggled { id: 1, result: Ok(todo(1, "a", true)) });

        assert!(app.todos[0].completed);
        assert!(!app.is_processing(1));
        assert_eq!(app.filtered_indices, vec![1]);
    }

    #[test]
    fn toggle_failure_leaves_todo_untouched() {
        let mut app = test_app(vec![todo(1, "a", false)]);
        app.processing.insert(1);

        app.handle_event(TodoEvent::Toggled { id: 1, result: Err(failure()) });

        assert!(!app.todos[0].completed);
        assert!(!app.is_processing(1));
        assert_eq!(app.error_message, TodoError::UnableToUpdate);
    }

    #[test]
    fn rename_success_closes_editor() {
        let mut app = test_app(vec![todo(1, "old", false)]);
        app.editing = Some(EditState { id: 1, draft: "new".into(), request_focus: false });
        app.processing.insert(1);

        app.handle_event(TodoEvent::Renamed { id: 1, result: Ok(todo(1, "new", false)) });

        assert_eq!(app.todos[0].title, "new");
        assert!(app.editing.is_none());
    }

    #[test]
    fn rename_failure_keeps_editor_open() {
        let mut app = test_app(vec![todo(1, "old", false)]);
        app.editing = Some(EditState { id: 1, draft: "new".into(), request_focus: false });
        app.processing.insert(1);

        app.handle_event(TodoEvent::Renamed { id: 1, result: Err(failure()) });

        let edit = app.editing.as_ref().unwrap();
        assert_eq!(edit.draft, "new");
        assert!(edit.request_focus);
        assert_eq!(app.todos[0].title, "old");
        assert_eq!(app.error_message, TodoError::UnableToUpdate);
    }

    #[test]
    fn delete_success_removes_only_that_todo() {
        let mut app = test_app(vec![todo(1, "a", false), todo(2, "b", true)]);
        app.processing.insert(2);

        app.handle_event(TodoEvent::Deleted { id: 2, result: Ok(()) });

        assert_eq!(app.todos, vec![todo(1, "a", false)]);
        assert_eq!(app.filtered_indices, vec![0]);
        assert!(app.processing.is_empty());
    }

    #[test]
    fn delete_failure_shows_banner() {
        let mut app = test_app(vec![todo(1, "a", false)]);
        app.processing.insert(1);

        app.handle_event(TodoEvent::Deleted { id: 1, result: Err(failure()) });

        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.error_message, TodoError::UnableToDelete);
    }

    #[test]
    fn queued_events_apply_in_order() {
        let mut app = test_app(Vec::new());
        push_event(&app.inbox, TodoEvent::Loaded(Ok(vec![todo(1, "a", false)])));
        push_event(&app.inbox, TodoEvent::Deleted { id: 1, result: Ok(()) });

        app.poll_events();

        assert!(app.todos.is_empty());
        assert!(app.inbox.lock().unwrap().is_empty());
    }
}
