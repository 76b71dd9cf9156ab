//! API calls started from the UI
//!
//! Every request runs on the app's tokio runtime and reports back through the
//! inbox as a [`TodoEvent`]; state shown while it is in flight (temp todo,
//! processing overlay, disabled input) is set here before spawning.

use super::events::push_event;
use super::{App, Inbox, TodoEvent};
use crate::constants::TEMP_TODO_ID;
use crate::types::*;
use eframe::egui;
use futures::future::BoxFuture;
use futures::StreamExt;
use std::future::Future;
use tracing::{debug, info};

/// Requests allowed in flight at once for bulk operations
const BATCH_CONCURRENCY: usize = 4;

fn spawn_request<F>(runtime: &tokio::runtime::Runtime, inbox: Inbox, ctx: &egui::Context, request: F)
where
    F: Future<Output = TodoEvent> + Send + 'static,
{
    let ctx = ctx.clone();
    runtime.spawn(async move {
        let event = request.await;
        push_event(&inbox, event);
        ctx.request_repaint();
    });
}

/// Run a batch of requests with bounded concurrency, reporting each as it finishes.
fn spawn_batch(
    runtime: &tokio::runtime::Runtime,
    inbox: Inbox,
    ctx: &egui::Context,
    requests: Vec<BoxFuture<'static, TodoEvent>>,
) {
    let ctx = ctx.clone();
    runtime.spawn(async move {
        let mut results = futures::stream::iter(requests).buffer_unordered(BATCH_CONCURRENCY);
        while let Some(event) = results.next().await {
            push_event(&inbox, event);
            ctx.request_repaint();
        }
    });
}

impl App {
    /// Initial fetch; runs at most once per app lifetime.
    pub fn load_todos(&mut self, ctx: &egui::Context) {
        if self.load_started {
            return;
        }
        let Some(user_id) = self.user_id else {
            return;
        };
        self.load_started = true;
        self.loading = true;

        info!(user_id, url = self.client.base_url(), "Loading todos");
        let client = self.client.clone();
        spawn_request(&self.runtime, self.inbox.clone(), ctx, async move {
            TodoEvent::Loaded(client.get_todos(user_id).await)
        });
    }

    pub fn submit_new_todo(&mut self, ctx: &egui::Context) {
        if self.input_disabled {
            return;
        }
        let Some(user_id) = self.user_id else {
            return;
        };
        let title = self.new_title.trim().to_string();
        if title.is_empty() {
            self.show_error(TodoError::EmptyTitle);
            self.focus_input = true;
            return;
        }

        self.input_disabled = true;
        self.temp_todo = Some(Todo {
            id: TEMP_TODO_ID,
            user_id,
            title: title.clone(),
            completed: false,
        });

        let client = self.client.clone();
        let new_todo = NewTodo::new(user_id, title);
        spawn_request(&self.runtime, self.inbox.clone(), ctx, async move {
            TodoEvent::Created(client.create_todo(&new_todo).await)
        });
    }

    pub fn toggle_todo(&mut self, ctx: &egui::Context, id: u64) {
        if self.is_processing(id) {
            return;
        }
        let Some(completed) = self.todo(id).map(|t| t.completed) else {
            return;
        };
        self.processing.insert(id);

        let client = self.client.clone();
        spawn_request(&self.runtime, self.inbox.clone(), ctx, async move {
            let result = client.update_todo(id, &TodoPatch::completed(!completed)).await;
            TodoEvent::Toggled { id, result }
        });
    }

    /// Complete every active todo, or reactivate all of them when none is active.
    pub fn toggle_all(&mut self, ctx: &egui::Context) {
        let target = !self.all_completed();
        let ids: Vec<u64> = self
            .todos
            .iter()
            .filter(|t| t.completed != target && !self.processing.contains(&t.id))
            .map(|t| t.id)
            .collect();
        if ids.is_empty() {
            return;
        }
        debug!(count = ids.len(), completed = target, "Toggling all todos");

        let requests: Vec<BoxFuture<'static, TodoEvent>> = ids
            .into_iter()
            .map(|id| {
                self.processing.insert(id);
                let client = self.client.clone();
                Box::pin(async move {
                    let result = client.update_todo(id, &TodoPatch::completed(target)).await;
                    TodoEvent::Toggled { id, result }
                }) as BoxFuture<'static, TodoEvent>
            })
            .collect();
        spawn_batch(&self.runtime, self.inbox.clone(), ctx, requests);
    }

    pub fn start_edit(&mut self, id: u64) {
        if self.is_processing(id) {
            return;
        }
        if let Some(todo) = self.todo(id) {
            self.editing = Some(EditState {
                id,
                draft: todo.title.clone(),
                request_focus: true,
            });
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the title being edited. Unchanged titles just close the editor,
    /// blank titles delete the todo.
    pub fn commit_edit(&mut self, ctx: &egui::Context) {
        let Some(edit) = self.editing.as_ref() else {
            return;
        };
        let id = edit.id;
        if self.is_processing(id) {
            return;
        }
        let draft = edit.draft.trim().to_string();
        let Some(current) = self.todo(id).map(|t| t.title.clone()) else {
            self.editing = None;
            return;
        };

        if draft == current {
            self.editing = None;
            return;
        }
        if draft.is_empty() {
            self.delete_todo(ctx, id);
            return;
        }

        self.processing.insert(id);
        let client = self.client.clone();
        spawn_request(&self.runtime, self.inbox.clone(), ctx, async move {
            let result = client.update_todo(id, &TodoPatch::title(draft)).await;
            TodoEvent::Renamed { id, result }
        });
    }

    pub fn delete_todo(&mut self, ctx: &egui::Context, id: u64) {
        if self.is_processing(id) {
            return;
        }
        self.processing.insert(id);

        let client = self.client.clone();
        spawn_request(&self.runtime, self.inbox.clone(), ctx, async move {
            let result = client.delete_todo(id).await;
            TodoEvent::Deleted { id, result }
        });
    }

    pub fn clear_completed(&mut self, ctx: &egui::Context) {
        let ids: Vec<u64> = self
            .todos
            .iter()
            .filter(|t| t.completed && !self.processing.contains(&t.id))
            .map(|t| t.id)
            .collect();
        if ids.is_empty() {
            return;
        }
        info!(count = ids.len(), "Clearing completed todos");

        let requests: Vec<BoxFuture<'static, TodoEvent>> = ids
            .into_iter()
            .map(|id| {
                self.processing.insert(id);
                let client = self.client.clone();
                Box::pin(async move {
                    let result = client.delete_todo(id).await;
                    TodoEvent::Deleted { id, result }
                }) as BoxFuture<'static, TodoEvent>
            })
            .collect();
        spawn_batch(&self.runtime, self.inbox.clone(), ctx, requests);
    }
}
