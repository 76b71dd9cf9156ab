//! App module - contains the main application state and logic

mod events;
mod filters;
mod notifications;
mod requests;
mod views;

pub use events::TodoEvent;

use crate::api::TodoClient;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use eframe::egui;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Results produced by background requests, drained by the update loop
pub(crate) type Inbox = Arc<Mutex<Vec<TodoEvent>>>;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) client: TodoClient,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) inbox: Inbox,
    pub(crate) user_id: Option<u32>,
    // Todos
    pub(crate) todos: Vec<Todo>,
    pub(crate) filtered_indices: Vec<usize>,
    pub(crate) filter: TodoFilter,
    pub(crate) temp_todo: Option<Todo>,
    pub(crate) processing: HashSet<u64>,
    pub(crate) editing: Option<EditState>,
    pub(crate) load_started: bool,
    pub(crate) loading: bool,
    // New todo input
    pub(crate) new_title: String,
    pub(crate) input_disabled: bool,
    pub(crate) focus_input: bool,
    // Error banner
    pub(crate) error_message: TodoError,
    pub(crate) error_visible: bool,
    pub(crate) error_since: Option<Instant>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
    /// Settings as read from disk, before environment overrides
    pub(crate) stored: Settings,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        stored: Settings,
        settings: Settings,
        data_dir: PathBuf,
        client: TodoClient,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self::with_settings(stored, settings, data_dir, client, runtime)
    }

    /// Builds the state without touching any egui context.
    ///
    /// `settings` carries the effective values; `stored` is what gets written back.
    pub fn with_settings(
        stored: Settings,
        settings: Settings,
        data_dir: PathBuf,
        client: TodoClient,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        Self {
            client,
            runtime,
            inbox: Arc::new(Mutex::new(Vec::new())),
            user_id: settings.effective_user_id(),
            todos: Vec::new(),
            filtered_indices: Vec::new(),
            filter: settings.filter,
            temp_todo: None,
            processing: HashSet::new(),
            editing: None,
            load_started: false,
            loading: false,
            new_title: String::new(),
            input_disabled: false,
            focus_input: true,
            error_message: TodoError::UnableToLoad,
            error_visible: false,
            error_since: None,
            window_pos: settings.window_x.zip(settings.window_y).map(|(x, y)| egui::pos2(x, y)),
            window_size: settings.window_w.zip(settings.window_h).map(|(w, h)| egui::vec2(w, h)),
            needs_center: false,
            data_dir,
            stored,
        }
    }

    pub fn save_settings(&self) {
        // User id and API URL come from the file, never from the environment
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            filter: self.filter,
            ..self.stored.clone()
        };
        settings.save(&self.data_dir);
    }

    pub fn todo(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.len() - self.active_count()
    }

    /// True when the list is non-empty and nothing is left to do.
    pub fn all_completed(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|t| t.completed)
    }

    pub fn is_processing(&self, id: u64) -> bool {
        self.processing.contains(&id)
    }

    pub fn show_footer(&self) -> bool {
        !self.todos.is_empty()
    }

    pub fn show_toggle_all(&self) -> bool {
        !self.todos.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// App pointed at a closed local port; tests drive it through `handle_event`.
    pub fn test_app(todos: Vec<Todo>) -> App {
        let client = TodoClient::with_client("http://127.0.0.1:9", reqwest::Client::new());
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let data_dir = std::env::temp_dir();
        let mut app = App::with_settings(Settings::default(), Settings::default(), data_dir, client, runtime);
        app.todos = todos;
        app.apply_filters();
        app
    }

    pub fn todo(id: u64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            user_id: 41,
            title: title.to_string(),
            completed,
        }
    }
}
