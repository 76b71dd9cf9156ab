//! User settings stored as settings.json in the app data directory

use crate::constants::{API_BASE_URL, DEFAULT_USER_ID, ENV_API_URL, ENV_USER_ID};
use crate::types::TodoFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // API
    pub user_id: Option<u32>,
    pub api_base_url: String,

    // View
    pub filter: TodoFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            user_id: Some(DEFAULT_USER_ID),
            api_base_url: API_BASE_URL.to_string(),
            filter: TodoFilter::All,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Apply `TODOS_USER_ID` / `TODOS_API_URL` on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_USER_ID).ok().as_deref(),
            std::env::var(ENV_API_URL).ok().as_deref(),
        )
    }

    pub(crate) fn with_overrides(mut self, user_id: Option<&str>, api_url: Option<&str>) -> Self {
        if let Some(raw) = user_id {
            let raw = raw.trim();
            if raw.is_empty() {
                info!("User id cleared from environment");
                self.user_id = None;
            } else {
                match raw.parse::<u32>() {
                    Ok(id) => {
                        info!(user_id = id, "User id overridden from environment");
                        self.user_id = Some(id);
                    }
                    Err(e) => warn!(value = raw, error = %e, "Ignoring invalid user id override"),
                }
            }
        }
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            info!(url, "API URL overridden from environment");
            self.api_base_url = url.to_string();
        }
        self
    }

    /// User id to load todos for; zero counts as unset.
    pub fn effective_user_id(&self) -> Option<u32> {
        self.user_id.filter(|&id| id != 0)
    }
}
