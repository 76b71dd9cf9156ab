//! Application constants and configuration

pub const API_BASE_URL: &str = "https://mate.academy/students-api";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "Todos";

/// User whose todos are loaded when settings don't name one
pub const DEFAULT_USER_ID: u32 = 41;

/// Seconds the error banner stays up before hiding itself
pub const ERROR_VISIBLE_SECS: f32 = 3.0;
pub const ERROR_FADE_SECS: f32 = 0.25;

/// Per-request timeout for the API client
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Id carried by the placeholder shown while a create is in flight
pub const TEMP_TODO_ID: u64 = 0;

pub const ENV_USER_ID: &str = "TODOS_USER_ID";
pub const ENV_API_URL: &str = "TODOS_API_URL";
