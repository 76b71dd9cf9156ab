#![windows_subsystem = "windows"]
//! Todos - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod constants;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use api::TodoClient;
use app::App;
use constants::*;
use eframe::egui;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Daily rolling log file under `<data_dir>/logs`. Fails if the directory can't be created.
fn log_file_appender(
    data_dir: &Path,
) -> Result<RollingFileAppender, tracing_appender::rolling::InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("todos.log")
        .build(data_dir.join("logs"))
}

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(
    data_dir: &Path,
) -> Result<tracing_appender::non_blocking::WorkerGuard, tracing_appender::rolling::InitError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file_appender = log_file_appender(data_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,todos=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    Ok(guard)
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = match init_logging(&data_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging in {}: {e}", data_dir.display());
            std::process::exit(1);
        }
    };

    info!(version = APP_VERSION, "Todos starting");

    let stored = settings::Settings::load(&data_dir);
    let settings = stored.clone().with_env_overrides();
    if settings.effective_user_id().is_none() {
        warn!("No user id configured, todos will not be loaded");
    }

    let client = match TodoClient::new(&settings.api_base_url) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to start async runtime");
            std::process::exit(1);
        }
    };

    let win_pos = settings.window_x.zip(settings.window_y).map(|(x, y)| egui::pos2(x, y));
    let win_size = settings.window_w.zip(settings.window_h).map(|(w, h)| egui::vec2(w, h));

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(720.0, 760.0)))
        .with_min_inner_size([480.0, 420.0])
        .with_title(APP_NAME);

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, stored, settings, data_dir, client, runtime);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        self.load_todos(ctx);
        self.poll_events();

        if self.tick_error(Instant::now()) {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.render_error_banner(ctx);
        self.render_main(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Todos exiting");
        self.save_settings();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_appender_creates_logs_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(log_file_appender(dir.path()).is_ok());
        assert!(dir.path().join("logs").is_dir());
    }

    #[test]
    fn log_appender_reports_unusable_logs_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logs"), b"not a directory").unwrap();

        assert!(log_file_appender(dir.path()).is_err());
        assert!(init_logging(dir.path()).is_err());
    }
}
