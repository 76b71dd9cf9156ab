//! Reusable UI components

use crate::theme;
use eframe::egui;

/// Round completion toggle drawn in front of each todo
pub fn todo_checkbox(ui: &mut egui::Ui, checked: bool, enabled: bool) -> egui::Response {
    let size = theme::CHECKBOX_SIZE;
    let sense = if enabled { egui::Sense::click() } else { egui::Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), sense);

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let radius = size / 2.0 - 1.0;
        let stroke_color = if checked {
            theme::ACCENT
        } else if response.hovered() {
            theme::TEXT_MUTED
        } else {
            theme::BORDER_DEFAULT
        };
        painter.circle_stroke(rect.center(), radius, egui::Stroke::new(theme::STROKE_MEDIUM, stroke_color));
        if checked {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::CHECK,
                egui::FontId::proportional(size * 0.6),
                theme::ACCENT,
            );
        }
    }

    response
}

/// Footer filter link. Returns true if clicked.
pub fn filter_link(ui: &mut egui::Ui, label: &str, selected: bool) -> bool {
    let font = egui::FontId::proportional(theme::FONT_SMALL);
    let galley = ui.painter().layout_no_wrap(label.to_string(), font.clone(), theme::TEXT_MUTED);
    let size = galley.size() + egui::vec2(14.0, 8.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        if selected {
            painter.rect_stroke(
                rect,
                theme::RADIUS_DEFAULT,
                egui::Stroke::new(theme::STROKE_DEFAULT, theme::ACCENT_DIM),
                egui::StrokeKind::Inside,
            );
        } else if response.hovered() {
            painter.rect_stroke(
                rect,
                theme::RADIUS_DEFAULT,
                egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT),
                egui::StrokeKind::Inside,
            );
        }
        let color = if selected { theme::TEXT_PRIMARY } else { theme::TEXT_MUTED };
        painter.text(rect.center(), egui::Align2::CENTER_CENTER, label, font, color);
    }

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}

/// Small icon-only button (delete, dismiss). Returns true if clicked.
pub fn icon_button(ui: &mut egui::Ui, icon: &str, size: f32, color: egui::Color32) -> bool {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = theme::button_visual(&response, theme::BG_ELEVATED, rect);
        if response.hovered() {
            ui.painter().rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
        }
        let color = if response.hovered() { theme::TEXT_PRIMARY } else { color };
        ui.painter().text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(size * 0.6),
            color,
        );
    }
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}

/// Dim the given rect and draw a spinner over it (in-flight requests)
pub fn loading_overlay(ui: &mut egui::Ui, rect: egui::Rect) {
    ui.painter().rect_filled(rect, 0.0, theme::BG_OVERLAY);
    let spinner_size = 20.0;
    let spinner_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(spinner_size, spinner_size));
    ui.put(spinner_rect, egui::Spinner::new().size(spinner_size).color(theme::ACCENT));
}
