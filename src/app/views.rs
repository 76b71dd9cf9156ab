//! View rendering (header, list, footer, error banner, user warning)

use super::App;
use crate::constants::{ENV_USER_ID, ERROR_FADE_SECS, TEMP_TODO_ID};
use crate::theme;
use crate::types::*;
use crate::ui::components::{filter_link, icon_button, loading_overlay, todo_checkbox};
use crate::utils::items_left_label;
use eframe::egui;

/// Things a row asked for; applied after the list is drawn
enum RowAction {
    Toggle(u64),
    StartEdit(u64),
    CommitEdit,
    CancelEdit,
    Delete(u64),
}

impl App {
    pub fn render_main(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::same(24)))
            .show(ctx, |ui| {
                let width = theme::CONTENT_WIDTH.min(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.set_max_width(width);
                    ui.add(egui::Label::new(
                        egui::RichText::new("todos")
                            .size(theme::FONT_HERO)
                            .color(theme::TEXT_TITLE),
                    ));
                    ui.add_space(theme::SPACING_LG);

                    if self.user_id.is_none() {
                        render_user_warning(ui);
                        return;
                    }

                    theme::card_frame().show(ui, |ui| {
                        ui.set_width(width);
                        self.render_header(ui);
                        let actions = self.render_list(ui);
                        self.apply_row_actions(ctx, actions);
                        if self.show_footer() {
                            self.render_footer(ui);
                        }
                    });
                });
            });
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let width = ui.available_width();
        ui.allocate_ui_with_layout(
            egui::vec2(width, theme::ROW_HEIGHT),
            egui::Layout::left_to_right(egui::Align::Center),
            |ui| {
                ui.add_space(theme::SPACING_MD);
                let toggle_size = theme::CHECKBOX_SIZE + theme::SPACING_SM;
                if !self.show_toggle_all() {
                    ui.add_space(toggle_size);
                } else {
                    let color = if self.all_completed() { theme::ACCENT } else { theme::TEXT_DIM };
                    if icon_button(ui, egui_phosphor::regular::CARET_DOWN, toggle_size, color) {
                        self.toggle_all(&ctx);
                    }
                }
                ui.add_space(theme::SPACING_MD);

                let response = ui.add_enabled(
                    !self.input_disabled,
                    egui::TextEdit::singleline(&mut self.new_title)
                        .hint_text("What needs to be done?")
                        .font(egui::FontId::proportional(theme::FONT_TODO))
                        .frame(false)
                        .desired_width(ui.available_width() - theme::SPACING_MD),
                );
                if self.focus_input && !self.input_disabled {
                    self.focus_input = false;
                    response.request_focus();
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    self.submit_new_todo(&ctx);
                }
            },
        );
        separator(ui);
    }

    fn render_list(&mut self, ui: &mut egui::Ui) -> Vec<RowAction> {
        let mut actions = Vec::new();
        let Self {
            todos,
            filtered_indices,
            editing,
            processing,
            temp_todo,
            loading,
            ..
        } = self;

        if *loading {
            let width = ui.available_width();
            let (rect, _) = ui.allocate_exact_size(egui::vec2(width, theme::ROW_HEIGHT), egui::Sense::hover());
            loading_overlay(ui, rect);
            if let Some(temp) = temp_todo.as_ref() {
                todo_row(ui, temp, None, true);
            }
            return actions;
        }

        egui::ScrollArea::vertical()
            .max_height(ui.ctx().screen_rect().height() * 0.6)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for &idx in filtered_indices.iter() {
                    let Some(todo) = todos.get(idx) else {
                        continue;
                    };
                    let edit = editing.as_mut().filter(|e| e.id == todo.id);
                    if let Some(action) = todo_row(ui, todo, edit, processing.contains(&todo.id)) {
                        actions.push(action);
                    }
                }
                if let Some(temp) = temp_todo.as_ref() {
                    todo_row(ui, temp, None, true);
                }
            });
        actions
    }

    fn apply_row_actions(&mut self, ctx: &egui::Context, actions: Vec<RowAction>) {
        for action in actions {
            match action {
                RowAction::Toggle(id) => self.toggle_todo(ctx, id),
                RowAction::StartEdit(id) => self.start_edit(id),
                RowAction::CommitEdit => self.commit_edit(ctx),
                RowAction::CancelEdit => self.cancel_edit(),
                RowAction::Delete(id) => self.delete_todo(ctx, id),
            }
        }
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let width = ui.available_width();
        ui.allocate_ui_with_layout(
            egui::vec2(width, theme::FOOTER_HEIGHT),
            egui::Layout::left_to_right(egui::Align::Center),
            |ui| {
                ui.add_space(theme::SPACING_XL);
                ui.add(egui::Label::new(
                    egui::RichText::new(items_left_label(self.active_count()))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                ));
                ui.add_space(theme::SPACING_XL);

                for filter in TodoFilter::ALL {
                    if filter_link(ui, filter.label(), self.filter == filter) {
                        self.set_filter(filter);
                    }
                    ui.add_space(theme::SPACING_SM);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(theme::SPACING_XL);
                    let has_completed = self.completed_count() > 0;
                    let color = if has_completed { theme::TEXT_MUTED } else { theme::BTN_DISABLED_TEXT };
                    let clicked = ui
                        .add_enabled(
                            has_completed,
                            egui::Button::new(
                                egui::RichText::new("Clear completed")
                                    .size(theme::FONT_SMALL)
                                    .color(color),
                            )
                            .frame(false),
                        )
                        .clicked();
                    if clicked {
                        self.clear_completed(&ctx);
                    }
                });
            },
        );
    }

    /// 1.0 while the banner is shown, easing to 0.0 after it hides.
    fn banner_opacity(&self, ctx: &egui::Context) -> f32 {
        ctx.animate_bool_with_time(egui::Id::new("error_banner_fade"), self.error_visible, ERROR_FADE_SECS)
    }

    pub fn render_error_banner(&mut self, ctx: &egui::Context) {
        let opacity = self.banner_opacity(ctx);
        if opacity <= 0.0 {
            return;
        }
        // The hidden banner keeps its last message while it fades out
        let message = self.error_message.message();
        let visible = self.error_visible;
        egui::Area::new(egui::Id::new("error_banner"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -theme::SPACING_XL))
            .order(egui::Order::Foreground)
            .interactable(visible)
            .show(ctx, |ui| {
                ui.set_opacity(opacity);
                theme::banner_frame().show(ui, |ui| {
                    ui.set_width(theme::BANNER_WIDTH);
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(egui_phosphor::regular::WARNING)
                                .size(theme::FONT_BODY)
                                .color(theme::STATUS_ERROR),
                        );
                        ui.label(
                            egui::RichText::new(message)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_PRIMARY),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if icon_button(ui, egui_phosphor::regular::X, 20.0, theme::TEXT_MUTED) && visible {
                                self.dismiss_error();
                            }
                        });
                    });
                });
            });
    }
}

/// One todo line. `edit` is set when this todo's title is being edited.
fn todo_row(
    ui: &mut egui::Ui,
    todo: &Todo,
    edit: Option<&mut EditState>,
    processing: bool,
) -> Option<RowAction> {
    let mut action = None;
    let width = ui.available_width();
    let editing = edit.is_some();

    let row = ui.allocate_ui_with_layout(
        egui::vec2(width, theme::ROW_HEIGHT),
        egui::Layout::left_to_right(egui::Align::Center),
        |ui| {
            ui.set_min_height(theme::ROW_HEIGHT);
            ui.add_space(theme::SPACING_MD + theme::SPACING_SM);
            if editing {
                ui.add_space(theme::CHECKBOX_SIZE);
            } else if todo_checkbox(ui, todo.completed, !processing && todo.id != TEMP_TODO_ID).clicked() {
                action = Some(RowAction::Toggle(todo.id));
            }
            ui.add_space(theme::SPACING_LG);

            if let Some(edit) = edit {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut edit.draft)
                        .font(egui::FontId::proportional(theme::FONT_TODO))
                        .desired_width(ui.available_width() - theme::SPACING_XL),
                );
                if edit.request_focus {
                    edit.request_focus = false;
                    response.request_focus();
                }
                if response.lost_focus() {
                    action = if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        Some(RowAction::CancelEdit)
                    } else {
                        Some(RowAction::CommitEdit)
                    };
                }
                return;
            }

            let mut text = egui::RichText::new(&todo.title).size(theme::FONT_TODO);
            text = if todo.completed {
                text.strikethrough().color(theme::TEXT_DONE)
            } else {
                text.color(theme::TEXT_SECONDARY)
            };
            let delete_size = 28.0;
            let label_width = (ui.available_width() - delete_size - theme::SPACING_LG).max(0.0);
            let label = ui
                .allocate_ui_with_layout(
                    egui::vec2(label_width, theme::ROW_HEIGHT),
                    egui::Layout::left_to_right(egui::Align::Center),
                    |ui| {
                        ui.set_min_width(label_width);
                        ui.add(egui::Label::new(text).truncate().sense(egui::Sense::click()))
                    },
                )
                .inner;
            if label.double_clicked() && !processing {
                action = Some(RowAction::StartEdit(todo.id));
            }

            let hovered = ui.ui_contains_pointer();
            let color = if hovered { theme::STATUS_ERROR } else { theme::BG_ELEVATED };
            if icon_button(ui, egui_phosphor::regular::X, delete_size, color) && !processing {
                action = Some(RowAction::Delete(todo.id));
            }
        },
    );

    if processing {
        loading_overlay(ui, row.response.rect);
    }
    separator(ui);
    action
}

fn separator(ui: &mut egui::Ui) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, theme::STROKE_DEFAULT), egui::Sense::hover());
    ui.painter().hline(
        rect.x_range(),
        rect.center().y,
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
    );
}

fn render_user_warning(ui: &mut egui::Ui) {
    theme::card_frame()
        .inner_margin(egui::Margin::same(theme::SPACING_XL as i8))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(format!("{}  No user id configured", egui_phosphor::regular::WARNING))
                    .size(theme::FONT_TODO)
                    .color(theme::STATUS_WARNING),
            );
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new(format!(
                    "Set \"user_id\" in settings.json or the {} environment variable, then restart.",
                    ENV_USER_ID
                ))
                .size(theme::FONT_BODY)
                .color(theme::TEXT_MUTED),
            );
        });
}
