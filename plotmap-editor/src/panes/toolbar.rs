/// Toolbar pane - displays drawing tool buttons and session actions
///
/// The toolbar shows all available drawing tools in a responsive grid layout.
/// Clicks are queued as actions and applied after the frame is rendered.

use super::{AppMode, PaneRenderer, SharedPaneState};
use crate::menu::MenuAction;
use eframe::egui;
use plotmap_core::Tool;

/// Toolbar pane state
pub struct ToolbarPane {
    // No local state needed for toolbar
}

impl ToolbarPane {
    pub fn new() -> Self {
        Self {}
    }

    fn render_tools(&mut self, ui: &mut egui::Ui, rect: egui::Rect, shared: &mut SharedPaneState) -> f32 {
        let button_size = 56.0;
        let button_padding = 8.0;
        let button_spacing = 4.0;

        // Calculate how many columns we can fit
        let available_width = rect.width() - (button_padding * 2.0);
        let columns =
            ((available_width + button_spacing) / (button_size + button_spacing)).floor() as usize;
        let columns = columns.max(1);

        let tools = Tool::all();
        let total_tools = tools.len();
        let total_rows = total_tools.div_ceil(columns);

        let active_tool = shared.editor.mode();
        let enabled = active_tool.is_some();

        let mut y = rect.top() + button_padding;

        // Process tools row by row for centered layout
        for row in 0..total_rows {
            let start_idx = row * columns;
            let end_idx = (start_idx + columns).min(total_tools);
            let buttons_in_row = end_idx - start_idx;

            let row_width = (buttons_in_row as f32 * button_size)
                + (buttons_in_row.saturating_sub(1) as f32 * button_spacing);

            // Center the row
            let mut x = rect.left() + (rect.width() - row_width) / 2.0;

            for tool in &tools[start_idx..end_idx] {
                let button_rect =
                    egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(button_size, button_size));
                let is_selected = active_tool == Some(*tool);

                let bg_color = if is_selected {
                    egui::Color32::from_rgb(70, 100, 150)
                } else if enabled {
                    egui::Color32::from_rgb(50, 50, 50)
                } else {
                    egui::Color32::from_rgb(35, 35, 35)
                };
                ui.painter().rect_filled(button_rect, 4.0, bg_color);

                let text_color = if enabled {
                    egui::Color32::from_gray(220)
                } else {
                    egui::Color32::from_gray(110)
                };
                ui.painter().text(
                    button_rect.center() - egui::vec2(0.0, 8.0),
                    egui::Align2::CENTER_CENTER,
                    tool.shortcut_hint(),
                    egui::FontId::proportional(20.0),
                    text_color,
                );
                ui.painter().text(
                    button_rect.center() + egui::vec2(0.0, 14.0),
                    egui::Align2::CENTER_CENTER,
                    tool.display_name(),
                    egui::FontId::proportional(10.0),
                    text_color,
                );

                let button_id = ui.id().with(("tool_button", *tool as usize));
                let sense = if enabled { egui::Sense::click() } else { egui::Sense::hover() };
                let response = ui.interact(button_rect, button_id, sense);

                if response.clicked() {
                    shared.pending_actions.push(MenuAction::SelectTool(*tool));
                }

                if response.hovered() && enabled {
                    ui.painter().rect_stroke(
                        button_rect,
                        4.0,
                        egui::Stroke::new(2.0, egui::Color32::from_gray(180)),
                        egui::StrokeKind::Middle,
                    );
                }

                response.on_hover_text(format!(
                    "{} ({})\n{}",
                    tool.display_name(),
                    tool.shortcut_hint(),
                    tool.usage_hint()
                ));

                if is_selected {
                    ui.painter().rect_stroke(
                        button_rect,
                        4.0,
                        egui::Stroke::new(2.0, egui::Color32::from_rgb(100, 150, 255)),
                        egui::StrokeKind::Middle,
                    );
                }

                x += button_size + button_spacing;
            }

            y += button_size + button_spacing;
        }

        y
    }
}

impl PaneRenderer for ToolbarPane {
    fn render_content(&mut self, ui: &mut egui::Ui, rect: egui::Rect, shared: &mut SharedPaneState) {
        let mut top = rect.top();
        if shared.mode == AppMode::Editor {
            top = self.render_tools(ui, rect, shared) + 8.0;
        }

        let actions_rect = egui::Rect::from_min_max(egui::pos2(rect.left() + 8.0, top), rect.max);
        let mut child = ui.new_child(egui::UiBuilder::new().max_rect(actions_rect));
        child.vertical_centered_justified(|ui| {
            if shared.mode == AppMode::Editor {
                let active = shared.editor.is_active();

                if ui.button("New Plot").clicked() {
                    shared.pending_actions.push(MenuAction::NewPlot);
                }
                ui.add_enabled_ui(active, |ui| {
                    if ui.button("Save").clicked() {
                        shared.pending_actions.push(MenuAction::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        shared.pending_actions.push(MenuAction::CancelEdit);
                    }
                    if ui.button("Duplicate").clicked() {
                        shared.pending_actions.push(MenuAction::Duplicate);
                    }
                });
                ui.separator();

                ui.add_enabled_ui(shared.editor.can_undo(), |ui| {
                    if ui.button("Undo").clicked() {
                        shared.pending_actions.push(MenuAction::Undo);
                    }
                });
                ui.add_enabled_ui(shared.editor.can_redo(), |ui| {
                    if ui.button("Redo").clicked() {
                        shared.pending_actions.push(MenuAction::Redo);
                    }
                });
                let has_selection = shared
                    .editor
                    .session()
                    .is_some_and(|session| session.selected_vertex().is_some());
                ui.add_enabled_ui(has_selection, |ui| {
                    if ui.button("Delete Point").clicked() {
                        shared.pending_actions.push(MenuAction::DeleteVertex);
                    }
                });
                ui.separator();
            }

            if ui.button("Zoom In").clicked() {
                shared.pending_actions.push(MenuAction::ZoomIn);
            }
            if ui.button("Zoom Out").clicked() {
                shared.pending_actions.push(MenuAction::ZoomOut);
            }
            if ui.button("Reset View").clicked() {
                shared.pending_actions.push(MenuAction::ResetView);
            }

            let zoom = match shared.mode {
                AppMode::Editor => shared.editor.view().zoom,
                AppMode::Viewer => shared.viewer.view().zoom,
            };
            ui.label(egui::RichText::new(format!("{:.0}%", zoom * 100.0)).weak());
        });
    }

    fn name(&self) -> &str {
        "Toolbar"
    }
}
