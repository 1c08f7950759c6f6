/// Plot list pane - every plot with its status
///
/// Clicking a plot opens it for editing (editor) or for an inquiry (viewer).

use super::{status_color, AppMode, PaneRenderer, SharedPaneState};
use crate::menu::MenuAction;
use eframe::egui;
use plotmap_core::PlotStatus;

pub struct PlotListPane {
    /// Show only plots of this status
    filter: Option<PlotStatus>,
}

impl PlotListPane {
    pub fn new() -> Self {
        Self { filter: None }
    }
}

impl PaneRenderer for PlotListPane {
    fn render_content(&mut self, ui: &mut egui::Ui, _rect: egui::Rect, shared: &mut SharedPaneState) {
        let (plots, hovered, editing) = match shared.mode {
            AppMode::Editor => (
                shared.editor.plots().clone(),
                shared.editor.hovered(),
                shared.editor.editing(),
            ),
            AppMode::Viewer => (shared.viewer.plots().clone(), shared.viewer.hovered(), None),
        };

        ui.heading("Plots");

        // Status legend doubles as a filter
        ui.horizontal_wrapped(|ui| {
            if ui.selectable_label(self.filter.is_none(), "All").clicked() {
                self.filter = None;
            }
            for status in PlotStatus::all() {
                let count = plots.iter().filter(|plot| plot.status == *status).count();
                let text = egui::RichText::new(format!("{} ({count})", status.display_name()))
                    .color(status_color(*status, 255));
                if ui.selectable_label(self.filter == Some(*status), text).clicked() {
                    self.filter = Some(*status);
                }
            }
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for plot in plots.iter() {
                if self.filter.is_some_and(|status| status != plot.status) {
                    continue;
                }

                let label = if plot.display_label.is_empty() {
                    "(unnamed)"
                } else {
                    plot.display_label.as_str()
                };
                let mut text = egui::RichText::new(label);
                if !plot.has_boundary() {
                    text = text.italics().weak();
                }

                let response = ui
                    .horizontal(|ui| {
                        let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                        ui.painter().rect_filled(swatch, 2.0, status_color(plot.status, 255));
                        let selected = editing == Some(plot.id) || hovered == Some(plot.id);
                        ui.selectable_label(selected, text)
                    })
                    .inner;

                let response = response.on_hover_text(plot.status.display_name());
                if response.clicked() {
                    let action = match shared.mode {
                        AppMode::Editor => MenuAction::EditPlot(plot.id),
                        AppMode::Viewer => MenuAction::Inquire(plot.id),
                    };
                    shared.pending_actions.push(action);
                }

                if shared.mode == AppMode::Editor {
                    response.context_menu(|ui| {
                        if ui.button("Delete Plot").clicked() {
                            shared.pending_actions.push(MenuAction::DeletePlot(plot.id));
                            ui.close_menu();
                        }
                    });
                }
            }
        });
    }

    fn name(&self) -> &str {
        "Plots"
    }
}
