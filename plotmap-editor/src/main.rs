use clap::Parser;
use eframe::egui;
use plotmap_core::store::PlotStore;
use plotmap_core::{BoundaryEditor, CommitError, PlotId, PlotSet, PlotViewer, Shortcut, Tool};
use std::path::{Path, PathBuf};

mod config;
use config::AppConfig;

mod menu;
use menu::{MenuAction, MenuSystem};

mod panes;
use panes::{AppMode, PaneInstance, PaneRenderer, PaneType, PlanImage, SharedPaneState};

mod store;
use store::JsonFilePlotStore;

/// Plotmap - draw and browse plot boundaries on a site plan
#[derive(Parser, Debug)]
#[command(name = "Plotmap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Plot file (JSON); created on the first save if it does not exist
    #[arg(default_value = "plots.json")]
    plots: PathBuf,

    /// Site plan image drawn behind the plots
    #[arg(long)]
    image: Option<PathBuf>,

    /// Plan width in pixels when there is no image
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Plan height in pixels when there is no image
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Open the read-only viewer instead of the editor
    #[arg(long)]
    viewer: bool,
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting Plotmap with {}", args.plots.display());

    let mut config = AppConfig::load();

    let store = match JsonFilePlotStore::open(&args.plots) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open {}: {}", args.plots.display(), e);
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };
    config.add_recent_file(args.plots.clone());

    let image = match &args.image {
        Some(path) => {
            config.set_last_image(path.clone());
            Some(path.clone())
        }
        None => config.last_image.clone(),
    };

    let mode = if args.viewer { AppMode::Viewer } else { AppMode::Editor };
    let fallback_size = egui::vec2(args.width as f32, args.height as f32);

    let title = match mode {
        AppMode::Editor => "Plotmap Editor",
        AppMode::Viewer => "Plotmap",
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title(title)
            .with_app_id("plotmap"),
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(move |cc| {
            let plan = load_plan(&cc.egui_ctx, image.as_deref(), fallback_size);
            Ok(Box::new(EditorApp::new(mode, config, store, plan)))
        }),
    )
}

/// Load the site plan image into a texture
///
/// Without a (readable) image the plan is a blank sheet of `fallback_size`.
fn load_plan(ctx: &egui::Context, path: Option<&Path>, fallback_size: egui::Vec2) -> PlanImage {
    let blank = PlanImage {
        size: fallback_size,
        texture: None,
    };
    let Some(path) = path else {
        return blank;
    };

    match image::open(path) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (width, height) = (rgba.width(), rgba.height());
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [width as usize, height as usize],
                rgba.as_raw(),
            );
            let texture = ctx.load_texture("site-plan", color_image, egui::TextureOptions::LINEAR);
            log::info!("Loaded site plan {}: {}x{}", path.display(), width, height);
            PlanImage {
                size: egui::vec2(width as f32, height as f32),
                texture: Some(texture),
            }
        }
        Err(e) => {
            log::error!("Failed to load site plan {}: {}", path.display(), e);
            blank
        }
    }
}

fn tool_key(tool: Tool) -> egui::Key {
    match tool {
        Tool::Select => egui::Key::V,
        Tool::Polygon => egui::Key::P,
        Tool::Rectangle => egui::Key::R,
        Tool::Edit => egui::Key::E,
        Tool::Pan => egui::Key::H,
    }
}

struct EditorApp {
    mode: AppMode,
    config: AppConfig,
    store: JsonFilePlotStore,
    editor: BoundaryEditor,
    viewer: PlotViewer,
    plan: PlanImage,
    panes: Vec<PaneInstance>, // Side panels first, stage last
    status: Option<String>,   // Status bar message
}

impl EditorApp {
    fn new(mode: AppMode, config: AppConfig, store: JsonFilePlotStore, plan: PlanImage) -> Self {
        let plots = match store.snapshot() {
            Ok(plots) => plots,
            Err(e) => {
                log::error!("Failed to list plots: {}", e);
                PlotSet::default()
            }
        };

        let editor = BoundaryEditor::new(config.editor.clone()).with_plots(plots.clone());
        let viewer = PlotViewer::new(plots, &config.editor);

        let panes = vec![
            PaneInstance::new(PaneType::Toolbar),
            PaneInstance::new(PaneType::PlotList),
            PaneInstance::new(PaneType::Stage),
        ];

        Self {
            mode,
            config,
            store,
            editor,
            viewer,
            plan,
            panes,
            status: None,
        }
    }

    /// Push the store's plots to the editor and viewer
    fn refresh_plots(&mut self) {
        match self.store.snapshot() {
            Ok(plots) => {
                self.editor.set_plots(plots.clone());
                self.viewer.set_plots(plots);
            }
            Err(e) => {
                log::error!("Failed to list plots: {}", e);
                self.status = Some(format!("Could not read plots: {e}"));
            }
        }
    }

    fn plot_label(&self, id: PlotId) -> String {
        self.editor
            .plots()
            .get(id)
            .map(|plot| plot.display_label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn open_plot_file(&mut self, path: PathBuf) {
        match JsonFilePlotStore::open(&path) {
            Ok(store) => {
                self.editor.cancel();
                self.store = store;
                self.refresh_plots();
                self.status = Some(format!("Opened {}", path.display()));
                self.config.add_recent_file(path);
            }
            Err(e) => {
                log::error!("Failed to open {}: {}", path.display(), e);
                self.status = Some(format!("Could not open {}: {e}", path.display()));
            }
        }
    }

    fn save_boundary(&mut self) {
        let result = self.editor.commit_with(|request| self.store.submit(request));
        match result {
            Ok(plot) => {
                self.status = Some(format!("Saved {}", plot.display_label));
                self.refresh_plots();
                self.config.add_recent_file(self.store.path().to_path_buf());
            }
            Err(CommitError::Invalid(e)) => {
                self.status = Some(e.to_string());
            }
            Err(CommitError::Save(e)) => {
                log::error!("Saving boundary failed: {}", e);
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    fn apply_shortcut(&mut self, shortcut: Shortcut) {
        let response = self.editor.handle(shortcut.into());
        if let Some(message) = panes::status_message(&response) {
            self.status = Some(message);
        }
    }

    fn handle_menu_action(&mut self, ctx: &egui::Context, action: MenuAction) {
        // The viewer only pans, zooms and inquires
        if self.mode == AppMode::Viewer
            && !matches!(
                action,
                MenuAction::ZoomIn
                    | MenuAction::ZoomOut
                    | MenuAction::ResetView
                    | MenuAction::Inquire(_)
                    | MenuAction::Quit
            )
        {
            return;
        }

        match action {
            // File menu
            MenuAction::Save => self.save_boundary(),
            MenuAction::OpenRecent(index) => {
                if let Some(path) = self.config.recent_files().get(index).cloned() {
                    self.open_plot_file(path);
                }
            }
            MenuAction::ClearRecentFiles => self.config.clear_recent_files(),
            MenuAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),

            // Edit menu
            MenuAction::Undo => self.apply_shortcut(Shortcut::Undo),
            MenuAction::Redo => self.apply_shortcut(Shortcut::Redo),
            MenuAction::DeleteVertex => self.apply_shortcut(Shortcut::DeleteVertex),
            MenuAction::Escape => self.apply_shortcut(Shortcut::Escape),

            // Plot menu
            MenuAction::NewPlot => {
                self.editor.start_new();
                self.status = Some("Drawing a new plot".to_string());
            }
            MenuAction::EditPlot(id) => match self.editor.start_edit_plot(id) {
                Ok(()) => self.status = Some(format!("Editing {}", self.plot_label(id))),
                Err(e) => self.status = Some(e.to_string()),
            },
            MenuAction::DeletePlot(id) => {
                let label = self.plot_label(id);
                if self.editor.editing() == Some(id) {
                    self.editor.cancel();
                }
                match self.store.delete(id) {
                    Ok(()) => {
                        log::info!("Deleted plot {}", id);
                        self.status = Some(format!("Deleted {label}"));
                        self.refresh_plots();
                    }
                    Err(e) => {
                        log::error!("Failed to delete plot {}: {}", id, e);
                        self.status = Some(format!("Could not delete {label}: {e}"));
                    }
                }
            }
            MenuAction::Duplicate => match self.editor.duplicate() {
                Ok(()) => self.status = Some("Editing a copy, save to create a new plot".to_string()),
                Err(e) => self.status = Some(e.to_string()),
            },
            MenuAction::FinishPolygon => self.apply_shortcut(Shortcut::Finish),
            MenuAction::CancelEdit => {
                self.editor.cancel();
                self.status = None;
            }
            MenuAction::SelectTool(tool) => {
                let response = self.editor.select_tool(tool);
                if let Some(message) = panes::status_message(&response) {
                    self.status = Some(message);
                }
            }

            // View menu
            MenuAction::ZoomIn => {
                match self.mode {
                    AppMode::Editor => self.editor.zoom_in(),
                    AppMode::Viewer => self.viewer.zoom_in(),
                };
            }
            MenuAction::ZoomOut => {
                match self.mode {
                    AppMode::Editor => self.editor.zoom_out(),
                    AppMode::Viewer => self.viewer.zoom_out(),
                };
            }
            MenuAction::ResetView => match self.mode {
                AppMode::Editor => self.editor.reset_view(),
                AppMode::Viewer => self.viewer.reset_view(),
            },

            MenuAction::Inquire(id) => {
                let Some(plot) = self.viewer.plots().get(id) else {
                    return;
                };
                log::info!("Inquiry for plot {} ({})", plot.display_label, plot.id);
                self.status = Some(format!(
                    "Inquiry: {} ({})",
                    plot.display_label,
                    plot.status.display_name()
                ));
            }
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Disable egui's built-in Ctrl+Plus/Minus zoom behavior
        // We handle zoom ourselves for the stage
        ctx.options_mut(|o| {
            o.zoom_with_keyboard = false;
        });

        let viewer = self.mode == AppMode::Viewer;

        // Actions to execute after rendering (two-phase dispatch)
        let mut pending_actions: Vec<MenuAction> = Vec::new();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            let recent_files = self.config.recent_files();
            if let Some(action) = MenuSystem::render_egui_menu_bar(ui, &recent_files, viewer) {
                pending_actions.push(action);
            }
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let hint = match self.editor.mode() {
                    Some(tool) if !viewer => tool.usage_hint(),
                    _ if viewer => "Click a plot to inquire about it",
                    _ => "Pick a plot to edit, or start a new one",
                };
                ui.label(egui::RichText::new(hint).weak());
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        for pane in &mut self.panes {
            let mut shared = SharedPaneState {
                mode: self.mode,
                editor: &mut self.editor,
                viewer: &mut self.viewer,
                plan: &self.plan,
                status: &mut self.status,
                pending_actions: &mut pending_actions,
            };

            match pane.pane_type() {
                PaneType::Toolbar => {
                    egui::SidePanel::left(egui::Id::new(pane.name()))
                        .resizable(false)
                        .exact_width(140.0)
                        .show(ctx, |ui| {
                            let rect = ui.available_rect_before_wrap();
                            pane.render_content(ui, rect, &mut shared);
                        });
                }
                PaneType::PlotList => {
                    egui::SidePanel::right(egui::Id::new(pane.name()))
                        .default_width(220.0)
                        .show(ctx, |ui| {
                            let rect = ui.available_rect_before_wrap();
                            pane.render_content(ui, rect, &mut shared);
                        });
                }
                PaneType::Stage => {
                    egui::CentralPanel::default()
                        .frame(egui::Frame::default())
                        .show(ctx, |ui| {
                            let rect = ui.available_rect_before_wrap();
                            pane.render_content(ui, rect, &mut shared);
                        });
                }
            }
        }

        // Check keyboard shortcuts AFTER UI is rendered
        // This ensures text fields have had a chance to claim focus first
        let wants_keyboard = ctx.wants_keyboard_input();

        ctx.input(|i| {
            if let Some(action) = MenuSystem::check_shortcuts(i, viewer) {
                pending_actions.push(action);
                return;
            }

            // Tool shortcuts (only if no modifiers are held AND no text input is focused)
            if !viewer
                && !wants_keyboard
                && !i.modifiers.ctrl
                && !i.modifiers.shift
                && !i.modifiers.alt
                && !i.modifiers.command
            {
                if let Some(tool) = Tool::all().iter().find(|tool| i.key_pressed(tool_key(**tool))) {
                    pending_actions.push(MenuAction::SelectTool(*tool));
                }
            }
        });

        for action in pending_actions {
            self.handle_menu_action(ctx, action);
        }
    }
}
