/// Menu bar and keyboard shortcuts
///
/// Menu definitions are centralized so the egui menu bar and the keyboard
/// shortcut handler are generated from a single source.

use eframe::egui;
use plotmap_core::{PlotId, Tool};

/// Keyboard shortcut definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: ShortcutKey,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// Keys that can be used in shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    // Letters
    D, N, Q, S, Y, Z,
    // Numbers
    Num0,
    // Symbols
    Minus, Equals, Plus,
    // Special
    Delete, Backspace, Escape, Enter,
}

impl Shortcut {
    pub const fn new(key: ShortcutKey, ctrl: bool, shift: bool, alt: bool) -> Self {
        Self { key, ctrl, shift, alt }
    }

    /// Check if this shortcut matches the current egui input state
    pub fn matches_egui_input(&self, input: &egui::InputState) -> bool {
        // Check modifiers first
        if self.ctrl != input.modifiers.command {
            return false;
        }
        if self.shift != input.modifiers.shift {
            return false;
        }
        if self.alt != input.modifiers.alt {
            return false;
        }

        let key = match self.key {
            ShortcutKey::D => egui::Key::D,
            ShortcutKey::N => egui::Key::N,
            ShortcutKey::Q => egui::Key::Q,
            ShortcutKey::S => egui::Key::S,
            ShortcutKey::Y => egui::Key::Y,
            ShortcutKey::Z => egui::Key::Z,
            ShortcutKey::Num0 => egui::Key::Num0,
            ShortcutKey::Minus => egui::Key::Minus,
            ShortcutKey::Equals => egui::Key::Equals,
            ShortcutKey::Plus => egui::Key::Plus,
            ShortcutKey::Delete => egui::Key::Delete,
            ShortcutKey::Backspace => egui::Key::Backspace,
            ShortcutKey::Escape => egui::Key::Escape,
            ShortcutKey::Enter => egui::Key::Enter,
        };

        input.key_pressed(key)
    }

    /// Format shortcut for display (e.g., "Ctrl+S")
    fn label(&self) -> String {
        let mut parts = Vec::new();

        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.alt {
            parts.push("Alt");
        }

        let key = match self.key {
            ShortcutKey::D => "D",
            ShortcutKey::N => "N",
            ShortcutKey::Q => "Q",
            ShortcutKey::S => "S",
            ShortcutKey::Y => "Y",
            ShortcutKey::Z => "Z",
            ShortcutKey::Num0 => "0",
            ShortcutKey::Minus => "-",
            ShortcutKey::Equals => "=",
            ShortcutKey::Plus => "+",
            ShortcutKey::Delete => "Del",
            ShortcutKey::Backspace => "Backspace",
            ShortcutKey::Escape => "Esc",
            ShortcutKey::Enter => "Enter",
        };
        parts.push(key);

        parts.join("+")
    }
}

/// Everything the menu bar, toolbar, plot list and stage can ask the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    // File menu
    Save,
    OpenRecent(usize), // Index into recent files list
    ClearRecentFiles,
    Quit,

    // Edit menu
    Undo,
    Redo,
    DeleteVertex,
    Escape,

    // Plot menu
    NewPlot,
    EditPlot(PlotId),
    DeletePlot(PlotId),
    Duplicate,
    FinishPolygon,
    CancelEdit,
    SelectTool(Tool),

    // View menu
    ZoomIn,
    ZoomOut,
    ResetView,

    /// Viewer: a plot was clicked
    Inquire(PlotId),
}

/// Menu item definition
pub struct MenuItemDef {
    pub label: &'static str,
    pub action: MenuAction,
    pub shortcut: Option<Shortcut>,
}

/// Menu structure definition - can be an item, separator, or submenu
pub enum MenuDef {
    Item(&'static MenuItemDef),
    Separator,
    Submenu {
        label: &'static str,
        children: &'static [MenuDef],
    },
}

// Shortcut constants for clarity
const CTRL: bool = true;
const SHIFT: bool = true;
const NO_CTRL: bool = false;
const NO_SHIFT: bool = false;
const NO_ALT: bool = false;

// Central menu definitions - single source of truth
impl MenuItemDef {
    // File menu items
    const SAVE: Self = Self { label: "Save Boundary", action: MenuAction::Save, shortcut: Some(Shortcut::new(ShortcutKey::S, CTRL, NO_SHIFT, NO_ALT)) };
    const QUIT: Self = Self { label: "Quit", action: MenuAction::Quit, shortcut: Some(Shortcut::new(ShortcutKey::Q, CTRL, NO_SHIFT, NO_ALT)) };

    // Edit menu items
    const UNDO: Self = Self { label: "Undo", action: MenuAction::Undo, shortcut: Some(Shortcut::new(ShortcutKey::Z, CTRL, NO_SHIFT, NO_ALT)) };
    const REDO: Self = Self { label: "Redo", action: MenuAction::Redo, shortcut: Some(Shortcut::new(ShortcutKey::Z, CTRL, SHIFT, NO_ALT)) };
    const REDO_ALT: Self = Self { label: "Redo", action: MenuAction::Redo, shortcut: Some(Shortcut::new(ShortcutKey::Y, CTRL, NO_SHIFT, NO_ALT)) };
    const DELETE_VERTEX: Self = Self { label: "Delete Point", action: MenuAction::DeleteVertex, shortcut: Some(Shortcut::new(ShortcutKey::Delete, NO_CTRL, NO_SHIFT, NO_ALT)) };
    const DELETE_VERTEX_ALT: Self = Self { label: "Delete Point", action: MenuAction::DeleteVertex, shortcut: Some(Shortcut::new(ShortcutKey::Backspace, NO_CTRL, NO_SHIFT, NO_ALT)) };
    const ESCAPE: Self = Self { label: "Stop Drawing", action: MenuAction::Escape, shortcut: Some(Shortcut::new(ShortcutKey::Escape, NO_CTRL, NO_SHIFT, NO_ALT)) };

    // Plot menu items
    const NEW_PLOT: Self = Self { label: "New Plot", action: MenuAction::NewPlot, shortcut: Some(Shortcut::new(ShortcutKey::N, CTRL, NO_SHIFT, NO_ALT)) };
    const DUPLICATE: Self = Self { label: "Duplicate Boundary", action: MenuAction::Duplicate, shortcut: Some(Shortcut::new(ShortcutKey::D, CTRL, NO_SHIFT, NO_ALT)) };
    const FINISH: Self = Self { label: "Finish Polygon", action: MenuAction::FinishPolygon, shortcut: Some(Shortcut::new(ShortcutKey::Enter, NO_CTRL, NO_SHIFT, NO_ALT)) };
    const CANCEL: Self = Self { label: "Cancel Editing", action: MenuAction::CancelEdit, shortcut: None };

    // View menu items
    const ZOOM_IN: Self = Self { label: "Zoom In", action: MenuAction::ZoomIn, shortcut: Some(Shortcut::new(ShortcutKey::Equals, CTRL, NO_SHIFT, NO_ALT)) };
    const ZOOM_IN_ALT: Self = Self { label: "Zoom In", action: MenuAction::ZoomIn, shortcut: Some(Shortcut::new(ShortcutKey::Plus, CTRL, NO_SHIFT, NO_ALT)) };
    const ZOOM_OUT: Self = Self { label: "Zoom Out", action: MenuAction::ZoomOut, shortcut: Some(Shortcut::new(ShortcutKey::Minus, CTRL, NO_SHIFT, NO_ALT)) };
    const RESET_VIEW: Self = Self { label: "Reset View", action: MenuAction::ResetView, shortcut: Some(Shortcut::new(ShortcutKey::Num0, CTRL, NO_SHIFT, NO_ALT)) };

    /// Items whose shortcuts are live in the editor
    fn editor_shortcuts() -> &'static [&'static MenuItemDef] {
        &[
            &Self::SAVE, &Self::QUIT,
            &Self::UNDO, &Self::REDO, &Self::REDO_ALT,
            &Self::DELETE_VERTEX, &Self::DELETE_VERTEX_ALT, &Self::ESCAPE,
            &Self::NEW_PLOT, &Self::DUPLICATE, &Self::FINISH,
            &Self::ZOOM_IN, &Self::ZOOM_IN_ALT, &Self::ZOOM_OUT, &Self::RESET_VIEW,
        ]
    }

    /// Items whose shortcuts are live in the read-only viewer
    fn viewer_shortcuts() -> &'static [&'static MenuItemDef] {
        &[
            &Self::QUIT,
            &Self::ZOOM_IN, &Self::ZOOM_IN_ALT, &Self::ZOOM_OUT, &Self::RESET_VIEW,
        ]
    }

    /// Editor menu bar structure
    fn editor_menu() -> &'static [MenuDef] {
        &[
            MenuDef::Submenu {
                label: "File",
                children: &[
                    MenuDef::Item(&Self::SAVE),
                    MenuDef::Submenu { label: "Open Recent", children: &[] },
                    MenuDef::Separator,
                    MenuDef::Item(&Self::QUIT),
                ],
            },
            MenuDef::Submenu {
                label: "Edit",
                children: &[
                    MenuDef::Item(&Self::UNDO),
                    MenuDef::Item(&Self::REDO),
                    MenuDef::Separator,
                    MenuDef::Item(&Self::DELETE_VERTEX),
                    MenuDef::Item(&Self::ESCAPE),
                ],
            },
            MenuDef::Submenu {
                label: "Plot",
                children: &[
                    MenuDef::Item(&Self::NEW_PLOT),
                    MenuDef::Item(&Self::DUPLICATE),
                    MenuDef::Item(&Self::FINISH),
                    MenuDef::Separator,
                    MenuDef::Item(&Self::CANCEL),
                ],
            },
            MenuDef::Submenu {
                label: "View",
                children: &[
                    MenuDef::Item(&Self::ZOOM_IN),
                    MenuDef::Item(&Self::ZOOM_OUT),
                    MenuDef::Item(&Self::RESET_VIEW),
                ],
            },
        ]
    }

    fn viewer_menu() -> &'static [MenuDef] {
        &[
            MenuDef::Submenu {
                label: "File",
                children: &[MenuDef::Item(&Self::QUIT)],
            },
            MenuDef::Submenu {
                label: "View",
                children: &[
                    MenuDef::Item(&Self::ZOOM_IN),
                    MenuDef::Item(&Self::ZOOM_OUT),
                    MenuDef::Item(&Self::RESET_VIEW),
                ],
            },
        ]
    }
}

/// egui menu bar and shortcut dispatch
pub struct MenuSystem;

impl MenuSystem {
    /// Check keyboard shortcuts against the current input state
    pub fn check_shortcuts(input: &egui::InputState, viewer: bool) -> Option<MenuAction> {
        let defs = if viewer {
            MenuItemDef::viewer_shortcuts()
        } else {
            MenuItemDef::editor_shortcuts()
        };

        for def in defs {
            if let Some(shortcut) = &def.shortcut {
                if shortcut.matches_egui_input(input) {
                    return Some(def.action);
                }
            }
        }
        None
    }

    /// Render the menu bar
    pub fn render_egui_menu_bar(
        ui: &mut egui::Ui,
        recent_files: &[std::path::PathBuf],
        viewer: bool,
    ) -> Option<MenuAction> {
        let mut action = None;
        let structure = if viewer {
            MenuItemDef::viewer_menu()
        } else {
            MenuItemDef::editor_menu()
        };

        egui::menu::bar(ui, |ui| {
            for menu_def in structure {
                if let Some(a) = Self::render_menu_def(ui, menu_def, recent_files) {
                    action = Some(a);
                }
            }
        });

        action
    }

    /// Recursively render a MenuDef as egui UI
    fn render_menu_def(
        ui: &mut egui::Ui,
        def: &MenuDef,
        recent_files: &[std::path::PathBuf],
    ) -> Option<MenuAction> {
        match def {
            MenuDef::Item(item_def) => {
                if Self::render_menu_item(ui, item_def) {
                    Some(item_def.action)
                } else {
                    None
                }
            }
            MenuDef::Separator => {
                ui.separator();
                None
            }
            MenuDef::Submenu { label, children } => {
                let mut action = None;
                ui.menu_button(*label, |ui| {
                    // "Open Recent" is filled from the config, not the static structure
                    if *label == "Open Recent" {
                        for (index, path) in recent_files.iter().enumerate() {
                            let display_name = path
                                .file_name()
                                .and_then(|s| s.to_str())
                                .unwrap_or("Unknown");

                            if ui.button(display_name).clicked() {
                                action = Some(MenuAction::OpenRecent(index));
                                ui.close_menu();
                            }
                        }

                        if !recent_files.is_empty() {
                            ui.separator();
                        }

                        if ui.button("Clear Recent Files").clicked() {
                            action = Some(MenuAction::ClearRecentFiles);
                            ui.close_menu();
                        }
                    } else {
                        for child in *children {
                            if let Some(a) = Self::render_menu_def(ui, child, recent_files) {
                                action = Some(a);
                                ui.close_menu();
                            }
                        }
                    }
                });
                action
            }
        }
    }

    /// Render a single menu item with label and shortcut
    fn render_menu_item(ui: &mut egui::Ui, def: &MenuItemDef) -> bool {
        let shortcut_text = def.shortcut.map(|s| s.label()).unwrap_or_default();

        // Set minimum width for menu items to prevent cramping
        ui.set_min_width(180.0);

        if shortcut_text.is_empty() {
            ui.add(egui::Button::new(def.label).min_size(egui::vec2(0.0, 0.0))).clicked()
        } else {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 20.0;

                let button = ui.add(egui::Button::new(def.label).min_size(egui::vec2(0.0, 0.0)));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&shortcut_text).weak().size(12.0));
                });

                button.clicked()
            })
            .inner
        }
    }
}
