mod rename_dialog;

pub use rename_dialog::RenameDialog;

use crate::catalog::AppRecord;
use crate::controller::{AppState, Command, Outcome};
use crate::layout::{CategoryLayout, Metrics};
use crate::toast_log::append_toast_log;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::collections::HashMap;
use std::path::PathBuf;

const TOAST_SECONDS: f64 = 4.0;

/// Fonts tried in order so category and shortcut names in CJK render.
#[cfg(target_os = "windows")]
const CJK_FONT_CANDIDATES: &[&str] = &[
    r"C:\Windows\Fonts\msyh.ttc",
    r"C:\Windows\Fonts\simhei.ttf",
    r"C:\Windows\Fonts\simsun.ttc",
];
#[cfg(not(target_os = "windows"))]
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
];

fn install_cjk_font(ctx: &egui::Context) {
    let Some((path, bytes)) = CJK_FONT_CANDIDATES
        .iter()
        .find_map(|p| std::fs::read(p).ok().map(|b| (*p, b)))
    else {
        tracing::debug!("no CJK font found; using egui defaults");
        return;
    };
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".into(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".into());
    }
    ctx.set_fonts(fonts);
    tracing::debug!(path, "installed CJK fallback font");
}

/// Main window: search box above a scrolling grid per category.
pub struct LauncherApp {
    state: AppState,
    query: String,
    textures: HashMap<PathBuf, egui::TextureHandle>,
    toasts: Toasts,
    rename_dialog: RenameDialog,
    closing: bool,
}

impl LauncherApp {
    pub fn new(ctx: &egui::Context, state: AppState) -> Self {
        // Ctrl +/-/0 drive the grid zoom, not egui's global zoom.
        ctx.options_mut(|o| o.zoom_with_keyboard = false);
        install_cjk_font(ctx);
        Self {
            query: state.query().to_string(),
            state,
            textures: HashMap::new(),
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
            rename_dialog: RenameDialog::default(),
            closing: false,
        }
    }

    fn report(&mut self, kind: ToastKind, msg: String) {
        if matches!(kind, ToastKind::Error) {
            tracing::error!("{msg}");
        }
        append_toast_log(&self.state.paths.toast_log, &msg);
        self.toasts.add(Toast {
            text: msg.into(),
            kind,
            options: ToastOptions::default().duration_in_seconds(TOAST_SECONDS),
        });
    }

    fn apply(&mut self, cmd: Command) {
        let what = match &cmd {
            Command::Launch(_) => "launch",
            Command::Rename { .. } => "rename",
            Command::ToggleFavorite(_) => "update favorites",
            Command::Remove(_) => "remove",
            _ => "update view",
        };
        match self.state.apply(cmd) {
            Ok(Outcome::Reloaded) => self.textures.clear(),
            Ok(Outcome::Renamed { old, new }) => {
                if let Some(tex) = self.textures.remove(&old) {
                    self.textures.insert(new, tex);
                }
            }
            Ok(Outcome::Favorite { favorite, .. }) => {
                let msg = if favorite {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                };
                self.report(ToastKind::Info, msg.into());
            }
            Ok(Outcome::Unchanged | Outcome::Relayout | Outcome::Launched) => {}
            Err(e) => self.report(ToastKind::Error, format!("Failed to {what}: {e:#}")),
        }
    }

    fn input_commands(&self, ctx: &egui::Context) -> (Vec<Command>, bool) {
        let dialog_open = self.rename_dialog.open;
        ctx.input(|i| {
            let mut cmds = Vec::new();
            let ctrl = i.modifiers.command;
            if ctrl && (i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals)) {
                cmds.push(Command::ZoomIn);
            }
            if ctrl && i.key_pressed(egui::Key::Minus) {
                cmds.push(Command::ZoomOut);
            }
            if ctrl && i.key_pressed(egui::Key::Num0) {
                cmds.push(Command::ZoomReset);
            }
            let zoom = i.zoom_delta();
            if zoom != 1.0 {
                cmds.push(Command::ZoomWheel(zoom - 1.0));
            }
            if i.key_pressed(egui::Key::F5) {
                cmds.push(Command::Refresh);
            }
            let close = !dialog_open && i.key_pressed(egui::Key::Escape);
            (cmds, close)
        })
    }

    fn save_on_exit(&mut self, ctx: &egui::Context) {
        let (outer, inner) = ctx.input(|i| (i.viewport().outer_rect, i.viewport().inner_rect));
        let view = self.state.view();
        let position = outer
            .map(|r| (r.min.x.round() as i32, r.min.y.round() as i32))
            .unwrap_or(view.position);
        let size = inner
            .map(|r| (r.width().round() as i32, r.height().round() as i32))
            .unwrap_or(view.size);
        if let Err(e) = self.state.shutdown(position, size) {
            tracing::error!(error = %e, "failed to save view config");
        }
    }
}

fn texture_for(
    textures: &mut HashMap<PathBuf, egui::TextureHandle>,
    ctx: &egui::Context,
    record: &AppRecord,
) -> egui::TextureHandle {
    textures
        .entry(record.shortcut_path.clone())
        .or_insert_with(|| {
            let size = [record.icon.width() as usize, record.icon.height() as usize];
            ctx.load_texture(
                record.shortcut_path.to_string_lossy(),
                egui::ColorImage::from_rgba_unmultiplied(size, record.icon.as_raw()),
                egui::TextureOptions::LINEAR,
            )
        })
        .clone()
}

/// Icon above a wrapped label, clickable as one cell.
fn app_tile(
    ui: &mut egui::Ui,
    texture: &egui::TextureHandle,
    label: &str,
    m: &Metrics,
) -> egui::Response {
    let size = egui::vec2(m.button_max_width, m.button_height);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    if !ui.is_rect_visible(rect) {
        return response;
    }
    let visuals = ui.style().interact(&response);
    let painter = ui.painter();
    if response.hovered() || response.is_pointer_button_down_on() {
        painter.rect_filled(rect, 8.0 * m.icon / 64.0, visuals.weak_bg_fill);
    }
    let pad = m.spacing / 2.0;
    let icon_rect = egui::Rect::from_center_size(
        egui::pos2(rect.center().x, rect.top() + pad + m.icon / 2.0),
        egui::vec2(m.icon, m.icon),
    );
    painter.image(
        texture.id(),
        icon_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
    let galley = painter.layout(
        label.to_string(),
        egui::FontId::proportional(m.item_font),
        visuals.text_color(),
        rect.width() - pad * 2.0,
    );
    let text_pos = egui::pos2(
        rect.center().x - galley.size().x / 2.0,
        icon_rect.bottom() + pad,
    );
    painter.galley(text_pos, galley, visuals.text_color());
    response
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (mut pending, escape) = self.input_commands(ctx);
        if escape {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let metrics = Metrics::for_zoom(self.state.zoom());
        let mut rename_request: Option<(PathBuf, String)> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let search = ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .hint_text("Search apps...")
                    .desired_width(f32::INFINITY),
            );
            if search.changed() {
                pending.push(Command::Search(self.query.clone()));
            }
            ui.add_space(8.0);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let width = ui.available_width();
                    let layout: Vec<CategoryLayout<'_>> = self.state.visible_layout(width);
                    if layout.is_empty() {
                        if self.state.query().trim().is_empty() {
                            ui.label(format!(
                                "No applications. Put .lnk shortcuts into category folders under {} and press F5.",
                                self.state.paths.apps_root.display()
                            ));
                        } else {
                            ui.label("No matching applications.");
                        }
                        return;
                    }
                    for category in &layout {
                        ui.add_space(metrics.spacing);
                        ui.label(
                            egui::RichText::new(category.name)
                                .size(metrics.heading_font)
                                .strong(),
                        );
                        ui.separator();
                        egui::Grid::new(category.name)
                            .spacing(egui::vec2(metrics.spacing, metrics.spacing))
                            .show(ui, |ui| {
                                for item in &category.items {
                                    if item.col == 0 && item.row > 0 {
                                        ui.end_row();
                                    }
                                    let record = item.record;
                                    let favorite = self.state.is_favorite(record);
                                    let texture = texture_for(&mut self.textures, ctx, record);
                                    let label = if favorite {
                                        format!("★ {}", record.name)
                                    } else {
                                        record.name.clone()
                                    };
                                    let response = app_tile(ui, &texture, &label, &metrics)
                                        .on_hover_text(record.target_path.display().to_string());
                                    if response.clicked() {
                                        pending.push(Command::Launch(record.shortcut_path.clone()));
                                    }
                                    response.context_menu(|ui| {
                                        if ui.button("Launch").clicked() {
                                            pending.push(Command::Launch(
                                                record.shortcut_path.clone(),
                                            ));
                                            ui.close_menu();
                                        }
                                        if ui.button("Rename").clicked() {
                                            rename_request = Some((
                                                record.shortcut_path.clone(),
                                                record.name.clone(),
                                            ));
                                            ui.close_menu();
                                        }
                                        let fav_label = if favorite {
                                            "Remove from favorites"
                                        } else {
                                            "Add to favorites"
                                        };
                                        if ui.button(fav_label).clicked() {
                                            pending.push(Command::ToggleFavorite(
                                                record.shortcut_path.clone(),
                                            ));
                                            ui.close_menu();
                                        }
                                        ui.separator();
                                        if ui.button("Remove from launcher").clicked() {
                                            pending.push(Command::Remove(
                                                record.shortcut_path.clone(),
                                            ));
                                            ui.close_menu();
                                        }
                                    });
                                }
                            });
                    }
                });
        });

        if let Some((path, name)) = rename_request {
            self.rename_dialog.open(&path, &name);
        }
        if let Some(cmd) = self.rename_dialog.ui(ctx) {
            pending.push(cmd);
        }
        for cmd in pending {
            self.apply(cmd);
        }
        self.toasts.show(ctx);

        if ctx.input(|i| i.viewport().close_requested()) && !self.closing {
            self.closing = true;
            self.save_on_exit(ctx);
        }
    }
}
