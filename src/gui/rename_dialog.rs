use crate::controller::Command;
use eframe::egui;
use std::path::{Path, PathBuf};

/// Modal asking for a new display name for one shortcut.
#[derive(Default)]
pub struct RenameDialog {
    pub open: bool,
    path: PathBuf,
    name: String,
    focus: bool,
}

impl RenameDialog {
    pub fn open(&mut self, path: &Path, current: &str) {
        self.path = path.to_path_buf();
        self.name = current.to_string();
        self.open = true;
        self.focus = true;
    }

    /// Draw the dialog; returns the rename request once confirmed.
    pub fn ui(&mut self, ctx: &egui::Context) -> Option<Command> {
        if !self.open {
            return None;
        }
        let mut submit = false;
        let mut close = false;
        egui::Window::new("Rename")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut self.open)
            .show(ctx, |ui| {
                ui.label("New name:");
                let resp = ui.text_edit_singleline(&mut self.name);
                if self.focus {
                    resp.request_focus();
                    self.focus = false;
                }
                if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });
        if submit || close {
            self.open = false;
        }
        submit.then(|| Command::Rename {
            path: self.path.clone(),
            new_name: self.name.clone(),
        })
    }
}
