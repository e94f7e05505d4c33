/// Single-file chooser window for the Upload stub.
///
/// Browses from the home directory, directories listed first, hidden entries
/// skipped. Choosing a file yields its name; nothing is read or sent.
use crate::ui_components::colors::*;
use eframe::egui;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct ChooserEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// List a directory: directories first, then files, each case-insensitively by name
pub fn list_dir(dir: &Path) -> std::io::Result<Vec<ChooserEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::debug!("[Chooser] Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(ChooserEntry {
            name,
            path: entry.path(),
            is_dir,
        });
    }

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

pub struct FileChooser {
    pub is_open: bool,
    current_dir: PathBuf,
    entries: Vec<ChooserEntry>,
    error: Option<String>,
}

impl Default for FileChooser {
    fn default() -> Self {
        let start = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            is_open: false,
            current_dir: start,
            entries: Vec::new(),
            error: None,
        }
    }
}

impl FileChooser {
    pub fn open(&mut self) {
        self.is_open = true;
        let dir = self.current_dir.clone();
        self.navigate(dir);
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn entries(&self) -> &[ChooserEntry] {
        &self.entries
    }

    /// Change directory; on failure the previous listing stays and the error is shown
    pub fn navigate(&mut self, dir: PathBuf) {
        match list_dir(&dir) {
            Ok(entries) => {
                self.entries = entries;
                self.current_dir = dir;
                self.error = None;
            }
            Err(e) => {
                log::warn!("[Chooser] Cannot open {}: {}", dir.display(), e);
                self.error = Some(format!("Cannot open {}: {}", dir.display(), e));
            }
        }
    }

    /// Draw the window; returns the chosen file name
    pub fn show(&mut self, ctx: &egui::Context) -> Option<String> {
        if !self.is_open {
            return None;
        }

        let mut chosen = None;
        let mut go_to = None;
        let mut open = true;

        egui::Window::new("Select a file")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size([460.0, 380.0])
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("⬆ Up").clicked() {
                        go_to = self.current_dir().parent().map(Path::to_path_buf);
                    }
                    ui.label(
                        egui::RichText::new(self.current_dir().display().to_string())
                            .size(12.0)
                            .color(TEXT_SECONDARY),
                    );
                });

                if let Some(error) = &self.error {
                    ui.label(egui::RichText::new(error).size(12.0).color(DANGER));
                }
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.entries().is_empty() {
                        ui.label(egui::RichText::new("Empty folder").color(TEXT_MUTED));
                    }
                    for entry in self.entries() {
                        let label = if entry.is_dir {
                            format!("📁 {}", entry.name)
                        } else {
                            format!("📄 {}", entry.name)
                        };
                        if ui.selectable_label(false, label).clicked() {
                            if entry.is_dir {
                                go_to = Some(entry.path.clone());
                            } else {
                                chosen = Some(entry.name.clone());
                            }
                        }
                    }
                });
            });

        if let Some(dir) = go_to {
            self.navigate(dir);
        }
        if chosen.is_some() || !open {
            self.is_open = false;
        }
        chosen
    }
}
