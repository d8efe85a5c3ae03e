//! Main classifier window.
//!
//! This module contains the `ClassifierApp` struct which implements the
//! `eframe::App` trait for the upload-and-classify workflow.

use super::state::WorkerEvent;
use super::widgets;
use crate::client::PredictionClient;
use crate::config::Config;
use crate::display::format_file_size;
use crate::error::{AppError, Result};
use crate::preview;
use crate::session::{ClassifierSession, ClassifyRequest, RequestState};
use eframe::egui;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// The classifier application window.
///
/// Owns the interaction session and a channel pair for results coming
/// back from worker threads. All state mutation happens on the UI thread
/// inside `update`; workers only ever send tagged events.
pub struct ClassifierApp {
    session: ClassifierSession,
    config: Config,

    // Worker channel
    rx: Receiver<WorkerEvent>,
    tx: Sender<WorkerEvent>,

    // Preview texture, re-uploaded when the selection generation changes
    preview_texture: Option<egui::TextureHandle>,
    texture_generation: u64,

    // Manual path entry (the file-picker analog)
    path_input: String,
}

impl ClassifierApp {
    /// Creates the app, optionally pre-selecting an image file.
    pub fn new(config: Config, initial_image: Option<PathBuf>) -> Self {
        let (tx, rx) = channel();
        let mut app = Self {
            session: ClassifierSession::new(),
            config,
            rx,
            tx,
            preview_texture: None,
            texture_generation: 0,
            path_input: String::new(),
        };
        if let Some(path) = initial_image {
            app.select_path(&path);
        }
        app
    }

    /// Selects a file from disk: replaces the session selection and kicks
    /// off a best-effort preview decode in the background.
    fn select_path(&mut self, path: &Path) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let size_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let media_type = guess_media_type(path);

        let generation = self.session.select_file(file_name, size_bytes, media_type);

        let tx = self.tx.clone();
        let path = path.to_path_buf();
        thread::spawn(move || {
            if let Ok(image) = preview::load_preview(&path) {
                let _ = tx.send(WorkerEvent::Preview { generation, image });
            }
        });
    }

    /// Selects an in-memory file (drag-and-drop without a disk path).
    fn select_bytes(&mut self, name: String, mime: Option<String>, bytes: Arc<[u8]>) {
        let generation = self
            .session
            .select_file(name, bytes.len() as u64, mime.filter(|m| !m.is_empty()));

        let tx = self.tx.clone();
        thread::spawn(move || {
            if let Ok(image) = preview::decode_preview(&bytes) {
                let _ = tx.send(WorkerEvent::Preview { generation, image });
            }
        });
    }

    /// Starts a lookup for the current selection. No-op when nothing is
    /// selected or a request is already in flight.
    fn submit_request(&mut self) {
        if let Some(request) = self.session.begin_classify() {
            self.spawn_fetch(request);
        }
    }

    /// Re-issues the lookup from a settled result or error state.
    fn submit_retry(&mut self) {
        if let Some(request) = self.session.retry() {
            self.spawn_fetch(request);
        }
    }

    /// Runs one prediction fetch on a background thread.
    ///
    /// The thread builds its own single-threaded runtime (the UI thread
    /// must never block) and reports back exactly one tagged event.
    fn spawn_fetch(&self, request: ClassifyRequest) {
        let tx = self.tx.clone();
        let config = self.config.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build();

            let outcome: Result<_> = match runtime {
                Ok(rt) => rt.block_on(async {
                    let client = PredictionClient::new(&config)?;
                    client
                        .fetch_prediction(&request.base_name, request.shots)
                        .await
                }),
                Err(e) => Err(AppError::ui(format!(
                    "Failed to create async runtime: {}",
                    e
                ))),
            };

            let _ = tx.send(WorkerEvent::Prediction {
                generation: request.generation,
                outcome,
            });
        });
    }

    /// Drains pending worker events into the session. Stale events are
    /// rejected inside the session by their generation tag.
    fn process_worker_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                WorkerEvent::Prediction {
                    generation,
                    outcome,
                } => {
                    self.session.apply_outcome(generation, outcome);
                }
                WorkerEvent::Preview { generation, image } => {
                    self.session.set_preview(generation, image);
                }
            }
            ctx.request_repaint();
        }
    }

    /// Ingests files dropped onto the window.
    fn process_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped.into_iter().next() {
            if let Some(path) = file.path {
                self.select_path(&path);
            } else if let Some(bytes) = file.bytes {
                let mime = if file.mime.is_empty() {
                    None
                } else {
                    Some(file.mime)
                };
                self.select_bytes(file.name, mime, bytes);
            }
        }
    }

    /// Uploads the preview texture when a newly decoded preview exists.
    fn refresh_preview_texture(&mut self, ctx: &egui::Context) {
        let generation = self.session.generation();
        if self.preview_texture.is_some() && self.texture_generation == generation {
            return;
        }

        let Some(preview) = self.session.selection().and_then(|s| s.preview.as_ref()) else {
            self.preview_texture = None;
            return;
        };

        let buffer = preview.to_rgba8();
        let size = [preview.width() as usize, preview.height() as usize];
        let pixels = buffer.as_flat_samples();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());

        self.preview_texture =
            Some(ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR));
        self.texture_generation = generation;
    }

    // --- rendering ---

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("SatelliteVision AI");
            ui.label("Remote Sensing Imagery Classification");
            ui.label(
                egui::RichText::new("Few-Shot Learning for Land Use & Land Cover Analysis")
                    .small(),
            );
        });
        ui.add_space(8.0);
    }

    /// Upload prompt shown before any file is selected.
    fn render_upload_ui(&mut self, ui: &mut egui::Ui, drag_active: bool) {
        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            ui.label(egui::RichText::new("🛰").size(40.0));
            ui.label(egui::RichText::new("Upload Satellite Imagery").strong());
            if drag_active {
                ui.label(egui::RichText::new("Drop to upload").strong());
            } else {
                ui.label("Drag and drop your remote sensing image here, or enter a path below");
            }
            ui.label(
                egui::RichText::new(
                    "Supports: Landsat, Sentinel, aerial imagery, and other Earth observation data",
                )
                .small(),
            );
            ui.add_space(8.0);

            ui.label(egui::RichText::new("Few-Shot Learning Configuration").small());
            let mut shots = self.session.shots();
            if widgets::shot_toggle(ui, &mut shots) {
                self.session.set_shots(shots);
            }
            ui.add_space(8.0);

            let mut submitted = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.path_input)
                        .desired_width(320.0)
                        .hint_text("/path/to/image.png"),
                );
                let enter_pressed =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Select Image").clicked() || enter_pressed {
                    submitted = !self.path_input.trim().is_empty();
                }
            });
            if submitted {
                let path = PathBuf::from(self.path_input.trim());
                self.select_path(&path);
                self.path_input.clear();
            }
            ui.add_space(16.0);
        });
    }

    /// Header row and actions for the selected file.
    fn render_file_ui(&mut self, ui: &mut egui::Ui) {
        let Some(selection) = self.session.selection() else {
            return;
        };
        let (file_name, size_bytes) = (selection.file_name.clone(), selection.size_bytes);
        let loading = self.session.request().is_loading();
        let settled = self.session.request().is_settled();

        let mut do_retry = false;
        let mut do_reset = false;
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&file_name).strong());
            widgets::badge(ui, &format_file_size(size_bytes));
            widgets::badge(ui, &format!("{}-Shot", self.session.shots()));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Reset").clicked() {
                    do_reset = true;
                }
                if settled && ui.add_enabled(!loading, egui::Button::new("Retry")).clicked() {
                    do_retry = true;
                }
            });
        });
        if do_reset {
            self.session.reset();
            return;
        }
        if do_retry {
            self.submit_retry();
        }

        let mut shots = self.session.shots();
        if widgets::shot_toggle(ui, &mut shots) {
            self.session.set_shots(shots);
        }

        if !settled {
            let label = if loading {
                "Analyzing Imagery...".to_string()
            } else {
                format!("Classify with {}-Shot Learning", self.session.shots())
            };
            let clicked = ui
                .add_enabled(
                    !loading,
                    egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 28.0)),
                )
                .clicked();
            if clicked {
                self.submit_request();
            }
        }
    }

    fn render_preview_panel(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Satellite Image").strong());
        if let Some(texture) = &self.preview_texture {
            let max_side = 256.0;
            let size = texture.size_vec2();
            let scale = (max_side / size.x).min(max_side / size.y).min(1.0);
            ui.image((texture.id(), size * scale));
        } else {
            ui.label(egui::RichText::new("No preview available").weak());
        }

        if let Some(selection) = self.session.selection() {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(format!("File: {}", selection.file_name)).small());
            ui.label(
                egui::RichText::new(format!("Size: {}", format_file_size(selection.size_bytes)))
                    .small(),
            );
            if let Some(media_type) = &selection.media_type {
                ui.label(egui::RichText::new(format!("Type: {}", media_type)).small());
            }
        }
    }

    fn render_results_panel(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Classification Results").strong());
        ui.add_space(4.0);

        let mut do_reset = false;
        match self.session.request().clone() {
            RequestState::Idle => {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label(egui::RichText::new("Ready for Classification").strong());
                    ui.label("Click \"Classify\" to analyze your satellite imagery");
                });
            }
            RequestState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Processing satellite imagery...");
                });
            }
            RequestState::Failed(message) => {
                ui.label(egui::RichText::new(message).color(egui::Color32::RED));
            }
            RequestState::Succeeded(result) => {
                widgets::accuracy_banner(ui, result.correct);
                ui.add_space(8.0);

                ui.columns(2, |cols| {
                    widgets::class_card(&mut cols[0], "Ground Truth", &result.true_class);
                    widgets::class_card(&mut cols[1], "AI Prediction", &result.predicted_class);
                });
                ui.add_space(8.0);

                widgets::confidence_row(ui, result.confidence);
                ui.add_space(8.0);

                widgets::metadata_grid(ui, &result);
                ui.add_space(8.0);

                if ui.button("Analyze New Image").clicked() {
                    do_reset = true;
                }
            }
        }
        if do_reset {
            self.session.reset();
        }
    }
}

impl eframe::App for ClassifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_worker_events(ctx);
        self.process_dropped_files(ctx);
        self.refresh_preview_texture(ctx);

        // Keep polling the channel while a request or decode is pending
        if self.session.request().is_loading()
            || self
                .session
                .selection()
                .is_some_and(|s| s.preview.is_none())
        {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let drag_active = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui);

            egui::Frame::group(ui.style())
                .inner_margin(egui::Margin::same(12))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    if self.session.selection().is_none() {
                        self.render_upload_ui(ui, drag_active);
                    } else {
                        self.render_file_ui(ui);
                    }
                });

            if self.session.selection().is_some() {
                ui.add_space(8.0);
                ui.columns(2, |cols| {
                    self.render_preview_panel(&mut cols[0]);
                    self.render_results_panel(&mut cols[1]);
                });
            }
        });
    }
}

/// Guesses the media type of a file from its extension, mirroring the
/// hint a browser file input would provide. Unknown extensions yield
/// `None`; the lookup never depends on this.
fn guess_media_type(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_string_lossy().to_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mime.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_guessed_from_extension() {
        assert_eq!(
            guess_media_type(Path::new("tile_042.png")).as_deref(),
            Some("image/png")
        );
        assert_eq!(
            guess_media_type(Path::new("scene.JPG")).as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(guess_media_type(Path::new("scene.hdf5")), None);
        assert_eq!(guess_media_type(Path::new("README")), None);
    }
}
