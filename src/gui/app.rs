//! Main GUI application
//!
//! egui application state and rendering.

use crate::config::{self, Config};
use crate::core::digest;
use crate::core::history::{FileStore, HistoryEntry, HistoryStore};
use crate::core::verify::{self, Verification};
use crate::util::format_size;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc;

/// Main application state
pub struct HashShieldApp {
    /// Application configuration
    config: Config,
    /// Persisted recent-hash history
    history: HistoryStore<FileStore>,
    /// Loaded history entries (newest first)
    entries: Vec<HistoryEntry>,
    /// Current tab
    current_view: View,
    /// Generate tab state
    generate: GenerateForm,
    /// Verify tab state
    verify: VerifyForm,
    /// Channel for receiving background results
    async_tx: mpsc::Sender<AsyncResult>,
    async_rx: mpsc::Receiver<AsyncResult>,
    /// Error message to display
    error_message: Option<String>,
    /// Success message to display
    success_message: Option<String>,
    /// Status message
    status_message: String,
}

/// Metadata of the currently selected file. Contents are read fresh for
/// each computation; nothing here is mutated after selection.
#[derive(Clone)]
struct SelectedFile {
    name: String,
    path: PathBuf,
    size: u64,
}

impl SelectedFile {
    fn from_path(path: PathBuf) -> Option<Self> {
        let size = std::fs::metadata(&path).ok()?.len();
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { name, path, size })
    }
}

#[derive(Default)]
struct GenerateForm {
    file: Option<SelectedFile>,
    hash: Option<String>,
    job: JobCounter,
    in_flight: bool,
}

#[derive(Default)]
struct VerifyForm {
    file: Option<SelectedFile>,
    expected: String,
    verdict: Option<Verification>,
    job: JobCounter,
    in_flight: bool,
}

/// Monotonic tag for background computations.
///
/// Every started job is stamped with a fresh value; a result is applied
/// only while its stamp is still current. Changing or clearing the inputs
/// bumps the counter, so results for superseded inputs are discarded
/// instead of overwriting fresher state.
#[derive(Default)]
struct JobCounter {
    current: u64,
}

impl JobCounter {
    /// Stamp a newly started job.
    fn next(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Invalidate any in-flight job without starting a new one.
    fn bump(&mut self) {
        self.current += 1;
    }

    fn accepts(&self, tag: u64) -> bool {
        self.current == tag
    }
}

#[derive(Default, Clone, Copy, PartialEq)]
enum View {
    #[default]
    Generate,
    Verify,
    History,
}

enum AsyncResult {
    FilePicked {
        view: View,
        file: Option<SelectedFile>,
    },
    HashReady {
        job: u64,
        hash: String,
    },
    HashFailed {
        job: u64,
        message: String,
    },
    VerifyReady {
        job: u64,
        verification: Verification,
    },
    VerifyFailed {
        job: u64,
        message: String,
    },
    Exported(PathBuf),
    Error(String),
}

enum FileAction {
    Pick,
    Clear,
}

impl HashShieldApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = config::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        });
        apply_theme(&cc.egui_ctx, &config.general.theme);

        let history = HistoryStore::open();
        let entries = history.list();
        let (async_tx, async_rx) = mpsc::channel();

        Self {
            config,
            history,
            entries,
            current_view: View::Generate,
            generate: GenerateForm::default(),
            verify: VerifyForm::default(),
            async_tx,
            async_rx,
            error_message: None,
            success_message: None,
            status_message: "Ready".to_string(),
        }
    }

    fn pick_file(&mut self, view: View, ctx: &egui::Context) {
        let tx = self.async_tx.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let picked = rfd::AsyncFileDialog::new().pick_file().await;
                let file = picked
                    .and_then(|handle| SelectedFile::from_path(handle.path().to_path_buf()));
                let _ = tx.send(AsyncResult::FilePicked { view, file });
            });
            ctx.request_repaint();
        });
    }

    fn select_generate_file(&mut self, file: SelectedFile) {
        // New selection supersedes any in-flight computation
        self.generate.job.bump();
        self.generate.file = Some(file);
        self.generate.hash = None;
        self.generate.in_flight = false;
    }

    fn clear_generate_file(&mut self) {
        self.generate.job.bump();
        self.generate.file = None;
        self.generate.hash = None;
        self.generate.in_flight = false;
    }

    fn select_verify_file(&mut self, file: SelectedFile) {
        self.verify.job.bump();
        self.verify.file = Some(file);
        self.verify.verdict = None;
        self.verify.in_flight = false;
    }

    fn clear_verify_file(&mut self) {
        self.verify.job.bump();
        self.verify.file = None;
        self.verify.verdict = None;
        self.verify.in_flight = false;
    }

    fn start_hash(&mut self, ctx: &egui::Context) {
        let Some(file) = self.generate.file.clone() else {
            return;
        };

        let job = self.generate.job.next();
        self.generate.hash = None;
        self.generate.in_flight = true;
        self.error_message = None;
        self.status_message = format!("Hashing {}...", file.name);

        let tx = self.async_tx.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                match digest::hash_file(&file.path).await {
                    Ok(hash) => {
                        let _ = tx.send(AsyncResult::HashReady { job, hash });
                    }
                    Err(e) => {
                        let _ = tx.send(AsyncResult::HashFailed {
                            job,
                            message: e.to_string(),
                        });
                    }
                }
            });
            ctx.request_repaint();
        });
    }

    fn start_verify(&mut self, ctx: &egui::Context) {
        let Some(file) = self.verify.file.clone() else {
            return;
        };
        let expected = self.verify.expected.clone();

        let job = self.verify.job.next();
        self.verify.verdict = None;
        self.verify.in_flight = true;
        self.error_message = None;
        self.status_message = format!("Verifying {}...", file.name);

        let tx = self.async_tx.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                match verify::verify_file(&file.path, &expected).await {
                    Ok(verification) => {
                        let _ = tx.send(AsyncResult::VerifyReady { job, verification });
                    }
                    Err(e) => {
                        let _ = tx.send(AsyncResult::VerifyFailed {
                            job,
                            message: e.to_string(),
                        });
                    }
                }
            });
            ctx.request_repaint();
        });
    }

    fn export_report(&mut self, ctx: &egui::Context) {
        let (Some(file), Some(hash)) = (self.generate.file.clone(), self.generate.hash.clone())
        else {
            return;
        };

        let suggested = digest::report_filename(&file.name);
        let content = digest::report_content(&file.name, &hash);

        let tx = self.async_tx.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let Some(handle) = rfd::AsyncFileDialog::new()
                    .set_file_name(&suggested)
                    .save_file()
                    .await
                else {
                    return;
                };

                let path = handle.path().to_path_buf();
                match std::fs::write(&path, content) {
                    Ok(()) => {
                        let _ = tx.send(AsyncResult::Exported(path));
                    }
                    Err(e) => {
                        let _ = tx.send(AsyncResult::Error(format!(
                            "Failed to write report: {}",
                            e
                        )));
                    }
                }
            });
            ctx.request_repaint();
        });
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        let next = if self.config.general.theme == "dark" {
            "light"
        } else {
            "dark"
        };
        self.config.general.theme = next.to_string();
        apply_theme(ctx, next);

        if let Err(e) = config::save(&self.config) {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    fn check_async_results(&mut self) {
        while let Ok(result) = self.async_rx.try_recv() {
            match result {
                AsyncResult::FilePicked { view, file } => {
                    let Some(file) = file else {
                        // Dialog cancelled or file vanished before stat
                        continue;
                    };
                    match view {
                        View::Generate => self.select_generate_file(file),
                        View::Verify => self.select_verify_file(file),
                        View::History => {}
                    }
                }
                AsyncResult::HashReady { job, hash } => {
                    if !self.generate.job.accepts(job) {
                        tracing::debug!("Discarding hash result for superseded selection");
                        continue;
                    }
                    self.generate.in_flight = false;

                    if let Some(file) = self.generate.file.clone() {
                        match self.history.add(&file.name, &hash, file.size) {
                            Ok(_) => self.entries = self.history.list(),
                            Err(e) => {
                                tracing::warn!("Failed to record hash in history: {}", e);
                            }
                        }
                    }

                    self.generate.hash = Some(hash);
                    self.success_message = Some("Hash generated".to_string());
                    self.status_message = "Ready".to_string();
                }
                AsyncResult::HashFailed { job, message } => {
                    if !self.generate.job.accepts(job) {
                        continue;
                    }
                    // Back to FileSelected; the user may retry
                    self.generate.in_flight = false;
                    self.error_message = Some(message);
                    self.status_message = "Ready".to_string();
                }
                AsyncResult::VerifyReady { job, verification } => {
                    if !self.verify.job.accepts(job) {
                        tracing::debug!("Discarding verdict for superseded inputs");
                        continue;
                    }
                    self.verify.in_flight = false;
                    self.verify.verdict = Some(verification);
                    self.status_message = "Ready".to_string();
                }
                AsyncResult::VerifyFailed { job, message } => {
                    if !self.verify.job.accepts(job) {
                        continue;
                    }
                    self.verify.in_flight = false;
                    self.error_message = Some(message);
                    self.status_message = "Ready".to_string();
                }
                AsyncResult::Exported(path) => {
                    self.success_message = Some(format!("Report saved to {}", path.display()));
                }
                AsyncResult::Error(message) => {
                    self.error_message = Some(message);
                }
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(path) = dropped.into_iter().filter_map(|f| f.path).next() else {
            return;
        };
        let Some(file) = SelectedFile::from_path(path) else {
            self.error_message = Some("Cannot access the dropped file".to_string());
            return;
        };

        match self.current_view {
            View::Generate => self.select_generate_file(file),
            View::Verify => self.select_verify_file(file),
            View::History => {}
        }
    }
}

impl eframe::App for HashShieldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_async_results();
        self.handle_dropped_files(ctx);

        // Top panel - Header
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🛡 HashShield");
                ui.separator();

                if ui
                    .selectable_label(self.current_view == View::Generate, "🔒 Generate")
                    .clicked()
                {
                    self.current_view = View::Generate;
                }
                if ui
                    .selectable_label(self.current_view == View::Verify, "✅ Verify")
                    .clicked()
                {
                    self.current_view = View::Verify;
                }
                if ui
                    .selectable_label(self.current_view == View::History, "🕓 History")
                    .clicked()
                {
                    self.current_view = View::History;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if self.config.general.theme == "dark" {
                        "☀"
                    } else {
                        "🌙"
                    };
                    if ui.button(icon).clicked() {
                        self.toggle_theme(ctx);
                    }
                });
            });
        });

        // Bottom panel - Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = &self.error_message {
                    ui.colored_label(egui::Color32::RED, format!("❌ {}", err));
                    if ui.small_button("✕").clicked() {
                        self.error_message = None;
                    }
                } else if let Some(msg) = &self.success_message {
                    ui.colored_label(egui::Color32::GREEN, format!("✅ {}", msg));
                    if ui.small_button("✕").clicked() {
                        self.success_message = None;
                    }
                } else if self.generate.in_flight || self.verify.in_flight {
                    ui.spinner();
                    ui.label(&self.status_message);
                } else {
                    ui.label(&self.status_message);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
                });
            });
        });

        // Central panel - Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_view {
            View::Generate => self.show_generate(ui, ctx),
            View::Verify => self.show_verify(ui, ctx),
            View::History => self.show_history(ui),
        });

        // Keep repainting while background work is running
        if self.generate.in_flight || self.verify.in_flight {
            ctx.request_repaint();
        }
    }
}

impl HashShieldApp {
    fn show_generate(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Generate SHA-256 Hash");
        ui.separator();
        ui.add_space(5.0);

        match file_section(ui, self.generate.file.as_ref()) {
            Some(FileAction::Pick) => self.pick_file(View::Generate, ctx),
            Some(FileAction::Clear) => self.clear_generate_file(),
            None => {}
        }

        ui.add_space(10.0);

        let can_generate = self.generate.file.is_some() && !self.generate.in_flight;
        if ui
            .add_enabled(
                can_generate,
                egui::Button::new("🔒 Generate Hash").min_size(egui::vec2(140.0, 30.0)),
            )
            .clicked()
        {
            self.start_hash(ctx);
        }

        if self.generate.in_flight {
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Computing hash...");
            });
        }

        if let Some(hash) = self.generate.hash.clone() {
            ui.add_space(15.0);
            ui.label("SHA-256 hash:");
            ui.label(egui::RichText::new(&hash).monospace());
            ui.add_space(5.0);

            let mut export = false;
            ui.horizontal(|ui| {
                if ui.button("📋 Copy").clicked() {
                    ui.output_mut(|o| o.copied_text = hash.clone());
                }
                if ui.button("💾 Export as text").clicked() {
                    export = true;
                }
            });
            if export {
                self.export_report(ctx);
            }
        }
    }

    fn show_verify(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Verify File Integrity");
        ui.separator();
        ui.add_space(5.0);

        match file_section(ui, self.verify.file.as_ref()) {
            Some(FileAction::Pick) => self.pick_file(View::Verify, ctx),
            Some(FileAction::Clear) => self.clear_verify_file(),
            None => {}
        }

        ui.add_space(10.0);
        ui.label("Expected SHA-256 hash:");
        if ui.text_edit_multiline(&mut self.verify.expected).changed() {
            // New input invalidates the shown verdict and any running check
            self.verify.verdict = None;
            self.verify.job.bump();
            self.verify.in_flight = false;
        }

        ui.add_space(10.0);

        let can_verify = self.verify.file.is_some()
            && !self.verify.expected.trim().is_empty()
            && !self.verify.in_flight;
        if ui
            .add_enabled(
                can_verify,
                egui::Button::new("✅ Verify").min_size(egui::vec2(140.0, 30.0)),
            )
            .clicked()
        {
            self.start_verify(ctx);
        }

        if self.verify.in_flight {
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Verifying...");
            });
        }

        if let Some(verdict) = &self.verify.verdict {
            ui.add_space(15.0);
            if verdict.matched {
                ui.colored_label(
                    egui::Color32::GREEN,
                    "✅ Hash matches. File is authentic.",
                );
            } else {
                ui.colored_label(
                    egui::Color32::RED,
                    "❌ Hash mismatch! File may be corrupted or tampered with.",
                );
            }
            ui.add_space(5.0);
            ui.label(
                egui::RichText::new(format!("Computed: {}", verdict.actual))
                    .monospace()
                    .small(),
            );
        }
    }

    fn show_history(&mut self, ui: &mut egui::Ui) {
        let mut clear_clicked = false;

        ui.horizontal(|ui| {
            ui.heading("Recent Hashes");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!self.entries.is_empty(), egui::Button::new("🗑 Clear All"))
                    .clicked()
                {
                    clear_clicked = true;
                }
            });
        });
        ui.separator();

        if clear_clicked {
            if let Err(e) = self.history.clear() {
                self.error_message = Some(e.to_string());
            } else {
                self.entries.clear();
                self.success_message = Some("History cleared".to_string());
            }
        }

        if self.entries.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(50.0);
                ui.label("No hashes recorded yet.");
                ui.label("Generated hashes will show up here.");
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in &self.entries {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(format!("📄 {}", entry.filename));
                        ui.label(
                            egui::RichText::new(format_size(entry.file_size))
                                .weak()
                                .small(),
                        );
                        ui.label(
                            egui::RichText::new(entry.date.format("%Y-%m-%d %H:%M").to_string())
                                .weak()
                                .small(),
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&entry.hash).monospace().small());
                        if ui.small_button("📋").clicked() {
                            ui.output_mut(|o| o.copied_text = entry.hash.clone());
                        }
                    });
                });
                ui.add_space(4.0);
            }
        });
    }
}

/// Render the file selection row; returns the action the user took.
fn file_section(ui: &mut egui::Ui, file: Option<&SelectedFile>) -> Option<FileAction> {
    let mut action = None;

    ui.horizontal(|ui| match file {
        Some(f) => {
            ui.label(format!("📄 {}", f.name));
            ui.label(egui::RichText::new(format_size(f.size)).weak().small());
            if ui.small_button("✕").clicked() {
                action = Some(FileAction::Clear);
            }
        }
        None => {
            if ui.button("📂 Choose File...").clicked() {
                action = Some(FileAction::Pick);
            }
            ui.label(egui::RichText::new("or drop a file anywhere").weak());
        }
    });

    action
}

fn apply_theme(ctx: &egui::Context, theme: &str) {
    if theme == "light" {
        ctx.set_visuals(egui::Visuals::light());
    } else {
        ctx.set_visuals(egui::Visuals::dark());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_job_results_are_discarded() {
        let mut job = JobCounter::default();

        let first = job.next();
        assert!(job.accepts(first));

        // A second computation starts before the first finishes; the
        // first result must no longer be applied.
        let second = job.next();
        assert!(!job.accepts(first));
        assert!(job.accepts(second));
    }

    #[test]
    fn test_clearing_inputs_invalidates_in_flight_job() {
        let mut job = JobCounter::default();

        let running = job.next();
        job.bump();
        assert!(!job.accepts(running));
    }
}
