#![cfg(feature = "egui")]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::RemoteConfig;
use crate::model::Plot;
use crate::scheme::{self, SchemeRejection};
use crate::stats::PlotStats;

use super::worker::{TaggedEvent, Worker, WorkerEvent};

/// Which of the two mutually exclusive map displays is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Polygon rendering of the plot geometry.
    Vector,
    /// The uploaded raster scheme image.
    Scheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// A transient user-facing notice.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

/// Interactive plot map application state.
///
/// Hovered/selected plot, view mode and the scheme URL are explicit fields
/// here rather than ambient globals; the scheme URL lives in this struct,
/// the common ancestor of the uploader card and the map renderer.
pub struct PlotMapApp {
    pub plots: Vec<Plot>,
    /// True until the initial fetch completes (either way).
    pub loading: bool,
    /// Id of the plot under the pointer. Mutually exclusive across plots.
    pub hovered: Option<String>,
    /// The selected plot — the full record, not just the id. Stays selected
    /// until another plot is clicked.
    pub selected: Option<Plot>,
    pub view_mode: ViewMode,
    /// Public URL of the uploaded scheme; `None` until the first successful
    /// upload of the session. Session-scoped, never persisted.
    pub scheme_url: Option<String>,
    pub uploading: bool,
    /// Visual flag while a file is dragged over the window.
    pub drag_active: bool,
    pub notices: Vec<Notice>,
    pub worker: Worker,
    pub scheme_texture: Option<egui::TextureHandle>,
}

impl PlotMapApp {
    /// Create the viewer and start the initial plot fetch (one per
    /// activation; no polling, no retry).
    pub fn new(config: RemoteConfig, ctx: &egui::Context) -> Self {
        let mut app = Self::detached(config, ctx);
        app.loading = true;
        app.worker.spawn_fetch();
        app
    }

    /// Create the viewer state without starting the initial fetch.
    pub fn detached(config: RemoteConfig, ctx: &egui::Context) -> Self {
        Self {
            plots: Vec::new(),
            loading: false,
            hovered: None,
            selected: None,
            view_mode: ViewMode::Vector,
            scheme_url: None,
            uploading: false,
            drag_active: false,
            notices: Vec::new(),
            worker: Worker::new(config, ctx.clone()),
            scheme_texture: None,
        }
    }

    /// Statistics over the current plot list, recomputed on every call.
    pub fn stats(&self) -> PlotStats {
        PlotStats::collect(&self.plots)
    }

    /// Plots that have renderable geometry, paired with their parsed
    /// polygons. Plots without usable `coordinates.points` are skipped
    /// silently and can never be hovered or selected.
    pub fn renderable_plots(&self) -> Vec<(Plot, Vec<(f32, f32)>)> {
        self.plots
            .iter()
            .filter_map(|plot| plot.polygon().map(|polygon| (plot.clone(), polygon)))
            .collect()
    }

    /// Select a plot, replacing any previous selection entirely.
    pub fn select(&mut self, plot: Plot) {
        self.selected = Some(plot);
    }

    pub fn notify_success(&mut self, text: impl Into<String>) {
        self.notices.push(Notice {
            text: text.into(),
            kind: NoticeKind::Success,
            shown_at: Instant::now(),
        });
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.notices.push(Notice {
            text: text.into(),
            kind: NoticeKind::Error,
            shown_at: Instant::now(),
        });
    }

    /// Drop notices older than [`NOTICE_TTL`].
    pub fn prune_notices(&mut self, now: Instant) {
        self.notices
            .retain(|notice| now.duration_since(notice.shown_at) < NOTICE_TTL);
    }

    /// Validate and start uploading a scheme image.
    ///
    /// Validation (MIME must be an image type, size ≤ 10 MiB) happens here,
    /// before any network call; a rejected file produces a notice and no
    /// request. Ignored while another upload is in flight — the trigger
    /// controls are disabled, and drops are dropped.
    pub fn begin_upload(&mut self, path: PathBuf) {
        if self.uploading {
            return;
        }
        let Some(mime) = scheme::mime_for_path(&path) else {
            self.notify_error(SchemeRejection::NotAnImage.to_string());
            return;
        };
        let size = std::fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
        if let Err(rejection) = scheme::validate_upload(mime, size) {
            self.notify_error(rejection.to_string());
            return;
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let object_path = scheme::object_name(&file_name, chrono::Utc::now());
        self.uploading = true;
        self.worker.spawn_upload(path, object_path, mime);
    }

    /// Clear the scheme URL. The stored object is not deleted (no
    /// compensating call); the map falls back to the vector view.
    pub fn remove_scheme(&mut self) {
        self.scheme_url = None;
        self.scheme_texture = None;
        self.view_mode = ViewMode::Vector;
        self.notify_success("Схема удалена");
    }

    /// Apply a single worker result. Results from a superseded generation
    /// are discarded, so late responses never update state.
    pub fn apply_event(&mut self, ctx: &egui::Context, event: TaggedEvent) {
        match event.event {
            WorkerEvent::PlotsLoaded(result) => {
                if event.generation != self.worker.fetch_generation() {
                    return;
                }
                self.loading = false;
                match result {
                    Ok(plots) => self.plots = plots,
                    Err(err) => {
                        tracing::warn!("plot fetch failed: {err}");
                        self.plots.clear();
                        self.notify_error("Ошибка загрузки данных участков");
                    }
                }
            }
            WorkerEvent::SchemeUploaded(result) => {
                if event.generation != self.worker.upload_generation() {
                    return;
                }
                self.uploading = false;
                match result {
                    Ok(url) => {
                        self.scheme_url = Some(url.clone());
                        self.scheme_texture = None;
                        self.worker.spawn_scheme_download(url);
                        self.notify_success("Схема участков успешно загружена");
                    }
                    Err(err) => {
                        // Prior scheme URL stays as it was.
                        tracing::warn!("scheme upload failed: {err}");
                        self.notify_error("Ошибка загрузки схемы");
                    }
                }
            }
            WorkerEvent::SchemeImageLoaded { url, result } => {
                if event.generation != self.worker.image_generation() {
                    return;
                }
                if self.scheme_url.as_deref() != Some(url.as_str()) {
                    return;
                }
                match result {
                    Ok(decoded) => {
                        let color_image = egui::ColorImage::from_rgba_unmultiplied(
                            [decoded.width, decoded.height],
                            &decoded.rgba,
                        );
                        self.scheme_texture = Some(ctx.load_texture(
                            "scheme",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ));
                    }
                    Err(err) => {
                        // The upload itself succeeded; the view falls back
                        // to showing the URL.
                        tracing::warn!("scheme image download failed: {err}");
                    }
                }
            }
        }
    }
}

impl eframe::App for PlotMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::update(self, ctx);
    }
}
