#![cfg(feature = "egui")]

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use anyhow::{Context as _, Result};

use crate::config::RemoteConfig;
use crate::model::Plot;
use crate::remote::RemoteClient;

/// RGBA pixels of a decoded scheme image, ready to become a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Result of a completed background operation.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// Plot list fetch completed.
    PlotsLoaded(Result<Vec<Plot>, String>),
    /// Scheme upload completed; carries the public URL on success.
    SchemeUploaded(Result<String, String>),
    /// Scheme image downloaded and decoded for display.
    SchemeImageLoaded {
        url: String,
        result: Result<DecodedImage, String>,
    },
}

/// A worker event tagged with the generation current when the operation was
/// started. The state discards events whose generation no longer matches,
/// so a response arriving after a newer request (or after teardown) never
/// updates state.
#[derive(Debug, Clone)]
pub struct TaggedEvent {
    pub generation: u64,
    pub event: WorkerEvent,
}

/// Spawns background fetch/upload threads and collects their results.
///
/// Each operation kind has its own generation counter, bumped at spawn
/// time; only the newest generation per kind is ever applied.
pub struct Worker {
    config: RemoteConfig,
    ctx: egui::Context,
    tx: Sender<TaggedEvent>,
    rx: Receiver<TaggedEvent>,
    fetch_generation: u64,
    upload_generation: u64,
    image_generation: u64,
}

impl Worker {
    pub fn new(config: RemoteConfig, ctx: egui::Context) -> Self {
        let (tx, rx) = channel();
        Self {
            config,
            ctx,
            tx,
            rx,
            fetch_generation: 0,
            upload_generation: 0,
            image_generation: 0,
        }
    }

    pub fn fetch_generation(&self) -> u64 {
        self.fetch_generation
    }

    pub fn upload_generation(&self) -> u64 {
        self.upload_generation
    }

    pub fn image_generation(&self) -> u64 {
        self.image_generation
    }

    /// Drain all results received since the last frame.
    pub fn poll(&self) -> Vec<TaggedEvent> {
        self.rx.try_iter().collect()
    }

    /// Start a plot list fetch on a background thread.
    pub fn spawn_fetch(&mut self) {
        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        let config = self.config.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            let result = fetch_plots(config).map_err(|err| format!("{err:#}"));
            let _ = tx.send(TaggedEvent {
                generation,
                event: WorkerEvent::PlotsLoaded(result),
            });
            ctx.request_repaint();
        });
    }

    /// Start a scheme upload on a background thread. The file is read and
    /// sent as-is; on success the event carries the public URL.
    pub fn spawn_upload(&mut self, path: PathBuf, object_path: String, content_type: &'static str) {
        self.upload_generation += 1;
        let generation = self.upload_generation;
        let config = self.config.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            let result =
                upload_scheme(config, &path, &object_path, content_type).map_err(|err| format!("{err:#}"));
            let _ = tx.send(TaggedEvent {
                generation,
                event: WorkerEvent::SchemeUploaded(result),
            });
            ctx.request_repaint();
        });
    }

    /// Download and decode the scheme image behind `url` for display.
    pub fn spawn_scheme_download(&mut self, url: String) {
        self.image_generation += 1;
        let generation = self.image_generation;
        let config = self.config.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            let result = download_scheme(config, &url).map_err(|err| format!("{err:#}"));
            let _ = tx.send(TaggedEvent {
                generation,
                event: WorkerEvent::SchemeImageLoaded { url, result },
            });
            ctx.request_repaint();
        });
    }
}

fn fetch_plots(config: RemoteConfig) -> Result<Vec<Plot>> {
    RemoteClient::new(config)?.fetch_plots()
}

fn upload_scheme(
    config: RemoteConfig,
    path: &Path,
    object_path: &str,
    content_type: &str,
) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let client = RemoteClient::new(config)?;
    client.upload_object(object_path, bytes, content_type)?;
    Ok(client.public_url(object_path))
}

fn download_scheme(config: RemoteConfig, url: &str) -> Result<DecodedImage> {
    let bytes = RemoteClient::new(config)?.download(url)?;
    let image = image::load_from_memory(&bytes).context("Failed to decode scheme image")?;
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width: width as usize,
        height: height as usize,
        rgba: rgba.into_raw(),
    })
}
