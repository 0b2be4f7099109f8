//! Egui-based interactive viewer for the plot map (feature = "egui").
//!
//! The viewer is split into submodules: application state, world→screen
//! geometry, painting helpers, background workers, and the per-frame UI.

#![cfg(feature = "egui")]

mod geometry;
mod render;
mod state;
mod ui;
mod worker;

pub use geometry::{GRID_STEP, LABEL_OFFSET, MAP_HEIGHT, MAP_WIDTH, MapTransform, polygon_contains};
pub use render::status_fill;
pub use state::{Notice, NoticeKind, PlotMapApp, ViewMode};
pub use worker::{DecodedImage, TaggedEvent, Worker, WorkerEvent};
