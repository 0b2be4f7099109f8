//! Interactive map of a garden community's (СНТ) land plots.
//!
//! This crate provides the data model for land plot records, a blocking
//! client for the remote table and object storage, derived statistics, and
//! validation for scheme-image uploads.
//!
//! The binary `plotmap` fetches the plot table and prints it as JSON.

pub mod config;
pub mod model;
pub mod remote;
pub mod scheme;
pub mod stats;

// Optional GUI functionality lives behind the `egui` feature flag.
// This module provides the interactive plot map viewer launched by
// `plotmap view`.
#[cfg(feature = "egui")]
pub mod egui_app;
