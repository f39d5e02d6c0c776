//! Gaze Pipeline Demo Driver
//!
//! The core has no looping construct: an external driver calls the
//! session entry point once per available frame. This crate provides
//! that loop for demos, fed by a synthetic face in place of a real
//! face-mesh detector.

pub mod synthetic;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging for the pipeline binary
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
