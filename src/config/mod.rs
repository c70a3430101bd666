//! Configuration module for the labseq client.

pub mod api;
pub mod chart;

mod debug; // Private because of the public re-export. Forces files to use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod display;
pub mod persistence;

// Re-export commonly used items
pub use api::{API, ClientConfig, sequence_path};
pub use chart::CHART_CONFIG;
pub use display::DISPLAY;
pub use persistence::{PERSISTENCE, store_filename};
