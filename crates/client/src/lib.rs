//! Headless viewer for map scenes.
//!
//! Loads a scene file, renders one frame for the configured viewer and prints
//! it as a text grid.
pub mod ascii;
pub mod config;
pub mod logging;

pub use ascii::{AsciiCanvas, summary};
pub use config::ClientConfig;
pub use logging::setup_logging;
