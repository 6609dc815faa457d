//! Configuration management for impostor-setup
//!
//! This module provides two pieces:
//! - **settings**: best-effort persistence of the last committed round
//! - **app**: defaults and overrides for the command-line front end

pub mod app;
pub mod settings;

// Re-export commonly used types
pub use app::AppConfig;
pub use settings::{FileStorage, MemoryStorage, RoundConfiguration, SettingsStore, Storage};
