//! CampKit Settings Crate
//!
//! Loads and saves editor preferences and the recent-maps list.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{Settings, DEFAULT_RECENT_MAPS_COUNT};
pub use error::{SettingsError, SettingsResult};
pub use manager::SettingsManager;
