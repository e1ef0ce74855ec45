//! # CampKit
//!
//! Editing engine for campsite site plans: pitches, buildings, roads and
//! utility points placed on a map image, moved, resized and rotated by
//! pointer gestures, with bounded undo/redo.
//!
//! ## Architecture
//!
//! CampKit is organized as a workspace with multiple crates:
//!
//! 1. **campkit-core** - Geometry primitives, editor configuration, errors
//! 2. **campkit-designer** - Transforms, map model, history, editor session
//! 3. **campkit-settings** - Settings files and the recent-maps list
//! 4. **campkit** - Logging setup and the command-line entry point
//!
//! ## Features
//!
//! - **Transforms**: Eight-handle resize with aspect lock, absolute rotation
//!   with angle snapping, grid snapping and map clamping
//! - **Multi-select**: One gesture drives any number of modules about a
//!   shared pivot
//! - **History**: Whole-map snapshots, one entry per committed edit
//! - **Persistence**: Maps as JSON, settings as TOML or JSON

pub use campkit_core as core;
pub use campkit_designer as designer;
pub use campkit_settings as settings;

pub use campkit_core::{Bounds, EditorConfig, Error, MapBounds, Position, Result, Size};
pub use campkit_designer::{
    load_map, save_map, CampsiteMap, EditorError, HistoryManager, MapEditor, Module, ModuleType,
    TransformKind,
};
pub use campkit_settings::{Settings, SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Short git commit the binary was built from, or "unknown"
pub const BUILD_COMMIT: &str = env!("BUILD_COMMIT");

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "CAMPKIT_LOG_FORMAT";

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting, or JSON when
///   `CAMPKIT_LOG_FORMAT=json`
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
