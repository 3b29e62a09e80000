//! Configuration file parsing for the hearth store
//!
//! Supports `.hearth/config.toml` - store settings (effect timeout, devtools history)

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, save_settings, CONFIG_FILENAME, HEARTH_DIR};
pub use types::*;
