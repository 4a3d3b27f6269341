//! Engine settings loader.

use std::path::Path;

use crate::loaders::{LoadResult, parse_file};
use crate::scene::EngineSettings;

/// Loader for engine settings from TOML files.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EngineSettings> {
        parse_file(path, "settings TOML", |content| toml::from_str(content))
    }

    /// Like [`load`](Self::load), but an absent file yields the defaults.
    pub fn load_or_default(path: &Path) -> LoadResult<EngineSettings> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(EngineSettings::default())
        }
    }
}
