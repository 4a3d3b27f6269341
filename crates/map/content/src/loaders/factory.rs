//! Content factory for loading a scene directory.

use std::path::{Path, PathBuf};

use map_core::Template;

use crate::loaders::{LoadResult, SceneLoader, SettingsLoader, TemplateLoader};
use crate::scene::{EngineSettings, Scene};

/// Loads everything a session needs from one directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── settings.toml     (optional)
/// ├── templates.json    (optional, extra templates)
/// └── scenes/
///     ├── crypt.ron
///     └── bridge.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine settings from `settings.toml`, or defaults when absent.
    pub fn load_settings(&self) -> LoadResult<EngineSettings> {
        SettingsLoader::load_or_default(&self.data_dir.join("settings.toml"))
    }

    /// Load a scene from `scenes/{name}.ron`, merging `templates.json` when present.
    pub fn load_scene(&self, name: &str) -> LoadResult<Scene> {
        let path = self.data_dir.join("scenes").join(format!("{}.ron", name));
        let mut scene = SceneLoader::load(&path)?;

        let extra = self.load_templates()?;
        for mut template in extra {
            if template.zone().is_none() {
                template.set_zone(Some(scene.zone.id));
            }
            scene.templates.push(template);
        }
        Ok(scene)
    }

    /// Load `templates.json`; empty when absent.
    pub fn load_templates(&self) -> LoadResult<Vec<Template>> {
        let path = self.data_dir.join("templates.json");
        if path.exists() {
            TemplateLoader::load(&path)
        } else {
            Ok(Vec::new())
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/maps");
        assert_eq!(factory.data_dir(), Path::new("/tmp/maps"));
    }
}
