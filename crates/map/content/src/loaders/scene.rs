//! Scene loader.

use std::path::Path;

use map_core::EngineError;
use ron::extensions::Extensions;
use tracing::{debug, warn};

use crate::loaders::{LoadResult, parse_file};
use crate::scene::{Scene, SceneSpec};

/// Loader for scene files in RON.
pub struct SceneLoader;

impl SceneLoader {
    /// Parses a scene spec without decoding it.
    pub fn load_spec(path: &Path) -> LoadResult<SceneSpec> {
        parse_file(path, "scene RON", Self::parse)
    }

    /// Ids may be written bare (`id: 2`) and optional values without `Some`.
    pub fn parse(content: &str) -> LoadResult<SceneSpec> {
        let options = ron::Options::default()
            .with_default_extension(Extensions::UNWRAP_NEWTYPES | Extensions::IMPLICIT_SOME);
        Ok(options.from_str(content)?)
    }

    /// Loads and decodes a scene. Template records that fail to decode are
    /// logged and left out.
    pub fn load(path: &Path) -> LoadResult<Scene> {
        let scene = Scene::from_spec(Self::load_spec(path)?);
        for (id, err) in &scene.rejected {
            warn!(
                target: "map_content",
                template = id,
                code = err.error_code(),
                severity = %err.severity(),
                "skipping template record: {err}"
            );
        }
        debug!(
            target: "map_content",
            zone = %scene.zone.id,
            tokens = scene.tokens.len(),
            lights = scene.lights.len(),
            templates = scene.templates.len(),
            "scene loaded from {}",
            path.display()
        );
        Ok(scene)
    }
}
