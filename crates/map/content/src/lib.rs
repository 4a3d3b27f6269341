//! Scene content and loaders for the map engine.
//!
//! This crate describes what a map scene contains and reads it from disk:
//! - Scene layouts: zone grid, tokens, exposure, lights, templates (RON)
//! - Template lists exchanged with other tools (JSON)
//! - Engine settings (TOML)
//!
//! Specs here are plain data. [`scene::Scene`] turns them into the regions,
//! light entries and templates the runtime feeds to `map-core`.

pub mod scene;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scene::{
    EngineSettings, LightSpec, Scene, SceneSpec, ShapeSpec, TokenSpec, ZoneSpec,
};

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, LoadResult, SceneLoader, SettingsLoader, TemplateLoader};
