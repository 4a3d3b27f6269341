//! Content loaders for reading scene data from files.
//!
//! Scenes are RON, template lists JSON, settings TOML. Every loader returns
//! [`LoadResult`] with the offending path in the error context.

pub mod factory;
pub mod scene;
pub mod settings;
pub mod templates;

pub use factory::ContentFactory;
pub use scene::SceneLoader;
pub use settings::SettingsLoader;
pub use templates::TemplateLoader;

use std::fs;
use std::path::Path;

use anyhow::Context;

/// Result of every loader; errors carry the file and format as context.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads `path` and hands its text to `parse`.
///
/// `format` names the file kind in errors, e.g. "scene RON".
pub(crate) fn parse_file<T, E>(
    path: &Path,
    format: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> LoadResult<T>
where
    anyhow::Error: From<E>,
{
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read {format} file {}", path.display()))?;
    parse(&content)
        .map_err(anyhow::Error::from)
        .with_context(|| format!("invalid {format} in {}", path.display()))
}

pub(crate) fn write_file(path: &Path, format: &str, content: &str) -> LoadResult<()> {
    fs::write(path, content).with_context(|| format!("cannot write {format} file {}", path.display()))
}
