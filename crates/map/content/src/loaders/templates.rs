//! Template list loader.
//!
//! Template lists are JSON arrays of [`TemplateDto`] records:
//!
//! ```json
//! [
//!   { "version": 1, "kind": "cone", "id": 4, "radius": 3,
//!     "vertex": { "x": 100, "y": 50 }, "direction": "north_east" }
//! ]
//! ```

use std::path::Path;

use map_core::{EngineError, Template, TemplateDto};
use tracing::warn;

use crate::loaders::{LoadResult, parse_file, write_file};

/// Loader for JSON template lists.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Reads the raw records.
    pub fn load_records(path: &Path) -> LoadResult<Vec<TemplateDto>> {
        parse_file(path, "template JSON", |content| serde_json::from_str(content))
    }

    /// Reads and decodes a list. Records that fail to decode are logged and skipped.
    pub fn load(path: &Path) -> LoadResult<Vec<Template>> {
        let records = Self::load_records(path)?;
        Ok(Self::decode(&records))
    }

    pub fn decode(records: &[TemplateDto]) -> Vec<Template> {
        records
            .iter()
            .filter_map(|record| match Template::from_dto(record) {
                Ok(template) => Some(template),
                Err(err) => {
                    warn!(
                        target: "map_content",
                        template = record.id,
                        code = err.error_code(),
                        "skipping template record: {err}"
                    );
                    None
                }
            })
            .collect()
    }

    /// Writes templates as a pretty-printed JSON list.
    pub fn save(path: &Path, templates: &[Template]) -> LoadResult<()> {
        let records: Vec<TemplateDto> = templates.iter().map(Template::to_dto).collect();
        let content = serde_json::to_string_pretty(&records)?;
        write_file(path, "template JSON", &content)
    }
}
