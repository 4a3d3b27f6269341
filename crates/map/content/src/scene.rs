//! Scene specs as stored on disk, and their engine-ready form.

use std::collections::BTreeMap;

use map_core::{
    CellPoint, DtoError, EngineConfig, ExposedAreaTracker, FillRule, FogPolicy, GridSpec,
    LightEntry, Point, Rect, Region, Rgba, Template, TemplateDto, TokenId, ZoneId,
};

/// Zone geometry. `width` and `height` count cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneSpec {
    pub id: ZoneId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub grid: GridSpec,
    pub width: i32,
    pub height: i32,
}

impl ZoneSpec {
    /// Zone extent in zone units.
    pub fn extent(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.width * self.grid.cell_size,
            self.height * self.grid.cell_size,
        )
    }
}

/// Area given either as a rectangle or a polygon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeSpec {
    Rect(Rect),
    Polygon(Vec<Point>),
}

impl ShapeSpec {
    pub fn to_region(&self) -> Region {
        match self {
            Self::Rect(rect) => Region::from_rect(*rect),
            Self::Polygon(points) => Region::from_polygon(points, FillRule::NonZero),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenSpec {
    pub id: TokenId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub cell: CellPoint,
    /// What this token has seen in earlier sessions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exposed: Vec<ShapeSpec>,
    /// Current line-of-sight area.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visible: Vec<ShapeSpec>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightSpec {
    pub shape: ShapeSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub paint: Option<Rgba>,
    /// Negative values are darkness.
    pub lumens: i32,
}

impl LightSpec {
    pub fn to_entry(&self) -> LightEntry {
        LightEntry {
            region: self.shape.to_region(),
            paint: self.paint,
            lumens: self.lumens,
        }
    }
}

/// Whole scene file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneSpec {
    pub zone: ZoneSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tokens: Vec<TokenSpec>,
    /// Zone-wide exposure.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exposed: Vec<ShapeSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lights: Vec<LightSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub templates: Vec<TemplateDto>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub policy: Option<FogPolicy>,
}

/// Engine tunables read from `settings.toml`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineSettings {
    pub engine: EngineConfig,
    pub fog: FogPolicy,
}

/// A scene decoded into engine values.
#[derive(Clone, Debug)]
pub struct Scene {
    pub zone: ZoneSpec,
    pub tokens: Vec<TokenSpec>,
    pub exposure: ExposedAreaTracker,
    pub visible: BTreeMap<TokenId, Region>,
    pub lights: Vec<LightEntry>,
    pub templates: Vec<Template>,
    /// Template records that failed to decode, by record id.
    pub rejected: Vec<(u32, DtoError)>,
    pub policy: Option<FogPolicy>,
}

impl Scene {
    /// Decodes a spec. Bad template records are collected in `rejected`, never fatal.
    pub fn from_spec(spec: SceneSpec) -> Self {
        let SceneSpec {
            zone,
            tokens,
            exposed,
            lights,
            templates: records,
            policy,
        } = spec;

        let mut exposure = ExposedAreaTracker::new();
        for shape in &exposed {
            exposure.expose_zone(&shape.to_region());
        }

        let mut visible = BTreeMap::new();
        for token in &tokens {
            for shape in &token.exposed {
                exposure.expose_token(token.id, &shape.to_region());
            }
            let area: Region = token
                .visible
                .iter()
                .fold(Region::empty(), |acc, shape| acc.union(&shape.to_region()));
            visible.insert(token.id, area);
        }

        let mut templates = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();
        for record in &records {
            match Template::from_dto(record) {
                Ok(mut template) => {
                    if template.zone().is_none() {
                        template.set_zone(Some(zone.id));
                    }
                    templates.push(template);
                }
                Err(err) => rejected.push((record.id, err)),
            }
        }

        Self {
            zone,
            tokens,
            exposure,
            visible,
            lights: lights.iter().map(LightSpec::to_entry).collect(),
            templates,
            rejected,
            policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_core::TemplateId;

    fn spec() -> SceneSpec {
        SceneSpec {
            zone: ZoneSpec {
                id: ZoneId(3),
                name: "crypt".into(),
                grid: GridSpec::square(50),
                width: 10,
                height: 8,
            },
            tokens: vec![TokenSpec {
                id: TokenId(1),
                name: "scout".into(),
                cell: CellPoint::new(2, 2),
                exposed: vec![ShapeSpec::Rect(Rect::new(0, 0, 100, 100))],
                visible: vec![
                    ShapeSpec::Rect(Rect::new(50, 50, 100, 100)),
                    ShapeSpec::Polygon(vec![
                        Point::new(150.0, 50.0),
                        Point::new(250.0, 50.0),
                        Point::new(150.0, 150.0),
                    ]),
                ],
            }],
            exposed: vec![ShapeSpec::Rect(Rect::new(200, 200, 50, 50))],
            lights: vec![LightSpec {
                shape: ShapeSpec::Rect(Rect::new(0, 0, 50, 50)),
                paint: None,
                lumens: -5,
            }],
            templates: vec![
                TemplateDto {
                    kind: "radius".into(),
                    id: 1,
                    radius: 2,
                    ..TemplateDto::default()
                },
                TemplateDto {
                    kind: "spiral".into(),
                    id: 2,
                    ..TemplateDto::default()
                },
            ],
            policy: None,
        }
    }

    #[test]
    fn decoding_builds_engine_inputs() {
        let scene = Scene::from_spec(spec());
        assert_eq!(scene.exposure.zone_history().area(), 2500.0);
        assert_eq!(scene.exposure.token_history(TokenId(1)).area(), 10000.0);
        assert_eq!(scene.visible[&TokenId(1)].area(), 10000.0 + 5000.0);
        assert!(scene.lights[0].is_darkness());
    }

    #[test]
    fn templates_default_to_the_scene_zone_and_bad_ones_are_collected() {
        let scene = Scene::from_spec(spec());
        assert_eq!(scene.templates.len(), 1);
        assert_eq!(scene.templates[0].id(), TemplateId(1));
        assert_eq!(scene.templates[0].zone(), Some(ZoneId(3)));
        assert_eq!(scene.rejected.len(), 1);
        assert!(matches!(scene.rejected[0], (2, DtoError::UnknownKind { .. })));
    }

    #[test]
    fn zone_extent_uses_the_cell_size() {
        assert_eq!(spec().zone.extent(), Rect::new(0, 0, 500, 400));
    }
}
