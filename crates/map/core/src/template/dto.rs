//! Flat, versioned persistence record for templates.

use std::str::FromStr;

use super::{Layer, LineSpec, Template, TemplateId, TemplateKind, triangle};
use crate::error::DtoError;
use crate::geometry::{CellPoint, ZonePoint};
use crate::grid::{Direction, Quadrant, ZoneId};

/// Newest record layout this crate writes and understands.
pub const TEMPLATE_DTO_VERSION: u32 = 1;

/// Type tag carried by a [`TemplateDto`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TemplateKindTag {
    Radius,
    RadiusCell,
    Cone,
    Burst,
    Blast,
    Line,
    LineCell,
    Wall,
    Triangle,
}

/// Template as stored on disk or sent over the wire.
///
/// Optional fields that are missing decode to "absent"; fields that do not
/// apply to the record's kind are ignored.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TemplateDto {
    pub version: u32,
    pub kind: String,
    pub id: u32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub zone: Option<u32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub layer: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    pub radius: i32,
    pub vertex: ZonePoint,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub direction: Option<String>,
    /// Quadrant a line points into; informational, recomputed on load.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub quadrant: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub path_vertex: Option<ZonePoint>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub path: Option<Vec<CellPoint>>,
    pub double_wide: bool,
    pub mouse_slope_greater: bool,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub control: Option<CellPoint>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub theta: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub sensitivity: Option<f64>,
}

impl Default for TemplateDto {
    fn default() -> Self {
        Self {
            version: TEMPLATE_DTO_VERSION,
            kind: String::new(),
            id: 0,
            zone: None,
            layer: None,
            name: None,
            radius: 0,
            vertex: ZonePoint::ORIGIN,
            direction: None,
            quadrant: None,
            path_vertex: None,
            path: None,
            double_wide: false,
            mouse_slope_greater: false,
            control: None,
            theta: None,
            sensitivity: None,
        }
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: Option<&str>) -> Result<Option<T>, DtoError> {
    value
        .map(|raw| {
            raw.parse().map_err(|_| DtoError::InvalidField {
                field,
                value: raw.to_owned(),
            })
        })
        .transpose()
}

impl Template {
    pub fn to_dto(&self) -> TemplateDto {
        let mut dto = TemplateDto {
            kind: self.kind.tag().to_string(),
            id: self.id.0,
            zone: self.zone.map(|zone| zone.0),
            layer: Some(self.layer.to_string()),
            name: self.name.clone(),
            radius: self.radius(),
            vertex: self.params.vertex,
            ..TemplateDto::default()
        };

        let line_quadrant = |target: Option<ZonePoint>| {
            target
                .filter(|t| *t != self.params.vertex)
                .map(|t| {
                    let delta = t - self.params.vertex;
                    Quadrant::from_delta(delta.x, delta.y).to_string()
                })
        };

        match &self.kind {
            TemplateKind::Radius | TemplateKind::RadiusCell | TemplateKind::Burst => {}
            TemplateKind::Cone { direction } => {
                dto.direction = direction.map(|d| d.to_string());
            }
            TemplateKind::Blast { control } => dto.control = Some(*control),
            TemplateKind::Line(spec) => {
                dto.path_vertex = spec.path_vertex;
                dto.quadrant = line_quadrant(spec.path_vertex);
                dto.double_wide = spec.double_wide;
                dto.mouse_slope_greater = spec.mouse_slope_greater;
            }
            TemplateKind::LineCell { path_vertex } => {
                dto.path_vertex = *path_vertex;
                dto.quadrant = line_quadrant(*path_vertex);
            }
            TemplateKind::Wall { path } => dto.path = Some(path.clone()),
            TemplateKind::Triangle { theta, sensitivity } => {
                dto.theta = Some(*theta);
                dto.sensitivity = Some(*sensitivity);
            }
        }
        dto
    }

    /// Rebuilds a template from a record. Out-of-range numbers are clamped;
    /// unknown kinds, unparsable enums and newer layouts are rejected.
    pub fn from_dto(dto: &TemplateDto) -> Result<Self, DtoError> {
        if dto.version > TEMPLATE_DTO_VERSION {
            return Err(DtoError::UnsupportedVersion {
                version: dto.version,
                supported: TEMPLATE_DTO_VERSION,
            });
        }
        let tag = TemplateKindTag::from_str(&dto.kind).map_err(|_| DtoError::UnknownKind {
            kind: dto.kind.clone(),
        })?;
        let layer: Option<Layer> = parse_field("layer", dto.layer.as_deref())?;

        let kind = match tag {
            TemplateKindTag::Radius => TemplateKind::Radius,
            TemplateKindTag::RadiusCell => TemplateKind::RadiusCell,
            TemplateKindTag::Burst => TemplateKind::Burst,
            TemplateKindTag::Cone => TemplateKind::Cone {
                direction: parse_field::<Direction>("direction", dto.direction.as_deref())?,
            },
            TemplateKindTag::Blast => TemplateKind::Blast {
                control: dto.control.unwrap_or(CellPoint::ORIGIN),
            },
            TemplateKindTag::Line => TemplateKind::Line(LineSpec {
                path_vertex: dto.path_vertex,
                double_wide: dto.double_wide,
                mouse_slope_greater: dto.mouse_slope_greater,
            }),
            TemplateKindTag::LineCell => TemplateKind::LineCell {
                path_vertex: dto.path_vertex,
            },
            TemplateKindTag::Wall => TemplateKind::Wall {
                path: dto.path.clone().unwrap_or_default(),
            },
            TemplateKindTag::Triangle => TemplateKind::Triangle {
                theta: dto.theta.filter(|t| t.is_finite()).unwrap_or(0.0),
                sensitivity: triangle::clamp_sensitivity(dto.sensitivity.unwrap_or(0.0)),
            },
        };

        let mut template = Template::new(TemplateId(dto.id), kind)
            .with_vertex(dto.vertex)
            .with_radius(dto.radius)
            .with_layer(layer.unwrap_or_default());
        template.set_zone(dto.zone.map(ZoneId));
        template.set_name(dto.name.clone());
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EngineError, ErrorSeverity};

    #[test]
    fn round_trip_keeps_variant_fields() {
        let mut cone = Template::new(TemplateId(3), TemplateKind::Cone { direction: None })
            .with_zone(ZoneId(2))
            .with_vertex(ZonePoint::new(50, 100))
            .with_radius(4)
            .with_name("breath")
            .with_layer(Layer::Gm);
        cone.set_direction(Some(Direction::NorthWest));

        let dto = cone.to_dto();
        assert_eq!(dto.kind, "cone");
        assert_eq!(dto.direction.as_deref(), Some("north_west"));
        assert_eq!(dto.layer.as_deref(), Some("gm"));

        let back = Template::from_dto(&dto).unwrap();
        assert_eq!(back.kind(), cone.kind());
        assert_eq!(back.name(), Some("breath"));
        assert_eq!(back.zone(), Some(ZoneId(2)));
        assert_eq!(back.radius(), 4);
        assert_eq!(back.layer(), Layer::Gm);
    }

    #[test]
    fn line_records_its_quadrant() {
        let mut line = Template::new(TemplateId(1), TemplateKind::Line(LineSpec::default()))
            .with_radius(5);
        line.aim_at(ZonePoint::new(-30, 40));
        assert_eq!(line.to_dto().quadrant.as_deref(), Some("south_west"));
    }

    #[test]
    fn missing_optionals_decode_as_absent() {
        let dto = TemplateDto {
            kind: "line_cell".into(),
            radius: 3,
            ..TemplateDto::default()
        };
        let template = Template::from_dto(&dto).unwrap();
        assert_eq!(template.kind(), &TemplateKind::LineCell { path_vertex: None });
        assert_eq!(template.name(), None);
        assert_eq!(template.zone(), None);
        assert_eq!(template.layer(), Layer::Object);
    }

    #[test]
    fn wall_radius_comes_from_the_path() {
        let dto = TemplateDto {
            kind: "wall".into(),
            radius: 12,
            path: Some(vec![CellPoint::ORIGIN, CellPoint::new(1, 0)]),
            ..TemplateDto::default()
        };
        let template = Template::from_dto(&dto).unwrap();
        assert_eq!(template.radius(), 2);
        assert_eq!(template.to_dto().radius, 2);
    }

    #[test]
    fn out_of_range_numbers_are_clamped() {
        let dto = TemplateDto {
            kind: "triangle".into(),
            radius: 400,
            sensitivity: Some(140.0),
            theta: Some(f64::INFINITY),
            ..TemplateDto::default()
        };
        let template = Template::from_dto(&dto).unwrap();
        assert_eq!(template.radius(), 30);
        assert_eq!(
            template.kind(),
            &TemplateKind::Triangle {
                theta: 0.0,
                sensitivity: 100.0
            }
        );
    }

    #[test]
    fn bad_records_are_classified() {
        let unknown = TemplateDto {
            kind: "hexagon".into(),
            ..TemplateDto::default()
        };
        let err = Template::from_dto(&unknown).unwrap_err();
        assert_eq!(err.error_code(), "DTO_UNKNOWN_KIND");
        assert!(err.severity().is_recoverable());

        let newer = TemplateDto {
            version: TEMPLATE_DTO_VERSION + 1,
            kind: "radius".into(),
            ..TemplateDto::default()
        };
        assert!(matches!(
            Template::from_dto(&newer),
            Err(DtoError::UnsupportedVersion { .. })
        ));

        let bad_direction = TemplateDto {
            kind: "cone".into(),
            direction: Some("up".into()),
            ..TemplateDto::default()
        };
        let err = Template::from_dto(&bad_direction).unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(
            err,
            DtoError::InvalidField {
                field: "direction",
                value: "up".into()
            }
        );
    }
}
