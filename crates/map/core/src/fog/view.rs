use std::collections::BTreeSet;

use super::TokenId;

/// Who is looking at the map.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewerRole {
    GameMaster,
    #[default]
    Player,
}

/// A viewer plus the tokens whose sight they share.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewContext {
    pub role: ViewerRole,
    pub tokens: BTreeSet<TokenId>,
}

impl ViewContext {
    pub fn gm() -> Self {
        Self {
            role: ViewerRole::GameMaster,
            tokens: BTreeSet::new(),
        }
    }

    pub fn player<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = TokenId>,
    {
        Self {
            role: ViewerRole::Player,
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn is_gm(&self) -> bool {
        self.role == ViewerRole::GameMaster
    }
}

/// Zone and campaign switches that shape fog composition.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FogPolicy {
    pub has_fog: bool,
    pub use_vision: bool,
    pub individual_fog: bool,
    /// Opacity of unexposed fog, 0..=1.
    pub fog_opacity: f32,
    /// Opacity of light and darkness overlays, 0..=1.
    pub light_opacity: f32,
}

impl FogPolicy {
    pub const DEFAULT_FOG_OPACITY: f32 = 1.0;
    pub const DEFAULT_LIGHT_OPACITY: f32 = 0.6;

    /// Whether `view` sees the zone-wide history only.
    pub fn combined(&self, view: &ViewContext) -> bool {
        !self.use_vision || !self.individual_fog || view.is_gm()
    }

    pub fn with_opacities(mut self, fog: f32, light: f32) -> Self {
        self.fog_opacity = fog.clamp(0.0, 1.0);
        self.light_opacity = light.clamp(0.0, 1.0);
        self
    }
}

impl Default for FogPolicy {
    fn default() -> Self {
        Self {
            has_fog: true,
            use_vision: true,
            individual_fog: false,
            fog_opacity: Self::DEFAULT_FOG_OPACITY,
            light_opacity: Self::DEFAULT_LIGHT_OPACITY,
        }
    }
}
