//! Inputs that change what a session renders.

use map_core::{FlushFlags, LightEntry, Region, Template, TemplateId, TokenId, ZoneId};

/// One change applied to a [`RenderSession`](super::RenderSession).
///
/// Fog, light and visibility events address the active zone.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// Switch the active zone.
    ZoneChanged { zone: ZoneId },

    /// Reveal `area`, into the token's own history when `token` is set.
    FogRevealed { area: Region, token: Option<TokenId> },

    /// Forget exposure; token histories survive when `global_only`.
    FogReset { global_only: bool },

    /// Forget the exposure histories of some tokens.
    TokenFogReset { tokens: Vec<TokenId> },

    /// Replace the light set of the active zone.
    LightsChanged { lights: Vec<LightEntry> },

    /// New line-of-sight area for a token; an empty area removes it.
    VisibilityChanged { token: TokenId, area: Region },

    TemplateUpserted { template: Template },

    TemplateRemoved { template: TemplateId },
}

impl SessionEvent {
    /// Cached compositions this event invalidates.
    ///
    /// Template events flush nothing: templates memoize their own shapes.
    pub fn flush_flags(&self) -> FlushFlags {
        match self {
            Self::ZoneChanged { .. } => FlushFlags::ZONE,
            Self::FogRevealed { .. } | Self::FogReset { .. } | Self::TokenFogReset { .. } => {
                FlushFlags::FOG
            }
            Self::LightsChanged { .. } => FlushFlags::LIGHTS,
            Self::VisibilityChanged { .. } => FlushFlags::VISIBILITY,
            Self::TemplateUpserted { .. } | Self::TemplateRemoved { .. } => FlushFlags::empty(),
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ZoneChanged { .. } => "zone_changed",
            Self::FogRevealed { .. } => "fog_revealed",
            Self::FogReset { .. } => "fog_reset",
            Self::TokenFogReset { .. } => "token_fog_reset",
            Self::LightsChanged { .. } => "lights_changed",
            Self::VisibilityChanged { .. } => "visibility_changed",
            Self::TemplateUpserted { .. } => "template_upserted",
            Self::TemplateRemoved { .. } => "template_removed",
        }
    }
}
