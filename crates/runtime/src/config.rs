//! Runtime configuration.
//!
//! Defaults come from `map-core`, can be replaced by a settings file, and are
//! finally overridden by process environment variables.

use std::env;

use map_content::EngineSettings;
use map_core::{EngineConfig, FogPolicy};

/// Settings a [`RenderSession`](crate::RenderSession) runs with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    pub policy: FogPolicy,
}

impl RuntimeConfig {
    pub fn from_settings(settings: EngineSettings) -> Self {
        Self {
            engine: settings.engine,
            policy: settings.fog,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MAP_HAS_FOG` - Whether the zone is fogged at all (default: true)
    /// - `MAP_USE_VISION` - Cut fog by token vision (default: true)
    /// - `MAP_INDIVIDUAL_FOG` - Per-token exposure for players (default: false)
    /// - `MAP_FOG_OPACITY` - Hard fog opacity, 0..=1 (default: 1.0)
    /// - `MAP_LIGHT_OPACITY` - Light and darkness opacity, 0..=1 (default: 0.6)
    /// - `MAP_CURVE_POINTS` - Samples per curve when tessellating (default: 10)
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Applies environment overrides on top of `self`.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(has_fog) = read_env_bool(&lookup, "MAP_HAS_FOG") {
            self.policy.has_fog = has_fog;
        }
        if let Some(use_vision) = read_env_bool(&lookup, "MAP_USE_VISION") {
            self.policy.use_vision = use_vision;
        }
        if let Some(individual) = read_env_bool(&lookup, "MAP_INDIVIDUAL_FOG") {
            self.policy.individual_fog = individual;
        }

        let fog = read_env::<f32, _>(&lookup, "MAP_FOG_OPACITY").unwrap_or(self.policy.fog_opacity);
        let light =
            read_env::<f32, _>(&lookup, "MAP_LIGHT_OPACITY").unwrap_or(self.policy.light_opacity);
        self.policy = self.policy.with_opacities(fog, light);

        if let Some(points) = read_env::<u32, _>(&lookup, "MAP_CURVE_POINTS") {
            self.engine.points_per_curve = points.max(1);
        }
        self
    }
}

fn read_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}

fn read_env_bool<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key)?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::default().with_overrides(|key| vars.get(key).cloned())
    }

    #[test]
    fn unset_variables_keep_defaults() {
        assert_eq!(with(&[]), RuntimeConfig::default());
    }

    #[test]
    fn overrides_are_parsed_and_clamped() {
        let config = with(&[
            ("MAP_USE_VISION", "off"),
            ("MAP_INDIVIDUAL_FOG", "YES"),
            ("MAP_FOG_OPACITY", "2.5"),
            ("MAP_LIGHT_OPACITY", " 0.25 "),
            ("MAP_CURVE_POINTS", "0"),
        ]);
        assert!(!config.policy.use_vision);
        assert!(config.policy.individual_fog);
        assert_eq!(config.policy.fog_opacity, 1.0);
        assert_eq!(config.policy.light_opacity, 0.25);
        assert_eq!(config.engine.points_per_curve, 1);
    }

    #[test]
    fn unparsable_values_are_ignored() {
        let config = with(&[("MAP_HAS_FOG", "maybe"), ("MAP_CURVE_POINTS", "many")]);
        assert!(config.policy.has_fog);
        assert_eq!(config.engine.points_per_curve, EngineConfig::POINTS_PER_CURVE);
    }
}
