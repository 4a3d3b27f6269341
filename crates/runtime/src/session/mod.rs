//! Frame-driven render session.
//!
//! A [`RenderSession`] owns everything one client renders: registered zones,
//! placed templates and, per zone, exposure history, lights, token visibility
//! and the per-viewer composition cache. Changes arrive as [`SessionEvent`]s;
//! each one flushes exactly the cached compositions it can affect, so a frame
//! with no relevant changes is served from cache.
mod event;
mod frame;

pub use event::SessionEvent;
pub use frame::{FrameOutput, FrameStats, TemplateFrame};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use map_content::Scene;
use map_core::{
    CurveTessellator, ExposedAreaTracker, FlattenMode, FlushFlags, FogPolicy, FrameComposition,
    Layer, LightEntry, Region, RenderFrameContext, Template, TemplateId, TokenId, ViewContext,
    VisibilityInputs, ZoneId,
};
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::error::{Result, SessionError};
use crate::registry::ZoneRegistry;

/// Passed as the visible area while vision is off.
static NO_VISION: Region = Region::empty();

/// Composition build counts `(fog, overlays)` of a zone's frame context.
///
/// Both only grow, so an unchanged pair means the viewer's cached parts are
/// the ones seen last time.
type Generation = (u64, u64);

/// Derived per-viewer data kept between frames.
#[derive(Clone, Debug, Default)]
struct ViewFrame {
    /// Union of the viewer's token vision; dropped on visibility changes.
    visible: Option<Region>,
    composition: Option<(Generation, Arc<FrameComposition>)>,
    /// Flattened fog outline, keyed by fog generation.
    outline: Option<(u64, Arc<[f32]>)>,
}

/// Dynamic state of one zone.
#[derive(Clone, Debug, Default)]
struct ZoneState {
    exposure: ExposedAreaTracker,
    lights: Vec<LightEntry>,
    visible: BTreeMap<TokenId, Region>,
    cache: RenderFrameContext,
    views: HashMap<ViewContext, ViewFrame>,
}

impl ZoneState {
    fn flush(&mut self, flags: FlushFlags) {
        self.cache.flush(flags);
        if flags.contains(FlushFlags::ZONE) {
            self.views.clear();
        } else if flags.contains(FlushFlags::VISIBILITY) {
            for view in self.views.values_mut() {
                view.visible = None;
            }
        }
    }
}

/// Render-side data of one template, valid for one shape build.
#[derive(Clone, Debug, Default)]
struct TemplateFill {
    /// Template rebuild count the entry was made for.
    rebuilds: u64,
    fill: Option<Arc<[f32]>>,
    /// Whether players see any of the area, per viewer and fog generation.
    revealed: HashMap<ViewContext, (u64, bool)>,
}

/// Returns the value cached under `key`, building and storing it otherwise.
fn memo<K, T>(slot: &mut Option<(K, Arc<T>)>, key: K, build: impl FnOnce() -> Arc<T>) -> Arc<T>
where
    K: PartialEq,
    T: ?Sized,
{
    if let Some((cached, value)) = slot.as_ref()
        && *cached == key
    {
        return Arc::clone(value);
    }
    let value = build();
    *slot = Some((key, Arc::clone(&value)));
    value
}

fn visible_union(visible: &BTreeMap<TokenId, Region>, view: &ViewContext) -> Region {
    let mut area = Region::empty();
    for (token, region) in visible {
        if view.is_gm() || view.tokens.contains(token) {
            area.add(region);
        }
    }
    area
}

pub struct RenderSession {
    config: RuntimeConfig,
    zones: ZoneRegistry,
    active: ZoneId,
    states: BTreeMap<ZoneId, ZoneState>,
    templates: BTreeMap<TemplateId, Template>,
    fills: BTreeMap<TemplateId, TemplateFill>,
    tessellator: CurveTessellator,
    frame: u64,
}

impl RenderSession {
    pub fn new(config: RuntimeConfig, zones: ZoneRegistry, active: ZoneId) -> Result<Self> {
        if !zones.contains(active) {
            return Err(SessionError::UnknownZone { zone: active });
        }
        let tessellator =
            CurveTessellator::new().with_points_per_curve(config.engine.points_per_curve);
        info!(
            target: "map_runtime",
            zones = zones.len(),
            active = %active,
            use_vision = config.policy.use_vision,
            individual_fog = config.policy.individual_fog,
            "render session started"
        );
        Ok(Self {
            config,
            zones,
            active,
            states: BTreeMap::new(),
            templates: BTreeMap::new(),
            fills: BTreeMap::new(),
            tessellator,
            frame: 0,
        })
    }

    /// Builds a single-zone session from a decoded scene. A fog policy stored
    /// in the scene replaces the configured one.
    pub fn from_scene(scene: Scene, mut config: RuntimeConfig) -> Result<Self> {
        if let Some(policy) = scene.policy {
            config.policy = policy;
        }
        let mut zones = ZoneRegistry::new();
        zones.register(scene.zone.id, scene.zone.name.clone(), scene.zone.grid)?;

        let mut session = Self::new(config, zones, scene.zone.id)?;
        let state = session.active_state_mut();
        state.exposure = scene.exposure;
        state.lights = scene.lights;
        state.visible = scene.visible;
        for template in scene.templates {
            session.templates.insert(template.id(), template);
        }
        debug!(
            target: "map_runtime",
            templates = session.templates.len(),
            "scene installed"
        );
        Ok(session)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    pub fn active_zone(&self) -> ZoneId {
        self.active
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn exposure(&self) -> Option<&ExposedAreaTracker> {
        self.states.get(&self.active).map(|state| &state.exposure)
    }

    pub fn lights(&self) -> &[LightEntry] {
        self.states
            .get(&self.active)
            .map(|state| state.lights.as_slice())
            .unwrap_or_default()
    }

    pub fn templates(&self) -> impl Iterator<Item = &Template> + '_ {
        self.templates.values()
    }

    pub fn template(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(&id)
    }

    /// Mutable access for parameter edits; the template invalidates its own shape.
    pub fn template_mut(&mut self, id: TemplateId) -> Option<&mut Template> {
        self.templates.get_mut(&id)
    }

    /// Replaces the fog policy and drops every cached composition that depends on it.
    pub fn set_policy(&mut self, policy: FogPolicy) {
        if self.config.policy == policy {
            return;
        }
        self.config.policy = policy;
        for state in self.states.values_mut() {
            state.flush(FlushFlags::FOG | FlushFlags::LIGHTS);
        }
        debug!(target: "map_runtime", "fog policy replaced");
    }

    fn active_state_mut(&mut self) -> &mut ZoneState {
        self.states.entry(self.active).or_default()
    }

    /// Applies one event and returns the cache flags it flushed.
    pub fn apply(&mut self, event: SessionEvent) -> Result<FlushFlags> {
        let mut flags = event.flush_flags();
        let label = event.label();

        match event {
            SessionEvent::ZoneChanged { zone } => {
                if !self.zones.contains(zone) {
                    return Err(SessionError::UnknownZone { zone });
                }
                self.active = zone;
            }
            SessionEvent::FogRevealed { area, token } => {
                let exposure = &mut self.active_state_mut().exposure;
                let revealed = match token {
                    Some(token) => exposure.expose_token(token, &area),
                    None => exposure.expose_zone(&area),
                };
                if !revealed {
                    flags = FlushFlags::empty();
                }
            }
            SessionEvent::FogReset { global_only } => {
                self.active_state_mut().exposure.reset(global_only);
            }
            SessionEvent::TokenFogReset { tokens } => {
                self.active_state_mut().exposure.reset_tokens(tokens);
            }
            SessionEvent::LightsChanged { lights } => {
                self.active_state_mut().lights = lights;
            }
            SessionEvent::VisibilityChanged { token, area } => {
                let visible = &mut self.active_state_mut().visible;
                if area.is_empty() {
                    visible.remove(&token);
                } else {
                    visible.insert(token, area);
                }
            }
            SessionEvent::TemplateUpserted { mut template } => {
                match template.zone() {
                    Some(zone) if !self.zones.contains(zone) => {
                        return Err(SessionError::UnknownZone { zone });
                    }
                    Some(_) => {}
                    None => template.set_zone(Some(self.active)),
                }
                self.fills.remove(&template.id());
                self.templates.insert(template.id(), template);
            }
            SessionEvent::TemplateRemoved { template } => {
                self.templates
                    .remove(&template)
                    .ok_or(SessionError::UnknownTemplate { template })?;
                self.fills.remove(&template);
            }
        }

        if !flags.is_empty() {
            self.active_state_mut().flush(flags);
            debug!(
                target: "map_runtime",
                event = label,
                flags = ?flags,
                zone = %self.active,
                "flushed frame cache"
            );
        }
        Ok(flags)
    }

    /// Applies events in order, stopping at the first failure.
    pub fn apply_all<I>(&mut self, events: I) -> Result<FlushFlags>
    where
        I: IntoIterator<Item = SessionEvent>,
    {
        let mut flushed = FlushFlags::empty();
        for event in events {
            flushed |= self.apply(event)?;
        }
        Ok(flushed)
    }

    /// Line-of-sight area of the viewer's tokens in the active zone; all tokens for game masters.
    pub fn visible_area(&self, view: &ViewContext) -> Region {
        self.states
            .get(&self.active)
            .map(|state| visible_union(&state.visible, view))
            .unwrap_or_default()
    }

    /// Renders the active zone for `view`.
    ///
    /// Everything derived from unchanged inputs is served from cache; the
    /// returned [`FrameStats`] report what had to be recomputed.
    pub fn render(&mut self, view: &ViewContext) -> FrameOutput {
        self.frame += 1;

        let Self {
            config,
            zones,
            active,
            states,
            templates,
            fills,
            tessellator,
            frame,
        } = self;
        let zone = *active;
        let ZoneState {
            exposure,
            lights,
            visible,
            cache,
            views,
        } = states.entry(zone).or_default();
        let ViewFrame {
            visible: visible_slot,
            composition: composition_slot,
            outline: outline_slot,
        } = views.entry(view.clone()).or_default();
        let mut stats = FrameStats::default();

        let vision: &Region = if config.policy.use_vision {
            visible_slot.get_or_insert_with(|| {
                stats.visible_rebuilt = true;
                visible_union(visible, view)
            })
        } else {
            &NO_VISION
        };
        let inputs = VisibilityInputs {
            exposure: &*exposure,
            visible: vision,
            lights: lights.as_slice(),
            policy: &config.policy,
        };

        let (fog_builds, overlay_builds) = cache.build_counts();
        cache.compose(view, &inputs);
        let generation = cache.build_counts();
        stats.fog_rebuilt = generation.0 > fog_builds;
        stats.overlays_rebuilt = generation.1 > overlay_builds;
        let composition = memo(composition_slot, generation, || {
            Arc::new(cache.compose(view, &inputs).to_composition())
        });

        let mut frames = Vec::new();
        for template in templates.values_mut() {
            if template.zone() != Some(zone) || (template.layer() == Layer::Gm && !view.is_gm()) {
                continue;
            }
            let before = template.rebuild_count();
            let shape = template.shape(&*zones);
            let (area, border, bounds) = (shape.area.clone(), shape.border.clone(), shape.bounds);
            let rebuilds = template.rebuild_count();
            if rebuilds > before {
                stats.templates_rebuilt += 1;
                debug!(
                    target: "map_runtime",
                    template = %template.id(),
                    kind = %template.kind().tag(),
                    "template shape rebuilt"
                );
            }

            let entry = fills.entry(template.id()).or_default();
            if entry.rebuilds != rebuilds {
                *entry = TemplateFill {
                    rebuilds,
                    ..TemplateFill::default()
                };
            }
            if !view.is_gm() {
                let known = entry
                    .revealed
                    .get(view)
                    .filter(|(fog, _)| *fog == generation.0)
                    .map(|(_, revealed)| *revealed);
                let revealed = match known {
                    Some(revealed) => revealed,
                    None => {
                        stats.fog_checks += 1;
                        let revealed = composition.fog.intersects(&area);
                        entry.revealed.insert(view.clone(), (generation.0, revealed));
                        revealed
                    }
                };
                if !revealed {
                    continue;
                }
            }
            let fill = entry.fill.get_or_insert_with(|| {
                stats.fills_flattened += 1;
                Arc::from(tessellator.flatten(&area.to_path(), FlattenMode::Fill))
            });
            frames.push(TemplateFrame {
                id: template.id(),
                layer: template.layer(),
                area,
                border,
                bounds,
                fill: Arc::clone(fill),
            });
        }

        let fog_outline = memo(outline_slot, generation.0, || {
            stats.outline_flattened = true;
            Arc::from(tessellator.flatten(&composition.fog.outline, FlattenMode::Stroke))
        });
        if !stats.fully_cached() {
            debug!(
                target: "map_runtime",
                frame = *frame,
                templates = stats.templates_rebuilt,
                fog = stats.fog_rebuilt,
                overlays = stats.overlays_rebuilt,
                fills = stats.fills_flattened,
                "frame composed"
            );
        }

        FrameOutput {
            frame: *frame,
            zone,
            view: view.clone(),
            templates: frames,
            composition,
            fog_outline,
            stats,
        }
    }
}
