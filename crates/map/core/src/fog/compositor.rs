//! Per-viewer fog mask and overlay composition.

use std::collections::HashMap;

use bitflags::bitflags;

use super::{
    ClipStyle, ExposedAreaTracker, FogPolicy, LightEntry, LightOverlay, Rgba, ViewContext,
};
use crate::geometry::{BoundaryPath, Point, Region};

bitflags! {
    /// Inputs that changed since the last frame.
    ///
    /// Each flag drops the cached compositions that depend on it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FlushFlags: u8 {
        const ZONE = 1 << 0;
        const FOG = 1 << 1;
        const LIGHTS = 1 << 2;
        const VISIBILITY = 1 << 3;
    }
}

impl FlushFlags {
    fn drops_fog(self) -> bool {
        self.intersects(Self::ZONE | Self::FOG | Self::VISIBILITY)
    }

    fn drops_overlays(self) -> bool {
        self.intersects(Self::ZONE | Self::LIGHTS | Self::VISIBILITY)
    }
}

/// Everything one composition pass reads. Borrowed, never mutated.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityInputs<'a> {
    pub exposure: &'a ExposedAreaTracker,
    /// Live line-of-sight area of the viewer's tokens.
    pub visible: &'a Region,
    pub lights: &'a [LightEntry],
    pub policy: &'a FogPolicy,
}

impl VisibilityInputs<'_> {
    /// Whether the live visible area splits the mask and clips player overlays.
    pub fn cuts_by_vision(&self) -> bool {
        self.policy.use_vision && !self.visible.is_empty()
    }
}

/// Fog for one viewer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FogMask {
    /// Soft-fog mask: everything this viewer has ever seen.
    pub exposed: Region,
    /// Part of the mask currently in sight.
    pub clear: Region,
    /// Part of the mask seen before but not now.
    pub dimmed: Region,
    /// Boundary of the visible area, for stroking.
    pub outline: BoundaryPath,
    pub opacity: f32,
    pub enabled: bool,
}

impl FogMask {
    /// False when `point` sits under hard fog.
    pub fn reveals(&self, point: Point) -> bool {
        !self.enabled || self.exposed.contains(point)
    }

    pub fn is_dimmed(&self, point: Point) -> bool {
        self.enabled && self.dimmed.contains(point)
    }

    pub fn intersects(&self, region: &Region) -> bool {
        !self.enabled || !self.exposed.intersect(region).is_empty()
    }
}

/// Full composition for one viewer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameComposition {
    pub fog: FogMask,
    pub light: LightOverlay,
    pub darkness: LightOverlay,
}

/// Borrowed view of a cached [`FrameComposition`].
#[derive(Clone, Copy, Debug)]
pub struct ComposedView<'a> {
    pub fog: &'a FogMask,
    pub light: &'a LightOverlay,
    pub darkness: &'a LightOverlay,
}

impl ComposedView<'_> {
    pub fn to_composition(&self) -> FrameComposition {
        FrameComposition {
            fog: self.fog.clone(),
            light: self.light.clone(),
            darkness: self.darkness.clone(),
        }
    }
}

pub struct VisibilityCompositor;

impl VisibilityCompositor {
    pub fn compose(view: &ViewContext, inputs: &VisibilityInputs<'_>) -> FrameComposition {
        let (light, darkness) = Self::overlays(view, inputs);
        FrameComposition {
            fog: Self::fog_mask(view, inputs),
            light,
            darkness,
        }
    }

    /// Soft-fog mask plus its visible cut. Always covers the zone history.
    pub fn fog_mask(view: &ViewContext, inputs: &VisibilityInputs<'_>) -> FogMask {
        let policy = inputs.policy;
        let mut exposed = inputs.exposure.zone_history().clone();
        if !policy.combined(view) {
            for token in &view.tokens {
                exposed.add(inputs.exposure.token_history(*token));
            }
        }

        let (clear, dimmed, outline) = if inputs.cuts_by_vision() {
            (
                inputs.visible.intersect(&exposed),
                exposed.subtract(inputs.visible),
                inputs.visible.to_path(),
            )
        } else {
            (exposed.clone(), Region::empty(), BoundaryPath::new())
        };

        FogMask {
            exposed,
            clear,
            dimmed,
            outline,
            opacity: policy.fog_opacity,
            enabled: policy.has_fog,
        }
    }

    /// Light and darkness overlays. Players see darkness in black and get both
    /// clipped against the visible area whenever vision cuts the mask.
    pub fn overlays(
        view: &ViewContext,
        inputs: &VisibilityInputs<'_>,
    ) -> (LightOverlay, LightOverlay) {
        let lights = inputs.lights.iter().filter(|e| !e.is_darkness());
        let darks = inputs.lights.iter().filter(|e| e.is_darkness());

        if view.is_gm() {
            return (
                LightOverlay::build(lights, None),
                LightOverlay::build(darks, None),
            );
        }
        let light = LightOverlay::build(lights, None);
        let darkness = LightOverlay::build(darks, Some(Rgba::BLACK));
        if !inputs.cuts_by_vision() {
            return (light, darkness);
        }
        (
            light.clip(ClipStyle::ClipToVisibleArea, inputs.visible),
            darkness.clip(ClipStyle::ClipToNotVisibleArea, inputs.visible),
        )
    }
}

#[derive(Clone, Debug, Default)]
struct CachedView {
    fog: Option<FogMask>,
    overlays: Option<(LightOverlay, LightOverlay)>,
}

/// Per-viewer composition cache for one zone, invalidated through [`flush`](Self::flush).
#[derive(Clone, Debug, Default)]
pub struct RenderFrameContext {
    views: HashMap<ViewContext, CachedView>,
    fog_builds: u64,
    overlay_builds: u64,
}

impl RenderFrameContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached composition for `view`, rebuilding only the parts a flush dropped.
    pub fn compose(&mut self, view: &ViewContext, inputs: &VisibilityInputs<'_>) -> ComposedView<'_> {
        let Self {
            views,
            fog_builds,
            overlay_builds,
        } = self;
        let cached = views.entry(view.clone()).or_default();

        let fog = cached.fog.get_or_insert_with(|| {
            *fog_builds += 1;
            VisibilityCompositor::fog_mask(view, inputs)
        });
        let (light, darkness) = cached.overlays.get_or_insert_with(|| {
            *overlay_builds += 1;
            VisibilityCompositor::overlays(view, inputs)
        });
        ComposedView {
            fog,
            light,
            darkness,
        }
    }

    pub fn flush(&mut self, flags: FlushFlags) {
        if flags.contains(FlushFlags::ZONE) {
            self.views.clear();
            return;
        }
        for cached in self.views.values_mut() {
            if flags.drops_fog() {
                cached.fog = None;
            }
            if flags.drops_overlays() {
                cached.overlays = None;
            }
        }
    }

    pub fn cached_views(&self) -> usize {
        self.views.len()
    }

    /// Number of fog masks and overlay pairs built so far.
    pub fn build_counts(&self) -> (u64, u64) {
        (self.fog_builds, self.overlay_builds)
    }
}
