//! Fog of war: exposure history, light overlays and per-viewer composition.

mod compositor;
mod exposed;
mod light;
mod view;

pub use compositor::{
    ComposedView, FlushFlags, FogMask, FrameComposition, RenderFrameContext, VisibilityCompositor,
    VisibilityInputs,
};
pub use exposed::{ExposedAreaTracker, TokenId};
pub use light::{ClipStyle, LightEntry, LightOverlay, OverlayLayer, Rgba};
pub use view::{FogPolicy, ViewContext, ViewerRole};
