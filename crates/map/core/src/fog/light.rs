//! Light and darkness overlays.

use crate::geometry::{Point, Region};

/// 8-bit straight-alpha colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Additive blend, channels saturate; alpha keeps the stronger of the two.
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
            a: self.a.max(other.a),
        }
    }
}

/// One lit or darkened area. Negative lumens mark darkness.
#[derive(Clone, Debug, PartialEq)]
pub struct LightEntry {
    pub region: Region,
    pub paint: Option<Rgba>,
    pub lumens: i32,
}

impl LightEntry {
    pub fn light(region: Region, lumens: i32) -> Self {
        Self {
            region,
            paint: None,
            lumens: lumens.max(0),
        }
    }

    pub fn darkness(region: Region, lumens: i32) -> Self {
        Self {
            region,
            paint: None,
            lumens: -lumens.abs().max(1),
        }
    }

    pub fn with_paint(mut self, paint: Rgba) -> Self {
        self.paint = Some(paint);
        self
    }

    pub fn is_darkness(&self) -> bool {
        self.lumens < 0
    }

    pub fn effective_paint(&self) -> Rgba {
        self.paint.unwrap_or(if self.is_darkness() {
            Rgba::BLACK
        } else {
            Rgba::WHITE
        })
    }
}

/// How an overlay is cut against the viewer's visible area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClipStyle {
    ClipToVisibleArea,
    ClipToNotVisibleArea,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLayer {
    pub region: Region,
    pub paint: Rgba,
}

/// Entries of one sign composited into a single buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightOverlay {
    layers: Vec<OverlayLayer>,
    coverage: Region,
    clip: Option<ClipStyle>,
}

impl LightOverlay {
    /// Fills every entry into one overlay; `tint` overrides each entry's paint.
    pub fn build<'a, I>(entries: I, tint: Option<Rgba>) -> Self
    where
        I: IntoIterator<Item = &'a LightEntry>,
    {
        let mut overlay = Self::default();
        for entry in entries {
            if entry.region.is_empty() {
                continue;
            }
            overlay.coverage.add(&entry.region);
            overlay.layers.push(OverlayLayer {
                region: entry.region.clone(),
                paint: tint.unwrap_or_else(|| entry.effective_paint()),
            });
        }
        overlay
    }

    /// Cuts the overlay against `visible`.
    pub fn clip(mut self, style: ClipStyle, visible: &Region) -> Self {
        let cut = |region: &Region| match style {
            ClipStyle::ClipToVisibleArea => region.intersect(visible),
            ClipStyle::ClipToNotVisibleArea => region.subtract(visible),
        };
        self.coverage = cut(&self.coverage);
        self.layers = self
            .layers
            .into_iter()
            .filter_map(|layer| {
                let region = cut(&layer.region);
                (!region.is_empty()).then_some(OverlayLayer { region, ..layer })
            })
            .collect();
        self.clip = Some(style);
        self
    }

    pub fn layers(&self) -> &[OverlayLayer] {
        &self.layers
    }

    /// Union of all layers.
    pub fn coverage(&self) -> &Region {
        &self.coverage
    }

    pub fn clip_style(&self) -> Option<ClipStyle> {
        self.clip
    }

    pub fn is_empty(&self) -> bool {
        self.coverage.is_empty()
    }

    /// Composited paint at `point`: each covering layer contributes once.
    pub fn paint_at(&self, point: Point) -> Option<Rgba> {
        self.layers
            .iter()
            .filter(|layer| layer.region.contains(point))
            .map(|layer| layer.paint)
            .reduce(Rgba::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region::from_rect(Rect::new(x, y, w, h))
    }

    #[test]
    fn default_paints_follow_the_sign() {
        assert_eq!(LightEntry::light(rect(0, 0, 1, 1), 5).effective_paint(), Rgba::WHITE);
        let dark = LightEntry::darkness(rect(0, 0, 1, 1), 5);
        assert!(dark.is_darkness());
        assert_eq!(dark.effective_paint(), Rgba::BLACK);
        assert_eq!(
            dark.with_paint(Rgba::new(80, 0, 0, 255)).effective_paint(),
            Rgba::new(80, 0, 0, 255)
        );
    }

    #[test]
    fn overlapping_entries_blend_additively() {
        let red = LightEntry::light(rect(0, 0, 20, 10), 1).with_paint(Rgba::new(200, 0, 0, 100));
        let blue = LightEntry::light(rect(10, 0, 20, 10), 1).with_paint(Rgba::new(100, 0, 50, 200));
        let overlay = LightOverlay::build([&red, &blue], None);

        assert_eq!(overlay.coverage().area(), 300.0);
        assert_eq!(overlay.paint_at(Point::new(5.0, 5.0)), Some(Rgba::new(200, 0, 0, 100)));
        assert_eq!(overlay.paint_at(Point::new(15.0, 5.0)), Some(Rgba::new(255, 0, 50, 200)));
        assert_eq!(overlay.paint_at(Point::new(50.0, 5.0)), None);
    }

    #[test]
    fn clipping_cuts_every_layer() {
        let entry = LightEntry::light(rect(0, 0, 20, 20), 1);
        let visible = rect(10, 0, 20, 20);

        let inside = LightOverlay::build([&entry], None).clip(ClipStyle::ClipToVisibleArea, &visible);
        assert_eq!(inside.coverage().area(), 200.0);
        assert!(inside.paint_at(Point::new(5.0, 5.0)).is_none());

        let outside =
            LightOverlay::build([&entry], Some(Rgba::BLACK)).clip(ClipStyle::ClipToNotVisibleArea, &visible);
        assert_eq!(outside.paint_at(Point::new(5.0, 5.0)), Some(Rgba::BLACK));
        assert_eq!(outside.clip_style(), Some(ClipStyle::ClipToNotVisibleArea));
    }
}
