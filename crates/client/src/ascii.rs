//! Text rendering of a composed frame, one glyph per grid cell.
//!
//! Legend: `@` token, `#` template, `%` darkness, `*` light, `.` in sight,
//! `:` remembered, blank under hard fog.

use std::fmt::{self, Write as _};

use map_core::{
    BorderSegment, CellPoint, FogMask, LightOverlay, Painter, Point, Region, ViewerRole,
};
use map_runtime::FrameOutput;

pub const TOKEN: char = '@';
pub const TEMPLATE: char = '#';
pub const DARKNESS: char = '%';
pub const LIGHT: char = '*';
pub const CLEAR: char = '.';
pub const DIMMED: char = ':';
pub const HIDDEN: char = ' ';

/// Grid of glyphs covering a zone. Filling marks every cell whose centre lies
/// inside the region.
#[derive(Clone, Debug)]
pub struct AsciiCanvas {
    cell_size: i32,
    width: i32,
    height: i32,
    cells: Vec<char>,
    brush: char,
    strokes: usize,
}

impl AsciiCanvas {
    pub fn new(cell_size: i32, width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cell_size: cell_size.max(1),
            width,
            height,
            cells: vec![HIDDEN; (width * height) as usize],
            brush: TEMPLATE,
            strokes: 0,
        }
    }

    pub fn set_brush(&mut self, glyph: char) {
        self.brush = glyph;
    }

    pub fn glyph(&self, cell: CellPoint) -> Option<char> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Border segments seen so far; the text grid has no room to draw them.
    pub fn strokes(&self) -> usize {
        self.strokes
    }

    pub fn put(&mut self, cell: CellPoint, glyph: char) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = glyph;
        }
    }

    /// Lays down the fog background for every cell.
    pub fn paint_fog(&mut self, fog: &FogMask) {
        for cell in self.cell_points() {
            let centre = self.centre(cell);
            let glyph = if !fog.reveals(centre) {
                HIDDEN
            } else if fog.is_dimmed(centre) {
                DIMMED
            } else {
                CLEAR
            };
            self.put(cell, glyph);
        }
    }

    pub fn paint_overlay(&mut self, overlay: &LightOverlay, glyph: char) {
        if overlay.is_empty() {
            return;
        }
        self.set_brush(glyph);
        self.fill_region(overlay.coverage());
    }

    /// Draws a whole frame: fog, overlays, templates, then tokens on top.
    pub fn paint_frame<I>(&mut self, frame: &FrameOutput, tokens: I)
    where
        I: IntoIterator<Item = CellPoint>,
    {
        let composition = &frame.composition;
        self.paint_fog(&composition.fog);
        self.paint_overlay(&composition.light, LIGHT);
        self.paint_overlay(&composition.darkness, DARKNESS);

        self.set_brush(TEMPLATE);
        for template in &frame.templates {
            self.fill_region(&template.area);
            for segment in template.border.iter() {
                self.stroke_segment(segment);
            }
        }

        for cell in tokens {
            let centre = self.centre(cell);
            if frame.view.is_gm() || composition.fog.reveals(centre) {
                self.put(cell, TOKEN);
            }
        }
    }

    fn cell_points(&self) -> impl Iterator<Item = CellPoint> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| CellPoint::new(x, y)))
    }

    fn centre(&self, cell: CellPoint) -> Point {
        let g = f64::from(self.cell_size);
        Point::new(
            f64::from(cell.x) * g + g / 2.0,
            f64::from(cell.y) * g + g / 2.0,
        )
    }

    fn index(&self, cell: CellPoint) -> Option<usize> {
        let inside = (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y);
        inside.then(|| (cell.y * self.width + cell.x) as usize)
    }
}

impl Painter for AsciiCanvas {
    fn fill_region(&mut self, region: &Region) {
        if region.is_empty() {
            return;
        }
        let brush = self.brush;
        let cells: Vec<CellPoint> = self
            .cell_points()
            .filter(|cell| region.contains(self.centre(*cell)))
            .collect();
        for cell in cells {
            self.put(cell, brush);
        }
    }

    fn stroke_segment(&mut self, _segment: &BorderSegment) {
        self.strokes += 1;
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1) as usize) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

/// Short multi-line report of what a frame contains.
pub fn summary(frame: &FrameOutput) -> String {
    let fog = &frame.composition.fog;
    let role = match frame.view.role {
        ViewerRole::GameMaster => "game master".to_owned(),
        ViewerRole::Player => {
            let tokens: Vec<String> = frame.view.tokens.iter().map(|t| t.to_string()).collect();
            format!("player [{}]", tokens.join(", "))
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "frame {} on zone {} as {}", frame.frame, frame.zone, role);
    if fog.enabled {
        let _ = writeln!(
            out,
            "fog: {:.0} exposed, {:.0} in sight, {:.0} remembered (opacity {:.2})",
            fog.exposed.area(),
            fog.clear.area(),
            fog.dimmed.area(),
            fog.opacity,
        );
    } else {
        let _ = writeln!(out, "fog: off");
    }
    let _ = writeln!(
        out,
        "lights: {} layers, darkness: {} layers",
        frame.composition.light.layers().len(),
        frame.composition.darkness.layers().len(),
    );
    let _ = writeln!(out, "templates: {}", frame.templates.len());
    for template in &frame.templates {
        let _ = writeln!(
            out,
            "  {} on {} layer: {:.0} area, {} border segments",
            template.id,
            template.layer,
            template.area.area(),
            template.border.len(),
        );
    }
    let stats = frame.stats;
    let _ = write!(
        out,
        "rebuilt: {} templates, fog {}, overlays {}",
        stats.templates_rebuilt, stats.fog_rebuilt, stats.overlays_rebuilt,
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_core::Rect;

    #[test]
    fn fill_marks_cells_by_centre() {
        let mut canvas = AsciiCanvas::new(10, 3, 2);
        canvas.fill_region(&Region::from_rect(Rect::new(0, 0, 14, 10)));
        assert_eq!(canvas.glyph(CellPoint::new(0, 0)), Some(TEMPLATE));
        // centre (15, 5) is outside
        assert_eq!(canvas.glyph(CellPoint::new(1, 0)), Some(HIDDEN));
        assert_eq!(canvas.glyph(CellPoint::new(5, 5)), None);
    }

    #[test]
    fn fog_background_uses_the_legend() {
        let fog = FogMask {
            exposed: Region::from_rect(Rect::new(0, 0, 20, 20)),
            dimmed: Region::from_rect(Rect::new(10, 0, 10, 10)),
            enabled: true,
            ..FogMask::default()
        };
        let mut canvas = AsciiCanvas::new(10, 3, 2);
        canvas.paint_fog(&fog);
        assert_eq!(canvas.glyph(CellPoint::new(0, 0)), Some(CLEAR));
        assert_eq!(canvas.glyph(CellPoint::new(1, 0)), Some(DIMMED));
        assert_eq!(canvas.glyph(CellPoint::new(2, 0)), Some(HIDDEN));
        assert_eq!(canvas.to_string(), ".:\n..\n");
    }

    #[test]
    fn disabled_fog_reveals_everything() {
        let mut canvas = AsciiCanvas::new(10, 2, 1);
        canvas.paint_fog(&FogMask::default());
        canvas.put(CellPoint::new(1, 0), TOKEN);
        assert_eq!(canvas.to_string(), ".@\n");
    }
}
