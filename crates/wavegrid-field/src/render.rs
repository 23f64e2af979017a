//! Drawing the lattice as vertical strokes.

use wavegrid_core::{RenderStyle, Viewport};

use crate::color::Rgba;
use crate::grid::Grid;

/// Blur halo drawn behind a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Blur radius, 0 when neither endpoint is influenced.
    pub blur: f32,
    pub color: Rgba,
}

/// One stroke between two displaced points of the same column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub color: Rgba,
    pub glow: Glow,
    /// Larger force of the two endpoints.
    pub force: f32,
}

/// A 2-D drawing target sized to the viewport.
pub trait Surface {
    /// Drop the previous frame and size the surface to `viewport`.
    fn clear(&mut self, viewport: Viewport);

    fn stroke(&mut self, segment: Segment);
}

/// Stroke opacity for a segment whose strongest endpoint has `force`.
pub fn segment_opacity(force: f32, style: &RenderStyle) -> f32 {
    style.base_opacity + force * (style.max_opacity - style.base_opacity)
}

/// Draw `grid` onto `surface`, returning the number of strokes.
///
/// Columns are drawn independently; there are no horizontal connections.
pub fn render<S: Surface + ?Sized>(grid: &Grid, style: &RenderStyle, surface: &mut S) -> usize {
    surface.clear(grid.viewport());

    let glow_color = Rgba::new(style.color, style.glow_opacity);
    let mut strokes = 0;

    for column in grid.columns() {
        for pair in column.windows(2) {
            let (p1, p2) = (&pair[0], &pair[1]);
            let force = p1.force.max(p2.force);

            surface.stroke(Segment {
                from: p1.displaced(),
                to: p2.displaced(),
                color: Rgba::new(style.color, segment_opacity(force, style)),
                glow: Glow {
                    blur: style.glow_blur * force,
                    color: glow_color,
                },
                force,
            });
            strokes += 1;
        }
    }

    strokes
}

/// Headless surface that keeps every stroke of the last frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub viewport: Viewport,
    pub segments: Vec<Segment>,
    /// Number of times the surface was cleared.
    pub frames: u64,
}

impl Surface for RecordingSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.segments.clear();
        self.frames += 1;
    }

    fn stroke(&mut self, segment: Segment) {
        self.segments.push(segment);
    }
}
