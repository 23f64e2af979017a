//! Terminal drawing surface backed by a ratatui braille canvas.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line},
    },
};
use wavegrid_core::{Rgb, Viewport};

use crate::color::{lighten, to_color};
use crate::render::{Segment, Surface};

/// Collects one frame of strokes and paints them as a widget.
///
/// Colors are composited over `background` because terminal cells have no
/// alpha channel. Glow becomes a pair of fainter strokes either side of
/// the line whose spread grows with the blur radius.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    viewport: Viewport,
    background: Rgb,
    /// Blur radius mapped to the widest halo.
    max_blur: f32,
    /// Halo spread at `max_blur`, in virtual pixels.
    max_spread: f32,
    lines: Vec<Line>,
    halos: Vec<Line>,
}

impl TerminalSurface {
    pub fn new(background: Rgb, max_blur: f32, max_spread: f32) -> Self {
        Self {
            viewport: Viewport::default(),
            background,
            max_blur,
            max_spread,
            lines: Vec::new(),
            halos: Vec::new(),
        }
    }

    pub fn stroke_count(&self) -> usize {
        self.lines.len()
    }

    pub fn halo_count(&self) -> usize {
        self.halos.len()
    }

    /// Flip from top-left origin to the canvas's bottom-left origin.
    fn line(&self, from: (f32, f32), to: (f32, f32), color: Color) -> Line {
        let h = self.viewport.height as f64;
        Line::new(
            from.0 as f64,
            h - from.1 as f64,
            to.0 as f64,
            h - to.1 as f64,
            color,
        )
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.lines.clear();
        self.halos.clear();
    }

    fn stroke(&mut self, segment: Segment) {
        if segment.glow.blur > 0.0 && self.max_blur > 0.0 {
            let strength = (segment.glow.blur / self.max_blur).min(1.0);
            let spread = self.max_spread * strength;
            let halo = lighten(segment.glow.color.over(self.background), strength * 0.25);
            let color = to_color(halo);
            for dx in [-spread, spread] {
                let from = (segment.from.0 + dx, segment.from.1);
                let to = (segment.to.0 + dx, segment.to.1);
                self.halos.push(self.line(from, to, color));
            }
        }

        let color = to_color(segment.color.over(self.background));
        self.lines.push(self.line(segment.from, segment.to, color));
    }
}

impl Widget for &TerminalSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.viewport.is_empty() {
            return;
        }
        Canvas::default()
            .marker(Marker::Braille)
            .background_color(to_color(self.background))
            .x_bounds([0.0, self.viewport.width as f64])
            .y_bounds([0.0, self.viewport.height as f64])
            .paint(|ctx| {
                for halo in &self.halos {
                    ctx.draw(halo);
                }
                ctx.layer();
                for line in &self.lines {
                    ctx.draw(line);
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;
    use crate::grid::Grid;
    use crate::render::render;
    use wavegrid_core::{FieldParams, Pointer, RenderStyle};

    fn surface_for(pointer: Pointer) -> TerminalSurface {
        let style = RenderStyle::default();
        let mut grid = Grid::build(Viewport::new(160.0, 160.0), 25.0, 40.0);
        field::update(&mut grid, 0.0, pointer, &FieldParams::default());
        let mut surface = TerminalSurface::new(style.background, style.glow_blur, 8.0);
        render(&grid, &style, &mut surface);
        surface
    }

    #[test]
    fn test_halos_only_for_influenced_strokes() {
        let calm = surface_for(Pointer::OFFSCREEN);
        assert_eq!(calm.stroke_count(), 8 * 4);
        assert_eq!(calm.halo_count(), 0);

        let excited = surface_for(Pointer::new(80.0, 80.0));
        assert!(excited.halo_count() > 0);
        assert_eq!(excited.halo_count() % 2, 0);
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let mut surface = TerminalSurface::new(Rgb::new(0, 0, 0), 15.0, 8.0);
        surface.clear(Viewport::new(100.0, 50.0));
        let line = surface.line((0.0, 0.0), (10.0, 50.0), Color::White);
        assert_eq!((line.y1, line.y2), (50.0, 0.0));
    }

    #[test]
    fn test_widget_paints_into_buffer() {
        let surface = surface_for(Pointer::new(80.0, 80.0));
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        (&surface).render(area, &mut buf);
        let painted = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .count();
        assert!(painted > 0);
    }
}
