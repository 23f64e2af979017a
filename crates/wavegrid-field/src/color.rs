//! Color utility functions for lattice strokes.

use ratatui::style::Color;
use wavegrid_core::Rgb;

/// A color with straight (non-premultiplied) alpha in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn new(rgb: Rgb, alpha: f32) -> Self {
        Self {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            a: alpha.clamp(0.0, 1.0),
        }
    }

    /// Composite over an opaque background.
    pub fn over(&self, background: Rgb) -> Rgb {
        Rgb::new(
            mix(background.r, self.r, self.a),
            mix(background.g, self.g, self.a),
            mix(background.b, self.b, self.a),
        )
    }
}

/// Convert to a terminal color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Linear interpolation between two channel values.
fn mix(from: u8, to: u8, t: f32) -> u8 {
    let v = from as f32 + (to as f32 - from as f32) * t.clamp(0.0, 1.0);
    v.round().clamp(0.0, 255.0) as u8
}

/// Brighten a color toward white by `amount` (0.0-1.0).
pub fn lighten(rgb: Rgb, amount: f32) -> Rgb {
    Rgb::new(
        mix(rgb.r, 255, amount),
        mix(rgb.g, 255, amount),
        mix(rgb.b, 255, amount),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_compositing() {
        let black = Rgb::new(0, 0, 0);
        let blue = Rgb::new(0, 157, 255);

        assert_eq!(Rgba::new(blue, 1.0).over(black), blue);
        assert_eq!(Rgba::new(blue, 0.0).over(black), black);
        assert_eq!(Rgba::new(blue, 0.5).over(black), Rgb::new(0, 79, 128));
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Rgba::new(Rgb::new(1, 2, 3), 3.0).a, 1.0);
        assert_eq!(Rgba::new(Rgb::new(1, 2, 3), -1.0).a, 0.0);
    }

    #[test]
    fn test_lighten() {
        let c = Rgb::new(0, 100, 200);
        assert_eq!(lighten(c, 0.0), c);
        assert_eq!(lighten(c, 1.0), Rgb::new(255, 255, 255));
    }
}
