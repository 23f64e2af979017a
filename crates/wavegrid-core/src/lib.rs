//! Core types for the wavegrid lattice animation.
//!
//! Everything here is plain data shared between the engine, the
//! configuration loader and the terminal front end.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Drawing area measured in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport, treating negative or non-finite extents as zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    /// Viewport covering a terminal of `cols` x `rows` cells.
    pub fn from_cells(cols: u16, rows: u16, cell: CellSize) -> Self {
        Self::new(
            cols as f32 * cell.width_px,
            rows as f32 * cell.height_px,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Last known pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    /// Sentinel far outside any viewport, so no point starts influenced.
    pub const OFFSCREEN: Pointer = Pointer {
        x: -1000.0,
        y: -1000.0,
    };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Center of the terminal cell at (`col`, `row`).
    pub fn from_cell(col: u16, row: u16, cell: CellSize) -> Self {
        Self {
            x: (col as f32 + 0.5) * cell.width_px,
            y: (row as f32 + 0.5) * cell.height_px,
        }
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::OFFSCREEN
    }
}

/// Opaque 24-bit color, written as `#rrggbb` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Error returned when a color string is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError(String);

impl fmt::Display for ParseRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}, expected #rrggbb", self.0)
    }
}

impl std::error::Error for ParseRgbError {}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Lattice spacing, oscillation and pointer-response tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Horizontal distance between columns.
    pub x_gap: f32,
    /// Vertical distance between rows.
    pub y_gap: f32,
    /// Peak horizontal oscillation.
    pub amplitude_x: f32,
    /// Peak vertical oscillation.
    pub amplitude_y: f32,
    /// Multiplier turning milliseconds into phase.
    pub time_scale: f64,
    /// Phase advance per column and per row.
    pub phase_step: f64,
    /// Overall phase multiplier.
    pub phase_scale: f64,
    /// Pointer influence radius.
    pub repulsion_radius: f32,
    /// Horizontal push at full force.
    pub push_x: f32,
    /// Vertical push at full force.
    pub push_y: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            x_gap: 25.0,
            y_gap: 40.0,
            amplitude_x: 20.0,
            amplitude_y: 10.0,
            time_scale: 0.001,
            phase_step: 0.3,
            phase_scale: 0.8,
            repulsion_radius: 200.0,
            push_x: 80.0,
            push_y: 40.0,
        }
    }
}

/// Stroke and glow styling for lattice segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub color: Rgb,
    /// Color the strokes are composited over.
    pub background: Rgb,
    pub base_opacity: f32,
    pub max_opacity: f32,
    /// Blur radius at full force.
    pub glow_blur: f32,
    pub glow_opacity: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: Rgb::new(0, 157, 255),
            background: Rgb::new(5, 8, 16),
            base_opacity: 0.15,
            max_opacity: 0.6,
            glow_blur: 15.0,
            glow_opacity: 0.2,
        }
    }
}

/// Timing for the frame loop and the resize debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleParams {
    pub resize_debounce_ms: u64,
    /// Target interval between rendered frames.
    pub frame_interval_ms: u64,
}

impl Default for LifecycleParams {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 150,
            frame_interval_ms: 16,
        }
    }
}

/// Size of one terminal cell in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSize {
    pub width_px: f32,
    pub height_px: f32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width_px: 8.0,
            height_px: 16.0,
        }
    }
}

/// Animation speed multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Factor applied to elapsed time before it reaches the field.
    pub fn time_multiplier(self) -> f64 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}
