//! Wave lattice animation engine.
//!
//! A lattice of points spanning the viewport oscillates over time and is
//! pulled toward the pointer. Each frame the lattice is simulated, then
//! drawn as vertical strokes onto a [`Surface`]. The [`WaveController`]
//! ties this to a frame scheduler, visibility and debounced resizes.
//! A horizontal [`Marquee`] strip shares the same frame clock.

pub mod canvas;
pub mod color;
pub mod controller;
pub mod field;
pub mod grid;
pub mod marquee;
pub mod render;
pub mod schedule;

pub use canvas::TerminalSurface;
pub use color::Rgba;
pub use controller::{ControllerStats, LifecycleState, WaveController};
pub use grid::{Grid, GridPoint};
pub use marquee::Marquee;
pub use render::{Glow, RecordingSurface, Segment, Surface};
pub use schedule::{Debouncer, FrameScheduler, FrameToken, ManualClock, MonotonicClock, TickSource};
