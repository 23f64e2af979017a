//! Lifecycle of one lattice animation instance.

use log::debug;
use wavegrid_core::{AnimationSpeed, FieldParams, LifecycleParams, Pointer, RenderStyle, Viewport};

use crate::field;
use crate::grid::Grid;
use crate::render::{self, Surface};
use crate::schedule::{Debouncer, FrameScheduler};

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Not visible; no frames are scheduled.
    Hidden,
    /// Visible; one frame is always scheduled.
    Animating,
    /// Torn down; every event is ignored.
    Disposed,
}

/// Counters for observing the controller from the outside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    pub ticks: u64,
    pub rebuilds: u64,
    pub pointer_updates: u64,
}

/// Owns the grid, pointer and frame loop of one animation.
#[derive(Debug)]
pub struct WaveController<S: Surface> {
    field: FieldParams,
    style: RenderStyle,
    speed: AnimationSpeed,
    grid: Grid,
    pointer: Pointer,
    /// Latest pointer move not yet seen by a frame.
    pending_pointer: Option<Pointer>,
    resize: Debouncer<Viewport>,
    scheduler: FrameScheduler,
    state: LifecycleState,
    surface: Option<S>,
    /// Accumulated animation time in milliseconds.
    anim_ms: f64,
    /// Clock reading of the previous frame while animating.
    last_frame_ms: Option<f64>,
    stats: ControllerStats,
}

impl<S: Surface> WaveController<S> {
    /// Create a hidden controller with a grid already built for `viewport`.
    pub fn new(
        viewport: Viewport,
        field: FieldParams,
        style: RenderStyle,
        lifecycle: LifecycleParams,
    ) -> Self {
        Self {
            grid: Grid::build(viewport, field.x_gap, field.y_gap),
            field,
            style,
            speed: AnimationSpeed::default(),
            pointer: Pointer::OFFSCREEN,
            pending_pointer: None,
            resize: Debouncer::new(lifecycle.resize_debounce_ms as f64),
            scheduler: FrameScheduler::new(),
            state: LifecycleState::Hidden,
            surface: None,
            anim_ms: 0.0,
            last_frame_ms: None,
            stats: ControllerStats::default(),
        }
    }

    /// Attach the drawing surface. Frames before this only simulate.
    pub fn attach_surface(&mut self, surface: S) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    /// React to the container entering or leaving view.
    pub fn set_visible(&mut self, visible: bool) {
        match (self.state, visible) {
            (LifecycleState::Hidden, true) => {
                self.state = LifecycleState::Animating;
                self.last_frame_ms = None;
                self.scheduler.request();
                debug!("wave animation visible, frames resumed");
            }
            (LifecycleState::Animating, false) => {
                self.state = LifecycleState::Hidden;
                self.scheduler.cancel();
                debug!("wave animation hidden, frames stopped");
            }
            _ => {}
        }
    }

    pub fn start(&mut self) {
        self.set_visible(true);
    }

    pub fn stop(&mut self) {
        self.set_visible(false);
    }

    /// Record a pointer move; it takes effect on the next frame.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        self.pending_pointer = Some(Pointer::new(x, y));
    }

    /// Record a viewport resize; the grid is rebuilt once resizes settle.
    pub fn on_resize(&mut self, viewport: Viewport, now_ms: f64) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        self.resize.trigger(now_ms, viewport);
    }

    /// Fire due timers. Returns true if the grid was rebuilt.
    pub fn poll_timers(&mut self, now_ms: f64) -> bool {
        if self.state == LifecycleState::Disposed {
            return false;
        }
        let Some(viewport) = self.resize.poll(now_ms) else {
            return false;
        };
        self.grid = Grid::build(viewport, self.field.x_gap, self.field.y_gap);
        self.stats.rebuilds += 1;
        debug!(
            "rebuilt wave grid for {}x{}: {} columns x {} rows",
            viewport.width,
            viewport.height,
            self.grid.column_count(),
            self.grid.row_count()
        );
        true
    }

    /// Run one tick if a frame is scheduled. Returns true if it ran.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        if self.state != LifecycleState::Animating || self.scheduler.take().is_none() {
            return false;
        }

        if let Some(pointer) = self.pending_pointer.take() {
            self.pointer = pointer;
            self.stats.pointer_updates += 1;
        }

        let delta = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_frame_ms = Some(now_ms);
        self.anim_ms += delta * self.speed.time_multiplier();

        field::update(&mut self.grid, self.anim_ms, self.pointer, &self.field);
        if let Some(surface) = self.surface.as_mut() {
            render::render(&self.grid, &self.style, surface);
        }

        self.stats.ticks += 1;
        self.scheduler.request();
        true
    }

    /// Release the surface and all pending work. Later events are ignored.
    pub fn dispose(&mut self) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        self.state = LifecycleState::Disposed;
        self.scheduler.cancel();
        self.resize.cancel();
        self.pending_pointer = None;
        self.surface = None;
        debug!("wave animation disposed");
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_frame_scheduled(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Total frames ever scheduled.
    pub fn frames_requested(&self) -> u64 {
        self.scheduler.requested()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn animation_time_ms(&self) -> f64 {
        self.anim_ms
    }

    pub fn stats(&self) -> ControllerStats {
        self.stats
    }
}

impl<S: Surface> Drop for WaveController<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
