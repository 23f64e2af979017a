//! Infinite horizontal marquee.
//!
//! The strip renders its item sequence twice side by side and scrolls
//! left; once it has moved by one full sequence it jumps back, which is
//! invisible because the second copy is in the same place.

/// Scrolling strip state.
#[derive(Debug, Clone, PartialEq)]
pub struct Marquee {
    /// Current translation, in `(-sequence_width, 0]` while scrolling.
    offset: f32,
    /// Width of one copy of the item sequence.
    sequence_width: f32,
    /// Scroll speed in units per second.
    speed: f32,
    hovered: bool,
    dragging: bool,
}

impl Marquee {
    pub fn new(sequence_width: f32, speed: f32) -> Self {
        Self {
            offset: 0.0,
            sequence_width: sequence_width.max(0.0),
            speed,
            hovered: false,
            dragging: false,
        }
    }

    pub fn sequence_width(&self) -> f32 {
        self.sequence_width
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Scroll by `delta_ms` worth of time unless paused.
    pub fn advance(&mut self, delta_ms: f64) -> f32 {
        if self.sequence_width <= 0.0 || self.is_paused() {
            return self.offset;
        }

        let move_by = (self.speed as f64 * delta_ms / 1000.0) as f32;
        let mut next = self.offset - move_by;
        if next <= -self.sequence_width {
            next += self.sequence_width;
        }
        // A long stall can move more than one sequence at once.
        self.offset = self.wrapped(next);
        self.offset
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Move the strip by a pointer drag of `dx`.
    pub fn drag_by(&mut self, dx: f32) {
        if !self.dragging || self.sequence_width <= 0.0 {
            return;
        }
        self.offset = self.wrapped(self.offset + dx);
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_paused(&self) -> bool {
        self.hovered || self.dragging
    }

    /// Map any offset into `(-sequence_width, 0]`.
    fn wrapped(&self, offset: f32) -> f32 {
        if self.sequence_width <= 0.0 {
            return 0.0;
        }
        let r = offset.rem_euclid(self.sequence_width);
        if r == 0.0 { 0.0 } else { r - self.sequence_width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scrolls_left() {
        let mut m = Marquee::new(400.0, 40.0);
        assert_eq!(m.advance(1000.0), -40.0);
        assert_eq!(m.advance(500.0), -60.0);
    }

    #[test]
    fn test_advance_wraps_by_one_sequence() {
        let mut m = Marquee::new(100.0, 40.0);
        m.advance(2000.0);
        assert_eq!(m.offset(), -80.0);
        m.advance(500.0);
        // -100 wraps back to 0.
        assert_eq!(m.offset(), 0.0);
        m.advance(1000.0);
        assert_eq!(m.offset(), -40.0);
        assert!(m.offset() > -m.sequence_width());
    }

    #[test]
    fn test_unmeasured_strip_stays_put() {
        let mut m = Marquee::new(0.0, 40.0);
        assert_eq!(m.advance(1000.0), 0.0);
    }

    #[test]
    fn test_hover_and_drag_pause() {
        let mut m = Marquee::new(400.0, 40.0);
        m.set_hovered(true);
        assert_eq!(m.advance(1000.0), 0.0);
        m.set_hovered(false);

        m.begin_drag();
        assert!(m.is_paused());
        assert_eq!(m.advance(1000.0), 0.0);
        m.drag_by(-30.0);
        assert_eq!(m.offset(), -30.0);
        m.drag_by(50.0);
        // Dragging right past the start wraps into range.
        assert_eq!(m.offset(), -380.0);
        m.end_drag();

        assert_eq!(m.advance(1000.0), -420.0 + 400.0);
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut m = Marquee::new(400.0, 40.0);
        m.drag_by(-100.0);
        assert_eq!(m.offset(), 0.0);
    }
}
