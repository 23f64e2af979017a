//! Per-tick displacement of lattice points.
//!
//! Every point moves by a time-varying oscillation plus a pull toward the
//! pointer when it is inside the influence radius. Both terms depend only
//! on their inputs, so identical time and pointer give identical offsets.

use wavegrid_core::{FieldParams, Pointer};

use crate::grid::Grid;

/// Pointer influence on a single point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Proximity {
    /// Influence (0.0 - 1.0), 0 outside the radius.
    pub force: f32,
    pub push_x: f32,
    pub push_y: f32,
}

/// Oscillation offset for the point at (`column`, `row`) at time `t_ms`.
pub fn oscillation(t_ms: f64, column: usize, row: usize, params: &FieldParams) -> (f32, f32) {
    let angle = (t_ms * params.time_scale + column as f64 * params.phase_step) * params.phase_scale;
    let dx = (angle + row as f64 * params.phase_step).sin() as f32 * params.amplitude_x;
    let dy = (angle + column as f64 * params.phase_step).cos() as f32 * params.amplitude_y;
    (dx, dy)
}

/// Pull toward `pointer` for a point whose base position is (`x`, `y`).
pub fn proximity(x: f32, y: f32, pointer: Pointer, params: &FieldParams) -> Proximity {
    let dx = pointer.x - x;
    let dy = pointer.y - y;
    let dist = (dx * dx + dy * dy).sqrt();
    let radius = params.repulsion_radius;

    // Also rejects NaN distances and a zero radius.
    if !(dist < radius) {
        return Proximity::default();
    }

    let force = 1.0 - dist / radius;
    // Directly under the pointer there is no direction; use the full push.
    let (ux, uy) = if dist > 0.0 {
        (dx / dist, dy / dist)
    } else {
        (1.0, 1.0)
    };

    Proximity {
        force,
        push_x: ux * params.push_x * force,
        push_y: uy * params.push_y * force,
    }
}

/// Recompute every point's offset and force for time `t_ms`.
pub fn update(grid: &mut Grid, t_ms: f64, pointer: Pointer, params: &FieldParams) {
    for (ci, column) in grid.columns_mut().iter_mut().enumerate() {
        for (ri, p) in column.iter_mut().enumerate() {
            let (ox, oy) = oscillation(t_ms, ci, ri, params);
            let near = proximity(p.x, p.y, pointer, params);
            p.offset_x = ox + near.push_x;
            p.offset_y = oy + near.push_y;
            p.force = near.force;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavegrid_core::Viewport;

    fn grid() -> Grid {
        Grid::build(Viewport::new(800.0, 600.0), 25.0, 40.0)
    }

    #[test]
    fn test_no_force_at_or_beyond_radius() {
        let params = FieldParams::default();
        let at_edge = proximity(0.0, 0.0, Pointer::new(200.0, 0.0), &params);
        assert_eq!(at_edge, Proximity::default());

        let far = proximity(0.0, 0.0, Pointer::new(300.0, 400.0), &params);
        assert_eq!(far.force, 0.0);
        assert_eq!((far.push_x, far.push_y), (0.0, 0.0));
    }

    #[test]
    fn test_full_force_under_pointer() {
        let params = FieldParams::default();
        let near = proximity(50.0, 80.0, Pointer::new(50.0, 80.0), &params);
        assert_eq!(near.force, 1.0);
        assert_eq!((near.push_x, near.push_y), (80.0, 40.0));
    }

    #[test]
    fn test_push_points_toward_pointer() {
        let params = FieldParams::default();
        // Pointer 100 to the right: half force, pure horizontal pull.
        let near = proximity(0.0, 0.0, Pointer::new(100.0, 0.0), &params);
        assert!((near.force - 0.5).abs() < 1e-6);
        assert!((near.push_x - 40.0).abs() < 1e-4);
        assert_eq!(near.push_y, 0.0);

        let above = proximity(0.0, 100.0, Pointer::new(0.0, 50.0), &params);
        assert!(above.push_y < 0.0);
    }

    #[test]
    fn test_radius_is_configurable() {
        let params = FieldParams {
            repulsion_radius: 50.0,
            push_x: 10.0,
            push_y: 5.0,
            ..Default::default()
        };
        assert_eq!(proximity(0.0, 0.0, Pointer::new(60.0, 0.0), &params).force, 0.0);
        let under = proximity(0.0, 0.0, Pointer::new(0.0, 0.0), &params);
        assert_eq!((under.push_x, under.push_y), (10.0, 5.0));
    }

    #[test]
    fn test_oscillation_is_a_phase_gradient() {
        let params = FieldParams::default();
        let (dx, dy) = oscillation(0.0, 0, 0, &params);
        assert_eq!(dx, 0.0);
        assert!((dy - 10.0).abs() < 1e-6);

        // Neighbouring columns are out of phase, not identical.
        let a = oscillation(1000.0, 3, 2, &params);
        let b = oscillation(1000.0, 4, 2, &params);
        assert_ne!(a, b);
        assert!(a.0.abs() <= 20.0 && a.1.abs() <= 10.0);
    }

    #[test]
    fn test_update_is_deterministic() {
        let params = FieldParams::default();
        let pointer = Pointer::new(410.0, 290.0);

        let mut first = grid();
        let mut second = grid();
        update(&mut first, 1234.5, pointer, &params);
        update(&mut second, 1234.5, pointer, &params);
        assert_eq!(first, second);

        // Running the same tick again over already displaced points is stable too.
        update(&mut first, 1234.5, pointer, &params);
        assert_eq!(first, second);
    }

    #[test]
    fn test_update_adds_both_terms() {
        let params = FieldParams::default();
        let mut g = grid();
        let pointer = Pointer::new(100.0, 80.0);
        update(&mut g, 500.0, pointer, &params);

        // Column 4 row 2 sits exactly under the pointer.
        let p = g.columns()[4][2];
        let (ox, oy) = oscillation(500.0, 4, 2, &params);
        assert_eq!(p.force, 1.0);
        assert!((p.offset_x - (ox + 80.0)).abs() < 1e-4);
        assert!((p.offset_y - (oy + 40.0)).abs() < 1e-4);

        // A far point only oscillates.
        let far = g.columns()[30][14];
        let (fx, fy) = oscillation(500.0, 30, 14, &params);
        assert_eq!(far.force, 0.0);
        assert_eq!((far.offset_x, far.offset_y), (fx, fy));
    }

    #[test]
    fn test_offscreen_pointer_influences_nothing() {
        let params = FieldParams::default();
        let mut g = grid();
        update(&mut g, 0.0, Pointer::OFFSCREEN, &params);
        assert!(g.columns().iter().flatten().all(|p| p.force == 0.0));
    }
}
