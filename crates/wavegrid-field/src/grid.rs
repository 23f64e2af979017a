//! Lattice of points spanning the viewport.

use wavegrid_core::Viewport;

/// A lattice point with its fixed base position and per-tick state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// Base x position.
    pub x: f32,
    /// Base y position.
    pub y: f32,
    /// Current horizontal displacement.
    pub offset_x: f32,
    /// Current vertical displacement.
    pub offset_y: f32,
    /// Pointer influence (0.0 - 1.0).
    pub force: f32,
}

impl GridPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            offset_x: 0.0,
            offset_y: 0.0,
            force: 0.0,
        }
    }

    /// Position after displacement.
    pub fn displaced(&self) -> (f32, f32) {
        (self.x + self.offset_x, self.y + self.offset_y)
    }
}

/// Columns of points covering the viewport plus one gap of overflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    columns: Vec<Vec<GridPoint>>,
    viewport: Viewport,
}

impl Grid {
    /// Build a lattice for `viewport`.
    ///
    /// Columns sit at every multiple of `x_gap` below `width + x_gap` and
    /// rows at every multiple of `y_gap` below `height + y_gap`, so the
    /// right and bottom edges stay covered once points are displaced.
    /// A gap that is not a positive finite number produces an empty grid.
    pub fn build(viewport: Viewport, x_gap: f32, y_gap: f32) -> Self {
        let cols = steps(viewport.width, x_gap);
        let rows = steps(viewport.height, y_gap);
        if cols == 0 || rows == 0 {
            return Self {
                columns: Vec::new(),
                viewport,
            };
        }

        let columns = (0..cols)
            .map(|c| {
                let x = c as f32 * x_gap;
                (0..rows)
                    .map(|r| GridPoint::new(x, r as f32 * y_gap))
                    .collect()
            })
            .collect();

        Self { columns, viewport }
    }

    pub fn columns(&self) -> &[Vec<GridPoint>] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Vec<GridPoint>] {
        &mut self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Points per column.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn point_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Number of multiples of `gap` strictly below `extent + gap`.
fn steps(extent: f32, gap: f32) -> usize {
    if !gap.is_finite() || gap <= 0.0 {
        return 0;
    }
    ((extent.max(0.0) + gap) / gap).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions_cover_overflow() {
        let grid = Grid::build(Viewport::new(800.0, 600.0), 25.0, 40.0);
        assert_eq!(grid.column_count(), (825.0f32 / 25.0).ceil() as usize);
        assert_eq!(grid.column_count(), 33);
        assert_eq!(grid.row_count(), (640.0f32 / 40.0).ceil() as usize);
        assert_eq!(grid.row_count(), 16);
        assert_eq!(grid.point_count(), 33 * 16);

        let last_col = grid.columns().last().unwrap();
        assert_eq!(last_col[0].x, 800.0);
        assert_eq!(last_col.last().unwrap().y, 600.0);
    }

    #[test]
    fn test_grid_partial_gap_rounds_up() {
        let grid = Grid::build(Viewport::new(810.0, 610.0), 25.0, 40.0);
        assert_eq!(grid.column_count(), 34);
        assert_eq!(grid.row_count(), 17);
        // Last column is still below width + gap.
        assert!(grid.columns().last().unwrap()[0].x < 810.0 + 25.0);
    }

    #[test]
    fn test_grid_points_start_at_rest() {
        let grid = Grid::build(Viewport::new(100.0, 100.0), 25.0, 40.0);
        for col in grid.columns() {
            for p in col {
                assert_eq!(p.offset_x, 0.0);
                assert_eq!(p.offset_y, 0.0);
                assert_eq!(p.force, 0.0);
                assert_eq!(p.displaced(), (p.x, p.y));
            }
        }
    }

    #[test]
    fn test_grid_invalid_gap_is_empty() {
        assert!(Grid::build(Viewport::new(100.0, 100.0), 0.0, 40.0).is_empty());
        assert!(Grid::build(Viewport::new(100.0, 100.0), 25.0, f32::NAN).is_empty());
        assert_eq!(Grid::build(Viewport::new(100.0, 100.0), 25.0, -1.0).point_count(), 0);
    }

    #[test]
    fn test_grid_one_invalid_gap_has_no_columns() {
        for y_gap in [0.0, f32::NAN, f32::INFINITY] {
            let grid = Grid::build(Viewport::new(100.0, 100.0), 25.0, y_gap);
            assert!(grid.is_empty());
            assert_eq!(grid.column_count(), 0);
            assert_eq!(grid.row_count(), 0);
        }
        let grid = Grid::build(Viewport::new(100.0, 100.0), -5.0, 40.0);
        assert_eq!(grid.column_count(), 0);
    }

    #[test]
    fn test_grid_empty_viewport_keeps_one_gap() {
        let grid = Grid::build(Viewport::default(), 25.0, 40.0);
        assert_eq!(grid.column_count(), 1);
        assert_eq!(grid.row_count(), 1);
    }
}
