//! Field discretisation.
//!
//! Usable cells are the pitch multiples `pitch <= x < width`,
//! `pitch <= y < height`; a one-pitch margin along the low edges is never
//! part of the lattice.

use crate::errors::{PlanError, Result};
use crate::models::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridModel {
    width: i32,
    height: i32,
    pitch: i32,
}

impl GridModel {
    pub fn new(width: i32, height: i32, pitch: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(PlanError::config(format!("field dimensions must be positive, got {}x{}", width, height)));
        }
        if pitch <= 0 {
            return Err(PlanError::config(format!("pitch must be positive, got {}", pitch)));
        }
        if pitch >= width || pitch >= height {
            return Err(PlanError::config(format!("pitch {} leaves no usable cell in a {}x{} field", pitch, width, height)));
        }
        Ok(Self { width, height, pitch })
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }
    pub fn pitch(&self) -> i32 { self.pitch }

    /// Largest usable x.
    fn max_x(&self) -> i32 { (self.width - 1) / self.pitch * self.pitch }
    /// Largest usable y.
    fn max_y(&self) -> i32 { (self.height - 1) / self.pitch * self.pitch }

    /// True for pitch-aligned coordinates inside the usable interior.
    pub fn contains(&self, c: Coordinate) -> bool {
        c.x >= self.pitch
            && c.x < self.width
            && c.y >= self.pitch
            && c.y < self.height
            && c.x % self.pitch == 0
            && c.y % self.pitch == 0
    }

    /// Usable cells in column-major order (x outer, y inner).
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let p = self.pitch as usize;
        (self.pitch..self.width).step_by(p).flat_map(move |x| {
            (self.pitch..self.height).step_by(p).map(move |y| Coordinate::new(x, y))
        })
    }

    pub fn cell_count(&self) -> usize {
        (self.max_x() / self.pitch) as usize * (self.max_y() / self.pitch) as usize
    }

    /// The up to four usable cells bracketing `point`, clamped into the
    /// interior and deduplicated.
    pub fn bracketing_cells(&self, point: Coordinate) -> Vec<Coordinate> {
        let pitch = i64::from(self.pitch);
        let bx = i64::from(point.x).div_euclid(pitch) * pitch;
        let by = i64::from(point.y).div_euclid(pitch) * pitch;
        // Clamped in i64 so points near the ends of the i32 range still land
        // on a usable cell.
        let narrow = |v: i64, max: i32| v.clamp(pitch, i64::from(max)) as i32;
        let mut out = Vec::with_capacity(4);
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let c = Coordinate::new(
                narrow(bx + dx * pitch, self.max_x()),
                narrow(by + dy * pitch, self.max_y()),
            );
            if !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    /// Anchors `point` to the bracketing cell that minimises the distance to
    /// `point` plus the distance on to `other`. Exact ties go to the smallest
    /// `(x, y)`.
    pub fn snap_to_grid(&self, point: Coordinate, other: Coordinate) -> Coordinate {
        let mut best: Option<(f64, Coordinate)> = None;
        for c in self.bracketing_cells(point) {
            let score = c.distance(point) + c.distance(other);
            let better = match best {
                None => true,
                Some((s, b)) => score < s || (score == s && c < b),
            };
            if better {
                best = Some((score, c));
            }
        }
        // bracketing_cells never returns an empty set for a valid grid
        best.map(|(_, c)| c).unwrap_or(Coordinate::new(self.pitch, self.pitch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> GridModel { GridModel::new(900, 600, 50).unwrap() }
    fn c(x: i32, y: i32) -> Coordinate { Coordinate::new(x, y) }

    #[test]
    fn rejects_invalid_geometry() {
        assert!(matches!(GridModel::new(900, 600, 0), Err(PlanError::InvalidConfiguration(_))));
        assert!(matches!(GridModel::new(0, 600, 50), Err(PlanError::InvalidConfiguration(_))));
        assert!(matches!(GridModel::new(900, -5, 50), Err(PlanError::InvalidConfiguration(_))));
        assert!(matches!(GridModel::new(40, 600, 50), Err(PlanError::InvalidConfiguration(_))));
    }

    #[test]
    fn interior_excludes_margin_and_far_edge() {
        let g = field();
        assert!(g.contains(c(50, 50)));
        assert!(g.contains(c(850, 550)));
        assert!(!g.contains(c(0, 50)));
        assert!(!g.contains(c(900, 300)));
        assert!(!g.contains(c(450, 600)));
        assert!(!g.contains(c(460, 300)));
    }

    #[test]
    fn cells_enumerate_the_lattice() {
        let g = field();
        let cells: Vec<_> = g.cells().collect();
        assert_eq!(cells.len(), 17 * 11);
        assert_eq!(cells.len(), g.cell_count());
        assert_eq!(cells[0], c(50, 50));
        assert_eq!(cells[1], c(50, 100));
        assert_eq!(*cells.last().unwrap(), c(850, 550));
        assert!(cells.iter().all(|&x| g.contains(x)));
    }

    #[test]
    fn snapping_clamps_to_interior() {
        let g = field();
        assert_eq!(g.bracketing_cells(c(0, 0)), vec![c(50, 50)]);
        assert_eq!(g.snap_to_grid(c(0, 0), c(900, 600)), c(50, 50));
        assert_eq!(g.snap_to_grid(c(900, 600), c(0, 0)), c(850, 550));
    }

    #[test]
    fn bracketing_handles_extreme_coordinates() {
        let g = field();
        assert_eq!(g.bracketing_cells(c(i32::MAX, 300)), vec![c(850, 300), c(850, 350)]);
        assert_eq!(g.bracketing_cells(c(i32::MIN, 300)), vec![c(50, 300), c(50, 350)]);
        assert_eq!(g.bracketing_cells(c(i32::MIN, i32::MAX)), vec![c(50, 550)]);
        assert_eq!(g.snap_to_grid(c(i32::MAX, 300), c(100, 100)), c(850, 300));
        assert_eq!(g.snap_to_grid(c(i32::MIN, 300), c(100, 100)), c(50, 300));
    }

    #[test]
    fn snapping_prefers_the_cell_toward_the_other_anchor() {
        let g = field();
        // (120,120) is closest to (100,100) but the route continues east.
        let near = g.snap_to_grid(c(120, 120), c(120, 120));
        assert_eq!(near, c(100, 100));
        let toward_east = g.snap_to_grid(c(124, 110), c(800, 110));
        assert_eq!(toward_east, c(150, 100));
    }

    #[test]
    fn exact_ties_pick_the_smallest_coordinate() {
        let g = field();
        // Centre of a cell with the other anchor on top of it: all four tie.
        assert_eq!(g.snap_to_grid(c(125, 125), c(125, 125)), c(100, 100));
    }
}
