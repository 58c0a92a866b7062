//! Blocked-cell derivation from obstacle positions.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::{PlanError, Result};
use crate::grid::GridModel;
use crate::models::Coordinate;

/// Set of blocked grid cells derived from the current obstacle snapshot.
#[derive(Clone, Debug)]
pub struct CollisionMap {
    grid: GridModel,
    radius: f64,
    blocked: HashSet<Coordinate>,
}

impl CollisionMap {
    /// Empty map over `grid`; nothing is blocked until [`rebuild`](Self::rebuild).
    pub fn new(grid: GridModel, radius: f64) -> Result<Self> {
        check_radius(radius)?;
        Ok(Self { grid, radius, blocked: HashSet::new() })
    }

    pub fn grid(&self) -> &GridModel { &self.grid }
    pub fn radius(&self) -> f64 { self.radius }

    /// Recomputes the blocked set: a cell is blocked when it lies strictly
    /// closer than `radius` to some obstacle.
    pub fn rebuild(&mut self, obstacles: &[Coordinate], radius: f64) -> Result<()> {
        self.rebuild_with_walls(obstacles, radius, &[])
    }

    /// Like [`rebuild`](Self::rebuild), additionally blocking each wall that
    /// is a grid cell. Walls off the lattice are ignored.
    pub fn rebuild_with_walls(&mut self, obstacles: &[Coordinate], radius: f64, walls: &[Coordinate]) -> Result<()> {
        check_radius(radius)?;
        let mut blocked = HashSet::new();
        for cell in self.grid.cells() {
            if obstacles.iter().any(|&o| cell.distance(o) < radius) {
                blocked.insert(cell);
            }
        }
        blocked.extend(walls.iter().copied().filter(|&w| self.grid.contains(w)));
        debug!(obstacles = obstacles.len(), walls = walls.len(), blocked = blocked.len(), radius, "collision map rebuilt");
        self.radius = radius;
        self.blocked = blocked;
        Ok(())
    }

    /// Off-grid coordinates always collide.
    pub fn is_blocked(&self, c: Coordinate) -> bool {
        !self.grid.contains(c) || self.blocked.contains(&c)
    }

    pub fn blocked_len(&self) -> usize { self.blocked.len() }

    /// Blocked cells sorted by `(x, y)`.
    pub fn blocked_cells(&self) -> Vec<Coordinate> {
        let mut out: Vec<Coordinate> = self.blocked.iter().copied().collect();
        out.sort_unstable();
        out
    }
}

pub(crate) fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(PlanError::config(format!("exclusion radius must be a non-negative number, got {}", radius)))
    }
}
