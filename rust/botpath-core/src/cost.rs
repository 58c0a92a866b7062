use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::PlanError;
use crate::models::Coordinate;

/// Diagonal moves cost 1.4 pitches, kept in tenths so truncation is exact.
pub const DIAGONAL_TENTHS: i64 = 14;

fn diagonal_of(straight: i64) -> i64 {
    straight * DIAGONAL_TENTHS / 10
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Straight-line distance, truncated.
    #[default]
    Euclidean,
    Manhattan,
    /// Diagonal distance using the same 1.4 factor as the step costs.
    Octile,
    /// No estimate; the search degenerates to uniform-cost search.
    Dijkstra,
}

impl Heuristic {
    pub fn estimate(self, from: Coordinate, to: Coordinate) -> i64 {
        let dx = (i64::from(to.x) - i64::from(from.x)).abs();
        let dy = (i64::from(to.y) - i64::from(from.y)).abs();
        match self {
            Heuristic::Euclidean => {
                let (fx, fy) = (dx as f64, dy as f64);
                (fx * fx + fy * fy).sqrt() as i64
            }
            Heuristic::Manhattan => dx + dy,
            Heuristic::Octile => {
                let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
                diagonal_of(lo) + (hi - lo)
            }
            Heuristic::Dijkstra => 0,
        }
    }
}

impl FromStr for Heuristic {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Heuristic::Euclidean),
            "manhattan" => Ok(Heuristic::Manhattan),
            "octile" => Ok(Heuristic::Octile),
            "dijkstra" | "none" => Ok(Heuristic::Dijkstra),
            other => Err(PlanError::config(format!("unknown heuristic '{}'", other))),
        }
    }
}

/// Step costs for an 8-connected lattice of the given pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostModel {
    pub straight: i64,
    pub diagonal: i64,
    pub heuristic: Heuristic,
}

impl CostModel {
    pub fn new(pitch: i32, heuristic: Heuristic) -> Self {
        let straight = i64::from(pitch);
        Self { straight, diagonal: diagonal_of(straight), heuristic }
    }

    pub fn step_cost(&self, diagonal: bool) -> i64 {
        if diagonal { self.diagonal } else { self.straight }
    }

    pub fn heuristic(&self, current: Coordinate, goal: Coordinate) -> i64 {
        self.heuristic.estimate(current, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coordinate { Coordinate::new(x, y) }

    #[test]
    fn step_costs_scale_with_pitch() {
        let cm = CostModel::new(50, Heuristic::Euclidean);
        assert_eq!(cm.step_cost(false), 50);
        assert_eq!(cm.step_cost(true), 70);
        let cm = CostModel::new(10, Heuristic::Euclidean);
        assert_eq!(cm.step_cost(true), 14);
        let cm = CostModel::new(4, Heuristic::Euclidean);
        assert_eq!(cm.step_cost(true), 5);
    }

    #[test]
    fn euclidean_truncates() {
        assert_eq!(Heuristic::Euclidean.estimate(c(0, 0), c(50, 50)), 70);
        assert_eq!(Heuristic::Euclidean.estimate(c(0, 0), c(30, 40)), 50);
        assert_eq!(Heuristic::Euclidean.estimate(c(10, 10), c(10, 10)), 0);
    }

    #[test]
    fn estimates_span_the_full_coordinate_range() {
        let (lo, hi) = (c(i32::MIN, 0), c(i32::MAX, 0));
        assert_eq!(Heuristic::Manhattan.estimate(lo, hi), u32::MAX as i64);
        assert_eq!(Heuristic::Euclidean.estimate(hi, lo), u32::MAX as i64);
        assert_eq!(Heuristic::Octile.estimate(lo, hi), u32::MAX as i64);
    }

    #[test]
    fn alternative_heuristics() {
        assert_eq!(Heuristic::Manhattan.estimate(c(0, 0), c(100, -50)), 150);
        assert_eq!(Heuristic::Octile.estimate(c(0, 0), c(100, 50)), 120);
        assert_eq!(Heuristic::Dijkstra.estimate(c(0, 0), c(800, 500)), 0);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Octile".parse::<Heuristic>().unwrap(), Heuristic::Octile);
        assert_eq!(" euclidean ".parse::<Heuristic>().unwrap(), Heuristic::Euclidean);
        assert_eq!("none".parse::<Heuristic>().unwrap(), Heuristic::Dijkstra);
        assert!(matches!("chebyshev".parse::<Heuristic>(), Err(PlanError::InvalidConfiguration(_))));
    }
}
