use crate::models::Coordinate;
use crate::smoothing::BezierSmoother;
use crate::errors::Result;

/// User edits on the control polygon of the smoothed curve.
///
/// Holds nothing but the current sequence; any curve computed from an
/// earlier sequence is stale after an edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathEditor {
    points: Vec<Coordinate>,
}

impl PathEditor {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn control_points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replaces the whole sequence, e.g. with a freshly planned path.
    pub fn load(&mut self, points: &[Coordinate]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Appends `c` unless it already occurs. Returns whether it was added.
    pub fn append(&mut self, c: Coordinate) -> bool {
        if self.points.contains(&c) {
            return false;
        }
        self.points.push(c);
        true
    }

    /// Drops the last entry.
    pub fn remove_last(&mut self) -> Option<Coordinate> {
        self.points.pop()
    }

    pub fn smooth(&self, smoother: &BezierSmoother) -> Result<Vec<Coordinate>> {
        smoother.smooth(&self.points)
    }
}
