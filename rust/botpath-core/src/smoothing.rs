//! Bezier smoothing of a waypoint chain.
//!
//! The whole chain is treated as the control polygon of a single curve of
//! degree `n - 1` and evaluated with de Casteljau's repeated linear
//! interpolation. There is no split into cubic segments, so evaluation is
//! quadratic in the number of control points per sample.

use crate::errors::{PlanError, Result};
use crate::models::Coordinate;
use crate::options::DEFAULT_SAMPLE_COUNT;

/// Curve value at parameter `t` in `[0, 1]`, in field units.
///
/// Requires at least one control point.
pub fn point_at(control_points: &[Coordinate], t: f64) -> Result<[f64; 2]> {
    if control_points.is_empty() {
        return Err(PlanError::precondition("bezier evaluation needs control points"));
    }
    let mut pts: Vec<[f64; 2]> = control_points.iter().map(|c| [f64::from(c.x), f64::from(c.y)]).collect();
    let n = pts.len() - 1;
    let mt = 1.0 - t;
    for r in 1..=n {
        for i in 0..=(n - r) {
            pts[i] = [mt * pts[i][0] + t * pts[i + 1][0], mt * pts[i][1] + t * pts[i + 1][1]];
        }
    }
    Ok(pts[0])
}

/// Samples the curve at `t = 0, 1/sample_count, ..., 1`, returning
/// `sample_count + 1` points truncated toward zero.
///
/// Fewer than two control points, or zero samples, is caller misuse.
pub fn evaluate(control_points: &[Coordinate], sample_count: usize) -> Result<Vec<Coordinate>> {
    if control_points.len() < 2 {
        return Err(PlanError::precondition(format!(
            "bezier smoothing needs at least 2 control points, got {}",
            control_points.len()
        )));
    }
    if sample_count == 0 {
        return Err(PlanError::precondition("bezier smoothing needs at least 1 sample interval"));
    }
    let mut out = Vec::with_capacity(sample_count + 1);
    for i in 0..=sample_count {
        let t = i as f64 / sample_count as f64;
        let [x, y] = point_at(control_points, t)?;
        out.push(Coordinate::new(x as i32, y as i32));
    }
    Ok(out)
}

/// Holds the sample density used to turn control points into a curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BezierSmoother {
    sample_count: usize,
}

impl Default for BezierSmoother {
    fn default() -> Self {
        Self { sample_count: DEFAULT_SAMPLE_COUNT }
    }
}

impl BezierSmoother {
    pub fn new(sample_count: usize) -> Result<Self> {
        let mut s = Self::default();
        s.set_sample_count(sample_count)?;
        Ok(s)
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Changes resolution only; the curve's shape is fixed by the control points.
    pub fn set_sample_count(&mut self, sample_count: usize) -> Result<()> {
        if sample_count == 0 {
            return Err(PlanError::config("sample count must be at least 1"));
        }
        self.sample_count = sample_count;
        Ok(())
    }

    pub fn smooth(&self, control_points: &[Coordinate]) -> Result<Vec<Coordinate>> {
        evaluate(control_points, self.sample_count)
    }
}
