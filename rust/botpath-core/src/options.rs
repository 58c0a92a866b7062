use serde::{Deserialize, Serialize};

use crate::collision::check_radius;
use crate::cost::Heuristic;
use crate::errors::{PlanError, Result};
use crate::grid::GridModel;

pub const DEFAULT_WIDTH: i32 = 900;
pub const DEFAULT_HEIGHT: i32 = 600;
pub const DEFAULT_PITCH: i32 = 50;
pub const DEFAULT_EXCLUSION_RADIUS: f64 = 50.0;
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerOptions {
    pub width: i32,
    pub height: i32,
    pub pitch: i32,

    /// Cells strictly closer than this to an obstacle are blocked.
    pub exclusion_radius: f64,
    /// Number of Bezier intervals; the curve has `sample_count + 1` points.
    pub sample_count: usize,
    pub heuristic: Heuristic,

    /// Start within this distance of the goal skips the search. 0 disables it.
    pub direct_route_radius: f64,
    /// Step budget for external drivers. The engine itself never stops early.
    pub max_steps: Option<u64>,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pitch: DEFAULT_PITCH,
            exclusion_radius: DEFAULT_EXCLUSION_RADIUS,
            sample_count: DEFAULT_SAMPLE_COUNT,
            heuristic: Heuristic::default(),
            direct_route_radius: 0.0,
            max_steps: None,
        }
    }
}

impl PlannerOptions {
    /// Rejects values that would make the grid or collision map meaningless.
    pub fn validate(&self) -> Result<()> {
        GridModel::new(self.width, self.height, self.pitch)?;
        check_radius(self.exclusion_radius)?;
        if !self.direct_route_radius.is_finite() || self.direct_route_radius < 0.0 {
            return Err(PlanError::config(format!(
                "direct route radius must be a non-negative number, got {}",
                self.direct_route_radius
            )));
        }
        if self.sample_count == 0 {
            return Err(PlanError::config("sample count must be at least 1"));
        }
        Ok(())
    }
}
