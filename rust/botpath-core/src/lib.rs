pub mod collision;
pub mod cost;
pub mod editor;
pub mod engine;
pub mod errors;
pub mod grid;
pub mod models;
pub mod options;
pub mod planner;
pub mod smoothing;

pub use collision::CollisionMap;
pub use cost::{CostModel, Heuristic};
pub use editor::PathEditor;
pub use engine::SearchEngine;
pub use errors::{PlanError, Result};
pub use grid::GridModel;
pub use models::{Coordinate, PlanReport, SearchState, SearchTreeEdge};
pub use options::PlannerOptions;
pub use planner::PathPlanner;
pub use smoothing::BezierSmoother;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
