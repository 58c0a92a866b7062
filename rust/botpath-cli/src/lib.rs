pub mod config;
pub mod positions;

use std::path::PathBuf;

use anyhow::Result;
use botpath_core::{Coordinate, Heuristic, PathPlanner, PlanReport, PlannerOptions, SearchState};
use tracing::{debug, info, warn};

pub use config::Config;
pub use positions::Positions;

/// How the search is driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drive {
    Batch,
    /// Single expansions from a loop, stopping after `max_steps` if given.
    Stepped { max_steps: Option<u64> },
}

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub samples: Option<usize>,
    pub heuristic: Option<Heuristic>,
    pub max_steps: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, options: &mut PlannerOptions) {
        if let Some(n) = self.samples { options.sample_count = n; }
        if let Some(h) = self.heuristic { options.heuristic = h; }
        if let Some(m) = self.max_steps { options.max_steps = Some(m); }
    }
}

pub fn plan(options: PlannerOptions, positions: &Positions, drive: Drive) -> Result<PlanReport> {
    let mut planner = PathPlanner::new(options)?;
    planner.set_obstacles(&positions.obstacles)?;

    match drive {
        Drive::Batch => Ok(planner.plan(positions.start, positions.goal)?),
        Drive::Stepped { max_steps } => {
            let mut state = planner.begin(positions.start, positions.goal);
            let mut steps: u64 = 0;
            while state == SearchState::Searching {
                if max_steps.is_some_and(|m| steps >= m) {
                    warn!(steps, "step budget exhausted before the search finished");
                    break;
                }
                state = planner.step()?;
                steps += 1;
                debug!(steps, open = planner.engine().open_len(), closed = planner.engine().closed_len(), state = ?state, "tick");
            }
            info!(state = ?state, steps, "stepped planning stopped");
            Ok(planner.report()?)
        }
    }
}

/// Blocked grid cells for the obstacle snapshot in `positions`.
pub fn blocked_cells(options: PlannerOptions, positions: &Positions) -> Result<Vec<Coordinate>> {
    let mut planner = PathPlanner::new(options)?;
    planner.set_obstacles(&positions.obstacles)?;
    Ok(planner.collision().blocked_cells())
}

pub fn write_json<T: serde::Serialize>(value: &T, out: Option<&PathBuf>) -> Result<()> {
    use anyhow::Context;
    match out {
        Some(path) => {
            let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
            serde_json::to_writer_pretty(file, value).with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), value).context("writing stdout")?;
            println!();
        }
    }
    Ok(())
}
