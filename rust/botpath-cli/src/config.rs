use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use botpath_core::{Heuristic, PlannerOptions};

/// Planner options resolved from defaults, an optional JSON file and
/// `BOTPATH_*` environment variables, in that order.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub options: PlannerOptions,
}

impl Config {
    pub fn from_env(options_file: Option<&Path>) -> Result<Self> {
        Self::resolve(options_file, |name| env::var(name).ok())
    }

    pub fn resolve<F>(options_file: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = match options_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str::<PlannerOptions>(&raw).with_context(|| format!("parsing {}", path.display()))?
            }
            None => PlannerOptions::default(),
        };

        if let Some(v) = lookup("BOTPATH_PITCH") {
            options.pitch = v.trim().parse().with_context(|| format!("BOTPATH_PITCH='{}'", v))?;
        }
        if let Some(v) = lookup("BOTPATH_RADIUS") {
            options.exclusion_radius = v.trim().parse().with_context(|| format!("BOTPATH_RADIUS='{}'", v))?;
        }
        if let Some(v) = lookup("BOTPATH_SAMPLES") {
            options.sample_count = v.trim().parse().with_context(|| format!("BOTPATH_SAMPLES='{}'", v))?;
        }
        if let Some(v) = lookup("BOTPATH_HEURISTIC") {
            options.heuristic = v.parse::<Heuristic>()?;
        }
        Ok(Self { options })
    }
}
