//! One planning session: obstacles in, route and smoothed curve out.

use tracing::{debug, info};

use crate::collision::CollisionMap;
use crate::cost::CostModel;
use crate::editor::PathEditor;
use crate::engine::SearchEngine;
use crate::errors::Result;
use crate::grid::GridModel;
use crate::models::{Coordinate, PlanReport, SearchState};
use crate::options::PlannerOptions;
use crate::smoothing::BezierSmoother;

#[derive(Debug)]
pub struct PathPlanner {
    options: PlannerOptions,
    engine: SearchEngine,
    smoother: BezierSmoother,
    editor: PathEditor,
    obstacles: Vec<Coordinate>,
    walls: Vec<Coordinate>,
    curve: Option<Vec<Coordinate>>,
}

impl PathPlanner {
    pub fn new(options: PlannerOptions) -> Result<Self> {
        options.validate()?;
        let grid = GridModel::new(options.width, options.height, options.pitch)?;
        let collision = CollisionMap::new(grid, options.exclusion_radius)?;
        let engine = SearchEngine::new(collision, CostModel::new(options.pitch, options.heuristic))
            .with_direct_route_radius(options.direct_route_radius);
        let smoother = BezierSmoother::new(options.sample_count)?;
        Ok(Self {
            options,
            engine,
            smoother,
            editor: PathEditor::default(),
            obstacles: Vec::new(),
            walls: Vec::new(),
            curve: None,
        })
    }

    pub fn options(&self) -> &PlannerOptions { &self.options }
    pub fn engine(&self) -> &SearchEngine { &self.engine }
    pub fn collision(&self) -> &CollisionMap { self.engine.collision() }

    /// Replaces the obstacle snapshot. Any search in progress is dropped.
    pub fn set_obstacles(&mut self, obstacles: &[Coordinate]) -> Result<()> {
        self.obstacles = obstacles.to_vec();
        self.rebuild()
    }

    /// Replaces the painted wall cells. Any search in progress is dropped.
    pub fn set_walls(&mut self, walls: &[Coordinate]) -> Result<()> {
        self.walls = walls.to_vec();
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<()> {
        self.engine.rebuild_obstacles(&self.obstacles, self.options.exclusion_radius, &self.walls)?;
        self.editor.clear();
        self.curve = None;
        Ok(())
    }

    /// Runs a full search and smooths the result.
    pub fn plan(&mut self, start: Coordinate, goal: Coordinate) -> Result<PlanReport> {
        self.begin(start, goal);
        let state = self.engine.solve()?;
        self.settle(state);
        info!(state = ?state, expanded = self.engine.expanded(), "planning finished");
        self.report()
    }

    /// Starts an incremental search; drive it with [`step`](Self::step).
    pub fn begin(&mut self, start: Coordinate, goal: Coordinate) -> SearchState {
        self.editor.clear();
        self.curve = None;
        let state = self.engine.start(start, goal);
        self.settle(state);
        state
    }

    /// One expansion of the current search.
    pub fn step(&mut self) -> Result<SearchState> {
        let before = self.engine.state();
        let state = self.engine.expand_one()?;
        if state != before {
            self.settle(state);
        }
        Ok(state)
    }

    pub fn state(&self) -> SearchState {
        self.engine.state()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.editor.clear();
        self.curve = None;
    }

    fn settle(&mut self, state: SearchState) {
        if state == SearchState::Found {
            if let Some(path) = self.engine.path() {
                self.editor.load(path);
                self.curve = None;
            }
        }
    }

    pub fn path(&self) -> Option<&[Coordinate]> {
        self.engine.path()
    }

    pub fn control_points(&self) -> &[Coordinate] {
        self.editor.control_points()
    }

    /// Smoothed curve over the current control points, recomputed after any
    /// edit or density change. Empty while fewer than two control points exist.
    pub fn curve(&mut self) -> Result<&[Coordinate]> {
        if self.curve.is_none() {
            let curve = if self.editor.len() < 2 { Vec::new() } else { self.editor.smooth(&self.smoother)? };
            debug!(controls = self.editor.len(), samples = curve.len(), "curve recomputed");
            self.curve = Some(curve);
        }
        Ok(self.curve.as_deref().unwrap_or_default())
    }

    pub fn sample_count(&self) -> usize {
        self.smoother.sample_count()
    }

    pub fn set_sample_count(&mut self, sample_count: usize) -> Result<()> {
        self.smoother.set_sample_count(sample_count)?;
        self.options.sample_count = sample_count;
        self.curve = None;
        Ok(())
    }

    pub fn append_waypoint(&mut self, c: Coordinate) -> bool {
        let added = self.editor.append(c);
        if added {
            self.curve = None;
        }
        added
    }

    pub fn remove_waypoint(&mut self) -> Option<Coordinate> {
        let removed = self.editor.remove_last();
        if removed.is_some() {
            self.curve = None;
        }
        removed
    }

    pub fn report(&mut self) -> Result<PlanReport> {
        let curve = self.curve()?.to_vec();
        Ok(PlanReport {
            state: self.engine.state(),
            path: self.engine.path().map(<[Coordinate]>::to_vec),
            curve,
            expanded: self.engine.expanded(),
            cost: self.engine.path_cost(),
        })
    }
}
