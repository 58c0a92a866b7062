use std::collections::HashMap;

use tracing::{debug, trace};

use crate::collision::CollisionMap;
use crate::cost::CostModel;
use crate::errors::{PlanError, Result};
use crate::models::{Coordinate, SearchState, SearchTreeEdge};

use super::open_set::{NodeId, OpenSet};

/// Neighbour offsets in lattice steps; the first four are axis moves.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1), (1, 0), (0, -1), (-1, 0),
    (-1, -1), (1, 1), (-1, 1), (1, -1),
];

#[derive(Clone, Debug)]
struct Node {
    coordinate: Coordinate,
    parent: Option<NodeId>,
    g: i64,
    h: i64,
    seq: u64,
    closed: bool,
}

impl Node {
    fn score(&self) -> i64 {
        self.g + self.h
    }
}

/// Steppable A* over the collision map's grid.
///
/// All search state lives here; [`solve`](Self::solve) is nothing more than
/// [`expand_one`](Self::expand_one) in a loop, so a run driven one step at a
/// time from a timer ends exactly where a batch run does.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    collision: CollisionMap,
    cost: CostModel,
    direct_route_radius: f64,

    state: SearchState,
    nodes: Vec<Node>,
    open: OpenSet,
    closed: HashMap<Coordinate, NodeId>,
    visited: Vec<Coordinate>,
    next_seq: u64,

    start_point: Coordinate,
    goal_point: Coordinate,
    start_cell: Coordinate,
    goal_cell: Coordinate,
    goal_node: Option<NodeId>,
    path: Option<Vec<Coordinate>>,
}

impl SearchEngine {
    pub fn new(collision: CollisionMap, cost: CostModel) -> Self {
        Self {
            collision,
            cost,
            direct_route_radius: 0.0,
            state: SearchState::Idle,
            nodes: Vec::new(),
            open: OpenSet::new(),
            closed: HashMap::new(),
            visited: Vec::new(),
            next_seq: 0,
            start_point: Coordinate::default(),
            goal_point: Coordinate::default(),
            start_cell: Coordinate::default(),
            goal_cell: Coordinate::default(),
            goal_node: None,
            path: None,
        }
    }

    /// Start points strictly within `radius` of the goal get a straight
    /// two-point path without searching. 0 disables the shortcut.
    pub fn with_direct_route_radius(mut self, radius: f64) -> Self {
        self.direct_route_radius = radius;
        self
    }

    pub fn collision(&self) -> &CollisionMap { &self.collision }
    pub fn state(&self) -> SearchState { self.state }

    /// Rebuilds the collision map and drops any search in progress.
    pub fn rebuild_obstacles(&mut self, obstacles: &[Coordinate], radius: f64, walls: &[Coordinate]) -> Result<()> {
        self.collision.rebuild_with_walls(obstacles, radius, walls)?;
        self.reset();
        Ok(())
    }

    /// Back to `Idle`, discarding all nodes and any path.
    pub fn reset(&mut self) {
        self.state = SearchState::Idle;
        self.nodes.clear();
        self.open.clear();
        self.closed.clear();
        self.visited.clear();
        self.next_seq = 0;
        self.goal_node = None;
        self.path = None;
    }

    /// Seeds a new search from `start` toward `goal`. Both are snapped to the
    /// grid; the unsnapped points become the path's endpoints.
    pub fn start(&mut self, start: Coordinate, goal: Coordinate) -> SearchState {
        self.reset();
        self.start_point = start;
        self.goal_point = goal;

        if self.direct_route_radius > 0.0 && start.distance(goal) < self.direct_route_radius {
            debug!(%start, %goal, "start within direct route radius; skipping search");
            self.path = Some(vec![start, goal]);
            self.state = SearchState::Found;
            return self.state;
        }

        let grid = *self.collision.grid();
        self.start_cell = grid.snap_to_grid(start, goal);
        self.goal_cell = grid.snap_to_grid(goal, start);

        let h = self.cost.heuristic(self.start_cell, self.goal_cell);
        self.push_open(self.start_cell, None, 0, h);
        self.state = SearchState::Searching;
        debug!(%start, %goal, start_cell = %self.start_cell, goal_cell = %self.goal_cell, "search started");
        self.state
    }

    /// Performs one node expansion.
    ///
    /// Fails only when no search has been started. In `Found` or `Exhausted`
    /// it does nothing and reports the terminal state.
    pub fn expand_one(&mut self) -> Result<SearchState> {
        match self.state {
            SearchState::Idle => return Err(PlanError::precondition("expand_one called before start")),
            SearchState::Found | SearchState::Exhausted => return Ok(self.state),
            SearchState::Searching => {}
        }

        let Some(current) = self.open.pop() else {
            self.state = SearchState::Exhausted;
            debug!(expanded = self.visited.len(), "search exhausted; no route");
            return Ok(self.state);
        };

        let coordinate = self.nodes[current].coordinate;
        self.nodes[current].closed = true;
        self.closed.insert(coordinate, current);
        self.visited.push(coordinate);
        trace!(%coordinate, g = self.nodes[current].g, score = self.nodes[current].score(), "expand");

        if coordinate == self.goal_cell {
            self.goal_node = Some(current);
            self.path = Some(self.reconstruct(current));
            self.state = SearchState::Found;
            debug!(expanded = self.visited.len(), cost = self.nodes[current].g, "route found");
            return Ok(self.state);
        }

        let pitch = self.collision.grid().pitch();
        let g_current = self.nodes[current].g;
        for (i, &(dx, dy)) in NEIGHBOR_OFFSETS.iter().enumerate() {
            let neighbor = coordinate + Coordinate::new(dx, dy) * pitch;
            if self.collision.is_blocked(neighbor) || self.closed.contains_key(&neighbor) {
                continue;
            }
            let g = g_current + self.cost.step_cost(i >= 4);
            match self.open.get(neighbor) {
                None => {
                    let h = self.cost.heuristic(neighbor, self.goal_cell);
                    self.push_open(neighbor, Some(current), g, h);
                }
                Some(id) if g < self.nodes[id].g => {
                    let node = &mut self.nodes[id];
                    node.g = g;
                    node.parent = Some(current);
                    let (seq, score) = (node.seq, node.score());
                    self.open.decrease(neighbor, seq, score);
                }
                Some(_) => {}
            }
        }
        Ok(self.state)
    }

    /// Expands until the search is `Found` or `Exhausted`.
    pub fn solve(&mut self) -> Result<SearchState> {
        loop {
            let state = self.expand_one()?;
            if state.is_terminal() {
                return Ok(state);
            }
        }
    }

    /// Start point, grid route, goal point. `None` unless `Found`.
    pub fn path(&self) -> Option<&[Coordinate]> {
        self.path.as_deref()
    }

    /// Accumulated step cost of the grid route.
    pub fn path_cost(&self) -> Option<i64> {
        self.goal_node.map(|id| self.nodes[id].g)
    }

    /// Snapped start and goal cells of the current search.
    pub fn anchors(&self) -> Option<(Coordinate, Coordinate)> {
        match self.state {
            SearchState::Idle => None,
            _ if self.nodes.is_empty() => None,
            _ => Some((self.start_cell, self.goal_cell)),
        }
    }

    /// Closed coordinates in expansion order.
    pub fn visited(&self) -> &[Coordinate] {
        &self.visited
    }

    pub fn expanded(&self) -> u64 {
        self.visited.len() as u64
    }

    pub fn open_len(&self) -> usize { self.open.len() }
    pub fn closed_len(&self) -> usize { self.closed.len() }

    pub fn is_open(&self, c: Coordinate) -> bool { self.open.contains(c) }
    pub fn is_closed(&self, c: Coordinate) -> bool { self.closed.contains_key(&c) }

    /// Parent links of every open and closed node, in discovery order.
    pub fn search_tree(&self) -> Vec<SearchTreeEdge> {
        let mut ids: Vec<NodeId> = self.closed.values().copied().chain(self.open.ids()).collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| {
                let node = &self.nodes[id];
                node.parent.map(|p| SearchTreeEdge {
                    parent: self.nodes[p].coordinate,
                    child: node.coordinate,
                    closed: node.closed,
                })
            })
            .collect()
    }

    fn push_open(&mut self, coordinate: Coordinate, parent: Option<NodeId>, g: i64, h: i64) {
        let id = self.nodes.len();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.nodes.push(Node { coordinate, parent, g, h, seq, closed: false });
        self.open.insert(coordinate, id, seq, g + h);
    }

    fn reconstruct(&self, goal: NodeId) -> Vec<Coordinate> {
        let mut path = vec![self.goal_point];
        let mut cur = Some(goal);
        while let Some(id) = cur {
            let node = &self.nodes[id];
            path.push(node.coordinate);
            cur = node.parent;
        }
        path.push(self.start_point);
        path.reverse();
        path
    }
}
