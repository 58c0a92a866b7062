//! Position files written by the robot simulator.
//!
//! One `x,y` pair per line in metres, origin at the field centre. Line 1 is
//! the goal (ball), line 2 the robot, every further line an obstacle.

use std::path::Path;

use anyhow::{bail, Context, Result};
use botpath_core::Coordinate;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Positions {
    pub start: Coordinate,
    pub goal: Coordinate,
    pub obstacles: Vec<Coordinate>,
}

/// Metres about the field centre to field units (centimetres from the corner).
pub fn to_field(x: f64, y: f64, width: i32, height: i32) -> Coordinate {
    let half_w = f64::from(width) / 200.0;
    let half_h = f64::from(height) / 200.0;
    Coordinate::new(((x + half_w) * 100.0) as i32, ((y + half_h) * 100.0) as i32)
}

pub fn parse(text: &str, width: i32, height: i32) -> Result<Positions> {
    let mut points = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split(',').map(str::trim);
        let (Some(xs), Some(ys)) = (parts.next(), parts.next()) else {
            bail!("line {}: expected 'x,y', got '{}'", idx + 1, line);
        };
        let x: f64 = xs.parse().with_context(|| format!("line {}: bad x '{}'", idx + 1, xs))?;
        let y: f64 = ys.parse().with_context(|| format!("line {}: bad y '{}'", idx + 1, ys))?;
        points.push(to_field(x, y, width, height));
    }
    if points.len() < 2 {
        bail!("position file needs a goal and a start line, found {} point(s)", points.len());
    }
    let obstacles = points.split_off(2);
    Ok(Positions { goal: points[0], start: points[1], obstacles })
}

pub fn load(path: &Path, width: i32, height: i32) -> Result<Positions> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&text, width, height).with_context(|| format!("parsing {}", path.display()))
}
