use botpath_core::{
    CollisionMap, Coordinate, CostModel, GridModel, Heuristic, PlanError, SearchEngine, SearchState,
};

fn c(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

fn engine_with(obstacles: &[Coordinate], heuristic: Heuristic) -> SearchEngine {
    let grid = GridModel::new(900, 600, 50).expect("grid");
    let mut map = CollisionMap::new(grid, 50.0).expect("map");
    map.rebuild(obstacles, 50.0).expect("rebuild");
    SearchEngine::new(map, CostModel::new(50, heuristic))
}

fn engine(obstacles: &[Coordinate]) -> SearchEngine {
    engine_with(obstacles, Heuristic::Euclidean)
}

/// Sum of lattice step costs along the grid part of a path.
fn grid_cost(path: &[Coordinate]) -> i64 {
    path[1..path.len() - 1]
        .windows(2)
        .map(|w| {
            let d = w[1] - w[0];
            if d.x != 0 && d.y != 0 { 70 } else { 50 }
        })
        .sum()
}

/// Small deterministic obstacle scatter (LCG), enough to vary layouts.
fn scatter(seed: u64, count: usize) -> Vec<Coordinate> {
    let mut s = seed;
    let mut next = move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (s >> 33) as i32
    };
    (0..count).map(|_| c(100 + next().rem_euclid(700), 100 + next().rem_euclid(400))).collect()
}

#[test]
fn reference_field_routes_around_the_obstacle() {
    let obstacle = c(450, 300);
    let mut e = engine(&[obstacle]);
    e.start(c(0, 0), c(900, 600));
    assert_eq!(e.solve().unwrap(), SearchState::Found);

    let path = e.path().unwrap();
    assert_eq!(
        path,
        &[
            c(0, 0), c(50, 50), c(100, 100), c(150, 150), c(200, 200), c(250, 250), c(300, 300),
            c(350, 350), c(400, 350), c(450, 350), c(500, 400), c(550, 400), c(600, 450),
            c(650, 450), c(700, 500), c(750, 500), c(800, 500), c(850, 550), c(900, 600),
        ]
    );
    for p in path {
        assert!(p.distance(obstacle) >= 50.0, "{} too close to obstacle", p);
    }
    assert_eq!(e.path_cost(), Some(1000));
    assert_eq!(grid_cost(path), 1000);
    assert_eq!(e.expanded(), 77);
}

#[test]
fn batch_and_thousand_steps_agree() {
    let mut batch = engine(&[c(450, 300)]);
    batch.start(c(0, 0), c(900, 600));
    batch.solve().unwrap();

    let mut stepped = engine(&[c(450, 300)]);
    stepped.start(c(0, 0), c(900, 600));
    for _ in 0..1000 {
        stepped.expand_one().unwrap();
    }
    assert_eq!(stepped.state(), SearchState::Found);
    assert_eq!(stepped.path(), batch.path());
    assert_eq!(stepped.visited(), batch.visited());
    assert_eq!(stepped.search_tree(), batch.search_tree());
}

#[test]
fn paused_search_resumes_identically() {
    for seed in 1..6u64 {
        let obstacles = scatter(seed, 12);
        let mut batch = engine(&obstacles);
        batch.start(c(20, 30), c(880, 570));
        let state = batch.solve().unwrap();

        let mut stepped = engine(&obstacles);
        stepped.start(c(20, 30), c(880, 570));
        let mut steps = 0;
        while stepped.state() == SearchState::Searching {
            stepped.expand_one().unwrap();
            steps += 1;
            if steps % 7 == 0 {
                // a driver inspecting state between ticks must not disturb it
                let _ = stepped.search_tree();
                let _ = stepped.open_len();
            }
        }
        assert_eq!(stepped.state(), state, "seed {}", seed);
        assert_eq!(stepped.path(), batch.path(), "seed {}", seed);
        assert_eq!(stepped.expanded(), batch.expanded(), "seed {}", seed);
    }
}

#[test]
fn repeated_solves_are_deterministic() {
    let obstacles = scatter(42, 15);
    let mut first = engine(&obstacles);
    first.start(c(60, 520), c(840, 80));
    first.solve().unwrap();
    for _ in 0..3 {
        let mut again = engine(&obstacles);
        again.start(c(60, 520), c(840, 80));
        again.solve().unwrap();
        assert_eq!(again.path(), first.path());
        assert_eq!(again.state(), first.state());
    }
    // Restarting the same engine yields the same route too
    let before = first.path().map(<[Coordinate]>::to_vec);
    first.start(c(60, 520), c(840, 80));
    first.solve().unwrap();
    assert_eq!(first.path().map(<[Coordinate]>::to_vec), before);
}

#[test]
fn detour_on_an_axis_is_optimal() {
    // Only two diagonal steps are needed to pass the blocked cell.
    let mut e = engine(&[c(450, 300)]);
    e.start(c(50, 300), c(850, 300));
    assert_eq!(e.solve().unwrap(), SearchState::Found);
    assert_eq!(e.path_cost(), Some(840));
    assert_eq!(grid_cost(e.path().unwrap()), 840);
}

#[test]
fn consistent_heuristics_reach_the_optimal_cost() {
    for h in [Heuristic::Octile, Heuristic::Dijkstra] {
        let mut e = engine_with(&[c(450, 300)], h);
        e.start(c(0, 0), c(900, 600));
        assert_eq!(e.solve().unwrap(), SearchState::Found);
        assert_eq!(e.path_cost(), Some(1000), "{:?}", h);
    }
    let mut e = engine_with(&[c(450, 300)], Heuristic::Manhattan);
    e.start(c(0, 0), c(900, 600));
    assert_eq!(e.solve().unwrap(), SearchState::Found);
}

#[test]
fn routes_never_touch_blocked_cells() {
    for seed in 10..20u64 {
        let obstacles = scatter(seed, 20);
        let mut e = engine(&obstacles);
        e.start(c(0, 0), c(900, 600));
        if e.solve().unwrap() != SearchState::Found {
            continue;
        }
        let path = e.path().unwrap();
        for p in &path[1..path.len() - 1] {
            assert!(!e.collision().is_blocked(*p), "seed {} passes blocked {}", seed, p);
        }
        // no coordinate repeats along the grid part
        let mut seen = std::collections::HashSet::new();
        assert!(path[1..path.len() - 1].iter().all(|p| seen.insert(*p)));
    }
}

#[test]
fn wall_across_the_field_exhausts() {
    let wall: Vec<Coordinate> = (1..12).map(|i| c(450, i * 50)).collect();
    let mut e = engine(&wall);
    e.start(c(100, 300), c(800, 300));
    assert_eq!(e.solve().unwrap(), SearchState::Exhausted);
    assert!(e.path().is_none());
    // the whole western half (8 columns x 11 rows) was explored
    assert_eq!(e.expanded(), 88);
    assert_eq!(e.expand_one().unwrap(), SearchState::Exhausted);
}

#[test]
fn expand_requires_a_started_search() {
    let mut e = engine(&[]);
    assert!(matches!(e.expand_one(), Err(PlanError::PreconditionViolation(_))));
    e.start(c(100, 100), c(200, 100));
    e.solve().unwrap();
    e.reset();
    assert_eq!(e.state(), SearchState::Idle);
    assert!(e.path().is_none());
    assert!(matches!(e.expand_one(), Err(PlanError::PreconditionViolation(_))));
}
