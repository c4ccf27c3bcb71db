use crate::cells::{
    rand_horizontal_direction, rand_vertical_direction, CoordinateSmallVec, Direction,
    GridCoordinate,
};
use crate::errors::{ErrorKind, Result};
use crate::grid::Grid;

use fnv::FnvHashMap;
use petgraph::unionfind::UnionFind;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The closed set of generation strategies. Adding a strategy means adding a
/// variant here and one function below - `generate` is the only dispatch
/// point.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Algorithm {
    HuntAndKill,
    RecursiveBacktracker,
    Prim,
    WeightedPrim,
    Kruskal,
    RecursiveDivision,
    AldousBroder,
    Wilson,
    Eller,
    BraidEller,
    GrowingTree,
    Forest,
    BinaryTree,
    Sidewinder,
    Spiral,
    Diagonal,
    BlockDivision,
    Braid,
    BraidTilt,
}

impl Algorithm {
    pub const ALL: [Algorithm; 19] = [Algorithm::HuntAndKill,
                                      Algorithm::RecursiveBacktracker,
                                      Algorithm::Prim,
                                      Algorithm::WeightedPrim,
                                      Algorithm::Kruskal,
                                      Algorithm::RecursiveDivision,
                                      Algorithm::AldousBroder,
                                      Algorithm::Wilson,
                                      Algorithm::Eller,
                                      Algorithm::BraidEller,
                                      Algorithm::GrowingTree,
                                      Algorithm::Forest,
                                      Algorithm::BinaryTree,
                                      Algorithm::Sidewinder,
                                      Algorithm::Spiral,
                                      Algorithm::Diagonal,
                                      Algorithm::BlockDivision,
                                      Algorithm::Braid,
                                      Algorithm::BraidTilt];
}

/// Tuning knobs for the kruskal strategy.
///
/// With `clear` set the candidate edges are shuffled uniformly. Otherwise the
/// shuffle keys are weighted by `horizontal_weight`/`vertical_weight`, so the
/// heavier pass tends to be carved earlier and dominates the corridor
/// texture. Zero weights are a generation failure.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct KruskalParams {
    pub clear: bool,
    pub horizontal_weight: u32,
    pub vertical_weight: u32,
}
impl Default for KruskalParams {
    fn default() -> KruskalParams {
        KruskalParams { clear: true, horizontal_weight: 1, vertical_weight: 1 }
    }
}

/// Tuning knobs for the forest strategy: how many trees to seed and whether
/// the finished components stay separated by walls.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ForestParams {
    pub wall: bool,
    pub trees: usize,
}
impl Default for ForestParams {
    fn default() -> ForestParams {
        ForestParams { wall: false, trees: 4 }
    }
}

/// Tuning knobs for the spiral strategy: the number of arcs each inner ring
/// is split into. Must be at least one.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct SpiralParams {
    pub arms: usize,
}
impl Default for SpiralParams {
    fn default() -> SpiralParams {
        SpiralParams { arms: 1 }
    }
}

/// Per-call parameter bundle for `generate`. Plain value object - nothing in
/// here is global or shared between calls.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct AlgorithmParameters {
    pub kruskal: KruskalParams,
    pub forest: ForestParams,
    pub spiral: SpiralParams,
}

/// Generate a maze on the grid with the chosen strategy.
///
/// The grid is reset first, so any previously generated maze is discarded.
/// All random decisions are drawn from the caller's rng - the same seed, grid
/// dimensions and parameters always reproduce the same maze. Fails with
/// `GenerationFailure` (leaving the grid reset but uncarved) when the
/// parameters are structurally impossible, e.g. zero kruskal pass weights or
/// more forest seeds than cells.
pub fn generate(grid: &mut Grid,
                algorithm: Algorithm,
                params: &AlgorithmParameters,
                rng: &mut XorShiftRng)
                -> Result<()> {
    grid.reset();
    match algorithm {
        Algorithm::HuntAndKill => hunt_and_kill(grid, rng),
        Algorithm::RecursiveBacktracker => recursive_backtracker(grid, rng),
        Algorithm::Prim => prim(grid, rng),
        Algorithm::WeightedPrim => weighted_prim(grid, rng),
        Algorithm::Kruskal => kruskal(grid, &params.kruskal, rng)?,
        Algorithm::RecursiveDivision => recursive_division(grid, rng),
        Algorithm::AldousBroder => aldous_broder(grid, rng),
        Algorithm::Wilson => wilson(grid, rng),
        Algorithm::Eller => eller(grid, rng),
        Algorithm::BraidEller => braid_eller(grid, rng),
        Algorithm::GrowingTree => growing_tree(grid, rng),
        Algorithm::Forest => forest(grid, &params.forest, rng)?,
        Algorithm::BinaryTree => binary_tree(grid, rng),
        Algorithm::Sidewinder => sidewinder(grid, rng),
        Algorithm::Spiral => spiral(grid, &params.spiral, rng)?,
        Algorithm::Diagonal => diagonal(grid, rng),
        Algorithm::BlockDivision => block_division(grid, rng),
        Algorithm::Braid => braid(grid, rng),
        Algorithm::BraidTilt => braid_tilt(grid, rng),
    }
    grid.mark_generated();
    Ok(())
}

/// Apply the hunt-and-kill maze generation algorithm to the grid.
/// Random-walk from the current cell into unvisited neighbours, carving as we
/// go. On hitting a dead end, hunt for an unvisited cell bordering the
/// visited region and resume the walk from there, joined to the existing
/// maze. Both the hunted cell and the cell it joins through are chosen
/// uniformly at random, never in scan order, to avoid directional artifacts.
pub fn hunt_and_kill(grid: &mut Grid, rng: &mut XorShiftRng) {
    let size = grid.size();
    let mut visited = vec![false; size];
    let mut current = grid.random_cell(rng);
    visited[index_of(grid, current)] = true;
    let mut visited_count = 1;

    while visited_count < size {
        let unvisited = unvisited_neighbours(grid, &visited, current);
        if let Some(&next) = unvisited.choose(rng) {
            grid.link(current, next);
            visited[index_of(grid, next)] = true;
            visited_count += 1;
            current = next;
        } else {
            let candidates: Vec<GridCoordinate> = grid.iter()
                .filter(|&c| !visited[index_of(grid, c)])
                .filter(|&c| {
                    grid.neighbours(c).iter().any(|&n| visited[index_of(grid, n)])
                })
                .collect();
            let &hunted = candidates.choose(rng)
                .expect("an unvisited cell borders the visited region while cells remain");
            let joinable: CoordinateSmallVec = grid.neighbours(hunted)
                .iter()
                .cloned()
                .filter(|&n| visited[index_of(grid, n)])
                .collect();
            let &join = joinable.choose(rng).expect("hunted cell borders the visited region");
            grid.link(hunted, join);
            visited[index_of(grid, hunted)] = true;
            visited_count += 1;
            current = hunted;
        }
    }
}

/// Apply the recursive backtracker (depth first carve) algorithm to the grid.
/// An explicit stack keeps the walk; dead ends backtrack by popping.
pub fn recursive_backtracker(grid: &mut Grid, rng: &mut XorShiftRng) {
    let mut visited = vec![false; grid.size()];
    let start = grid.random_cell(rng);
    visited[index_of(grid, start)] = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let unvisited = unvisited_neighbours(grid, &visited, current);
        if let Some(&next) = unvisited.choose(rng) {
            grid.link(current, next);
            visited[index_of(grid, next)] = true;
            stack.push(next);
        } else {
            stack.pop();
        }
    }
}

/// Apply the randomised Prim algorithm to the grid: grow the maze from a
/// random start, repeatedly picking a uniformly random frontier cell (an
/// unvisited cell bordering the tree) and carving it into a random visited
/// neighbour.
pub fn prim(grid: &mut Grid, rng: &mut XorShiftRng) {
    let size = grid.size();
    let mut visited = vec![false; size];
    let mut in_frontier = vec![false; size];
    let mut frontier: Vec<GridCoordinate> = Vec::new();

    let start = grid.random_cell(rng);
    visited[index_of(grid, start)] = true;
    for &n in grid.neighbours(start).iter() {
        in_frontier[index_of(grid, n)] = true;
        frontier.push(n);
    }

    while !frontier.is_empty() {
        let pick = rng.gen_range(0..frontier.len());
        let cell = frontier.swap_remove(pick);
        let joinable: CoordinateSmallVec = grid.neighbours(cell)
            .iter()
            .cloned()
            .filter(|&n| visited[index_of(grid, n)])
            .collect();
        let &join = joinable.choose(rng).expect("frontier cell borders the tree");
        grid.link(cell, join);
        visited[index_of(grid, cell)] = true;

        for &n in grid.neighbours(cell).iter() {
            let n_index = index_of(grid, n);
            if !visited[n_index] && !in_frontier[n_index] {
                in_frontier[n_index] = true;
                frontier.push(n);
            }
        }
    }
}

/// Prim variant with a biased frontier selection: every cell carries a fixed
/// random weight and the cheapest frontier cell is always expanded next.
/// The different selection rule changes the corridor texture (long cheap
/// runs instead of an even frontier) but not the spanning tree guarantee.
pub fn weighted_prim(grid: &mut Grid, rng: &mut XorShiftRng) {
    let size = grid.size();
    let weights: Vec<u32> = (0..size).map(|_| rng.gen()).collect();
    let mut visited = vec![false; size];
    let mut in_frontier = vec![false; size];
    let mut frontier: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();

    let start = grid.random_cell(rng);
    visited[index_of(grid, start)] = true;
    for &n in grid.neighbours(start).iter() {
        let n_index = index_of(grid, n);
        in_frontier[n_index] = true;
        frontier.push(Reverse((weights[n_index], n_index)));
    }

    while let Some(Reverse((_, cell_index))) = frontier.pop() {
        let cell = grid.index_to_grid_coordinate(cell_index);
        let joinable: CoordinateSmallVec = grid.neighbours(cell)
            .iter()
            .cloned()
            .filter(|&n| visited[index_of(grid, n)])
            .collect();
        let &join = joinable.choose(rng).expect("frontier cell borders the tree");
        grid.link(cell, join);
        visited[cell_index] = true;

        for &n in grid.neighbours(cell).iter() {
            let n_index = index_of(grid, n);
            if !visited[n_index] && !in_frontier[n_index] {
                in_frontier[n_index] = true;
                frontier.push(Reverse((weights[n_index], n_index)));
            }
        }
    }
}

/// Apply the randomised Kruskal algorithm to the grid: walk the shuffled
/// candidate edge list and carve every edge that joins two different
/// union-find sets. The union-find acceptance keeps the result a spanning
/// tree whatever the shuffle looks like.
pub fn kruskal(grid: &mut Grid, params: &KruskalParams, rng: &mut XorShiftRng) -> Result<()> {
    if !params.clear && (params.horizontal_weight == 0 || params.vertical_weight == 0) {
        return Err(ErrorKind::GenerationFailure("kruskal pass weights must be non-zero".into())
            .into());
    }

    let mut edges = candidate_edges(grid);
    if params.clear {
        edges.shuffle(rng);
    } else {
        // Weighted shuffle: each edge draws a random key shrunk by its pass
        // weight, heavier passes sort earlier on average.
        let mut keyed: Vec<(u64, GridCoordinate, GridCoordinate)> = edges
            .into_iter()
            .map(|(a, b)| {
                let weight = if a.y == b.y {
                    params.horizontal_weight
                } else {
                    params.vertical_weight
                };
                let key = u64::from(rng.gen::<u32>()) / u64::from(weight);
                (key, a, b)
            })
            .collect();
        keyed.sort_by_key(|&(key, _, _)| key);
        edges = keyed.into_iter().map(|(_, a, b)| (a, b)).collect();
    }

    let mut sets = UnionFind::<u32>::new(grid.size());
    for (a, b) in edges {
        let a_index = index_of(grid, a) as u32;
        let b_index = index_of(grid, b) as u32;
        if sets.union(a_index, b_index) {
            grid.link(a, b);
        }
    }
    Ok(())
}

/// Apply the recursive division algorithm to the grid: start fully open,
/// split the region with a randomly placed wall carrying one random gap and
/// recurse into the two halves until only corridors remain.
pub fn recursive_division(grid: &mut Grid, rng: &mut XorShiftRng) {
    open_all(grid);
    divide(grid, rng, 0, 0, grid.width() as u32, grid.height() as u32);
}

fn divide(grid: &mut Grid, rng: &mut XorShiftRng, x0: u32, y0: u32, w: u32, h: u32) {
    if w < 2 || h < 2 {
        return;
    }
    let split_vertically = if w > h {
        true
    } else if h > w {
        false
    } else {
        rng.gen()
    };
    if split_vertically {
        // Wall between columns wx and wx + 1.
        let wx = x0 + rng.gen_range(0..w - 1);
        let gap_y = y0 + rng.gen_range(0..h);
        for y in y0..y0 + h {
            if y != gap_y {
                grid.unlink(GridCoordinate::new(wx, y), GridCoordinate::new(wx + 1, y));
            }
        }
        divide(grid, rng, x0, y0, wx - x0 + 1, h);
        divide(grid, rng, wx + 1, y0, x0 + w - wx - 1, h);
    } else {
        let wy = y0 + rng.gen_range(0..h - 1);
        let gap_x = x0 + rng.gen_range(0..w);
        for x in x0..x0 + w {
            if x != gap_x {
                grid.unlink(GridCoordinate::new(x, wy), GridCoordinate::new(x, wy + 1));
            }
        }
        divide(grid, rng, x0, y0, w, wy - y0 + 1);
        divide(grid, rng, x0, wy + 1, w, y0 + h - wy - 1);
    }
}

/// Apply the Aldous-Broder algorithm to the grid: an unbiased random walk
/// over the whole grid, carving into every cell the first time the walk
/// reaches it. Slow but uniformly random over all spanning trees.
pub fn aldous_broder(grid: &mut Grid, rng: &mut XorShiftRng) {
    let size = grid.size();
    let mut visited = vec![false; size];
    let mut current = grid.random_cell(rng);
    visited[index_of(grid, current)] = true;
    let mut visited_count = 1;

    while visited_count < size {
        let neighbours = grid.neighbours(current);
        let &next = neighbours.choose(rng).expect("every grid cell has a neighbour");
        let next_index = index_of(grid, next);
        if !visited[next_index] {
            grid.link(current, next);
            visited[next_index] = true;
            visited_count += 1;
        }
        current = next;
    }
}

/// Apply Wilson's algorithm to the grid: start loop-erased random walks from
/// uniformly chosen unvisited cells and commit each walk once it reaches the
/// visited region. Like Aldous-Broder the result is uniformly random over
/// spanning trees, but the two mix badly in opposite phases - Wilson is slow
/// at the start, Aldous-Broder at the end.
pub fn wilson(grid: &mut Grid, rng: &mut XorShiftRng) {
    let size = grid.size();
    let mut visited = vec![false; size];
    let first = grid.random_cell(rng);
    visited[index_of(grid, first)] = true;
    let mut visited_count = 1;

    while visited_count < size {
        let unvisited: Vec<GridCoordinate> =
            grid.iter().filter(|&c| !visited[index_of(grid, c)]).collect();
        let &walk_start = unvisited.choose(rng).expect("unvisited cells remain");

        let mut path: Vec<GridCoordinate> = vec![walk_start];
        let mut position_in_path =
            FnvHashMap::<usize, usize>::with_capacity_and_hasher(64, Default::default());
        position_in_path.insert(index_of(grid, walk_start), 0);
        let mut current = walk_start;

        loop {
            let neighbours = grid.neighbours(current);
            let &next = neighbours.choose(rng).expect("every grid cell has a neighbour");
            let next_index = index_of(grid, next);

            if visited[next_index] {
                path.push(next);
                break;
            }
            if let Some(&position) = position_in_path.get(&next_index) {
                // The walk crossed itself: erase the loop and continue from
                // the crossing point.
                for erased in path.drain(position + 1..) {
                    position_in_path.remove(&index_of(grid, erased));
                }
                current = next;
            } else {
                position_in_path.insert(next_index, path.len());
                path.push(next);
                current = next;
            }
        }

        for pair in path.windows(2) {
            grid.link(pair[0], pair[1]);
        }
        for &coord in &path[..path.len() - 1] {
            visited[index_of(grid, coord)] = true;
            visited_count += 1;
        }
    }
}

/// Apply Eller's algorithm to the grid: row by row, randomly merge adjacent
/// cells of different sets, then carve at least one downward passage per set
/// before moving on. The final row joins every remaining pair of sets.
pub fn eller(grid: &mut Grid, rng: &mut XorShiftRng) {
    eller_passes(grid, rng, false);
}

/// Eller's algorithm with the set bookkeeping relaxed so that extra same-set
/// merges and extra downward passages introduce loops, followed by a dead end
/// removal sweep. The result is a fully connected braid maze.
pub fn braid_eller(grid: &mut Grid, rng: &mut XorShiftRng) {
    eller_passes(grid, rng, true);
    remove_dead_ends(grid, rng, TiltBias::None);
}

fn eller_passes(grid: &mut Grid, rng: &mut XorShiftRng, allow_loops: bool) {
    let width = grid.width() as u32;
    let height = grid.height() as u32;
    let mut sets = UnionFind::<u32>::new(grid.size());

    for y in 0..height {
        let last_row = y == height - 1;

        for x in 0..width - 1 {
            let a = GridCoordinate::new(x, y);
            let b = GridCoordinate::new(x + 1, y);
            let a_index = index_of(grid, a) as u32;
            let b_index = index_of(grid, b) as u32;
            if !sets.equiv(a_index, b_index) {
                if last_row || rng.gen() {
                    sets.union(a_index, b_index);
                    grid.link(a, b);
                }
            } else if allow_loops && rng.gen_range(0..4) == 0 {
                // Same-set merge: a deliberate loop.
                grid.link(a, b);
            }
        }

        if last_row {
            break;
        }

        // Group the row's cells by set, then carve downward: a random
        // non-empty selection of columns per set.
        let mut columns_by_set = FnvHashMap::<u32, Vec<u32>>::with_capacity_and_hasher(
            width as usize, Default::default());
        for x in 0..width {
            let root = sets.find(index_of(grid, GridCoordinate::new(x, y)) as u32);
            columns_by_set.entry(root).or_insert_with(Vec::new).push(x);
        }
        for columns in columns_by_set.values() {
            let mut carved: Vec<u32> = columns
                .iter()
                .cloned()
                .filter(|_| rng.gen_range(0..3) == 0)
                .collect();
            if carved.is_empty() {
                carved.push(*columns.choose(rng).expect("every set holds at least one column"));
            }
            if allow_loops && rng.gen() {
                carved.push(*columns.choose(rng).expect("every set holds at least one column"));
            }
            for x in carved {
                let upper = GridCoordinate::new(x, y);
                let lower = GridCoordinate::new(x, y + 1);
                sets.union(index_of(grid, upper) as u32, index_of(grid, lower) as u32);
                grid.link(upper, lower);
            }
        }
    }
}

/// Apply the growing tree algorithm to the grid: keep a list of active cells,
/// pick one uniformly at random, carve into a random unvisited neighbour and
/// retire cells with no unvisited neighbours left. One growth rule, no
/// backtracking search.
pub fn growing_tree(grid: &mut Grid, rng: &mut XorShiftRng) {
    let mut visited = vec![false; grid.size()];
    let start = grid.random_cell(rng);
    visited[index_of(grid, start)] = true;
    let mut active = vec![start];

    while !active.is_empty() {
        let pick = rng.gen_range(0..active.len());
        let cell = active[pick];
        let unvisited = unvisited_neighbours(grid, &visited, cell);
        if let Some(&next) = unvisited.choose(rng) {
            grid.link(cell, next);
            visited[index_of(grid, next)] = true;
            active.push(next);
        } else {
            active.swap_remove(pick);
        }
    }
}

/// Grow several independent trees simultaneously from random seed cells.
/// With `wall` set the finished trees stay separated by walls (a spanning
/// forest); otherwise the remaining inter-tree walls are knocked through
/// under union-find control, giving a perfect maze.
pub fn forest(grid: &mut Grid, params: &ForestParams, rng: &mut XorShiftRng) -> Result<()> {
    let size = grid.size();
    if params.trees == 0 || params.trees > size {
        return Err(ErrorKind::GenerationFailure(
            format!("cannot seed {} trees in {} cells", params.trees, size)).into());
    }

    let mut seeds: Vec<usize> = (0..size).collect();
    seeds.shuffle(rng);
    seeds.truncate(params.trees);

    let mut visited = vec![false; size];
    let mut sets = UnionFind::<u32>::new(size);
    let mut active: Vec<GridCoordinate> =
        seeds.iter().map(|&i| grid.index_to_grid_coordinate(i)).collect();
    for &i in &seeds {
        visited[i] = true;
    }

    while !active.is_empty() {
        let pick = rng.gen_range(0..active.len());
        let cell = active[pick];
        let unvisited = unvisited_neighbours(grid, &visited, cell);
        if let Some(&next) = unvisited.choose(rng) {
            grid.link(cell, next);
            sets.union(index_of(grid, cell) as u32, index_of(grid, next) as u32);
            visited[index_of(grid, next)] = true;
            active.push(next);
        } else {
            active.swap_remove(pick);
        }
    }

    if !params.wall {
        let mut edges = candidate_edges(grid);
        edges.shuffle(rng);
        for (a, b) in edges {
            let a_index = index_of(grid, a) as u32;
            let b_index = index_of(grid, b) as u32;
            if sets.union(a_index, b_index) {
                grid.link(a, b);
            }
        }
    }
    Ok(())
}

/// Apply the binary tree maze generation algorithm to the grid.
/// It works simply by visiting each cell and carving a passage in one of two
/// perpendicular directions. Once picked, the two perpendicular directions
/// are constant for the entire generation run, otherwise we would produce
/// closed-off areas instead of a perfect maze. The passages pile up along
/// two of the grid borders, giving the characteristic strong bias.
pub fn binary_tree(grid: &mut Grid, rng: &mut XorShiftRng) {
    let neighbours_to_check = [rand_vertical_direction(rng), rand_horizontal_direction(rng)];

    for cell_coord in grid.iter() {
        let neighbours: CoordinateSmallVec = grid
            .neighbours_at_directions(cell_coord, &neighbours_to_check)
            .iter()
            .filter_map(|&coord_maybe| coord_maybe)
            .collect();
        if let Some(&link_coord) = neighbours.choose(rng) {
            grid.link(cell_coord, link_coord);
        }
    }
}

/// Apply the sidewinder maze generation algorithm to the grid.
/// A run-based variant of the binary tree algorithm: carve runs along one
/// fixed direction and close each run out with a single carve in the
/// perpendicular direction, from a random member of the run. The run and
/// close-out directions must stay perpendicular and fixed for the whole
/// generation, and the run direction has to match the cell visiting order,
/// otherwise closed-off rooms appear.
pub fn sidewinder(grid: &mut Grid, rng: &mut XorShiftRng) {
    let runs_are_horizontal: bool = rng.gen();
    let (next_in_run_direction, run_close_out_direction, batch_iter) = if runs_are_horizontal {
        (Direction::East, rand_vertical_direction(rng), grid.iter_row())
    } else {
        (Direction::South, rand_horizontal_direction(rng), grid.iter_column())
    };

    for coordinates_line in batch_iter {
        let mut run = vec![];

        for coord in coordinates_line {
            run.push(coord);

            let next_in_run_cell = grid.neighbour_at_direction(coord, next_in_run_direction);
            let at_run_end_boundary = next_in_run_cell.is_none();
            let at_close_out_direction_boundary =
                grid.neighbour_at_direction(coord, run_close_out_direction).is_none();

            let should_close_out =
                at_run_end_boundary || (!at_close_out_direction_boundary && rng.gen());

            if should_close_out {
                let &run_member = run.choose(rng).expect("the run holds at least the current cell");
                if let Some(close_out_coord) =
                    grid.neighbour_at_direction(run_member, run_close_out_direction)
                {
                    grid.link(run_member, close_out_coord);
                }
                run.clear();
            } else if let Some(next_cell) = next_in_run_cell {
                grid.link(coord, next_cell);
            }
        }
    }
}

/// Carve the grid as nested rectangular rings. The outermost ring is one
/// continuous corridor; every inner ring is broken into `arms` arcs, each
/// arc opening exactly once into the ring enclosing it, which keeps the
/// whole maze a spanning tree with a spiral topology.
pub fn spiral(grid: &mut Grid, params: &SpiralParams, rng: &mut XorShiftRng) -> Result<()> {
    if params.arms == 0 {
        return Err(ErrorKind::GenerationFailure("spiral needs at least one arm".into()).into());
    }

    let w = grid.width() as u32;
    let h = grid.height() as u32;
    let mut ring = 0u32;
    while 2 * ring < w.min(h) {
        let (x0, y0) = (ring, ring);
        let (x1, y1) = (w - 1 - ring, h - 1 - ring);
        let cells = ring_cells(x0, y0, x1, y1);
        let is_cycle = x1 > x0 && y1 > y0;
        let arms = if ring == 0 { 1 } else { params.arms };
        carve_ring(grid, rng, &cells, is_cycle, arms, ring > 0);
        ring += 1;
    }
    Ok(())
}

/// Clockwise boundary cells of the rectangle, starting at the top-left
/// corner. Degenerate one-row or one-column rectangles come back as a
/// simple line of cells.
fn ring_cells(x0: u32, y0: u32, x1: u32, y1: u32) -> Vec<GridCoordinate> {
    if x0 == x1 {
        return (y0..=y1).map(|y| GridCoordinate::new(x0, y)).collect();
    }
    if y0 == y1 {
        return (x0..=x1).map(|x| GridCoordinate::new(x, y0)).collect();
    }
    let mut cells = Vec::with_capacity(2 * ((x1 - x0) + (y1 - y0)) as usize);
    for x in x0..=x1 {
        cells.push(GridCoordinate::new(x, y0));
    }
    for y in y0 + 1..=y1 {
        cells.push(GridCoordinate::new(x1, y));
    }
    for x in (x0..x1).rev() {
        cells.push(GridCoordinate::new(x, y1));
    }
    for y in (y0 + 1..y1).rev() {
        cells.push(GridCoordinate::new(x0, y));
    }
    cells
}

fn carve_ring(grid: &mut Grid,
              rng: &mut XorShiftRng,
              cells: &[GridCoordinate],
              is_cycle: bool,
              arms: usize,
              connect_outward: bool) {
    let len = cells.len();

    if !is_cycle || len < 2 {
        // A line (or single centre cell): carve it as one corridor.
        for pair in cells.windows(2) {
            grid.link(pair[0], pair[1]);
        }
        if connect_outward {
            let position = rng.gen_range(0..len);
            link_outward(grid, rng, cells, position);
        }
        return;
    }

    // Break the cycle into `arms` arcs, then hook each arc once into the
    // enclosing ring.
    let break_count = arms.min(len);
    let mut positions: Vec<usize> = (0..len).collect();
    positions.shuffle(rng);
    positions.truncate(break_count);
    positions.sort_unstable();
    let breaks = positions;

    for i in 0..len {
        if !breaks.contains(&i) {
            grid.link(cells[i], cells[(i + 1) % len]);
        }
    }

    if connect_outward {
        for (which, &arc_start_break) in breaks.iter().enumerate() {
            let arc_end_break = breaks[(which + 1) % breaks.len()];
            // A single break leaves one arc spanning the whole ring, so the
            // start and end break coincide and the length is `len`, not 0.
            let arc_len = ((arc_end_break + len - arc_start_break + len - 1) % len) + 1;
            let offset = rng.gen_range(0..arc_len);
            let position = (arc_start_break + 1 + offset) % len;
            link_outward(grid, rng, cells, position);
        }
    }
}

fn link_outward(grid: &mut Grid,
                rng: &mut XorShiftRng,
                ring: &[GridCoordinate],
                position: usize) {
    let coord = ring[position];
    let outward: CoordinateSmallVec = grid.neighbours(coord)
        .iter()
        .cloned()
        .filter(|n| !ring.contains(n) && closer_to_border(grid, *n, coord))
        .collect();
    let &target = outward.choose(rng).expect("inner ring cells border the enclosing ring");
    grid.link(coord, target);
}

fn closer_to_border(grid: &Grid, a: GridCoordinate, b: GridCoordinate) -> bool {
    let inset = |c: GridCoordinate| {
        let w = grid.width() as u32;
        let h = grid.height() as u32;
        c.x.min(w - 1 - c.x).min(c.y).min(h - 1 - c.y)
    };
    inset(a) < inset(b)
}

/// Carve passages in anti-diagonal visiting order: every cell except the
/// origin opens exactly one passage toward the origin (north or west), with
/// the choice biased by diagonal parity so that passages line up into
/// staircase runs. Boundary rows and columns have only one legal choice.
pub fn diagonal(grid: &mut Grid, rng: &mut XorShiftRng) {
    let w = grid.width() as u32;
    let h = grid.height() as u32;

    for d in 1..(w + h - 1) {
        for y in 0..h {
            if d < y {
                continue;
            }
            let x = d - y;
            if x >= w {
                continue;
            }
            let coord = GridCoordinate::new(x, y);
            let north = grid.neighbour_at_direction(coord, Direction::North);
            let west = grid.neighbour_at_direction(coord, Direction::West);
            let target = match (north, west) {
                (Some(n), Some(we)) => {
                    let prefer_north = if (x + y) % 2 == 0 {
                        rng.gen_range(0..4) != 0
                    } else {
                        rng.gen_range(0..4) == 0
                    };
                    if prefer_north { n } else { we }
                }
                (Some(n), None) => n,
                (None, Some(we)) => we,
                (None, None) => continue,
            };
            grid.link(coord, target);
        }
    }
}

/// Non-recursive structured partition carving: start fully open and split
/// regions with walls like recursive division, but drive the work from an
/// explicit region stack and always split the longer side at its midpoint.
/// The regular split positions give the maze a blocky, evenly partitioned
/// look that the randomised recursive variant does not have.
pub fn block_division(grid: &mut Grid, rng: &mut XorShiftRng) {
    open_all(grid);
    let mut regions = vec![(0u32, 0u32, grid.width() as u32, grid.height() as u32)];

    while let Some((x0, y0, w, h)) = regions.pop() {
        if w < 2 || h < 2 {
            continue;
        }
        let split_vertically = if w > h {
            true
        } else if h > w {
            false
        } else {
            rng.gen()
        };
        if split_vertically {
            let wx = x0 + (w - 1) / 2;
            let gap_y = y0 + rng.gen_range(0..h);
            for y in y0..y0 + h {
                if y != gap_y {
                    grid.unlink(GridCoordinate::new(wx, y), GridCoordinate::new(wx + 1, y));
                }
            }
            regions.push((x0, y0, wx - x0 + 1, h));
            regions.push((wx + 1, y0, x0 + w - wx - 1, h));
        } else {
            let wy = y0 + (h - 1) / 2;
            let gap_x = x0 + rng.gen_range(0..w);
            for x in x0..x0 + w {
                if x != gap_x {
                    grid.unlink(GridCoordinate::new(x, wy), GridCoordinate::new(x, wy + 1));
                }
            }
            regions.push((x0, y0, w, wy - y0 + 1));
            regions.push((x0, wy + 1, w, y0 + h - wy - 1));
        }
    }
}

/// Generate a braid maze: a perfect hunt-and-kill base with every dead end
/// opened up by one extra carve. Connected, cyclic, zero dead ends.
pub fn braid(grid: &mut Grid, rng: &mut XorShiftRng) {
    hunt_and_kill(grid, rng);
    remove_dead_ends(grid, rng, TiltBias::None);
}

/// Braid variant whose dead end removal prefers diagonal-alternating carve
/// directions, tilting the loops it introduces.
pub fn braid_tilt(grid: &mut Grid, rng: &mut XorShiftRng) {
    hunt_and_kill(grid, rng);
    remove_dead_ends(grid, rng, TiltBias::Diagonal);
}

/// Neighbour preference when a dead end is opened up.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum TiltBias {
    /// No preference beyond favouring other dead ends.
    None,
    /// Prefer north/east carves on even x+y parity and south/west on odd,
    /// giving the extra loops a tilted grain.
    Diagonal,
}

/// Open one extra passage from every dead end cell, in random order. Carving
/// into a neighbouring dead end is preferred so a single carve retires both.
/// Adding passages never creates new dead ends, so one sweep leaves none.
pub fn remove_dead_ends(grid: &mut Grid, rng: &mut XorShiftRng, tilt: TiltBias) {
    let mut dead_ends: Vec<GridCoordinate> =
        grid.iter().filter(|&c| grid.links(c).len() == 1).collect();
    dead_ends.shuffle(rng);

    for coord in dead_ends {
        if grid.links(coord).len() != 1 {
            continue; // already opened up from the other side
        }
        let closed: CoordinateSmallVec = grid.neighbours(coord)
            .iter()
            .cloned()
            .filter(|&n| !grid.is_linked(coord, n))
            .collect();
        let dead_end_neighbours: CoordinateSmallVec = closed
            .iter()
            .cloned()
            .filter(|&n| grid.links(n).len() == 1)
            .collect();
        let pool: &[GridCoordinate] = if dead_end_neighbours.is_empty() {
            &closed
        } else {
            &dead_end_neighbours
        };

        let tilted: CoordinateSmallVec = match tilt {
            TiltBias::None => SmallVec::new(),
            TiltBias::Diagonal => {
                let wants_north_east = (coord.x + coord.y) % 2 == 0;
                pool.iter()
                    .cloned()
                    .filter(|&n| {
                        let north_or_east = n.y < coord.y || n.x > coord.x;
                        north_or_east == wants_north_east
                    })
                    .collect()
            }
        };
        let pick_from: &[GridCoordinate] = if tilted.is_empty() { pool } else { &tilted };

        let &target = pick_from.choose(rng)
            .expect("a dead end always has a closed wall to some neighbour");
        grid.link(coord, target);
    }
}

/// All dead end cells (exactly one open passage) in the grid.
pub fn dead_ends(grid: &Grid) -> Vec<GridCoordinate> {
    grid.iter().filter(|&c| grid.links(c).len() == 1).collect()
}

fn index_of(grid: &Grid, coord: GridCoordinate) -> usize {
    grid.grid_coordinate_to_index(coord)
        .expect("generator coordinates always come from the grid itself")
}

fn unvisited_neighbours(grid: &Grid,
                        visited: &[bool],
                        coord: GridCoordinate)
                        -> CoordinateSmallVec {
    grid.neighbours(coord)
        .iter()
        .cloned()
        .filter(|&n| !visited[index_of(grid, n)])
        .collect()
}

/// Every wall between two adjacent cells, i.e. every edge the maze graph
/// could possibly have, listed once.
fn candidate_edges(grid: &Grid) -> Vec<(GridCoordinate, GridCoordinate)> {
    let mut edges = Vec::with_capacity(2 * grid.size());
    for coord in grid.iter() {
        if let Some(east) = grid.neighbour_at_direction(coord, Direction::East) {
            edges.push((coord, east));
        }
        if let Some(south) = grid.neighbour_at_direction(coord, Direction::South) {
            edges.push((coord, south));
        }
    }
    edges
}

/// Open every wall in the grid. The division strategies start from here and
/// put walls back in.
fn open_all(grid: &mut Grid) {
    for coord in grid.iter() {
        if let Some(east) = grid.neighbour_at_direction(coord, Direction::East) {
            grid.link(coord, east);
        }
        if let Some(south) = grid.neighbour_at_direction(coord, Direction::South) {
            grid.link(coord, south);
        }
    }
}
