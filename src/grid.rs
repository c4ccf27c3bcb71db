use crate::cells::{
    offset_coordinate, CoordinateOptionSmallVec, CoordinateSmallVec, Direction, GridCoordinate,
    ALL_DIRECTIONS,
};
use crate::errors::{ErrorKind, Result};
use crate::units::{EdgesCount, Height, NodesCount, Width};

use petgraph::graph;
use petgraph::{Graph, Undirected};
use rand::Rng;
use rand_xorshift::XorShiftRng;
use std::cmp;
use std::fmt;

/// The open passages around one cell, as seen from that cell.
///
/// Only the wall state is public. Transient generation data (visited flags,
/// set ids) never lives on the grid - the generators keep their own scratch
/// arrays.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CellState {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl CellState {
    pub fn open_passages(&self) -> usize {
        [self.north, self.south, self.east, self.west]
            .iter()
            .filter(|&&open| open)
            .count()
    }

    /// A dead end has exactly one way in and out.
    pub fn is_dead_end(&self) -> bool {
        self.open_passages() == 1
    }
}

/// A rectangular monochrome maze grid.
///
/// Cells are the nodes of an undirected graph and a carved passage between
/// two adjacent cells is an edge. A fresh grid has every wall closed, which
/// is simply the edgeless graph.
///
/// Both dimensions are odd and at least 3 for the whole lifetime of the grid;
/// construction and resizing reject anything else.
pub struct Grid {
    graph: Graph<(), (), Undirected, u32>,
    width: usize,
    height: usize,
    generated: bool,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: {}x{}, links: {}, generated: {}",
               self.width,
               self.height,
               self.links_count(),
               self.generated)
    }
}

impl Grid {
    /// Create a grid with all walls closed.
    ///
    /// Fails with `InvalidDimension` if either dimension is even or below 3.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        validate_dimensions(width, height)?;

        let (NodesCount(nodes), EdgesCount(edges)) = graph_size(width.0, height.0);
        let mut grid = Grid {
            graph: Graph::with_capacity(nodes, edges),
            width: width.0,
            height: height.0,
            generated: false,
        };
        for _ in 0..nodes {
            let _ = grid.graph.add_node(());
        }

        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Number of carved passages in the grid.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether any generation strategy has completed on this grid. A resize
    /// keeps the flag, `reset` clears it.
    #[inline]
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub(crate) fn mark_generated(&mut self) {
        self.generated = true;
    }

    /// The wall state around cell `(x, y)`.
    ///
    /// Fails with `OutOfRange` for any coordinate outside
    /// `[0, width) x [0, height)`; signed arguments so that negative
    /// queries are rejected rather than wrapped.
    pub fn cell_state(&self, x: i64, y: i64) -> Result<CellState> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Err(ErrorKind::OutOfRange(x, y).into());
        }
        let coord = GridCoordinate::new(x as u32, y as u32);
        Ok(CellState {
            north: self.is_neighbour_linked(coord, Direction::North),
            south: self.is_neighbour_linked(coord, Direction::South),
            east: self.is_neighbour_linked(coord, Direction::East),
            west: self.is_neighbour_linked(coord, Direction::West),
        })
    }

    /// Open the shared wall between two edge-adjacent cells.
    ///
    /// Self links, links involving an out of range coordinate and links
    /// between cells that do not share a wall are ignored.
    pub fn link(&mut self, a: GridCoordinate, b: GridCoordinate) {
        let adjacent = (i64::from(a.x) - i64::from(b.x)).abs()
            + (i64::from(a.y) - i64::from(b.y)).abs() == 1;
        if adjacent && self.is_valid_coordinate(a) && self.is_valid_coordinate(b) {
            let a_index = self.grid_coordinate_graph_index(a);
            let b_index = self.grid_coordinate_graph_index(b);
            let _ = self.graph.update_edge(a_index, b_index, ());
        }
    }

    /// Close the wall between two cells, if a passage exists between them.
    /// Returns true if an unlink occurred.
    pub fn unlink(&mut self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return false;
        }
        let a_index = self.grid_coordinate_graph_index(a);
        let b_index = self.grid_coordinate_graph_index(b);
        if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
            // This will invalidate the last edge index in the graph, which is
            // fine as we are not storing them for any reason.
            self.graph.remove_edge(edge_index);
            return true;
        }
        false
    }

    /// Cells that are joined to `coord` by a carved passage.
    pub fn links(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        if !self.is_valid_coordinate(coord) {
            return CoordinateSmallVec::new();
        }
        self.graph
            .neighbors(self.grid_coordinate_graph_index(coord))
            .map(|node_index| self.index_to_grid_coordinate(node_index.index()))
            .collect()
    }

    /// Cells adjacent to `coord` in the grid, linked by a passage or not.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        ALL_DIRECTIONS
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[Direction])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|&direction| self.neighbour_at_direction(coord, direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: Direction)
                                  -> Option<GridCoordinate> {
        offset_coordinate(coord, direction).filter(|&c| self.is_valid_coordinate(c))
    }

    /// Are two cells in the grid joined by a carved passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return false;
        }
        let a_index = self.grid_coordinate_graph_index(a);
        let b_index = self.grid_coordinate_graph_index(b);
        self.graph.find_edge(a_index, b_index).is_some()
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    pub fn random_cell(&self, rng: &mut XorShiftRng) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        self.index_to_grid_coordinate(index)
    }

    /// Close every wall and forget that the grid was ever generated. Every
    /// generation strategy starts from this state.
    pub fn reset(&mut self) {
        self.graph.clear_edges();
        self.generated = false;
    }

    /// Truncate or pad the grid to the new dimensions.
    ///
    /// Wall state over the overlapping rectangle is preserved, cells gained
    /// by growing start fully walled, cells lost to shrinking are discarded.
    /// Connectivity broken by truncation is not repaired - regenerate to get
    /// a valid maze again.
    ///
    /// Fails with `InvalidDimension` (grid untouched) if either new dimension
    /// is even or below 3.
    pub fn resize(&mut self, width: Width, height: Height) -> Result<()> {
        validate_dimensions(width, height)?;

        let (NodesCount(nodes), EdgesCount(edges)) = graph_size(width.0, height.0);
        let mut new_graph = Graph::with_capacity(nodes, edges);
        for _ in 0..nodes {
            let _ = new_graph.add_node(());
        }

        let in_overlap = |coord: GridCoordinate| {
            (coord.x as usize) < width.0 && (coord.y as usize) < height.0
        };
        for edge in self.graph.raw_edges() {
            let a = self.index_to_grid_coordinate(edge.source().index());
            let b = self.index_to_grid_coordinate(edge.target().index());
            if in_overlap(a) && in_overlap(b) {
                let a_index = graph::NodeIndex::new((a.y as usize) * width.0 + a.x as usize);
                let b_index = graph::NodeIndex::new((b.y as usize) * width.0 + b.x as usize);
                let _ = new_graph.update_edge(a_index, b_index, ());
            }
        }

        self.graph = new_graph;
        self.width = width.0;
        self.height = height.0;
        Ok(())
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            width: self.width,
            cells_count: self.size(),
        }
    }

    pub fn iter_row(&self) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Row,
            current_index: 0,
            width: self.width,
            height: self.height,
        }
    }

    pub fn iter_column(&self) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Column,
            current_index: 0,
            width: self.width,
            height: self.height,
        }
    }

    /// Every carved passage as a coordinate pair, in no particular order.
    pub fn iter_links(&self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + '_ {
        self.graph.raw_edges().iter().map(move |edge| {
            (self.index_to_grid_coordinate(edge.source().index()),
             self.index_to_grid_coordinate(edge.target().index()))
        })
    }

    /// Is the grid coordinate within the grid's dimensions?
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    /// Row major index of a valid grid coordinate.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some((coord.y as usize) * self.width + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> GridCoordinate {
        let y = index / self.width;
        let x = index - y * self.width;
        GridCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    fn grid_coordinate_graph_index(&self, coord: GridCoordinate) -> graph::NodeIndex<u32> {
        let raw = (coord.y as usize) * self.width + coord.x as usize;
        graph::NodeIndex::new(raw)
    }
}

fn validate_dimensions(width: Width, height: Height) -> Result<()> {
    let ok = |n: usize| n >= 3 && n % 2 == 1;
    if ok(width.0) && ok(height.0) {
        Ok(())
    } else {
        Err(ErrorKind::InvalidDimension(width.0, height.0).into())
    }
}

fn graph_size(width: usize, height: usize) -> (NodesCount, EdgesCount) {
    let cells_count = width * height;
    // Probably overkill, but don't want any capacity panics.
    let edges_count_hint = 4 * cells_count - 4 * cmp::max(width, height);
    (NodesCount(cells_count), EdgesCount(edges_count_hint))
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    width: usize,
    cells_count: usize,
}
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let y = self.current_cell_number / self.width;
            let x = self.current_cell_number - y * self.width;
            self.current_cell_number += 1;
            Some(GridCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    width: usize,
    height: usize,
}
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let (batches, batch_size) = match self.iter_type {
            BatchIterType::Row => (self.height, self.width),
            BatchIterType::Column => (self.width, self.height),
        };
        if self.current_index < batches {
            let coords = (0..batch_size)
                .map(|i| {
                    if let BatchIterType::Row = self.iter_type {
                        GridCoordinate::new(i as u32, self.current_index as u32)
                    } else {
                        GridCoordinate::new(self.current_index as u32, i as u32)
                    }
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::errors::Error;
    use itertools::Itertools;

    fn small_grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("valid test dimensions")
    }

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    // SmallVec really ruins the syntax ergonomics, hence this macro.
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    fn assert_invalid_dimension(result: std::result::Result<Grid, Error>) {
        match result {
            Err(Error(ErrorKind::InvalidDimension(..), _)) => (),
            other => panic!("expected InvalidDimension, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn construction_rejects_even_dimensions() {
        assert_invalid_dimension(Grid::new(Width(4), Height(5)));
        assert_invalid_dimension(Grid::new(Width(5), Height(4)));
        assert_invalid_dimension(Grid::new(Width(10), Height(10)));
    }

    #[test]
    fn construction_rejects_sub_three_dimensions() {
        assert_invalid_dimension(Grid::new(Width(1), Height(5)));
        assert_invalid_dimension(Grid::new(Width(5), Height(1)));
        assert_invalid_dimension(Grid::new(Width(0), Height(0)));
    }

    #[test]
    fn construction_accepts_odd_dimensions() {
        for n in &[3usize, 5, 7, 31, 63] {
            let g = small_grid(*n, *n);
            assert_eq!(g.size(), n * n);
            assert_eq!(g.links_count(), 0);
            assert!(!g.is_generated());
        }
    }

    #[test]
    fn fresh_grid_is_fully_walled() {
        let g = small_grid(5, 3);
        for coord in g.iter() {
            let state = g.cell_state(coord.x as i64, coord.y as i64).unwrap();
            assert_eq!(state.open_passages(), 0);
        }
    }

    #[test]
    fn cell_state_out_of_range() {
        let g = small_grid(5, 3);
        assert!(g.cell_state(-1, 0).is_err());
        assert!(g.cell_state(0, -1).is_err());
        assert!(g.cell_state(5, 0).is_err());
        assert!(g.cell_state(0, 3).is_err());
        assert!(g.cell_state(4, 2).is_ok());
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(9, 9);

        let check_expected_neighbours = |coord, expected_neighbours: &[GridCoordinate]| {
            let neighbours: Vec<GridCoordinate> =
                g.neighbours(coord).iter().cloned().sorted().collect();
            let expected: Vec<GridCoordinate> =
                expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(8, 0), &[gc(7, 0), gc(8, 1)]);
        check_expected_neighbours(gc(0, 8), &[gc(0, 7), gc(1, 8)]);
        check_expected_neighbours(gc(8, 8), &[gc(8, 7), gc(7, 8)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_grid(3, 3);
        let check_neighbour = |coord, dir: Direction, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), Direction::North, None);
        check_neighbour(gc(0, 0), Direction::South, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), Direction::East, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), Direction::West, None);

        check_neighbour(gc(2, 2), Direction::North, Some(gc(2, 1)));
        check_neighbour(gc(2, 2), Direction::South, None);
        check_neighbour(gc(2, 2), Direction::East, None);
        check_neighbour(gc(2, 2), Direction::West, Some(gc(1, 2)));
    }

    #[test]
    fn linking_cells() {
        let mut g = small_grid(5, 5);
        let a = gc(0, 1);
        let b = gc(0, 2);
        let c = gc(0, 3);

        let sorted_links = |grid: &Grid, coord| -> Vec<GridCoordinate> {
            grid.links(coord).iter().cloned().sorted().collect()
        };
        macro_rules! links_sorted {
            ($x:expr) => (sorted_links(&g, $x))
        }
        // The order of the arguments to `is_linked` does not matter
        macro_rules! bi_check_linked {
            ($x:expr, $y:expr) => (g.is_linked($x, $y) && g.is_linked($y, $x))
        }

        assert!(!bi_check_linked!(a, b));
        assert!(!bi_check_linked!(b, c));
        assert_eq!(links_sorted!(a), vec![]);

        g.link(a, b);
        assert!(bi_check_linked!(a, b));
        assert_eq!(links_sorted!(a), vec![b]);
        assert_eq!(links_sorted!(b), vec![a]);

        g.link(b, c);
        assert!(bi_check_linked!(a, b));
        assert!(bi_check_linked!(b, c));
        assert!(!bi_check_linked!(a, c));
        assert_eq!(links_sorted!(b), vec![a, c]);

        let is_ab_unlinked = g.unlink(a, b);
        assert!(is_ab_unlinked);
        assert!(!bi_check_linked!(a, b));
        assert!(bi_check_linked!(b, c));
        assert_eq!(links_sorted!(a), vec![]);
        assert_eq!(links_sorted!(b), vec![c]);
    }

    #[test]
    fn no_self_linked_cycles() {
        let mut g = small_grid(5, 5);
        let a = gc(0, 0);
        g.link(a, a);
        assert!(g.links(a).is_empty());
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn no_links_to_invalid_coordinates() {
        let mut g = small_grid(5, 5);
        let good = gc(0, 0);
        let invalid = gc(100, 100);
        g.link(good, invalid);
        assert!(g.links(good).is_empty());
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn no_links_between_non_adjacent_cells() {
        let mut g = small_grid(5, 5);
        g.link(gc(0, 0), gc(2, 0));
        g.link(gc(0, 0), gc(1, 1));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn no_parallel_duplicated_linked_cells() {
        let mut g = small_grid(5, 5);
        let a = gc(0, 0);
        let b = gc(0, 1);
        g.link(a, b);
        g.link(a, b);
        assert_smallvec_eq!(g.links(a), &[b]);
        assert_smallvec_eq!(g.links(b), &[a]);
        assert_eq!(g.links_count(), 1);
    }

    #[test]
    fn cell_state_reports_open_walls() {
        let mut g = small_grid(3, 3);
        let centre = gc(1, 1);
        g.link(centre, gc(1, 0));
        g.link(centre, gc(2, 1));

        let state = g.cell_state(1, 1).unwrap();
        assert!(state.north);
        assert!(state.east);
        assert!(!state.south);
        assert!(!state.west);
        assert_eq!(state.open_passages(), 2);
        assert!(!state.is_dead_end());

        let neighbour_state = g.cell_state(1, 0).unwrap();
        assert!(neighbour_state.south);
        assert!(neighbour_state.is_dead_end());
    }

    #[test]
    fn reset_closes_all_walls() {
        let mut g = small_grid(3, 3);
        g.link(gc(0, 0), gc(1, 0));
        g.link(gc(1, 0), gc(1, 1));
        g.mark_generated();
        assert_eq!(g.links_count(), 2);

        g.reset();
        assert_eq!(g.links_count(), 0);
        assert!(!g.is_generated());
    }

    #[test]
    fn cell_iter() {
        let g = small_grid(3, 3);
        let coords: Vec<GridCoordinate> = g.iter().collect();
        assert_eq!(coords.len(), 9);
        assert_eq!(coords[0], gc(0, 0));
        assert_eq!(coords[1], gc(1, 0));
        assert_eq!(coords[3], gc(0, 1));
        assert_eq!(coords[8], gc(2, 2));
    }

    #[test]
    fn row_iter() {
        let g = small_grid(3, 5);
        let rows: Vec<Vec<GridCoordinate>> = g.iter_row().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], vec![gc(0, 0), gc(1, 0), gc(2, 0)]);
        assert_eq!(rows[4], vec![gc(0, 4), gc(1, 4), gc(2, 4)]);
    }

    #[test]
    fn column_iter() {
        let g = small_grid(3, 5);
        let columns: Vec<Vec<GridCoordinate>> = g.iter_column().collect();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].len(), 5);
        assert_eq!(columns[2], vec![gc(2, 0), gc(2, 1), gc(2, 2), gc(2, 3), gc(2, 4)]);
    }

    #[test]
    fn resize_rejects_bad_dimensions() {
        let mut g = small_grid(5, 5);
        g.link(gc(0, 0), gc(1, 0));
        assert!(g.resize(Width(4), Height(5)).is_err());
        assert!(g.resize(Width(5), Height(1)).is_err());
        // Untouched on failure.
        assert_eq!(g.width(), 5);
        assert_eq!(g.height(), 5);
        assert_eq!(g.links_count(), 1);
    }

    #[test]
    fn resize_preserves_overlap() {
        let mut g = small_grid(5, 5);
        g.link(gc(0, 0), gc(1, 0));
        g.link(gc(1, 0), gc(1, 1));
        g.link(gc(4, 4), gc(3, 4));

        g.resize(Width(3), Height(3)).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert!(g.is_linked(gc(0, 0), gc(1, 0)));
        assert!(g.is_linked(gc(1, 0), gc(1, 1)));
        // The carve near the old far corner is gone with its cells.
        assert_eq!(g.links_count(), 2);

        g.resize(Width(7), Height(7)).unwrap();
        assert!(g.is_linked(gc(0, 0), gc(1, 0)));
        assert!(g.is_linked(gc(1, 0), gc(1, 1)));
        // Newly added cells start fully walled.
        for y in 0..7 {
            let state = g.cell_state(6, y).unwrap();
            assert_eq!(state.open_passages(), 0);
        }
    }

    #[test]
    fn resize_drops_links_crossing_the_overlap_boundary() {
        let mut g = small_grid(5, 5);
        g.link(gc(2, 0), gc(3, 0));
        g.resize(Width(3), Height(5)).unwrap();
        let state = g.cell_state(2, 0).unwrap();
        assert_eq!(state.open_passages(), 0);
    }

    #[test]
    fn random_cell_in_bounds() {
        use rand::SeedableRng;
        let g = small_grid(5, 3);
        let mut rng = XorShiftRng::seed_from_u64(99);
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }
}
