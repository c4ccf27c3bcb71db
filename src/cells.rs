use rand::Rng;
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;

#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}
impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<GridCoordinate>; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

pub const ALL_DIRECTIONS: [Direction; 4] =
    [Direction::North, Direction::South, Direction::East, Direction::West];

/// The coordinate one cell away in the given direction, or None when that
/// would leave the first quadrant. Grid bounds are checked by the grid, not
/// here.
pub fn offset_coordinate(coord: GridCoordinate, dir: Direction) -> Option<GridCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        Direction::North => {
            if y > 0 {
                Some(GridCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        Direction::South => Some(GridCoordinate { x, y: y + 1 }),
        Direction::East => Some(GridCoordinate { x: x + 1, y }),
        Direction::West => {
            if x > 0 {
                Some(GridCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

pub fn rand_vertical_direction(rng: &mut XorShiftRng) -> Direction {
    if rng.gen() {
        Direction::North
    } else {
        Direction::South
    }
}

pub fn rand_horizontal_direction(rng: &mut XorShiftRng) -> Direction {
    if rng.gen() {
        Direction::East
    } else {
        Direction::West
    }
}
