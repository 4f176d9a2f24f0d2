use crate::error::GridError;
use rand::{Rng, SeedableRng};
use std::fmt;

/// The built-in maze. `#` wall, `.` food, `G` ghost spawn, `P` Pac-Man spawn.
pub const CLASSIC_LAYOUT: &str = "\
###################
#........#........#
#.##.###.#.###.##.#
#.................#
#.##.#.#####.#.##.#
#....#...#...#....#
####.### # ###.####
####.#       #.####
####.# ## ## #.####
#   .  #GGGG#  .  #
####.# ##### #.####
####.#       #.####
####.# ##### #.####
#........#........#
#.##.###.#.###.##.#
#..#.....P.....#..#
##.#.#.#####.#.#.##
#....#...#...#....#
#.######.#.######.#
#.................#
###################";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Manhattan distance, the A* heuristic on a 4-connected grid.
pub fn manhattan(a: Position, b: Position) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Food,
    GhostSpawn,
    PacmanSpawn,
}

impl Cell {
    pub fn is_walkable(self) -> bool {
        self != Cell::Wall
    }

    /// Accepts the character layout as well as numeric level codes.
    pub fn from_char(ch: char) -> Option<Cell> {
        match ch {
            ' ' | '0' => Some(Cell::Empty),
            '#' | '1' => Some(Cell::Wall),
            '.' | '2' => Some(Cell::Food),
            'G' | '4' => Some(Cell::GhostSpawn),
            'P' | '5' => Some(Cell::PacmanSpawn),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Food => '.',
            Cell::GhostSpawn => 'G',
            Cell::PacmanSpawn => 'P',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Neighbour expansion order shared by every search strategy.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn parse(layout: &str) -> Result<Self, GridError> {
        let mut lines: Vec<&str> = layout.lines().map(|line| line.trim_end_matches('\r')).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let leading = lines.iter().take_while(|line| line.is_empty()).count();
        lines.drain(..leading);

        let width = lines.first().map(|l| l.chars().count()).ok_or(GridError::Empty)?;
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut rows = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            let row = line
                .chars()
                .enumerate()
                .map(|(x, ch)| Cell::from_char(ch).ok_or(GridError::UnknownCell { ch, x, y }))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        Ok(Grid {
            width,
            height: rows.len(),
            rows,
        })
    }

    pub fn classic() -> Self {
        Grid::parse(CLASSIC_LAYOUT).expect("built-in layout is well formed")
    }

    /// Open field with up to `num_walls` randomly scattered walls, four ghost
    /// spawns in the top-left corner and the Pac-Man spawn in the bottom-right
    /// one. Walls only land inside the outer ring, so the border stays open.
    /// Every other open cell holds food.
    pub fn random(width: usize, height: usize, num_walls: usize, seed: u64) -> Self {
        let width = width.max(3);
        let height = height.max(3);
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut rows = vec![vec![Cell::Food; width]; height];

        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            rows[y][x] = Cell::GhostSpawn;
        }
        rows[height - 1][width - 1] = Cell::PacmanSpawn;

        let interior_food = (1..height - 1)
            .flat_map(|y| (1..width - 1).map(move |x| (x, y)))
            .filter(|&(x, y)| rows[y][x] == Cell::Food)
            .count();
        let num_walls = num_walls.min(interior_food);

        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < num_walls && attempts < num_walls.saturating_mul(3) {
            let x = rng.gen_range(1..width - 1);
            let y = rng.gen_range(1..height - 1);
            if rows[y][x] == Cell::Food {
                rows[y][x] = Cell::Wall;
                walls_placed += 1;
            }
            attempts += 1;
        }

        Grid {
            width,
            height,
            rows,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.rows.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_walkable)
    }

    /// The cell one step away in `dir`, if it lies inside the grid.
    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.offset();
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        let next = Position::new(x, y);
        self.in_bounds(next).then_some(next)
    }

    /// Walkable 4-neighbours in Up, Right, Down, Left order.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.step(pos, dir))
            .filter(|&next| self.is_walkable(next))
            .collect()
    }

    pub fn pacman_spawn(&self) -> Option<Position> {
        self.positions_of(Cell::PacmanSpawn).next()
    }

    /// Ghost spawns in row-major order.
    pub fn ghost_spawns(&self) -> Vec<Position> {
        self.positions_of(Cell::GhostSpawn).collect()
    }

    fn positions_of(&self, wanted: Cell) -> impl Iterator<Item = Position> + '_ {
        self.rows.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(move |(_, &cell)| cell == wanted)
                .map(move |(x, _)| Position::new(x, y))
        })
    }

    /// Clears food at `pos`. Returns whether there was any.
    pub fn eat_food(&mut self, pos: Position) -> bool {
        match self.rows.get_mut(pos.y).and_then(|row| row.get_mut(pos.x)) {
            Some(cell) if *cell == Cell::Food => {
                *cell = Cell::Empty;
                true
            }
            _ => false,
        }
    }

    pub fn food_remaining(&self) -> usize {
        self.positions_of(Cell::Food).count()
    }

    pub fn has_food_left(&self) -> bool {
        self.positions_of(Cell::Food).next().is_some()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().map(|cell| cell.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
