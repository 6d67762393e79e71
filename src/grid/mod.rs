//! Logical maze structs: grid configuration, visited cells and edge walls.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A cell location in the maze
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Row - increases downwards
    pub row: usize,
    /// Column - increases to the right
    pub col: usize,
}

impl Cell {
    /// Create a new Cell
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighboring cell in the given direction, or `None` if it would leave the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeball::grid::{Cell, Direction, GridConfig};
    ///
    /// let config = GridConfig::new(2, 2, 10.0, 10.0).unwrap();
    /// assert_eq!(Cell::new(0, 0).step(Direction::Right, &config), Some(Cell::new(0, 1)));
    /// assert_eq!(Cell::new(0, 0).step(Direction::Up, &config), None);
    /// ```
    pub fn step(self, direction: Direction, config: &GridConfig) -> Option<Cell> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Right => (self.row, self.col + 1),
            Direction::Down => (self.row + 1, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
        };
        if row >= config.rows || col >= config.cols {
            return None;
        }
        Some(Cell { row, col })
    }
}

/// Enum for direction values.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Direction {
    /// Up, or -row
    Up = 0,
    /// Right, or +col
    Right = 1,
    /// Down, or +row
    Down = 2,
    /// Left, or -col
    Left = 3,
}

impl Direction {
    /// All four directions, in up, right, down, left order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

/// The boundary between two adjacent cells.
///
/// The index of an edge is the top/left cell of the pair.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Edge {
    /// Between `(row, col)` and `(row, col + 1)`
    Vertical {
        /// Row shared by both cells
        row: usize,
        /// Column of the left cell
        col: usize,
    },
    /// Between `(row, col)` and `(row + 1, col)`
    Horizontal {
        /// Row of the upper cell
        row: usize,
        /// Column shared by both cells
        col: usize,
    },
}

impl Edge {
    /// The edge crossed when leaving `cell` in `direction`.
    ///
    /// Returns `None` when the move would leave the grid on the top or left; callers are
    /// expected to have bounds checked the far side already.
    pub fn between(cell: Cell, direction: Direction) -> Option<Edge> {
        Some(match direction {
            Direction::Up => Edge::Horizontal {
                row: cell.row.checked_sub(1)?,
                col: cell.col,
            },
            Direction::Down => Edge::Horizontal {
                row: cell.row,
                col: cell.col,
            },
            Direction::Left => Edge::Vertical {
                row: cell.row,
                col: cell.col.checked_sub(1)?,
            },
            Direction::Right => Edge::Vertical {
                row: cell.row,
                col: cell.col,
            },
        })
    }
}

/// Errors produced while building or querying a maze
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MazeError {
    /// The grid dimensions can't describe a maze
    #[error("Invalid maze config: {0}")]
    InvalidConfig(String),
    /// A cell or edge accessor was called with coordinates outside the grid
    #[error("{what} ({row}, {col}) is out of bounds")]
    OutOfBounds {
        /// Which structure was indexed
        what: &'static str,
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
    },
    /// A layout handed to the physics world has no goal obstacle
    #[error("Maze layout has no goal")]
    MissingGoal,
}

/// Immutable size of the maze: cell counts and the world size of each cell.
///
/// Only constructed through [`GridConfig::new`] or [`GridConfig::from_viewport`], so every
/// instance has at least one cell and positive cell dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridConfig {
    rows: usize,
    cols: usize,
    cell_width: f32,
    cell_height: f32,
}

impl GridConfig {
    /// Validate and create a new GridConfig
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeball::grid::{GridConfig, MazeError};
    ///
    /// assert!(GridConfig::new(3, 4, 10.0, 10.0).is_ok());
    /// assert!(matches!(
    ///     GridConfig::new(0, 4, 10.0, 10.0),
    ///     Err(MazeError::InvalidConfig(_))
    /// ));
    /// ```
    pub fn new(
        rows: usize,
        cols: usize,
        cell_width: f32,
        cell_height: f32,
    ) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidConfig(format!(
                "grid must have at least one row and column, got {rows}x{cols}"
            )));
        }
        // every cell and edge must be addressable by one allocation
        let cells = rows
            .checked_mul(cols)
            .filter(|&cells| cells <= isize::MAX as usize);
        if cells.and_then(|cells| cells.checked_mul(2)).is_none() {
            return Err(MazeError::InvalidConfig(format!(
                "grid of {rows}x{cols} cells is too large"
            )));
        }
        if !(cell_width.is_finite() && cell_width > 0.0) {
            return Err(MazeError::InvalidConfig(format!(
                "cell width must be positive, got {cell_width}"
            )));
        }
        if !(cell_height.is_finite() && cell_height > 0.0) {
            return Err(MazeError::InvalidConfig(format!(
                "cell height must be positive, got {cell_height}"
            )));
        }
        Ok(Self {
            rows,
            cols,
            cell_width,
            cell_height,
        })
    }

    /// Fit `rows` x `cols` cells into a `width` x `height` viewport
    pub fn from_viewport(
        rows: usize,
        cols: usize,
        width: f32,
        height: f32,
    ) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidConfig(format!(
                "grid must have at least one row and column, got {rows}x{cols}"
            )));
        }
        Self::new(rows, cols, width / cols as f32, height / rows as f32)
    }

    /// Number of cell rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Width of one cell in world units
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of one cell in world units
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Width of the whole play area
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.cell_width
    }

    /// Height of the whole play area
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }

    fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }
}

/// Visited flags for every cell of the grid
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    visited: Vec<bool>,
}

impl CellGrid {
    /// Create a grid where no cell has been visited
    pub fn new(config: &GridConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            visited: vec![false; config.cell_count()],
        }
    }

    fn index(&self, cell: Cell) -> Result<usize, MazeError> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return Err(MazeError::OutOfBounds {
                what: "cell",
                row: cell.row,
                col: cell.col,
            });
        }
        Ok(cell.row * self.cols + cell.col)
    }

    /// Whether the cell has been visited
    pub fn is_visited(&self, cell: Cell) -> Result<bool, MazeError> {
        Ok(self.visited[self.index(cell)?])
    }

    /// Mark the cell as visited; marking twice has no further effect
    pub fn mark_visited(&mut self, cell: Cell) -> Result<(), MazeError> {
        let i = self.index(cell)?;
        self.visited[i] = true;
        Ok(())
    }

    /// Number of visited cells
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }
}

/// Open/closed state of every internal edge.
///
/// `verticals` is `rows x (cols - 1)`, `horizontals` is `(rows - 1) x cols`. Every edge
/// starts closed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct WallState {
    rows: usize,
    cols: usize,
    verticals: Vec<Vec<bool>>,
    horizontals: Vec<Vec<bool>>,
}

impl WallState {
    /// Create a wall state with every internal edge closed
    pub fn new(config: &GridConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            verticals: vec![vec![false; config.cols - 1]; config.rows],
            horizontals: vec![vec![false; config.cols]; config.rows - 1],
        }
    }

    /// Number of cell rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn slot(&self, edge: Edge) -> Result<(bool, usize, usize), MazeError> {
        let (vertical, row, col, in_bounds) = match edge {
            Edge::Vertical { row, col } => (true, row, col, row < self.rows && col + 1 < self.cols),
            Edge::Horizontal { row, col } => {
                (false, row, col, row + 1 < self.rows && col < self.cols)
            }
        };
        if !in_bounds {
            return Err(MazeError::OutOfBounds {
                what: if vertical {
                    "vertical edge"
                } else {
                    "horizontal edge"
                },
                row,
                col,
            });
        }
        Ok((vertical, row, col))
    }

    /// Whether the edge is passable
    pub fn is_open(&self, edge: Edge) -> Result<bool, MazeError> {
        let (vertical, row, col) = self.slot(edge)?;
        Ok(if vertical {
            self.verticals[row][col]
        } else {
            self.horizontals[row][col]
        })
    }

    /// Carve a passage through the edge
    pub fn open(&mut self, edge: Edge) -> Result<(), MazeError> {
        let (vertical, row, col) = self.slot(edge)?;
        if vertical {
            self.verticals[row][col] = true;
        } else {
            self.horizontals[row][col] = true;
        }
        Ok(())
    }

    /// Whether there is a passage leaving `cell` in `direction`.
    ///
    /// Moves off the grid are never open.
    pub fn can_move(&self, cell: Cell, direction: Direction) -> bool {
        Edge::between(cell, direction)
            .and_then(|edge| self.is_open(edge).ok())
            .unwrap_or(false)
    }

    /// The vertical edge matrix, indexed `[row][col]`
    pub fn verticals(&self) -> &Vec<Vec<bool>> {
        &self.verticals
    }

    /// The horizontal edge matrix, indexed `[row][col]`
    pub fn horizontals(&self) -> &Vec<Vec<bool>> {
        &self.horizontals
    }

    /// Number of internal edges, open or closed
    pub fn edge_count(&self) -> usize {
        self.rows * (self.cols - 1) + (self.rows - 1) * self.cols
    }

    /// Number of open edges
    pub fn open_count(&self) -> usize {
        self.verticals
            .iter()
            .chain(self.horizontals.iter())
            .map(|row| row.iter().filter(|&&open| open).count())
            .sum()
    }

    /// All open edges, horizontals first, each in row-major order
    pub fn open_edges(&self) -> Vec<Edge> {
        self.edges_where(true)
    }

    /// All closed edges, horizontals first, each in row-major order
    pub fn closed_edges(&self) -> Vec<Edge> {
        self.edges_where(false)
    }

    fn edges_where(&self, open: bool) -> Vec<Edge> {
        let mut edges = vec![];
        for (row, line) in self.horizontals.iter().enumerate() {
            for (col, &state) in line.iter().enumerate() {
                if state == open {
                    edges.push(Edge::Horizontal { row, col });
                }
            }
        }
        for (row, line) in self.verticals.iter().enumerate() {
            for (col, &state) in line.iter().enumerate() {
                if state == open {
                    edges.push(Edge::Vertical { row, col });
                }
            }
        }
        edges
    }
}

/// Everything mutated while carving a single maze
#[derive(Clone, Debug)]
pub struct MazeState {
    config: GridConfig,
    cells: CellGrid,
    walls: WallState,
}

impl MazeState {
    /// Fresh state: no cell visited, every edge closed
    pub fn new(config: GridConfig) -> Self {
        Self {
            cells: CellGrid::new(&config),
            walls: WallState::new(&config),
            config,
        }
    }

    /// The grid configuration
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Visited flags
    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    /// Edge state
    pub fn walls(&self) -> &WallState {
        &self.walls
    }

    /// Split borrow used by the carver
    pub(crate) fn parts_mut(&mut self) -> (&GridConfig, &mut CellGrid, &mut WallState) {
        (&self.config, &mut self.cells, &mut self.walls)
    }

    /// Give up the cell flags and keep only the finished walls
    pub fn into_walls(self) -> WallState {
        self.walls
    }

    /// Whether `cell` lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        self.config.contains(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: usize, cols: usize) -> GridConfig {
        GridConfig::new(rows, cols, 10.0, 10.0).unwrap()
    }

    #[test]
    fn config_rejects_empty_grids() {
        assert!(matches!(
            GridConfig::new(0, 3, 1.0, 1.0),
            Err(MazeError::InvalidConfig(_))
        ));
        assert!(matches!(
            GridConfig::new(3, 0, 1.0, 1.0),
            Err(MazeError::InvalidConfig(_))
        ));
        assert!(matches!(
            GridConfig::from_viewport(0, 0, 100.0, 100.0),
            Err(MazeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_rejects_bad_cell_sizes() {
        assert!(GridConfig::new(2, 2, 0.0, 1.0).is_err());
        assert!(GridConfig::new(2, 2, 1.0, -1.0).is_err());
        assert!(GridConfig::new(2, 2, f32::NAN, 1.0).is_err());
        assert!(GridConfig::new(2, 2, 1.0, f32::INFINITY).is_err());
    }

    #[test]
    fn config_from_viewport() {
        let c = GridConfig::from_viewport(18, 20, 1200.0, 900.0).unwrap();
        assert_eq!(c.cell_width(), 60.0);
        assert_eq!(c.cell_height(), 50.0);
        assert_eq!(c.width(), 1200.0);
        assert_eq!(c.height(), 900.0);
    }

    #[test]
    fn cell_grid_visits() {
        let mut cells = CellGrid::new(&config(2, 3));
        let cell = Cell::new(1, 2);
        assert_eq!(cells.is_visited(cell), Ok(false));
        cells.mark_visited(cell).unwrap();
        cells.mark_visited(cell).unwrap();
        assert_eq!(cells.is_visited(cell), Ok(true));
        assert_eq!(cells.visited_count(), 1);
    }

    #[test]
    fn cell_grid_out_of_bounds() {
        let mut cells = CellGrid::new(&config(2, 3));
        assert_eq!(
            cells.is_visited(Cell::new(2, 0)),
            Err(MazeError::OutOfBounds {
                what: "cell",
                row: 2,
                col: 0
            })
        );
        assert!(cells.mark_visited(Cell::new(0, 3)).is_err());
        assert_eq!(cells.visited_count(), 0);
    }

    #[test]
    fn wall_state_shapes() {
        let walls = WallState::new(&config(3, 4));
        assert_eq!(walls.verticals().len(), 3);
        assert_eq!(walls.verticals()[0].len(), 3);
        assert_eq!(walls.horizontals().len(), 2);
        assert_eq!(walls.horizontals()[0].len(), 4);
        assert_eq!(walls.edge_count(), 17);
        assert_eq!(walls.open_count(), 0);
        assert_eq!(walls.closed_edges().len(), 17);
    }

    #[test]
    fn single_cell_has_no_edges() {
        let walls = WallState::new(&config(1, 1));
        assert_eq!(walls.edge_count(), 0);
        assert!(walls.closed_edges().is_empty());
    }

    #[test]
    fn wall_state_open() {
        let mut walls = WallState::new(&config(2, 2));
        let edge = Edge::Vertical { row: 1, col: 0 };
        walls.open(edge).unwrap();
        assert_eq!(walls.is_open(edge), Ok(true));
        assert_eq!(walls.is_open(Edge::Horizontal { row: 0, col: 0 }), Ok(false));
        assert_eq!(walls.open_edges(), vec![edge]);
        assert!(walls.can_move(Cell::new(1, 0), Direction::Right));
        assert!(walls.can_move(Cell::new(1, 1), Direction::Left));
        assert!(!walls.can_move(Cell::new(1, 1), Direction::Right));
        assert!(!walls.can_move(Cell::new(0, 0), Direction::Up));
    }

    #[test]
    fn wall_state_out_of_bounds() {
        let mut walls = WallState::new(&config(2, 2));
        assert!(walls.open(Edge::Vertical { row: 0, col: 1 }).is_err());
        assert!(walls.open(Edge::Horizontal { row: 1, col: 0 }).is_err());
        assert_eq!(
            walls.is_open(Edge::Horizontal { row: 1, col: 0 }),
            Err(MazeError::OutOfBounds {
                what: "horizontal edge",
                row: 1,
                col: 0
            })
        );
        assert_eq!(walls.open_count(), 0);
    }

    #[test]
    fn edge_between_cells() {
        let cell = Cell::new(1, 1);
        assert_eq!(
            Edge::between(cell, Direction::Up),
            Some(Edge::Horizontal { row: 0, col: 1 })
        );
        assert_eq!(
            Edge::between(cell, Direction::Down),
            Some(Edge::Horizontal { row: 1, col: 1 })
        );
        assert_eq!(
            Edge::between(cell, Direction::Left),
            Some(Edge::Vertical { row: 1, col: 0 })
        );
        assert_eq!(
            Edge::between(cell, Direction::Right),
            Some(Edge::Vertical { row: 1, col: 1 })
        );
        assert_eq!(Edge::between(Cell::new(0, 0), Direction::Left), None);
    }

    #[test]
    fn cell_steps_stay_in_grid() {
        let c = config(2, 2);
        assert_eq!(Cell::new(1, 1).step(Direction::Down, &c), None);
        assert_eq!(Cell::new(1, 1).step(Direction::Right, &c), None);
        assert_eq!(
            Cell::new(1, 1).step(Direction::Up, &c),
            Some(Cell::new(0, 1))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            MazeError::OutOfBounds {
                what: "cell",
                row: 4,
                col: 5
            }
            .to_string(),
            "cell (4, 5) is out of bounds"
        );
        assert_eq!(
            MazeError::InvalidConfig("bad".to_string()).to_string(),
            "Invalid maze config: bad"
        );
        assert_eq!(MazeError::MissingGoal.to_string(), "Maze layout has no goal");
    }

    #[test]
    fn config_rejects_oversized_grids() {
        for (rows, cols) in [
            (usize::MAX / 2 + 1, 4),
            (1, usize::MAX),
            (usize::MAX, 1),
            (1 << 40, 1 << 40),
        ] {
            assert!(
                matches!(
                    GridConfig::new(rows, cols, 1.0, 1.0),
                    Err(MazeError::InvalidConfig(_))
                ),
                "{rows}x{cols} accepted"
            );
        }
        assert!(matches!(
            GridConfig::from_viewport(usize::MAX, 2, 10.0, 10.0),
            Err(MazeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn large_valid_grid_counts() {
        let config = config(1000, 3000);
        assert_eq!(config.cell_count(), 3_000_000);
        let walls = WallState::new(&config);
        assert_eq!(walls.edge_count(), 1000 * 2999 + 999 * 3000);
    }
}
