//! Randomized depth-first maze carving (the "recursive backtracker").
//!
//! The traversal keeps its own stack of frames on the heap, so maze size is limited by memory
//! rather than by the native call stack.

use crate::grid::{Cell, CellGrid, Direction, Edge, GridConfig, MazeError, MazeState};
use log::debug;
use rand::Rng;

/// Shuffle `items` in place so that every ordering is equally likely.
///
/// Fisher-Yates: position `i`, from the back down to 1, is swapped with a uniformly chosen
/// position in `0..=i`.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use mazeball::carving::shuffle;
///
/// let mut items = [1, 2, 3, 4];
/// shuffle(&mut items, &mut StdRng::seed_from_u64(7));
/// items.sort();
/// assert_eq!(items, [1, 2, 3, 4]);
/// ```
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Source of every random decision the carver makes
pub trait VisitOrder {
    /// Pick the cell carving starts from
    fn start_cell(&mut self, config: &GridConfig) -> Cell;

    /// Reorder the four neighbor directions of a freshly entered cell
    fn order(&mut self, directions: &mut [Direction; 4]);
}

/// Uniformly random start cell and neighbor order
pub struct RandomOrder<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomOrder<R> {
    /// Draw all decisions from `rng`
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> VisitOrder for RandomOrder<R> {
    fn start_cell(&mut self, config: &GridConfig) -> Cell {
        Cell::new(
            self.rng.gen_range(0..config.rows()),
            self.rng.gen_range(0..config.cols()),
        )
    }

    fn order(&mut self, directions: &mut [Direction; 4]) {
        shuffle(directions, &mut self.rng);
    }
}

/// A fixed start cell and the same neighbor order for every cell
#[derive(Clone, Copy, Debug)]
pub struct FixedOrder {
    /// Where carving starts
    pub start: Cell,
    /// The order neighbors are tried in
    pub directions: [Direction; 4],
}

impl VisitOrder for FixedOrder {
    fn start_cell(&mut self, _config: &GridConfig) -> Cell {
        self.start
    }

    fn order(&mut self, directions: &mut [Direction; 4]) {
        *directions = self.directions;
    }
}

struct Frame {
    cell: Cell,
    directions: [Direction; 4],
    next: usize,
}

/// Visit `cell` if it hasn't been yet: mark it and push a frame with a fresh neighbor order.
fn enter(
    cell: Cell,
    cells: &mut CellGrid,
    order: &mut impl VisitOrder,
    stack: &mut Vec<Frame>,
) -> Result<(), MazeError> {
    if cells.is_visited(cell)? {
        return Ok(());
    }
    cells.mark_visited(cell)?;
    let mut directions = Direction::ALL;
    order.order(&mut directions);
    stack.push(Frame {
        cell,
        directions,
        next: 0,
    });
    Ok(())
}

/// Carve a perfect maze into `state`, starting from the cell chosen by `order`.
///
/// Returns the opened edges in the order they were opened. Afterwards every cell is visited
/// and the open edges form a spanning tree of the grid.
pub fn carve(state: &mut MazeState, order: &mut impl VisitOrder) -> Result<Vec<Edge>, MazeError> {
    let (config, cells, walls) = state.parts_mut();
    let start = order.start_cell(config);

    let mut carved = Vec::with_capacity(config.cell_count() - 1);
    let mut stack: Vec<Frame> = Vec::new();

    enter(start, cells, order, &mut stack)?;

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.directions.len() {
            // backtrack
            stack.pop();
            continue;
        }
        let direction = frame.directions[frame.next];
        frame.next += 1;
        let current = frame.cell;

        let Some(neighbor) = current.step(direction, config) else {
            continue;
        };
        if cells.is_visited(neighbor)? {
            continue;
        }
        let Some(edge) = Edge::between(current, direction) else {
            continue;
        };
        walls.open(edge)?;
        carved.push(edge);
        enter(neighbor, cells, order, &mut stack)?;
    }

    debug!(
        "Carved {} edges over {}x{} cells starting from ({}, {})",
        carved.len(),
        config.rows(),
        config.cols(),
        start.row,
        start.col
    );

    Ok(carved)
}

/// Build a fresh [`MazeState`] for `config` and carve it.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use mazeball::carving::{generate, RandomOrder};
/// use mazeball::grid::GridConfig;
///
/// let config = GridConfig::new(4, 5, 10.0, 10.0).unwrap();
/// let maze = generate(config, &mut RandomOrder::new(StdRng::seed_from_u64(1))).unwrap();
/// assert_eq!(maze.walls().open_count(), 4 * 5 - 1);
/// ```
pub fn generate(config: GridConfig, order: &mut impl VisitOrder) -> Result<MazeState, MazeError> {
    let mut state = MazeState::new(config);
    carve(&mut state, order)?;
    Ok(state)
}
