//! Turns a finished maze into world-space rectangles for a renderer or physics engine.

use crate::constants::{ACTOR_RADIUS_DIVISOR, BOUNDARY_THICKNESS, GOAL_SCALE, WALL_THICKNESS};
use crate::grid::{Edge, GridConfig, MazeError, WallState};
use log::debug;
use rapier2d::na::Point2;
use serde::{Deserialize, Serialize};

/// Number of walls framing the play area, always first in [`MazeLayout::obstacles`]
pub const BOUNDARY_WALLS: usize = 4;

/// What an [`Obstacle`] represents
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// A wall the actor can't pass
    Wall,
    /// The target the actor is trying to reach
    Goal,
}

/// An axis-aligned rectangle, positioned by its center
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Wall or goal
    pub kind: ObstacleKind,
    /// Center of the rectangle
    pub center: Point2<f32>,
    /// Extent along x
    pub width: f32,
    /// Extent along y
    pub height: f32,
}

impl Obstacle {
    fn wall(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind: ObstacleKind::Wall,
            center: Point2::new(x, y),
            width,
            height,
        }
    }
}

/// The circular token the player moves
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorToken {
    /// Spawn position
    pub center: Point2<f32>,
    /// Radius of the token
    pub radius: f32,
}

/// Everything a renderer needs to draw one maze
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeLayout {
    /// Width of the play area
    pub width: f32,
    /// Height of the play area
    pub height: f32,
    /// Boundary walls, then internal walls, then the goal
    pub obstacles: Vec<Obstacle>,
    /// The player's token
    pub actor: ActorToken,
}

impl MazeLayout {
    /// All obstacles of the given kind
    pub fn of_kind(&self, kind: ObstacleKind) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter().filter(move |o| o.kind == kind)
    }

    /// The goal, if one was emitted
    pub fn goal(&self) -> Option<&Obstacle> {
        self.of_kind(ObstacleKind::Goal).next()
    }

    /// The walls framing the play area
    pub fn boundary(&self) -> &[Obstacle] {
        &self.obstacles[..BOUNDARY_WALLS.min(self.obstacles.len())]
    }

    /// Walls inside the play area, one per closed edge
    pub fn interior_walls(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles
            .iter()
            .skip(BOUNDARY_WALLS)
            .filter(|o| o.kind == ObstacleKind::Wall)
    }
}

/// Emit the obstacles for a carved maze.
///
/// One wall per closed internal edge, four walls framing the play area, a goal in the far
/// corner cell and the actor in the near corner cell. Pure and deterministic.
///
/// Fails with [`MazeError::InvalidConfig`] when `walls` was built for a different grid size
/// than `config`.
///
/// # Examples
///
/// ```
/// use mazeball::geometry::{emit, ObstacleKind};
/// use mazeball::grid::{GridConfig, WallState};
///
/// let config = GridConfig::new(1, 1, 40.0, 40.0).unwrap();
/// let layout = emit(&WallState::new(&config), &config).unwrap();
/// assert_eq!(layout.of_kind(ObstacleKind::Wall).count(), 4);
/// assert_eq!(layout.actor.radius, 10.0);
/// ```
pub fn emit(walls: &WallState, config: &GridConfig) -> Result<MazeLayout, MazeError> {
    if (walls.rows(), walls.cols()) != (config.rows(), config.cols()) {
        return Err(MazeError::InvalidConfig(format!(
            "walls are {}x{} but the grid is {}x{}",
            walls.rows(),
            walls.cols(),
            config.rows(),
            config.cols()
        )));
    }

    let (cw, ch) = (config.cell_width(), config.cell_height());
    let (width, height) = (config.width(), config.height());

    let mut obstacles = vec![
        Obstacle::wall(width / 2.0, 0.0, width, BOUNDARY_THICKNESS),
        Obstacle::wall(width / 2.0, height, width, BOUNDARY_THICKNESS),
        Obstacle::wall(0.0, height / 2.0, BOUNDARY_THICKNESS, height),
        Obstacle::wall(width, height / 2.0, BOUNDARY_THICKNESS, height),
    ];

    for edge in walls.closed_edges() {
        obstacles.push(match edge {
            Edge::Horizontal { row, col } => Obstacle::wall(
                col as f32 * cw + cw / 2.0,
                (row + 1) as f32 * ch,
                cw,
                WALL_THICKNESS,
            ),
            Edge::Vertical { row, col } => Obstacle::wall(
                (col + 1) as f32 * cw,
                row as f32 * ch + ch / 2.0,
                WALL_THICKNESS,
                ch,
            ),
        });
    }

    obstacles.push(Obstacle {
        kind: ObstacleKind::Goal,
        center: Point2::new(width - cw / 2.0, height - ch / 2.0),
        width: cw * GOAL_SCALE,
        height: ch * GOAL_SCALE,
    });

    debug!("Emitted {} obstacles", obstacles.len());

    Ok(MazeLayout {
        width,
        height,
        obstacles,
        actor: ActorToken {
            center: Point2::new(cw / 2.0, ch / 2.0),
            radius: cw.min(ch) / ACTOR_RADIUS_DIVISOR,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carving::{generate, FixedOrder, RandomOrder};
    use crate::grid::{Cell, Direction};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn single_cell_layout() {
        let config = GridConfig::new(1, 1, 100.0, 80.0).unwrap();
        let maze = generate(config, &mut RandomOrder::new(StdRng::seed_from_u64(0))).unwrap();
        let layout = emit(maze.walls(), &config).unwrap();

        assert_eq!(layout.obstacles.len(), 5);
        assert_eq!(layout.of_kind(ObstacleKind::Wall).count(), 4);

        let goal = layout.goal().unwrap();
        assert_eq!(goal.center, Point2::new(50.0, 40.0));
        assert!((goal.width - 70.0).abs() < 1e-4);
        assert!((goal.height - 56.0).abs() < 1e-4);

        assert_eq!(layout.actor.center, Point2::new(50.0, 40.0));
        assert_eq!(layout.actor.radius, 20.0);
    }

    #[test]
    fn boundary_frames_play_area() {
        let config = GridConfig::new(3, 4, 10.0, 20.0).unwrap();
        let layout = emit(&WallState::new(&config), &config).unwrap();
        let boundary = layout.boundary();

        assert_eq!(layout.width, 40.0);
        assert_eq!(layout.height, 60.0);
        assert_eq!(boundary[0], Obstacle::wall(20.0, 0.0, 40.0, BOUNDARY_THICKNESS));
        assert_eq!(boundary[1], Obstacle::wall(20.0, 60.0, 40.0, BOUNDARY_THICKNESS));
        assert_eq!(boundary[2], Obstacle::wall(0.0, 30.0, BOUNDARY_THICKNESS, 60.0));
        assert_eq!(boundary[3], Obstacle::wall(40.0, 30.0, BOUNDARY_THICKNESS, 60.0));
    }

    #[test]
    fn wall_count_matches_closed_edges() {
        for (rows, cols) in [(1, 5), (4, 4), (9, 13)] {
            let config = GridConfig::new(rows, cols, 10.0, 10.0).unwrap();
            let maze =
                generate(config, &mut RandomOrder::new(StdRng::seed_from_u64(17))).unwrap();
            let walls = maze.walls();
            let layout = emit(walls, &config).unwrap();

            let vertical_total = rows * (cols - 1);
            let horizontal_total = (rows - 1) * cols;
            let open_vertical: usize = walls
                .verticals()
                .iter()
                .map(|r| r.iter().filter(|&&o| o).count())
                .sum();
            let open_horizontal: usize = walls
                .horizontals()
                .iter()
                .map(|r| r.iter().filter(|&&o| o).count())
                .sum();

            assert_eq!(
                layout.of_kind(ObstacleKind::Wall).count(),
                (vertical_total - open_vertical) + (horizontal_total - open_horizontal) + 4
            );
            assert_eq!(layout.of_kind(ObstacleKind::Goal).count(), 1);
        }
    }

    #[test]
    fn closed_edges_become_walls() {
        let config = GridConfig::new(2, 2, 10.0, 20.0).unwrap();
        let mut order = FixedOrder {
            start: Cell::new(0, 0),
            directions: [
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Up,
            ],
        };
        let maze = generate(config, &mut order).unwrap();
        let layout = emit(maze.walls(), &config).unwrap();

        // only the horizontal edge under (0, 0) stays closed
        let internal: Vec<_> = layout.interior_walls().copied().collect();
        assert_eq!(internal, [Obstacle::wall(5.0, 20.0, 10.0, WALL_THICKNESS)]);
    }

    #[test]
    fn vertical_wall_placement() {
        let config = GridConfig::new(2, 3, 10.0, 20.0).unwrap();
        let walls = WallState::new(&config);
        let layout = emit(&walls, &config).unwrap();
        let internal = &layout.obstacles[4..layout.obstacles.len() - 1];

        // horizontals (row 0, cols 0..3) then verticals (rows 0..2, cols 0..2)
        assert_eq!(internal.len(), 7);
        assert_eq!(internal[0], Obstacle::wall(5.0, 20.0, 10.0, WALL_THICKNESS));
        assert_eq!(internal[2], Obstacle::wall(25.0, 20.0, 10.0, WALL_THICKNESS));
        assert_eq!(internal[3], Obstacle::wall(10.0, 10.0, WALL_THICKNESS, 20.0));
        assert_eq!(internal[6], Obstacle::wall(20.0, 30.0, WALL_THICKNESS, 20.0));
    }

    #[test]
    fn emit_is_deterministic() {
        let config = GridConfig::new(6, 6, 12.0, 12.0).unwrap();
        let maze = generate(config, &mut RandomOrder::new(StdRng::seed_from_u64(4))).unwrap();
        assert_eq!(
            emit(maze.walls(), &config).unwrap(),
            emit(maze.walls(), &config).unwrap()
        );
    }

    #[test]
    fn mismatched_walls_are_rejected() {
        let small = GridConfig::new(2, 2, 10.0, 10.0).unwrap();
        let large = GridConfig::new(5, 5, 10.0, 10.0).unwrap();
        assert!(matches!(
            emit(&WallState::new(&small), &large),
            Err(MazeError::InvalidConfig(_))
        ));

        let wide = GridConfig::new(2, 3, 10.0, 10.0).unwrap();
        assert!(emit(&WallState::new(&small), &wide).is_err());
    }
}
