//! Provides constants for the library.

/// Thickness of a wall emitted for a closed internal edge
pub const WALL_THICKNESS: f32 = 5.0;
/// Thickness of the four walls framing the play area
pub const BOUNDARY_THICKNESS: f32 = 3.0;
/// Size of the goal relative to a cell
pub const GOAL_SCALE: f32 = 0.7;
/// The actor's radius is the smaller cell dimension divided by this
pub const ACTOR_RADIUS_DIVISOR: f32 = 4.0;

/// Default number of cell rows
pub const DEFAULT_ROWS: usize = 18;
/// Default number of cell columns
pub const DEFAULT_COLS: usize = 20;
/// Default play area width, in world units
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1200.0;
/// Default play area height, in world units
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 900.0;

/// Velocity added to the actor per key press, in world units per second
pub const KEY_VELOCITY_STEP: f32 = 300.0;
/// Downward gravity switched on once the goal is reached
pub const WIN_GRAVITY: f32 = 600.0;
/// Density of the actor's collider
pub const ACTOR_DENSITY: f32 = 1.0;
