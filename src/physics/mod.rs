//! Rigid-body playback of a maze layout: the actor rolls through the walls toward the goal

use crate::constants::{ACTOR_DENSITY, WIN_GRAVITY};
use crate::geometry::{MazeLayout, Obstacle, BOUNDARY_WALLS};
use crate::grid::MazeError;
use crate::input::{InputController, KeyEvent};
use log::info;
use rapier2d::dynamics::{IntegrationParameters, RigidBodySet};
use rapier2d::geometry::{BroadPhase, NarrowPhase};
use rapier2d::na::{Point2, Vector2};
use rapier2d::prelude::*;

/// Rapier interaction group representing all walls
const GROUP_WALL: u32 = 1;
/// Rapier interaction group representing the goal
const GROUP_GOAL: u32 = 2;
/// Rapier interaction group representing the actor
const GROUP_ACTOR: u32 = 4;

/// Runs a [`MazeLayout`] in a physics world
pub struct MazeSimulation {
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    query_pipeline: QueryPipeline,

    gravity: Vector2<f32>,
    interior_walls: Vec<RigidBodyHandle>,
    goal: ColliderHandle,
    actor: ColliderHandle,
    actor_body: RigidBodyHandle,

    input: InputController,
    ticks: u64,
    won: bool,
}

/// A fixed body holding one axis-aligned cuboid collider
fn insert_fixed(
    obstacle: &Obstacle,
    groups: InteractionGroups,
    sensor: bool,
    rigid_body_set: &mut RigidBodySet,
    collider_set: &mut ColliderSet,
) -> (RigidBodyHandle, ColliderHandle) {
    let rigid_body = RigidBodyBuilder::fixed()
        .translation(obstacle.center.coords)
        .build();
    let rigid_body_handle = rigid_body_set.insert(rigid_body);

    let collider = ColliderBuilder::cuboid(obstacle.width / 2.0, obstacle.height / 2.0)
        .sensor(sensor)
        .collision_groups(groups)
        .build();
    let collider_handle =
        collider_set.insert_with_parent(collider, rigid_body_handle, rigid_body_set);

    (rigid_body_handle, collider_handle)
}

impl MazeSimulation {
    /// Create a new simulation from an emitted layout, with no gravity and the actor at rest
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeball::geometry::emit;
    /// use mazeball::grid::{GridConfig, WallState};
    /// use mazeball::physics::MazeSimulation;
    ///
    /// let config = GridConfig::new(2, 2, 50.0, 50.0).unwrap();
    /// let layout = emit(&WallState::new(&config), &config).unwrap();
    /// let simulation = MazeSimulation::new(&layout).unwrap();
    /// assert_eq!(simulation.wall_count(), 8);
    /// ```
    pub fn new(layout: &MazeLayout) -> Result<Self, MazeError> {
        let goal = layout.goal().ok_or(MazeError::MissingGoal)?;

        let mut rigid_body_set = RigidBodySet::new();
        let mut collider_set = ColliderSet::new();

        let wall_groups = InteractionGroups::new(GROUP_WALL.into(), u32::MAX.into());

        // boundary stays put even after the win
        for wall in layout.boundary() {
            insert_fixed(wall, wall_groups, false, &mut rigid_body_set, &mut collider_set);
        }

        let interior_walls = layout
            .interior_walls()
            .map(|wall| {
                insert_fixed(wall, wall_groups, false, &mut rigid_body_set, &mut collider_set).0
            })
            .collect();

        // the goal only ever reports overlaps with the actor
        let (_, goal) = insert_fixed(
            goal,
            InteractionGroups::new(GROUP_GOAL.into(), GROUP_ACTOR.into()),
            true,
            &mut rigid_body_set,
            &mut collider_set,
        );

        // add actor
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(layout.actor.center.coords)
            .ccd_enabled(true)
            .build();
        let actor_body = rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::ball(layout.actor.radius)
            .density(ACTOR_DENSITY)
            .collision_groups(InteractionGroups::new(
                GROUP_ACTOR.into(),
                (GROUP_WALL | GROUP_GOAL).into(),
            ))
            .build();
        let actor = collider_set.insert_with_parent(collider, actor_body, &mut rigid_body_set);

        Ok(Self {
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),

            rigid_body_set,
            collider_set,

            query_pipeline: QueryPipeline::new(),

            gravity: Vector2::zeros(),
            interior_walls,
            goal,
            actor,
            actor_body,

            input: InputController::new(),
            ticks: 0,
            won: false,
        })
    }

    /// Advance the world by one tick.
    ///
    /// Returns true on the tick the actor first touches the goal.
    pub fn step(&mut self) -> bool {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.ticks += 1;

        if !self.won && self.narrow_phase.intersection_pair(self.actor, self.goal) == Some(true) {
            self.win();
            return true;
        }
        false
    }

    /// Switch on gravity and let the interior walls fall
    fn win(&mut self) {
        info!("Goal reached after {} ticks", self.ticks);
        self.won = true;
        self.gravity = Vector2::new(0.0, WIN_GRAVITY);
        for &handle in &self.interior_walls {
            if let Some(body) = self.rigid_body_set.get_mut(handle) {
                body.set_body_type(RigidBodyType::Dynamic, true);
            }
        }
        // the actor may have been put to sleep while it sat still
        self.rigid_body_set[self.actor_body].wake_up(true);
    }

    /// Apply a key event to the actor's velocity
    pub fn handle_key(&mut self, event: KeyEvent) {
        let body = &mut self.rigid_body_set[self.actor_body];
        if let Some(v) = self.input.handle(event, *body.linvel()) {
            body.set_linvel(v, true);
        }
    }

    /// Whether the goal has been reached
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Number of ticks simulated so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current gravity vector
    pub fn gravity(&self) -> Vector2<f32> {
        self.gravity
    }

    /// Number of wall bodies, boundary included
    pub fn wall_count(&self) -> usize {
        self.interior_walls.len() + BOUNDARY_WALLS
    }

    /// Current center of the actor
    pub fn actor_position(&self) -> Point2<f32> {
        Point2::from(*self.rigid_body_set[self.actor_body].translation())
    }

    /// Current velocity of the actor
    pub fn actor_velocity(&self) -> Vector2<f32> {
        *self.rigid_body_set[self.actor_body].linvel()
    }

    /// Centers of the walls inside the play area, fixed until the goal is reached
    pub fn interior_wall_positions(&self) -> Vec<Point2<f32>> {
        self.interior_walls
            .iter()
            .filter_map(|&h| self.rigid_body_set.get(h))
            .map(|body| Point2::from(*body.translation()))
            .collect()
    }
}
