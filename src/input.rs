//! Keyboard-driven velocity control for the actor.

use crate::constants::KEY_VELOCITY_STEP;
use crate::grid::Direction;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use rapier2d::na::Vector2;

/// Keys that steer the actor, by browser key code
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum Key {
    /// W
    W = 87,
    /// A
    A = 65,
    /// S
    S = 83,
    /// D
    D = 68,
    /// Up arrow
    ArrowUp = 38,
    /// Left arrow
    ArrowLeft = 37,
    /// Down arrow
    ArrowDown = 40,
    /// Right arrow
    ArrowRight = 39,
}

impl Key {
    /// Which way this key pushes the actor
    pub fn direction(self) -> Direction {
        match self {
            Key::W | Key::ArrowUp => Direction::Up,
            Key::D | Key::ArrowRight => Direction::Right,
            Key::S | Key::ArrowDown => Direction::Down,
            Key::A | Key::ArrowLeft => Direction::Left,
        }
    }
}

/// A raw key event from the host, carrying the key code
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyEvent {
    /// A key went down
    Pressed(u32),
    /// A key came up
    Released(u32),
}

/// Maps key events onto actor velocity changes.
///
/// Only one press is honored until the next release; auto-repeat presses while a key is held
/// are ignored.
#[derive(Clone, Debug, Default)]
pub struct InputController {
    held: bool,
}

impl InputController {
    /// Create a controller with no key held
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key is currently held
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// The new actor velocity after `event`, or `None` if it doesn't change.
    ///
    /// Screen coordinates: +y points down.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeball::input::{InputController, KeyEvent};
    /// use rapier2d::na::Vector2;
    ///
    /// let mut input = InputController::new();
    /// let v = input.handle(KeyEvent::Pressed(68), Vector2::new(0.0, 0.0)).unwrap();
    /// assert!(v.x > 0.0);
    /// assert_eq!(input.handle(KeyEvent::Released(68), v), Some(Vector2::new(0.0, 0.0)));
    /// ```
    pub fn handle(&mut self, event: KeyEvent, velocity: Vector2<f32>) -> Option<Vector2<f32>> {
        match event {
            KeyEvent::Pressed(code) => {
                if self.held {
                    return None;
                }
                self.held = true;
                let key = Key::try_from(code).ok()?;
                let mut v = velocity;
                match key.direction() {
                    Direction::Up => v.y -= KEY_VELOCITY_STEP,
                    Direction::Right => v.x += KEY_VELOCITY_STEP,
                    Direction::Down => v.y += KEY_VELOCITY_STEP,
                    Direction::Left => v.x -= KEY_VELOCITY_STEP,
                }
                Some(v)
            }
            KeyEvent::Released(code) => {
                self.held = false;
                let key = Key::try_from(code).ok()?;
                let mut v = velocity;
                match key.direction() {
                    Direction::Up | Direction::Down => v.y = 0.0,
                    Direction::Left | Direction::Right => v.x = 0.0,
                }
                Some(v)
            }
        }
    }
}
