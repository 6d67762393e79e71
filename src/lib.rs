#![warn(missing_docs)]
//! Perfect maze generation, world-space geometry for it, and a rolling-ball physics game on top

pub mod ascii;
pub mod carving;
pub mod constants;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod physics;
pub mod settings;
