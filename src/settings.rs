//! User-facing options for generating a maze

use crate::constants::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::grid::{GridConfig, MazeError};
use serde::{Deserialize, Serialize};

/// Options for generating and laying out a maze
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeSettings {
    /// Number of cell rows
    pub rows: usize,
    /// Number of cell columns
    pub cols: usize,
    /// Width of the play area, in world units
    pub viewport_width: f32,
    /// Height of the play area, in world units
    pub viewport_height: f32,
    /// Seed for the carver; a fresh maze every run when absent
    pub seed: Option<u64>,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            seed: None,
        }
    }
}

impl MazeSettings {
    /// The validated grid these settings describe, with cells sized to fill the viewport
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeball::settings::MazeSettings;
    ///
    /// let config = MazeSettings::default().grid_config().unwrap();
    /// assert_eq!(config.cell_width(), 60.0);
    /// assert_eq!(config.cell_height(), 50.0);
    /// ```
    pub fn grid_config(&self) -> Result<GridConfig, MazeError> {
        GridConfig::from_viewport(
            self.rows,
            self.cols,
            self.viewport_width,
            self.viewport_height,
        )
    }
}
