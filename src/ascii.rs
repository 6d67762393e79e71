//! Plain-text drawing of a maze, for terminals and test failures

use crate::grid::WallState;

/// Missing entries count as closed
fn is_open(edges: &[Vec<bool>], row: usize, col: usize) -> bool {
    edges.get(row).and_then(|r| r.get(col)).copied().unwrap_or(false)
}

/// Draw `walls` with `+` corners, `---` horizontal walls and `|` vertical walls.
///
/// The outer boundary is always closed. Every line, including the last, ends in `\n`.
///
/// # Examples
///
/// ```
/// use mazeball::ascii::render;
/// use mazeball::grid::{GridConfig, WallState};
///
/// let config = GridConfig::new(1, 2, 1.0, 1.0).unwrap();
/// assert_eq!(render(&WallState::new(&config)), "+---+---+\n|   |   |\n+---+---+\n");
/// ```
pub fn render(walls: &WallState) -> String {
    let (rows, cols) = (walls.rows(), walls.cols());
    let mut out = String::with_capacity((rows * 2 + 1) * (cols * 4 + 2));

    out.push('+');
    for _ in 0..cols {
        out.push_str("---+");
    }
    out.push('\n');

    for row in 0..rows {
        out.push('|');
        for col in 0..cols {
            out.push_str("   ");
            let open = is_open(walls.verticals(), row, col);
            out.push(if open { ' ' } else { '|' });
        }
        out.push('\n');

        out.push('+');
        for col in 0..cols {
            let open = is_open(walls.horizontals(), row, col);
            out.push_str(if open { "   " } else { "---" });
            out.push('+');
        }
        out.push('\n');
    }

    out
}
