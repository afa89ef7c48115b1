//! Plain-text board renderer.

use crate::game::GameState;
use std::fmt::Write;

/// Render a game state as text.
///
/// Output format:
/// ```text
/// Score: 1204  Best: 2380  Step 37/120
/// +------+------+------+------+
/// |    2 |      |   16 |    4 |
/// +------+------+------+------+
/// ...
/// +------+------+------+------+
/// ```
///
/// `progress` is `(step, total)` when rendering a replay.
#[must_use]
pub fn render_ascii(state: &GameState, best: u64, progress: Option<(usize, usize)>) -> String {
    let mut output = String::new();

    let _ = write!(output, "Score: {}  Best: {}", state.score(), best);
    if let Some((step, total)) = progress {
        let _ = write!(output, "  Step {step}/{total}");
    }
    if state.is_game_over() {
        output.push_str("  GAME OVER");
    }
    output.push('\n');

    let board = state.board();
    // Wide enough for the largest value on the board, at least 4 digits
    let width = board.max_value().to_string().len().max(4);
    let separator = {
        let cell = format!("+{}", "-".repeat(width + 2));
        format!("{}+\n", cell.repeat(board.size()))
    };

    output.push_str(&separator);
    for row in board.rows() {
        for &value in row {
            if value == 0 {
                let _ = write!(output, "| {:>width$} ", "");
            } else {
                let _ = write!(output, "| {value:>width$} ");
            }
        }
        output.push_str("|\n");
        output.push_str(&separator);
    }

    output
}
