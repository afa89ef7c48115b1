//! Shared ratatui widgets for the play and replay screens.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use slide48::game::{GameState, Tile};

/// Width of one tile in terminal columns.
const CELL_WIDTH: usize = 8;
/// Height of one tile in terminal rows.
const CELL_HEIGHT: usize = 3;

/// Everything a game screen shows besides the board.
pub(super) struct Screen<'a> {
    /// Title in the header box.
    pub(super) title: &'a str,
    /// Game to draw.
    pub(super) state: &'a GameState,
    /// Best score to show next to the score.
    pub(super) best: u64,
    /// Extra status text (step counter, messages).
    pub(super) status: String,
    /// Key help in the footer.
    pub(super) controls: &'a str,
}

/// Draw a full game screen: header, board, footer.
pub(super) fn draw(f: &mut Frame, screen: &Screen<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Board
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], screen);
    render_board(f, chunks[1], screen.state);
    render_footer(f, chunks[2], screen.controls);
}

fn render_header(f: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let state = screen.state;
    let mut text = format!(
        " {} | Score: {} | Best: {} ",
        screen.title,
        state.score(),
        screen.best
    );
    if !screen.status.is_empty() {
        text.push_str(&format!("| {} ", screen.status));
    }
    if state.is_game_over() {
        text.push_str("| GAME OVER ");
    }

    let header = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, state: &GameState) {
    let board = state.board();
    let mut lines: Vec<Line> = Vec::new();

    for row in 0..board.size() {
        for sub in 0..CELL_HEIGHT {
            let mut spans = Vec::with_capacity(board.size() * 2);
            for col in 0..board.size() {
                let value = board.get(row, col).unwrap_or(0);
                let tile = state.tiles().iter().find(|t| t.is_at(row, col));
                let text = if sub == CELL_HEIGHT / 2 && value != 0 {
                    format!("{value:^CELL_WIDTH$}")
                } else {
                    " ".repeat(CELL_WIDTH)
                };
                spans.push(Span::styled(text, tile_style(value, tile)));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));

    f.render_widget(board_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, controls: &str) {
    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

/// Style for a cell: background by value, merged tiles bold, fresh spawns
/// underlined.
fn tile_style(value: u32, tile: Option<&Tile>) -> Style {
    let mut style = Style::default().bg(tile_color(value)).fg(text_color(value));
    if let Some(tile) = tile {
        if tile.merged_from.is_some() {
            style = style.add_modifier(Modifier::BOLD);
        } else if tile.is_new {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
    }
    style
}

/// Background color for a tile value.
fn tile_color(value: u32) -> Color {
    match value {
        0 => Color::Rgb(0xcd, 0xc1, 0xb4),
        2 => Color::Rgb(0xe5, 0xe7, 0xeb),
        4 => Color::Rgb(0xff, 0xed, 0xd5),
        8 => Color::Rgb(0xfd, 0xba, 0x74),
        16 => Color::Rgb(0xfb, 0x92, 0x3c),
        32 => Color::Rgb(0xf9, 0x73, 0x16),
        64 => Color::Rgb(0xea, 0x58, 0x0c),
        128 => Color::Rgb(0xfa, 0xcc, 0x15),
        256 => Color::Rgb(0xea, 0xb3, 0x08),
        512 => Color::Rgb(0xca, 0x8a, 0x04),
        1024 => Color::Rgb(0xa1, 0x62, 0x07),
        2048 => Color::Rgb(0x85, 0x4d, 0x0e),
        _ => Color::Black,
    }
}

/// Dark text on the pale tiles, light text elsewhere.
fn text_color(value: u32) -> Color {
    match value {
        2 | 4 => Color::Rgb(0x37, 0x41, 0x51),
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide48::game::TileId;

    #[test]
    fn test_palette_steps() {
        assert_eq!(tile_color(2), Color::Rgb(0xe5, 0xe7, 0xeb));
        assert_eq!(tile_color(2048), Color::Rgb(0x85, 0x4d, 0x0e));
        assert_eq!(tile_color(4096), Color::Black);
        assert_ne!(text_color(2), text_color(8));
    }

    #[test]
    fn test_tile_style_highlights() {
        let mut tile = Tile::minted(TileId(1), 4, 0, 0);
        assert!(tile_style(4, Some(&tile)).add_modifier.contains(Modifier::UNDERLINED));

        tile.is_new = false;
        tile.merged_from = Some([TileId(0), TileId(1)]);
        assert!(tile_style(4, Some(&tile)).add_modifier.contains(Modifier::BOLD));

        assert!(tile_style(0, None).add_modifier.is_empty());
    }
}
