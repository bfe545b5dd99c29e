use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{BORDER_HALF_BLOCK, CELL_COLUMNS, GLYPH_FOOD, GLYPH_SEGMENT, GridSize, Theme};
use crate::game::{GamePhase, GameSnapshot, SessionStats};
use crate::input::{Direction, direction_from_offset};
use crate::snake::Cell;
use crate::ui::hud::{HudValues, render_hud};
use crate::ui::menu::{GameOverSummary, render_game_over_menu, render_ready_menu};

/// Everything the frame needs besides the snapshot itself.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo<'a> {
    pub grid: GridSize,
    pub stats: SessionStats,
    pub is_new_high_score: bool,
    pub theme: &'a Theme,
}

/// Renders the full game frame from immutable state.
///
/// Returns the inner board area so pointer input can be resolved against it.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot, info: FrameInfo<'_>) -> Rect {
    let [hud_area, board_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());
    let board_area = centered_board(board_area, info.grid);

    render_hud(
        frame,
        hud_area,
        HudValues::from_state(snapshot, &info.stats),
        info.theme,
    );

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(info.theme.border_fg))
        .style(Style::new().bg(info.theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    if let Some(food) = snapshot.food {
        draw_cell(frame, inner, info.grid, food, GLYPH_FOOD, Style::new().fg(info.theme.food));
    }
    render_snake(frame, inner, snapshot, info);

    match snapshot.phase {
        GamePhase::Ready => render_ready_menu(frame, board_area, snapshot.high_score, info.theme),
        GamePhase::Ended => render_game_over_menu(
            frame,
            board_area,
            GameOverSummary {
                score: snapshot.score,
                high_score: snapshot.high_score,
                death_reason: snapshot.death_reason,
                is_new_high_score: info.is_new_high_score,
            },
            info.theme,
        ),
        GamePhase::Playing => {}
    }

    inner
}

/// Resolves a click to a direction relative to the board centre.
///
/// Clicks outside the board are ignored. Horizontal offsets are measured in
/// cells, not terminal columns, so both axes weigh the same.
#[must_use]
pub fn direction_for_click(board: Rect, column: u16, row: u16) -> Option<Direction> {
    if column < board.x || column >= board.right() || row < board.y || row >= board.bottom() {
        return None;
    }

    let centre_x = i32::from(board.x) + i32::from(board.width) / 2;
    let centre_y = i32::from(board.y) + i32::from(board.height) / 2;
    let dx = (i32::from(column) - centre_x) / i32::from(CELL_COLUMNS);
    let dy = i32::from(row) - centre_y;

    direction_from_offset(dx, dy)
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, info: FrameInfo<'_>) {
    let body_style = Style::new().fg(info.theme.snake_body);
    let head_style = Style::new()
        .fg(info.theme.snake_head)
        .add_modifier(Modifier::BOLD);

    // Tail first so the head is drawn on top.
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let style = if index == 0 { head_style } else { body_style };
        draw_cell(frame, inner, info.grid, *segment, GLYPH_SEGMENT, style);
    }
}

fn draw_cell(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: GridSize,
    cell: Cell,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = logical_to_terminal(inner, grid, cell) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
}

fn centered_board(area: Rect, grid: GridSize) -> Rect {
    let width = grid.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = grid.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    board
}

fn logical_to_terminal(inner: Rect, grid: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{direction_for_click, logical_to_terminal};
    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::Cell;

    const GRID: GridSize = GridSize {
        width: 20,
        height: 20,
    };

    #[test]
    fn cells_map_to_two_columns() {
        let inner = Rect::new(3, 2, 40, 20);

        assert_eq!(logical_to_terminal(inner, GRID, Cell::new(0, 0)), Some((3, 2)));
        assert_eq!(logical_to_terminal(inner, GRID, Cell::new(19, 19)), Some((41, 21)));
        assert_eq!(logical_to_terminal(inner, GRID, Cell::new(20, 0)), None);
    }

    #[test]
    fn clipped_board_skips_hidden_cells() {
        let inner = Rect::new(0, 0, 10, 5);

        assert_eq!(logical_to_terminal(inner, GRID, Cell::new(6, 1)), None);
        assert_eq!(logical_to_terminal(inner, GRID, Cell::new(1, 6)), None);
    }

    #[test]
    fn clicks_resolve_along_dominant_axis() {
        let board = Rect::new(0, 0, 40, 20);

        assert_eq!(direction_for_click(board, 38, 10), Some(Direction::Right));
        assert_eq!(direction_for_click(board, 2, 11), Some(Direction::Left));
        assert_eq!(direction_for_click(board, 21, 1), Some(Direction::Up));
        assert_eq!(direction_for_click(board, 20, 18), Some(Direction::Down));
        assert_eq!(direction_for_click(board, 45, 10), None);
    }
}
