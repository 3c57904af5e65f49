use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::{
    CELL_WIDTH, COLOR_BORDER, COLOR_EMPTY, COLOR_FOOD, COLOR_REVERSING_FOOD, COLOR_SNAKE,
    GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SNAKE,
};
use crate::grid::{Coordinate, Grid};
use crate::session::{CellKind, EndReason, GameOver, Session, Step};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, step: &Step) {
    let session = match step {
        Step::Running(session) => session,
        Step::GameOver(over) => over.session(),
    };

    let [hud_area, board_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());
    render_hud(frame, hud_area, session);

    let grid = session.grid();
    let board = centered_rect(
        board_area,
        grid.size().saturating_mul(CELL_WIDTH).saturating_add(2),
        grid.size().saturating_add(2),
    );
    let block = Block::bordered().border_style(Style::new().fg(COLOR_BORDER));
    let inner = block.inner(board);
    frame.render_widget(block, board);
    render_cells(frame, inner, session);

    if let Step::GameOver(over) = step {
        render_game_over(frame, board_area, over);
    }
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &Session) {
    let line = Line::from(vec![
        Span::styled(
            format!(" Score: {}", session.score()),
            Style::new().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(GLYPH_FOOD, Style::new().fg(COLOR_FOOD)),
        Span::raw("food  "),
        Span::styled(GLYPH_FOOD, Style::new().fg(COLOR_REVERSING_FOOD)),
        Span::raw("reverse"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, session: &Session) {
    let grid = session.grid();
    let buffer = frame.buffer_mut();

    for (cell, kind) in session.cells() {
        let Some((x, y)) = cell_to_terminal(inner, grid, grid.coordinate_of(cell)) else {
            continue;
        };

        let (glyph, color) = match kind {
            CellKind::Empty => (GLYPH_EMPTY, COLOR_EMPTY),
            CellKind::Snake => (GLYPH_SNAKE, COLOR_SNAKE),
            CellKind::Food => (GLYPH_FOOD, COLOR_FOOD),
            CellKind::ReversingFood => (GLYPH_FOOD, COLOR_REVERSING_FOOD),
        };
        buffer.set_string(x, y, glyph, Style::new().fg(color));
    }
}

fn render_game_over(frame: &mut Frame<'_>, area: Rect, over: &GameOver) {
    let title = if over.reason.is_victory() {
        "BOARD CLEARED"
    } else {
        "GAME OVER"
    };
    let lines = [
        title.to_owned(),
        format!("You scored: {}", over.final_score),
        reason_text(over.reason).to_owned(),
        String::new(),
        "[Enter] play again   [Q] quit".to_owned(),
    ];

    let text_width = lines.iter().map(|line| line.width()).max().unwrap_or(0);
    let width = u16::try_from(text_width).unwrap_or(u16::MAX).saturating_add(4);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered_rect(area, width, height);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines.map(Line::from).to_vec())
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

fn reason_text(reason: EndReason) -> &'static str {
    match reason {
        EndReason::OutOfBounds => "The snake left the board.",
        EndReason::SelfCollision => "The snake bit itself.",
        EndReason::BoardFilled => "Nowhere left to put food!",
    }
}

fn cell_to_terminal(inner: Rect, grid: Grid, coord: Coordinate) -> Option<(u16, u16)> {
    if grid.is_out_of_bounds(coord) {
        return None;
    }

    let x_offset = u16::try_from(coord.col).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(coord.row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

/// Returns a `width`×`height` rectangle centered in `area`, clipped to it.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
