//! Stateless UI rendering for the chess board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{BOARD_SIZE, Cell, ClientSnapshot, MessageCategory, Position, Selection};

use super::app::App;

/// Terminal columns per square.
pub const CELL_WIDTH: u16 = 5;
/// Terminal rows per square.
pub const CELL_HEIGHT: u16 = 1;

const RANK_LABEL_WIDTH: u16 = 2;
const SQUARES_WIDTH: u16 = CELL_WIDTH * BOARD_SIZE as u16;
const SQUARES_HEIGHT: u16 = CELL_HEIGHT * BOARD_SIZE as u16;

/// Screen regions of the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title and turn indicator.
    pub header: Rect,
    /// Area the board is centred in.
    pub board: Rect,
    /// Status message banner.
    pub message: Rect,
    /// Key help.
    pub help: Rect,
}

impl ScreenLayout {
    /// Splits the full terminal area.
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(SQUARES_HEIGHT + 1),
                Constraint::Length(3), // Message
                Constraint::Length(3), // Help
            ])
            .split(area);

        Self {
            header: chunks[0],
            board: chunks[1],
            message: chunks[2],
            help: chunks[3],
        }
    }

    /// Rectangle covered by the 64 squares, labels excluded.
    pub fn squares(&self) -> Rect {
        let total_width = RANK_LABEL_WIDTH + SQUARES_WIDTH;
        let total_height = SQUARES_HEIGHT + 1;
        let x = self.board.x + self.board.width.saturating_sub(total_width) / 2 + RANK_LABEL_WIDTH;
        let y = self.board.y + self.board.height.saturating_sub(total_height) / 2;
        Rect::new(x, y, SQUARES_WIDTH, SQUARES_HEIGHT).intersection(self.board)
    }

    /// Square under a terminal cell, if any.
    pub fn square_at(&self, column: u16, row: u16) -> Option<Position> {
        let squares = self.squares();
        // A clipped board is not drawn, so nothing on screen is clickable.
        if squares.width < SQUARES_WIDTH || squares.height < SQUARES_HEIGHT {
            return None;
        }
        if column < squares.x
            || row < squares.y
            || column >= squares.x + squares.width
            || row >= squares.y + squares.height
        {
            return None;
        }
        Position::new(
            ((row - squares.y) / CELL_HEIGHT) as usize,
            ((column - squares.x) / CELL_WIDTH) as usize,
        )
        .ok()
    }

    fn square_rect(&self, pos: Position) -> Rect {
        let squares = self.squares();
        Rect::new(
            squares.x + pos.col() as u16 * CELL_WIDTH,
            squares.y + pos.row() as u16 * CELL_HEIGHT,
            CELL_WIDTH,
            CELL_HEIGHT,
        )
    }
}

/// Draws the main UI.
pub fn draw(frame: &mut Frame, app: &App, snapshot: &ClientSnapshot) {
    let layout = ScreenLayout::new(frame.area());

    draw_header(frame, layout.header, app, snapshot);
    draw_board(frame, &layout, app, snapshot);
    draw_message(frame, layout.message, snapshot);

    let help = Paragraph::new(
        "Click or Arrows+Enter: select squares | R: Reset | F: Refresh | Q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, layout.help);
}

/// Header text: the side to move, or a placeholder before the first fetch.
pub fn turn_label(snapshot: &ClientSnapshot) -> String {
    match &snapshot.board {
        Some(state) => format!("Turn: {}", state.turn()),
        None => "Connecting...".to_string(),
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, snapshot: &ClientSnapshot) {
    let mut spans = vec![Span::styled(
        turn_label(snapshot),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let Selection::Pending(pos) = app.controller().selection() {
        spans.push(Span::raw(format!("   Selected: {}", pos)));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Strictly Chess"));
    frame.render_widget(header, area);
}

fn draw_board(frame: &mut Frame, layout: &ScreenLayout, app: &App, snapshot: &ClientSnapshot) {
    let squares = layout.squares();
    if squares.width < SQUARES_WIDTH || squares.height < SQUARES_HEIGHT {
        let warning = Paragraph::new("Terminal too small for the board")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(warning, layout.board);
        return;
    }

    for pos in Position::all() {
        let cell = snapshot
            .board
            .as_ref()
            .map(|state| state.board().cell(pos))
            .unwrap_or_default();
        draw_square(frame, layout.square_rect(pos), cell, square_style(app, pos));
    }

    // Rank labels down the left edge, files along the bottom.
    for row in 0..BOARD_SIZE as u16 {
        let label = Paragraph::new(format!("{}", BOARD_SIZE as u16 - row))
            .style(Style::default().fg(Color::DarkGray));
        let area = Rect::new(
            squares.x - RANK_LABEL_WIDTH,
            squares.y + row * CELL_HEIGHT,
            1,
            1,
        );
        frame.render_widget(label, area);
    }
    let files: String = Position::all()
        .take(BOARD_SIZE as usize)
        .map(|pos| format!("{:^width$}", pos.file(), width = CELL_WIDTH as usize))
        .collect();
    let files_area = Rect::new(squares.x, squares.y + SQUARES_HEIGHT, SQUARES_WIDTH, 1)
        .intersection(layout.board);
    frame.render_widget(
        Paragraph::new(files).style(Style::default().fg(Color::DarkGray)),
        files_area,
    );
}

fn square_style(app: &App, pos: Position) -> Style {
    let base = if pos.is_light() {
        Style::default().bg(Color::Rgb(240, 217, 181))
    } else {
        Style::default().bg(Color::Rgb(181, 136, 99))
    };

    if app.controller().is_selected(pos) {
        base.bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if app.cursor() == pos {
        base.bg(Color::LightBlue)
    } else {
        base
    }
}

fn draw_square(frame: &mut Frame, area: Rect, cell: Cell, style: Style) {
    let fg = if cell.is_white() {
        Color::White
    } else {
        Color::Black
    };
    let symbol = format!("{:^width$}", cell.glyph(), width = CELL_WIDTH as usize);
    let square = Paragraph::new(Line::from(Span::styled(
        symbol,
        style.fg(fg).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(square, area);
}

/// Banner colour for a message category.
pub fn category_color(category: MessageCategory) -> Color {
    match category {
        MessageCategory::Success => Color::Green,
        MessageCategory::Warning => Color::Yellow,
        MessageCategory::Alert => Color::Red,
        MessageCategory::Neutral => Color::Gray,
    }
}

fn draw_message(frame: &mut Frame, area: Rect, snapshot: &ClientSnapshot) {
    if snapshot.message.is_empty() {
        return;
    }

    let banner = Paragraph::new(snapshot.message.as_str())
        .style(
            Style::default()
                .fg(category_color(snapshot.category()))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(banner, area);
}
