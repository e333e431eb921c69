//! Authoritative board state as reported by the rules service.
//!
//! The wire types ([`BoardResponse`], [`ResetAck`]) mirror the JSON bodies
//! exactly. [`BoardState`] is only ever built from a validated response.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{BOARD_SIZE, ClientError, Position};

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Turn {
    /// White to move.
    White,
    /// Black to move.
    Black,
}

impl Turn {
    /// Parses the wire value (`"w"` or `"b"`).
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "w" => Some(Self::White),
            "b" => Some(Self::Black),
            _ => None,
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nothing on the square.
    #[default]
    Empty,
    /// A piece letter: uppercase for white, lowercase for black.
    Piece(char),
}

impl Cell {
    /// Parses a wire symbol. Returns `None` for anything unrecognised.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "" | "." | " " => Some(Self::Empty),
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if "PNBRQKpnbrqk".contains(c) => Some(Self::Piece(c)),
                    _ => None,
                }
            }
        }
    }

    /// Wire symbol.
    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Piece(c) => c,
        }
    }

    /// Unicode chess glyph for display.
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Piece(c) => match c {
                'K' => '♔',
                'Q' => '♕',
                'R' => '♖',
                'B' => '♗',
                'N' => '♘',
                'P' => '♙',
                'k' => '♚',
                'q' => '♛',
                'r' => '♜',
                'b' => '♝',
                'n' => '♞',
                'p' => '♟',
                other => other,
            },
        }
    }

    /// Whether the square holds a white piece.
    pub fn is_white(self) -> bool {
        matches!(self, Self::Piece(c) if c.is_ascii_uppercase())
    }
}

/// Fixed 8x8 grid of cells, row 0 being rank 8.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Cell at `pos`.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row()][pos.col()]
    }

    /// Plain-text rendering with rank and file labels.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.cells.iter().enumerate() {
            out.push_str(&format!("{} ", BOARD_SIZE as usize - i));
            for cell in row {
                out.push(' ');
                out.push(cell.symbol());
            }
            out.push('\n');
        }
        out.push_str("   a b c d e f g h");
        out
    }
}

impl TryFrom<Vec<Vec<Option<String>>>> for Board {
    type Error = ClientError;

    /// A `null` cell is an empty square, the same as `"."`.
    fn try_from(rows: Vec<Vec<Option<String>>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE as usize {
            return Err(ClientError::schema(format!(
                "board has {} rows, expected {}",
                rows.len(),
                BOARD_SIZE
            )));
        }

        let mut board = Board::default();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE as usize {
                return Err(ClientError::schema(format!(
                    "board row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    BOARD_SIZE
                )));
            }
            for (c, symbol) in row.iter().enumerate() {
                let Some(symbol) = symbol else {
                    continue;
                };
                board.cells[r][c] = Cell::from_symbol(symbol).ok_or_else(|| {
                    ClientError::schema(format!("unknown cell symbol '{}' at ({}, {})", symbol, r, c))
                })?;
            }
        }
        Ok(board)
    }
}

/// Complete state reported by the service. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    board: Board,
    turn: Turn,
    message: Option<String>,
}

impl BoardState {
    /// Creates a board state.
    pub fn new(board: Board, turn: Turn, message: Option<String>) -> Self {
        Self {
            board,
            turn,
            message,
        }
    }

    /// The grid.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Status message from the rules engine, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// JSON body of `GET /api/board` and `POST /api/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    /// 8 rows of 8 cell symbols; `null` marks an empty square.
    pub board: Vec<Vec<Option<String>>>,
    /// `"w"` or `"b"`.
    pub turn: String,
    /// Check, checkmate or stalemate annotation, or a rejection reason.
    #[serde(default)]
    pub message: Option<String>,
    /// Whether a submitted move was applied. Only sent on move responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl TryFrom<BoardResponse> for BoardState {
    type Error = ClientError;

    #[instrument(skip_all, fields(turn = %response.turn, success = ?response.success))]
    fn try_from(response: BoardResponse) -> Result<Self, Self::Error> {
        let turn = Turn::from_wire(&response.turn)
            .ok_or_else(|| ClientError::schema(format!("unknown turn '{}'", response.turn)))?;
        let board = Board::try_from(response.board)?;
        debug!(message = ?response.message, "Board response validated");
        Ok(BoardState::new(board, turn, response.message))
    }
}

/// JSON body of `POST /api/reset`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetAck {
    /// Free-text acknowledgement.
    #[serde(default)]
    pub message: Option<String>,
}
