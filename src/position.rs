//! Board squares and the move tokens built from them.
//!
//! Rows and columns are zero-based from the top-left of the board as the
//! white player sees it, so row 0 is rank 8 and column 0 is file `a`.

use std::fmt;
use std::str::FromStr;

use tracing::instrument;

use crate::PositionError;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

const FILES: [char; BOARD_SIZE as usize] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// One of the 64 squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// The white king's pawn square.
    pub const E2: Position = Position { row: 6, col: 4 };

    /// Creates a position from zero-based grid coordinates.
    #[instrument]
    pub fn new(row: usize, col: usize) -> Result<Self, PositionError> {
        if row >= BOARD_SIZE as usize || col >= BOARD_SIZE as usize {
            return Err(PositionError::new(format!(
                "({}, {}) is outside the {}x{} board",
                row, col, BOARD_SIZE, BOARD_SIZE
            )));
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Zero-based row, 0 being rank 8.
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Zero-based column, 0 being file `a`.
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// File letter, `'a'..='h'`.
    pub fn file(self) -> char {
        FILES[self.col as usize]
    }

    /// Rank number, `1..=8`.
    pub fn rank(self) -> u8 {
        BOARD_SIZE - self.row
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }

    /// Whether this is a light square (a8 is light).
    pub fn is_light(self) -> bool {
        (self.row + self.col) % 2 == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PositionError::new(format!("'{}' is not a square", s)));
        };

        let col = FILES
            .iter()
            .position(|f| *f == file.to_ascii_lowercase())
            .ok_or_else(|| PositionError::new(format!("'{}' is not a file", file)))?;
        let rank = rank
            .to_digit(10)
            .filter(|r| (1..=BOARD_SIZE as u32).contains(r))
            .ok_or_else(|| PositionError::new(format!("'{}' is not a rank", rank)))?;

        Position::new(BOARD_SIZE as usize - rank as usize, col)
    }
}

/// Piece a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Promotion {
    /// Queen
    Queen,
    /// Rook
    Rook,
    /// Bishop
    Bishop,
    /// Knight
    Knight,
}

impl Promotion {
    /// Lowercase letter appended to a move token.
    pub fn letter(self) -> char {
        match self {
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
        }
    }

    /// Parses a promotion letter, either case.
    pub fn from_letter(c: char) -> Option<Self> {
        <Self as strum::IntoEnumIterator>::iter().find(|p| p.letter() == c.to_ascii_lowercase())
    }
}

/// Origin and destination of a move, as sent to the rules service.
///
/// No legality is implied. The origin and destination may be the same square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveCommand {
    from: Position,
    to: Position,
    promotion: Option<Promotion>,
}

impl MoveCommand {
    /// Creates a plain two-square move.
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Adds a promotion piece to the move.
    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotion = Some(promotion);
        self
    }

    /// Origin square.
    pub fn origin(&self) -> Position {
        self.from
    }

    /// Destination square.
    pub fn destination(&self) -> Position {
        self.to
    }

    /// Promotion piece, if any.
    pub fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }

    /// Wire token, e.g. `"e2e4"` or `"e7e8q"`.
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter())?;
        }
        Ok(())
    }
}

impl FromStr for MoveCommand {
    type Err = PositionError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(PositionError::new(format!(
                "'{}' is not a move token like e2e4",
                s
            )));
        }

        let cmd = MoveCommand::new(s[0..2].parse()?, s[2..4].parse()?);
        match s[4..].chars().next() {
            None => Ok(cmd),
            Some(c) => Promotion::from_letter(c)
                .map(|p| cmd.with_promotion(p))
                .ok_or_else(|| PositionError::new(format!("'{}' is not a promotion piece", c))),
        }
    }
}
