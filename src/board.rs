use std::{
    error::Error,
    fmt::{self, Write as _},
    str::FromStr,
};

use crate::{
    color::Color,
    m::Move,
    role::Role,
    square::Square,
    types::Piece,
};

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// Piece positions on an 8×8 board.
///
/// A plain mailbox: each square holds an optional [`Piece`]. Row 0 is
/// Black's back rank at game start, row 7 is White's. The board is a value
/// type; applying a move produces a new board and leaves the input alone.
///
/// # Examples
///
/// ```
/// use woodpusher::{Board, Color, Square};
///
/// let board = Board::default();
/// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
/// assert_eq!(board.piece_at(Square::E4), None);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Constructs the standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, &role) in BACKRANK.iter().enumerate() {
                board.set_piece_at(Square::new(color.backrank(), col as u8), role.of(color));
            }
            for col in 0..8 {
                board.set_piece_at(Square::new(color.pawn_start_row(), col), color.pawn());
            }
        }
        board
    }

    /// Constructs an empty board.
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Iterates over all occupied squares and their pieces, `a8` first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL
            .into_iter()
            .filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the squares held by one side.
    pub fn by_color(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Finds the king of `color` by scanning the board.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| *piece == color.king())
            .map(|(sq, _)| sq)
    }

    /// Computes the board after `m`, leaving `self` untouched.
    ///
    /// The piece at `m.from` is relocated to `m.to`; anything previously on
    /// `m.to` is removed. No other square changes. Legality is not checked
    /// here; a move from an empty square yields an unchanged board.
    #[must_use]
    pub fn apply(&self, m: Move) -> Board {
        let mut board = self.clone();
        if let Some(piece) = board.remove_piece_at(m.from) {
            board.set_piece_at(m.to, piece);
        }
        board
    }

    /// Parses a board from eight rows of piece letters, row 0 (rank 8)
    /// first, `.` for an empty square, whitespace between cells ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use woodpusher::{Board, Color, Square};
    ///
    /// let board = Board::from_ascii(
    ///     ". . . . r . . .\n\
    ///      . . . . . . . .\n\
    ///      . . . . . . . .\n\
    ///      . . . . . . . .\n\
    ///      . . . . . . . .\n\
    ///      . . . . . . . .\n\
    ///      . . . . . . . .\n\
    ///      . . . . K . . .",
    /// )?;
    /// assert_eq!(board.piece_at(Square::E8), Some(Color::Black.rook()));
    /// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
    /// # Ok::<_, woodpusher::ParseBoardError>(())
    /// ```
    pub fn from_ascii(s: &str) -> Result<Board, ParseBoardError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = s.lines().filter(|line| !line.trim().is_empty()).collect();
        if rows.len() != 8 {
            return Err(ParseBoardError::RowCount { rows: rows.len() });
        }
        for (row, line) in rows.iter().enumerate() {
            let mut col = 0;
            for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
                if col >= 8 {
                    return Err(ParseBoardError::RowWidth { row });
                }
                if ch != '.' {
                    let piece =
                        Piece::from_char(ch).ok_or(ParseBoardError::InvalidPiece { ch })?;
                    board.set_piece_at(Square::new(row as u8, col), piece);
                }
                col += 1;
            }
            if col != 8 {
                return Err(ParseBoardError::RowWidth { row });
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                f.write_char(
                    self.piece_at(Square::new(row, col))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Board, ParseBoardError> {
        Board::from_ascii(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BoardVisitor;

        impl serde::de::Visitor<'_> for BoardVisitor {
            type Value = Board;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("board grid")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Board::from_ascii(value).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(BoardVisitor)
    }
}

/// Error when parsing a malformed board grid.
#[derive(Clone, Debug)]
pub enum ParseBoardError {
    /// The grid does not have exactly eight rows.
    RowCount { rows: usize },
    /// A row does not have exactly eight cells.
    RowWidth { row: usize },
    /// A cell holds a character that is neither `.` nor a piece letter.
    InvalidPiece { ch: char },
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseBoardError::RowCount { rows } => {
                write!(f, "expected 8 rows, found {rows}")
            }
            ParseBoardError::RowWidth { row } => {
                write!(f, "row {row} does not have 8 cells")
            }
            ParseBoardError::InvalidPiece { ch } => {
                write!(f, "invalid piece character {ch:?}")
            }
        }
    }
}

impl Error for ParseBoardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_at() {
        let board = Board::new();
        assert_eq!(board.piece_at(Square::A2), Some(Color::White.pawn()));
        assert_eq!(board.piece_at(Square::B1), Some(Color::White.knight()));
        assert_eq!(board.piece_at(Square::D8), Some(Color::Black.queen()));
        assert_eq!(board.piece_at(Square::E5), None);
    }

    #[test]
    fn test_set_piece_at() {
        let mut board = Board::new();
        board.set_piece_at(Square::A3, Color::White.pawn());
        assert_eq!(board.piece_at(Square::A3), Some(Color::White.pawn()));
        assert_eq!(board.remove_piece_at(Square::A3), Some(Color::White.pawn()));
        assert_eq!(board.piece_at(Square::A3), None);
    }

    #[test]
    fn test_king_of() {
        let board = Board::new();
        assert_eq!(board.king_of(Color::White), Some(Square::E1));
        assert_eq!(board.king_of(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().king_of(Color::White), None);
    }

    #[test]
    fn test_apply_relocates_and_captures() {
        let board = Board::new();
        let after = board.apply(Move::new(Square::E2, Square::E4));
        assert_eq!(after.piece_at(Square::E2), None);
        assert_eq!(after.piece_at(Square::E4), Some(Color::White.pawn()));
        // The input board is untouched.
        assert_eq!(board.piece_at(Square::E2), Some(Color::White.pawn()));

        let mut board = Board::empty();
        board.set_piece_at(Square::D4, Color::White.rook());
        board.set_piece_at(Square::D7, Color::Black.pawn());
        let after = board.apply(Move::new(Square::D4, Square::D7));
        assert_eq!(after.piece_at(Square::D7), Some(Color::White.rook()));
        assert_eq!(after.pieces().count(), 1);
    }

    #[test]
    fn test_apply_from_empty_square() {
        let board = Board::new();
        let after = board.apply(Move::new(Square::E4, Square::E5));
        assert_eq!(after, board);
    }

    #[test]
    fn test_ascii_round_trip() {
        let board = Board::new();
        let text = board.to_string();
        assert!(text.starts_with("r n b q k b n r\n"));
        assert_eq!(text.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_ascii_errors() {
        assert!(matches!(
            Board::from_ascii("k . .\nK . ."),
            Err(ParseBoardError::RowCount { rows: 2 })
        ));
        let nine = ". . . . . . . . .\n".repeat(8);
        assert!(matches!(
            Board::from_ascii(&nine),
            Err(ParseBoardError::RowWidth { row: 0 })
        ));
        let bad = Board::new().to_string().replace('q', "x");
        assert!(matches!(
            Board::from_ascii(&bad),
            Err(ParseBoardError::InvalidPiece { ch: 'x' })
        ));
    }

    #[test]
    fn test_start_rows_follow_the_colors() {
        let board = Board::new();
        for color in Color::ALL {
            assert_eq!(
                board.piece_at(Square::new(color.backrank(), 4)),
                Some(color.king())
            );
            for col in 0..8 {
                assert_eq!(
                    board.piece_at(Square::new(color.pawn_start_row(), col)),
                    Some(color.pawn())
                );
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_grid_form() {
        let board = Board::new();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
        assert!(serde_json::from_str::<Board>("\"r n b\"").is_err());
    }
}
