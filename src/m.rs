use std::{error::Error, fmt, str::FromStr};

use arrayvec::ArrayVec;

use crate::square::Square;

/// A proposed relocation of one piece.
///
/// A move is just the pair of origin and destination squares; whether it is
/// legal for a particular piece on a particular board is decided by
/// [`is_legal`](crate::is_legal). Applying a legal move relocates the piece
/// at `from` to `to`, removing anything previously on `to`. Nothing else on
/// the board changes: there is no castling, en passant or promotion here.
///
/// # Display
///
/// `Move` implements [`fmt::Display`] using coordinate notation, e.g.
/// `e2e4`, and parses back from the same form.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Error when parsing an invalid coordinate move.
#[derive(Clone, Debug)]
pub struct ParseMoveError;

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid coordinate move")
    }
}

impl Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        match *s.as_bytes() {
            [ff @ b'a'..=b'h', fr @ b'1'..=b'8', tf @ b'a'..=b'h', tr @ b'1'..=b'8'] => {
                Ok(Move {
                    from: Square::new(b'8' - fr, ff - b'a'),
                    to: Square::new(b'8' - tr, tf - b'a'),
                })
            }
            _ => Err(ParseMoveError),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MoveVisitor;

        impl serde::de::Visitor<'_> for MoveVisitor {
            type Value = Move;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("coordinate move")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(MoveVisitor)
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is fixed, with room for every movement-legal move of one
/// side on any board that keeps to sixteen pieces a side.
///
/// # Example
///
/// ```
/// use woodpusher::{legal_moves, Board, Color};
///
/// let moves = legal_moves(&Board::default(), Color::White);
/// assert_eq!(moves.len(), 20);
/// ```
pub type MoveList = ArrayVec<Move, 512>;
