use std::{error::Error, fmt};

use bitflags::bitflags;

use crate::{board::Board, color::Color, role::Role};

/// A not necessarily playable position: piece placement plus side to move.
///
/// Used to start a [`GameSession`](crate::GameSession) from somewhere other
/// than the standard starting position. Validation happens when the session
/// is built, not here; the fields are plain data.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Setup {
    /// Piece positions on the board.
    pub board: Board,

    /// Side to move.
    pub turn: Color,
}

impl Setup {
    pub fn empty() -> Setup {
        Setup {
            board: Board::empty(),
            turn: Color::White,
        }
    }

    /// Checks the invariants the game flow relies on: some pieces on the
    /// board, exactly one king per side, at most sixteen pieces per side.
    ///
    /// All defects are reported at once.
    ///
    /// # Examples
    ///
    /// ```
    /// use woodpusher::{PositionErrorKinds, Setup};
    ///
    /// assert!(Setup::default().validate().is_ok());
    ///
    /// let err = Setup::empty().validate().unwrap_err();
    /// assert!(err.kinds().contains(PositionErrorKinds::MISSING_KING));
    /// ```
    pub fn validate(&self) -> Result<(), PositionError> {
        let mut kinds = PositionErrorKinds::empty();
        if self.board.pieces().next().is_none() {
            kinds |= PositionErrorKinds::EMPTY_BOARD;
        }
        for color in Color::ALL {
            let kings = self
                .board
                .by_color(color)
                .filter(|(_, piece)| piece.role == Role::King)
                .count();
            if kings == 0 {
                kinds |= PositionErrorKinds::MISSING_KING;
            } else if kings > 1 {
                kinds |= PositionErrorKinds::TOO_MANY_KINGS;
            }
            if self.board.by_color(color).count() > 16 {
                kinds |= PositionErrorKinds::TOO_MANY_PIECES;
            }
        }
        if kinds.is_empty() {
            Ok(())
        } else {
            Err(PositionError { kinds })
        }
    }
}

impl Default for Setup {
    fn default() -> Setup {
        Setup {
            board: Board::default(),
            turn: Color::White,
        }
    }
}

bitflags! {
    /// Reasons a [`Setup`] cannot be played.
    #[derive(Debug, Clone, Copy, Eq, PartialEq)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;

        /// A side has no king.
        const MISSING_KING = 1 << 1;

        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 2;

        /// A side has more than sixteen pieces.
        const TOO_MANY_PIECES = 1 << 3;
    }
}

/// Error when a [`Setup`] fails [validation](Setup::validate).
#[derive(Clone, Debug)]
pub struct PositionError {
    kinds: PositionErrorKinds,
}

impl PositionError {
    #[inline]
    pub fn kinds(&self) -> PositionErrorKinds {
        self.kinds
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position")?;
        let mut sep = ": ";
        for (name, _) in self.kinds.iter_names() {
            f.write_str(sep)?;
            f.write_str(name)?;
            sep = ", ";
        }
        Ok(())
    }
}

impl Error for PositionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn test_default_setup_is_valid() {
        assert!(Setup::default().validate().is_ok());
    }

    #[test]
    fn test_empty_setup() {
        let err = Setup::empty().validate().unwrap_err();
        assert!(err.kinds().contains(PositionErrorKinds::EMPTY_BOARD));
        assert!(err.kinds().contains(PositionErrorKinds::MISSING_KING));
    }

    #[test]
    fn test_one_sided_setup() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(Square::E1, Color::White.king());
        let err = setup.validate().unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::MISSING_KING);
    }

    #[test]
    fn test_king_count() {
        let mut setup = Setup::default();
        // A second king in place of the e-pawn keeps the piece count at 16.
        setup.board.set_piece_at(Square::E2, Color::White.king());
        let err = setup.validate().unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::TOO_MANY_KINGS);
    }

    #[test]
    fn test_piece_count() {
        let mut setup = Setup::default();
        setup.board.set_piece_at(Square::E4, Color::White.queen());
        let err = setup.validate().unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::TOO_MANY_PIECES);
        assert_eq!(err.to_string(), "illegal position: TOO_MANY_PIECES");
    }
}
