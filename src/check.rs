//! Check and checkmate analysis.

use crate::{board::Board, color::Color, m::Move, rules};

/// Tests whether `side`'s king square is attacked.
///
/// The king is located by scanning the board; then every opposing piece is
/// asked, through the ordinary movement rules, whether capturing the king
/// square would be legal. Attacks are just legal captures, obstruction
/// rules included.
///
/// # Panics
///
/// Panics if `side` has no king on the board. Boards played through
/// [`GameSession`](crate::GameSession) always keep both kings; callers
/// assembling boards by hand must uphold the same invariant.
///
/// # Examples
///
/// ```
/// use woodpusher::{is_in_check, Board, Color};
///
/// let board: Board = "
///     . . . . r . . .
///     . . . . . . . .
///     . . . . . . . .
///     . . . . . . . .
///     . . . . . . . .
///     . . . . . . . .
///     . . . . . . . .
///     . . . . K . . k
/// ".parse()?;
/// assert!(is_in_check(&board, Color::White));
/// # Ok::<_, woodpusher::ParseBoardError>(())
/// ```
pub fn is_in_check(board: &Board, side: Color) -> bool {
    let king = board.king_of(side).expect("side under test has a king");
    board
        .by_color(!side)
        .any(|(from, piece)| rules::is_legal(board, piece, Move::new(from, king)))
}

/// Tests whether `side` is checkmated: in check, with no movement-legal
/// move leading to a board where it is no longer in check.
///
/// Every candidate from [`legal_moves`](rules::legal_moves) is applied to a
/// copy of the board, captures included, and the resulting position is
/// re-tested with [`is_in_check`]. A side that is not in check is never
/// checkmate, even with no legal moves at all; stalemate is deliberately
/// not detected.
///
/// # Panics
///
/// Panics if `side` has no king on the board, as [`is_in_check`] does.
pub fn is_checkmate(board: &Board, side: Color) -> bool {
    if !is_in_check(board, side) {
        return false;
    }
    rules::legal_moves(board, side)
        .iter()
        .all(|&m| is_in_check(&board.apply(m), side))
}
