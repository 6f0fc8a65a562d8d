//! Movement legality, independent of check.

use crate::{
    board::Board,
    color::Color,
    m::{Move, MoveList},
    role::Role,
    square::Square,
    types::Piece,
};

/// Decides whether `piece` may make the move `m` on `board`.
///
/// This is movement legality only: shape, path obstruction and the capture
/// rules, evaluated in a fixed order. It deliberately knows nothing about
/// check: a king move into an attacked square is accepted here, and a move
/// that leaves the mover's own king attacked is too. King safety enters one
/// layer up, inside the checkmate search.
///
/// In order:
///
/// 1. A move must displace; `from == to` is rejected.
/// 2. A destination holding a piece of the mover's own color is rejected
///    before any piece rule runs.
/// 3. Per piece: knights leap in a 2-and-1 pattern, kings step one square,
///    rooks and bishops slide on clear lines, queens combine the two, pawns
///    advance by color direction and capture diagonally.
///
/// # Examples
///
/// ```
/// use woodpusher::{is_legal, Board, Color, Move, Square};
///
/// let board = Board::default();
/// // 1. e4, a double-step from the pawn's start row.
/// assert!(is_legal(&board, Color::White.pawn(), Move::new(Square::E2, Square::E4)));
/// // Three squares forward is not a pawn move.
/// assert!(!is_legal(&board, Color::White.pawn(), Move::new(Square::E2, Square::E5)));
/// ```
pub fn is_legal(board: &Board, piece: Piece, m: Move) -> bool {
    if m.from == m.to {
        return false;
    }
    if board.color_at(m.to) == Some(piece.color) {
        return false;
    }
    match piece.role {
        Role::Knight => is_knight_move(m),
        Role::King => m.from.distance(m.to) == 1,
        Role::Rook => is_rook_move(board, m),
        Role::Bishop => is_bishop_move(board, m),
        Role::Queen => is_rook_move(board, m) || is_bishop_move(board, m),
        Role::Pawn => is_pawn_move(board, piece.color, m),
    }
}

/// Enumerates every movement-legal move for `side`: each of that side's
/// pieces crossed with all 64 destinations, filtered through [`is_legal`].
///
/// Check is ignored, exactly as in [`is_legal`]. This is the candidate set
/// the checkmate search walks.
pub fn legal_moves(board: &Board, side: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in board.by_color(side) {
        for to in Square::ALL {
            let m = Move::new(from, to);
            if is_legal(board, piece, m) {
                moves.push(m);
            }
        }
    }
    moves
}

fn is_knight_move(m: Move) -> bool {
    let (dr, dc) = m.from.delta(m.to);
    let (dr, dc) = (dr.unsigned_abs(), dc.unsigned_abs());
    (dr == 2 && dc == 1) || (dr == 1 && dc == 2)
}

fn is_rook_move(board: &Board, m: Move) -> bool {
    let (dr, dc) = m.from.delta(m.to);
    (dr == 0) != (dc == 0) && path_clear(board, m)
}

fn is_bishop_move(board: &Board, m: Move) -> bool {
    let (dr, dc) = m.from.delta(m.to);
    dr.abs() == dc.abs() && path_clear(board, m)
}

/// Walks the straight or diagonal line from `m.from` toward `m.to`, one
/// step at a time; every strictly intermediate square must be empty. The
/// destination itself is not inspected.
fn path_clear(board: &Board, m: Move) -> bool {
    let (dr, dc) = m.from.delta(m.to);
    let (step_row, step_col) = (dr.signum(), dc.signum());
    let mut row = m.from.row() as i8 + step_row;
    let mut col = m.from.col() as i8 + step_col;
    while (row, col) != (m.to.row() as i8, m.to.col() as i8) {
        if board.piece_at(Square::new(row as u8, col as u8)).is_some() {
            return false;
        }
        row += step_row;
        col += step_col;
    }
    true
}

fn is_pawn_move(board: &Board, color: Color, m: Move) -> bool {
    let (dr, dc) = m.from.delta(m.to);
    let dir = color.pawn_direction();
    if dc == 0 {
        // Forward moves never capture.
        if board.piece_at(m.to).is_some() {
            return false;
        }
        if dr == dir {
            return true;
        }
        dr == 2 * dir
            && m.from.row() == color.pawn_start_row()
            && board
                .piece_at(Square::new((m.from.row() as i8 + dir) as u8, m.from.col()))
                .is_none()
    } else {
        // Diagonal capture: the destination is occupied, and rule 2 has
        // already ruled out its being our own piece.
        dr == dir && dc.unsigned_abs() == 1 && board.piece_at(m.to).is_some()
    }
}
