use std::{mem, num::NonZeroU32};

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::{
    board::Board,
    check,
    color::{ByColor, Color},
    m::Move,
    role::Role,
    rules,
    setup::{PositionError, Setup},
    square::Square,
};

/// Roles a side has captured, in capture order.
///
/// A side can never capture more than the sixteen pieces its opponent
/// starts with, so the list lives on the stack.
pub type Captures = ArrayVec<Role, 16>;

/// Outcome of the analysis run after each confirmed move.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Status {
    /// Nothing to report; play continues.
    Ongoing,
    /// The side to move is in check.
    Check {
        /// The checked side.
        side: Color,
    },
    /// The side to move is checkmated and the game is over.
    Checkmate {
        /// The side that delivered mate.
        winner: Color,
    },
}

/// What a [`click`](GameSession::click) did to the selection state.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClickOutcome {
    /// The click changed nothing.
    Ignored,
    /// A piece of the side to move is now selected.
    PieceSelected,
    /// A legal move is now proposed and awaits confirmation.
    MoveProposed,
    /// The selection, along with any proposed move, was discarded.
    SelectionCleared,
}

/// A proposed move awaiting confirmation, with its outcome precomputed.
#[derive(Clone, Debug)]
pub struct Tentative {
    /// The proposed move.
    pub m: Move,
    /// The board after the move. Not yet committed.
    pub board: Board,
    /// Role of the piece the move captures, if any.
    pub capture: Option<Role>,
}

#[derive(Clone, Debug)]
enum Phase {
    Idle,
    Selected(Square),
    Proposed(Tentative),
}

/// A two-player game with click-to-select and confirm-to-move flow.
///
/// Squares are clicked to select a piece of the side to move and then a
/// destination. A movement-legal destination becomes a [`Tentative`] move;
/// nothing touches the committed board until
/// [`confirm`](GameSession::confirm), which applies the move, flips the turn
/// and reports the [`Status`] of the new side to move. An illegal destination
/// simply clears the selection.
///
/// # Examples
///
/// ```
/// use woodpusher::{ClickOutcome, GameSession, Square, Status};
///
/// let mut game = GameSession::new();
/// assert_eq!(game.click(Square::E2), ClickOutcome::PieceSelected);
/// assert_eq!(game.click(Square::E4), ClickOutcome::MoveProposed);
/// assert_eq!(game.confirm(), Some(Status::Ongoing));
/// assert!(game.board().piece_at(Square::E4).is_some());
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    turn: Color,
    phase: Phase,
    status: Status,
    moves_played: u32,
    fullmoves: NonZeroU32,
    captures: ByColor<Captures>,
    setup: Setup,
}

impl GameSession {
    /// Starts a game from the standard position, White to move.
    pub fn new() -> GameSession {
        GameSession::start(Setup::default())
    }

    /// Starts a game from a custom position.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] when the setup fails
    /// [validation](Setup::validate).
    pub fn from_setup(setup: Setup) -> Result<GameSession, PositionError> {
        setup.validate()?;
        Ok(GameSession::start(setup))
    }

    fn start(setup: Setup) -> GameSession {
        GameSession {
            board: setup.board.clone(),
            turn: setup.turn,
            phase: Phase::Idle,
            status: Status::Ongoing,
            moves_played: 0,
            fullmoves: NonZeroU32::MIN,
            captures: ByColor::new_with(|_| Captures::new()),
            setup,
        }
    }

    /// The committed board. Tentative moves are not reflected here.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Status reported after the last confirmed move.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, Status::Checkmate { .. })
    }

    /// The selected square, if any. Kept while a move is proposed.
    pub fn selected(&self) -> Option<Square> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Selected(from) => Some(*from),
            Phase::Proposed(tentative) => Some(tentative.m.from),
        }
    }

    /// The proposed move awaiting confirmation, if any.
    pub fn tentative(&self) -> Option<&Tentative> {
        match &self.phase {
            Phase::Proposed(tentative) => Some(tentative),
            _ => None,
        }
    }

    /// Confirmed moves played so far, both sides counted.
    #[inline]
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// Move pair counter. Starts at 1 and increases after every Black move.
    #[inline]
    pub fn fullmoves(&self) -> NonZeroU32 {
        self.fullmoves
    }

    /// Roles `side` has captured so far, in capture order.
    pub fn captures(&self, side: Color) -> &[Role] {
        self.captures.by_color(side)
    }

    /// Handles a click on `square`.
    ///
    /// From idle, a click picks up a piece of the side to move. With a piece
    /// selected, a click proposes the move to that square if it is legal, and
    /// otherwise clears the selection. While a move is proposed, any click
    /// discards it. Clicks are ignored once the game is over.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if self.is_game_over() {
            return ClickOutcome::Ignored;
        }
        match self.phase {
            Phase::Idle => {
                if self.board.color_at(square) == Some(self.turn) {
                    debug!("{} selects {square}", self.turn);
                    self.phase = Phase::Selected(square);
                    ClickOutcome::PieceSelected
                } else {
                    ClickOutcome::Ignored
                }
            }
            Phase::Selected(from) => self.propose(Move::new(from, square)),
            Phase::Proposed(_) => {
                debug!("tentative move discarded");
                self.phase = Phase::Idle;
                ClickOutcome::SelectionCleared
            }
        }
    }

    fn propose(&mut self, m: Move) -> ClickOutcome {
        // A move onto a king square is never proposed, however legal its
        // shape: check analysis requires both kings on the board.
        let accepted = self
            .board
            .piece_at(m.from)
            .is_some_and(|piece| rules::is_legal(&self.board, piece, m))
            && self.board.role_at(m.to) != Some(Role::King);
        if accepted {
            debug!("{} proposes {m}", self.turn);
            self.phase = Phase::Proposed(Tentative {
                m,
                board: self.board.apply(m),
                capture: self.board.role_at(m.to),
            });
            ClickOutcome::MoveProposed
        } else {
            debug!("selection cleared");
            self.phase = Phase::Idle;
            ClickOutcome::SelectionCleared
        }
    }

    /// Commits the proposed move, if any.
    ///
    /// The tentative board becomes the committed board, the captured role (if
    /// any) is recorded for the mover, the counters advance and the turn
    /// flips. The new side to move is then analyzed once; the returned
    /// [`Status`] is also kept for [`status`](GameSession::status). With no
    /// move proposed, nothing changes and `None` is returned.
    pub fn confirm(&mut self) -> Option<Status> {
        let tentative = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Proposed(tentative) => tentative,
            phase => {
                self.phase = phase;
                return None;
            }
        };

        debug!("{} plays {}", self.turn, tentative.m);
        self.board = tentative.board;
        if let Some(role) = tentative.capture {
            self.captures.by_color_mut(self.turn).push(role);
        }
        self.moves_played += 1;
        if self.turn.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.turn = !self.turn;

        self.status = if !check::is_in_check(&self.board, self.turn) {
            Status::Ongoing
        } else if check::is_checkmate(&self.board, self.turn) {
            info!("checkmate, {} wins", !self.turn);
            Status::Checkmate { winner: !self.turn }
        } else {
            info!("{} is in check", self.turn);
            Status::Check { side: self.turn }
        };
        Some(self.status)
    }

    /// Returns to the initial setup: board and turn restored, selection,
    /// counters, captures and status reset.
    pub fn restart(&mut self) {
        debug!("game restarted");
        self.board = self.setup.board.clone();
        self.turn = self.setup.turn;
        self.phase = Phase::Idle;
        self.status = Status::Ongoing;
        self.moves_played = 0;
        self.fullmoves = NonZeroU32::MIN;
        self.captures = ByColor::new_with(|_| Captures::new());
    }
}

impl Default for GameSession {
    fn default() -> GameSession {
        GameSession::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_own_piece_only() {
        let mut game = GameSession::new();
        assert_eq!(game.click(Square::E4), ClickOutcome::Ignored);
        assert_eq!(game.click(Square::E7), ClickOutcome::Ignored);
        assert_eq!(game.click(Square::E2), ClickOutcome::PieceSelected);
        assert_eq!(game.selected(), Some(Square::E2));
    }

    #[test]
    fn test_illegal_target_clears_selection() {
        let mut game = GameSession::new();
        game.click(Square::E2);
        assert_eq!(game.click(Square::E5), ClickOutcome::SelectionCleared);
        assert_eq!(game.selected(), None);
        assert_eq!(game.confirm(), None);

        // Zero displacement and own-piece targets clear as well.
        game.click(Square::E2);
        assert_eq!(game.click(Square::E2), ClickOutcome::SelectionCleared);
        game.click(Square::E2);
        assert_eq!(game.click(Square::D2), ClickOutcome::SelectionCleared);
    }

    #[test]
    fn test_click_discards_tentative() {
        let mut game = GameSession::new();
        game.click(Square::E2);
        assert_eq!(game.click(Square::E4), ClickOutcome::MoveProposed);

        let tentative = game.tentative().unwrap();
        assert_eq!(tentative.m, Move::new(Square::E2, Square::E4));
        assert_eq!(tentative.capture, None);
        assert!(tentative.board.piece_at(Square::E4).is_some());
        assert!(game.board().piece_at(Square::E2).is_some());

        assert_eq!(game.click(Square::D2), ClickOutcome::SelectionCleared);
        assert!(game.tentative().is_none());
        assert_eq!(game.confirm(), None);
        assert!(game.board().piece_at(Square::E2).is_some());
    }

    #[test]
    fn test_confirm_commits_and_flips_turn() {
        let mut game = GameSession::new();
        game.click(Square::E2);
        game.click(Square::E4);
        assert_eq!(game.confirm(), Some(Status::Ongoing));
        assert_eq!(game.board().piece_at(Square::E2), None);
        assert_eq!(
            game.board().piece_at(Square::E4),
            Some(Color::White.pawn())
        );
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.moves_played(), 1);
        assert_eq!(game.fullmoves().get(), 1);

        game.click(Square::E7);
        game.click(Square::E5);
        assert_eq!(game.confirm(), Some(Status::Ongoing));
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.moves_played(), 2);
        assert_eq!(game.fullmoves().get(), 2);
    }

    #[test]
    fn test_capture_bookkeeping() {
        let mut game = GameSession::new();
        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::D7, Square::D5),
            (Square::E4, Square::D5),
        ] {
            game.click(from);
            game.click(to);
            game.confirm();
        }
        assert_eq!(game.captures(Color::White), [Role::Pawn]);
        assert!(game.captures(Color::Black).is_empty());
        assert_eq!(game.moves_played(), 3);
    }

    #[test]
    fn test_king_capture_refused() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(Square::E1, Color::White.king());
        setup.board.set_piece_at(Square::D4, Color::White.queen());
        setup.board.set_piece_at(Square::D5, Color::Black.king());
        let mut game = GameSession::from_setup(setup).unwrap();

        // Movement rules alone would allow the capture.
        assert!(rules::is_legal(
            game.board(),
            Color::White.queen(),
            Move::new(Square::D4, Square::D5)
        ));

        assert_eq!(game.click(Square::D4), ClickOutcome::PieceSelected);
        assert_eq!(game.click(Square::D5), ClickOutcome::SelectionCleared);
        assert!(game.tentative().is_none());
    }

    #[test]
    fn test_game_over_locks_session() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(Square::E1, Color::White.king());
        setup.board.set_piece_at(Square::A1, Color::White.rook());
        setup.board.set_piece_at(Square::H8, Color::Black.king());
        setup.board.set_piece_at(Square::G7, Color::Black.pawn());
        setup.board.set_piece_at(Square::H7, Color::Black.pawn());
        let mut game = GameSession::from_setup(setup).unwrap();

        game.click(Square::A1);
        assert_eq!(game.click(Square::A8), ClickOutcome::MoveProposed);
        assert_eq!(
            game.confirm(),
            Some(Status::Checkmate {
                winner: Color::White
            })
        );
        assert!(game.is_game_over());

        assert_eq!(game.click(Square::H8), ClickOutcome::Ignored);
        assert_eq!(game.confirm(), None);

        game.restart();
        assert_eq!(game.status(), Status::Ongoing);
        assert_eq!(game.click(Square::A1), ClickOutcome::PieceSelected);
    }

    #[test]
    fn test_from_setup_rejects_invalid() {
        assert!(GameSession::from_setup(Setup::empty()).is_err());
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut game = GameSession::new();
        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::D7, Square::D5),
            (Square::E4, Square::D5),
        ] {
            game.click(from);
            game.click(to);
            game.confirm();
        }
        game.restart();
        assert_eq!(game.board(), &Board::default());
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.moves_played(), 0);
        assert_eq!(game.fullmoves().get(), 1);
        assert!(game.captures(Color::White).is_empty());
    }
}
