//! A library for casual chess rules and a confirm-to-move game flow.
//!
//! The core is three small, pure layers:
//!
//! - [`Board`]: an 8×8 grid of optional pieces. Row 0 is Black's back rank,
//!   row 7 is White's; applying a [`Move`] produces a new board and never
//!   mutates the old one.
//! - [`is_legal`]: per-piece movement legality, including path obstruction
//!   for the sliding pieces. Deliberately casual: no castling, no en passant,
//!   no promotion, and a king may step into check.
//! - [`is_in_check`] / [`is_checkmate`]: a side is in check when an opposing
//!   piece has a legal move onto its king square, and checkmated when it is
//!   in check and no own move escapes. Stalemate is not detected.
//!
//! [`GameSession`] drives these through the click-select-confirm flow of a
//! two-player game.
//!
//! # Examples
//!
//! Query the rules directly:
//!
//! ```
//! use woodpusher::{is_in_check, is_legal, Board, Color, Move, Square};
//!
//! let board = Board::default();
//! let pawn = Color::White.pawn();
//! assert!(is_legal(&board, pawn, Move::new(Square::E2, Square::E4)));
//! assert!(!is_legal(&board, pawn, Move::new(Square::E2, Square::E5)));
//! assert!(!is_in_check(&board, Color::White));
//! ```
//!
//! Play a game (the fool's mate):
//!
//! ```
//! use woodpusher::{Color, GameSession, Status};
//!
//! let mut game = GameSession::new();
//! for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     game.click(from.parse()?);
//!     game.click(to.parse()?);
//!     game.confirm();
//! }
//! assert_eq!(game.status(), Status::Checkmate { winner: Color::Black });
//! # Ok::<_, woodpusher::ParseSquareError>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.

#![cfg_attr(docs_rs, feature(doc_auto_cfg))]
#![doc(html_root_url = "https://docs.rs/woodpusher/0.4.0")]
#![warn(missing_debug_implementations)]

mod board;
mod check;
mod color;
mod game;
mod m;
mod role;
mod rules;
mod setup;
mod square;
mod types;

pub use board::{Board, ParseBoardError};
pub use check::{is_checkmate, is_in_check};
pub use color::{ByColor, Color, ParseColorError};
pub use game::{Captures, ClickOutcome, GameSession, Status, Tentative};
pub use m::{Move, MoveList, ParseMoveError};
pub use role::Role;
pub use rules::{is_legal, legal_moves};
pub use setup::{PositionError, PositionErrorKinds, Setup};
pub use square::{ParseSquareError, Square};
pub use types::Piece;
