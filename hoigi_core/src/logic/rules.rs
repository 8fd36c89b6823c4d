use crate::logic::board::{Board, PieceKind, Position, Team};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece at {0}")]
    NoPieceAtSource(Position),
    #[error("{0:?} has no move generator")]
    UnimplementedArchetype(PieceKind),
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Team),
    #[error("move is not legal in this position")]
    IllegalMove,
    #[error("the game is already over")]
    GameOver,
}

/// Decides whether a position is won. Supplied by whoever runs the game.
pub trait WinnerCheck {
    fn check_winner(&self, board: &Board) -> Option<Team>;
}

/// A team wins once the opposing king has left the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct KingCapture;

impl WinnerCheck for KingCapture {
    fn check_winner(&self, board: &Board) -> Option<Team> {
        match (board.has_king(Team::White), board.has_king(Team::Black)) {
            (true, false) => Some(Team::White),
            (false, true) => Some(Team::Black),
            _ => None,
        }
    }
}
