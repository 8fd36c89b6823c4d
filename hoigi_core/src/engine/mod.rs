use crate::logic::board::{Board, PieceKind, Position, Team};
use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod random;
pub mod search;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub team: Team,
    pub kind: PieceKind,
    pub to: Position,
    pub from: Position,
    pub capture: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
    /// Score of the chosen move on the black-positive search scale.
    pub score: f64,
}

pub trait Evaluator {
    /// Static score of `board`. Positive favours white.
    fn evaluate(&self, board: &Board) -> f64;
}

pub trait Searcher {
    /// Picks a move for the side to move on `board`. `Ok(None)` means it has no legal move.
    fn search(&mut self, board: &Board) -> Result<Option<(Move, SearchStats)>, MoveError>;
}
