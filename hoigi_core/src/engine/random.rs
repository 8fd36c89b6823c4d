use crate::engine::{Move, SearchStats, Searcher};
use crate::logic::board::Board;
use crate::logic::rules::MoveError;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plays a uniformly random legal move.
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Searcher for RandomEngine {
    fn search(&mut self, board: &Board) -> Result<Option<(Move, SearchStats)>, MoveError> {
        let moves = board.legal_moves(board.turn)?;
        let Some(mv) = moves.choose(&mut self.rng).copied() else {
            return Ok(None);
        };
        debug!(
            "random {:?}: {:?} {} -> {} of {} moves",
            board.turn,
            mv.kind,
            mv.from,
            mv.to,
            moves.len()
        );
        Ok(Some((mv, SearchStats::default())))
    }
}
