use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::Board;
use crate::logic::eval_constants::get_pst_value;
use std::sync::Arc;

pub struct SimpleEvaluator {
    config: Arc<EngineConfig>,
}

impl SimpleEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for SimpleEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        let mut score = 0.0;

        for (piece, pos) in board.all_pieces() {
            let material = self.config.material(piece.kind, pos.tier);
            let positional = self.config.position_weight * get_pst_value(piece.kind, piece.team, pos);
            score += f64::from(piece.team.sign()) * (material + positional);
        }

        score
    }
}
