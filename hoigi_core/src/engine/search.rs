use crate::engine::config::EngineConfig;
use crate::engine::eval::SimpleEvaluator;
use crate::engine::{Evaluator, Move, SearchStats, Searcher};
use crate::logic::board::{Board, Team};
use crate::logic::rules::MoveError;
use log::{debug, trace, warn};
use std::sync::Arc;
use std::time::Instant;

// Leaves score -eval, so black maximizes and white minimizes.
const fn is_maximizer(team: Team) -> bool {
    matches!(team, Team::Black)
}

const fn worst_score(team: Team) -> f64 {
    if is_maximizer(team) {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

/// Tries every root move of `team` on its own clone and keeps the strictly best
/// score for the root role. Ties keep the earliest move.
fn select_root_move<F>(
    board: &Board,
    team: Team,
    mut score_child: F,
) -> Result<Option<(Move, f64)>, MoveError>
where
    F: FnMut(&Board) -> Result<f64, MoveError>,
{
    let moves = board.legal_moves(team)?;
    let maximizing = is_maximizer(team);

    let mut best: Option<(Move, f64)> = None;
    let mut best_score = worst_score(team);

    for mv in moves {
        let mut child = board.clone();
        child.apply_move(&mv)?;
        let score = score_child(&child)?;
        trace!("root {:?} {} -> {}: {score}", mv.kind, mv.from, mv.to);

        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better || best.is_none() {
            best_score = score;
            best = Some((mv, score));
        }
    }

    Ok(best)
}

pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: SimpleEvaluator,
    nodes_searched: u64,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: SimpleEvaluator::new(config.clone()),
            config,
            nodes_searched: 0,
        }
    }

    /// Best move for `team` searched `depth` plies deep (at least one).
    /// `Ok(None)` when `team` has no legal move.
    pub fn best_move(
        &mut self,
        depth: u8,
        board: &Board,
        team: Team,
    ) -> Result<Option<Move>, MoveError> {
        Ok(self.search_depth(depth, board, team)?.map(|(mv, _)| mv))
    }

    pub fn search_depth(
        &mut self,
        depth: u8,
        board: &Board,
        team: Team,
    ) -> Result<Option<(Move, SearchStats)>, MoveError> {
        let depth = depth.max(1);
        let start = Instant::now();
        self.nodes_searched = 0;

        // No pruning across root moves: every child gets the full window.
        let best = select_root_move(board, team, |child| {
            self.alpha_beta(
                child,
                depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                team.opposite(),
            )
        })?;

        Ok(best.map(|(mv, score)| {
            let stats = SearchStats {
                depth,
                nodes: self.nodes_searched,
                time_ms: elapsed_ms(start),
                score,
            };
            debug!(
                "alpha-beta {:?}: {:?} {} -> {} score {score} nodes {} time {}ms",
                team, mv.kind, mv.from, mv.to, stats.nodes, stats.time_ms
            );
            (mv, stats)
        }))
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        team: Team,
    ) -> Result<f64, MoveError> {
        self.nodes_searched += 1;

        if depth == 0 {
            return Ok(-self.evaluator.evaluate(board));
        }

        let moves = board.legal_moves(team)?;
        if moves.is_empty() {
            return Ok(-self.evaluator.evaluate(board));
        }

        let maximizing = is_maximizer(team);
        let mut value = worst_score(team);

        for mv in moves {
            let mut child = board.clone();
            child.apply_move(&mv)?;
            let score = self.alpha_beta(&child, depth - 1, alpha, beta, team.opposite())?;

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }

            if beta <= alpha {
                break;
            }
        }

        Ok(value)
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(&mut self, board: &Board) -> Result<Option<(Move, SearchStats)>, MoveError> {
        let depth = self.config.search_depth;
        self.search_depth(depth, board, board.turn)
            .inspect_err(|e| warn!("alpha-beta search aborted: {e}"))
    }
}

/// Exhaustive minimax, used as a reference for the pruned search.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    evaluator: SimpleEvaluator,
    nodes_searched: u64,
}

impl MinimaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: SimpleEvaluator::new(config.clone()),
            config,
            nodes_searched: 0,
        }
    }

    /// Best move for the side to move on `board`, `n` plies deep.
    pub fn minimax_n(&mut self, board: &Board, n: u8) -> Result<Option<Move>, MoveError> {
        Ok(self.search_depth(n, board, board.turn)?.map(|(mv, _)| mv))
    }

    pub fn search_depth(
        &mut self,
        depth: u8,
        board: &Board,
        team: Team,
    ) -> Result<Option<(Move, SearchStats)>, MoveError> {
        let depth = depth.max(1);
        let start = Instant::now();
        self.nodes_searched = 0;

        let best = select_root_move(board, team, |child| {
            self.minimax(child, depth - 1, team.opposite())
        })?;

        Ok(best.map(|(mv, score)| {
            let stats = SearchStats {
                depth,
                nodes: self.nodes_searched,
                time_ms: elapsed_ms(start),
                score,
            };
            debug!(
                "minimax {:?}: {:?} {} -> {} score {score} nodes {} time {}ms",
                team, mv.kind, mv.from, mv.to, stats.nodes, stats.time_ms
            );
            (mv, stats)
        }))
    }

    fn minimax(&mut self, board: &Board, depth: u8, team: Team) -> Result<f64, MoveError> {
        self.nodes_searched += 1;

        if depth == 0 {
            return Ok(-self.evaluator.evaluate(board));
        }

        let moves = board.legal_moves(team)?;
        if moves.is_empty() {
            return Ok(-self.evaluator.evaluate(board));
        }

        let maximizing = is_maximizer(team);
        let mut value = worst_score(team);
        for mv in moves {
            let mut child = board.clone();
            child.apply_move(&mv)?;
            let score = self.minimax(&child, depth - 1, team.opposite())?;
            value = if maximizing {
                value.max(score)
            } else {
                value.min(score)
            };
        }

        Ok(value)
    }
}

impl Searcher for MinimaxEngine {
    fn search(&mut self, board: &Board) -> Result<Option<(Move, SearchStats)>, MoveError> {
        let depth = self.config.search_depth;
        self.search_depth(depth, board, board.turn)
            .inspect_err(|e| warn!("minimax search aborted: {e}"))
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
