use crate::engine::Move;
use crate::logic::board::{Board, Team};
use crate::logic::rules::{KingCapture, MoveError, WinnerCheck};
use crate::logic::transcript::{self, TranscriptError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Team),
    /// The named side is to move and has no legal move. No winner is declared.
    Stalemate(Team),
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error("move {index} rejected: {source}")]
    Move { index: usize, source: MoveError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    #[must_use]
    pub const fn from_board(board: Board) -> Self {
        Self {
            board,
            status: GameStatus::Playing,
        }
    }

    pub const fn turn(&self) -> Team {
        self.board.turn
    }

    pub const fn is_over(&self) -> bool {
        !matches!(self.status, GameStatus::Playing)
    }

    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        self.make_move_with(mv, &KingCapture)
    }

    /// Plays `mv` for the side to move and decides the outcome with `checker`.
    /// A side left without a legal move ends the game in stalemate unless `checker`
    /// names a winner. The state is unchanged on error.
    pub fn make_move_with<W: WinnerCheck>(&mut self, mv: Move, checker: &W) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if mv.team != self.board.turn {
            return Err(MoveError::NotYourTurn(mv.team));
        }
        if !self.board.legal_moves(mv.team)?.contains(&mv) {
            return Err(MoveError::IllegalMove);
        }

        let mut next_board = self.board.clone();
        next_board.apply_move(&mv)?;

        let status = match checker.check_winner(&next_board) {
            Some(winner) => GameStatus::Won(winner),
            None if next_board.legal_moves(next_board.turn)?.is_empty() => {
                GameStatus::Stalemate(next_board.turn)
            }
            None => GameStatus::Playing,
        };

        self.board = next_board;
        self.status = status;
        match status {
            GameStatus::Won(winner) => {
                log::info!("{winner:?} wins after {} plies", self.board.history.len());
            }
            GameStatus::Stalemate(stuck) => {
                let plies = self.board.history.len();
                log::info!("{stuck:?} has no legal move after {plies} plies");
            }
            GameStatus::Playing => {}
        }
        Ok(())
    }

    /// Moves played so far, in transcript form.
    pub fn transcript(&self) -> String {
        transcript::encode(&self.board.history)
    }

    /// Replays a transcript from the opening position.
    pub fn replay(text: &str) -> Result<Self, ReplayError> {
        let moves = transcript::decode(text)?;
        let mut game = Self::new();
        for (index, mv) in moves.into_iter().enumerate() {
            game.make_move(mv)
                .map_err(|source| ReplayError::Move { index, source })?;
        }
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Piece, PieceKind, Position};

    fn pos(row: u8, col: u8, tier: u8) -> Position {
        Position::new(row, col, tier).unwrap()
    }

    fn pawn_push() -> Move {
        Move {
            team: Team::White,
            kind: PieceKind::Pawn,
            to: pos(5, 4, 2),
            from: pos(6, 4, 2),
            capture: false,
        }
    }

    #[test]
    fn test_make_move_switches_turn() {
        let mut game = GameState::new();
        game.make_move(pawn_push()).unwrap();
        assert_eq!(game.turn(), Team::Black);
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.transcript(), "1,1,5,4,2,6,4,2,0");
    }

    #[test]
    fn test_rejects_wrong_turn_and_illegal_moves() {
        let mut game = GameState::new();

        let black = Move {
            team: Team::Black,
            kind: PieceKind::Pawn,
            to: pos(3, 4, 2),
            from: pos(2, 4, 2),
            capture: false,
        };
        assert_eq!(game.make_move(black), Err(MoveError::NotYourTurn(Team::Black)));

        let too_far = Move {
            to: pos(4, 4, 2),
            ..pawn_push()
        };
        assert_eq!(game.make_move(too_far), Err(MoveError::IllegalMove));
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_king_capture_ends_game() {
        let mut board = Board::empty();
        board.place(pos(4, 4, 2), Piece::new(PieceKind::Cannon, Team::White));
        board.place(pos(8, 8, 2), Piece::new(PieceKind::King, Team::White));
        board.place(pos(4, 5, 2), Piece::new(PieceKind::King, Team::Black));
        let mut game = GameState::from_board(board);

        let capture = Move {
            team: Team::White,
            kind: PieceKind::Cannon,
            to: pos(4, 5, 2),
            from: pos(4, 4, 2),
            capture: true,
        };
        game.make_move(capture).unwrap();
        assert_eq!(game.status, GameStatus::Won(Team::White));
        assert!(game.is_over());

        let next = Move {
            team: Team::Black,
            kind: PieceKind::King,
            to: pos(0, 1, 2),
            from: pos(0, 0, 2),
            capture: false,
        };
        assert_eq!(game.make_move(next), Err(MoveError::GameOver));
    }

    #[test]
    fn test_side_without_moves_is_stalemate() {
        let mut board = Board::empty();
        board.place(pos(6, 0, 2), Piece::new(PieceKind::Pawn, Team::White));
        // A black pawn on white's back row has nowhere to go.
        board.place(pos(8, 8, 2), Piece::new(PieceKind::Pawn, Team::Black));
        let mut game = GameState::from_board(board);

        let push = Move {
            team: Team::White,
            kind: PieceKind::Pawn,
            to: pos(5, 0, 2),
            from: pos(6, 0, 2),
            capture: false,
        };
        game.make_move(push).unwrap();
        assert_eq!(game.status, GameStatus::Stalemate(Team::Black));
        assert!(game.is_over());
    }

    /// Picks the side that still has pieces, whatever the kings say.
    struct MostPieces;

    impl WinnerCheck for MostPieces {
        fn check_winner(&self, board: &Board) -> Option<Team> {
            let pieces = board.all_pieces();
            let white = pieces.iter().filter(|(p, _)| p.team == Team::White).count();
            let black = pieces.len() - white;
            match white.cmp(&black) {
                std::cmp::Ordering::Greater => Some(Team::White),
                std::cmp::Ordering::Less => Some(Team::Black),
                std::cmp::Ordering::Equal => None,
            }
        }
    }

    #[test]
    fn test_winner_check_decides_before_stalemate() {
        let mut board = Board::empty();
        board.place(pos(6, 0, 2), Piece::new(PieceKind::Pawn, Team::White));
        board.place(pos(6, 2, 2), Piece::new(PieceKind::Pawn, Team::White));
        board.place(pos(8, 8, 2), Piece::new(PieceKind::Pawn, Team::Black));
        let mut game = GameState::from_board(board);

        let push = Move {
            team: Team::White,
            kind: PieceKind::Pawn,
            to: pos(5, 0, 2),
            from: pos(6, 0, 2),
            capture: false,
        };
        game.make_move_with(push, &MostPieces).unwrap();
        assert_eq!(game.status, GameStatus::Won(Team::White));
    }

    #[test]
    fn test_replay_round_trip() {
        let mut game = GameState::new();
        game.make_move(pawn_push()).unwrap();
        let reply = game.board.legal_moves(Team::Black).unwrap()[0];
        game.make_move(reply).unwrap();

        let replayed = GameState::replay(&game.transcript()).unwrap();
        assert_eq!(replayed, game);
    }

    #[test]
    fn test_replay_reports_bad_move() {
        let err = GameState::replay("1,1,4,4,2,6,4,2,0").unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Move {
                index: 0,
                source: MoveError::IllegalMove
            }
        ));

        let err = GameState::replay("1,1,4,4").unwrap_err();
        assert!(matches!(err, ReplayError::Transcript(_)));
    }
}
