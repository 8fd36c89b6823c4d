use crate::engine::Move;
use crate::logic::eval_constants::material_value;
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;

pub const ROWS: usize = 9;
pub const COLS: usize = 9;
pub const TIERS: usize = 3;
pub const SQUARES: usize = ROWS * COLS;

/// The tier an unstacked piece stands on.
pub const FIELD_TIER: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    White,
    Black,
}

impl Team {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// +1 for white, -1 for black.
    pub const fn sign(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Row delta of one step forward. White advances toward row 0.
    pub const fn forward(self) -> i32 {
        -self.sign()
    }

    pub const fn from_sign(sign: i32) -> Option<Self> {
        match sign {
            1 => Some(Self::White),
            -1 => Some(Self::Black),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn = 1,
    King = 2,
    Fortress = 3,
    Spy = 4,
    Captain = 5,
    Cannon = 6,
    Musketeer = 7,
    Knight = 8,
    Samurai = 9,
    Archer = 10,
    Major = 11,
    Lieutenant = 12,
    General = 13,
}

impl PieceKind {
    pub const ALL: [Self; 13] = [
        Self::Pawn,
        Self::King,
        Self::Fortress,
        Self::Spy,
        Self::Captain,
        Self::Cannon,
        Self::Musketeer,
        Self::Knight,
        Self::Samurai,
        Self::Archer,
        Self::Major,
        Self::Lieutenant,
        Self::General,
    ];

    /// Archetype id used by move transcripts (1..=13).
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| i32::from(kind.id()) == id)
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::King => 'k',
            Self::Fortress => 'f',
            Self::Spy => 's',
            Self::Captain => 'c',
            Self::Cannon => 'x',
            Self::Musketeer => 'm',
            Self::Knight => 'n',
            Self::Samurai => 'r',
            Self::Archer => 'a',
            Self::Major => 'j',
            Self::Lieutenant => 'l',
            Self::General => 'g',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub team: Team,
    /// Set until the piece is placed on the board.
    pub onhold: bool,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, team: Team) -> Self {
        Self {
            kind,
            team,
            onhold: true,
        }
    }

    /// Default material value of this piece when standing on `tier`.
    pub fn value(&self, tier: u8) -> f64 {
        material_value(self.kind, tier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
    pub tier: u8,
}

impl Position {
    /// Returns `None` when the coordinates fall outside the 9x9x3 grid.
    #[must_use]
    pub const fn new(row: u8, col: u8, tier: u8) -> Option<Self> {
        if (row as usize) < ROWS && (col as usize) < COLS && (tier as usize) < TIERS {
            Some(Self { row, col, tier })
        } else {
            None
        }
    }

    #[must_use]
    pub fn from_signed(row: i32, col: i32, tier: i32) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        let tier = u8::try_from(tier).ok()?;
        Self::new(row, col, tier)
    }

    pub const fn square(self) -> usize {
        Board::square_index(self.row as usize, self.col as usize)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.row, self.col, self.tier)
    }
}

/// One square of the board. Index 0 is the bottom tower tier, index 2 the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub tiers: [Option<Piece>; TIERS],
}

impl Cell {
    pub fn get(&self, tier: u8) -> Option<Piece> {
        self.tiers.get(tier as usize).copied().flatten()
    }

    pub fn height(&self) -> usize {
        self.tiers.iter().filter(|slot| slot.is_some()).count()
    }

    /// Tier of the occupant that moves for this square: the lowest occupied index.
    pub fn movable_tier(&self) -> Option<u8> {
        self.tiers
            .iter()
            .position(Option::is_some)
            .and_then(|tier| u8::try_from(tier).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    pub cells: [Cell; SQUARES],
    pub turn: Team,
    pub history: Vec<Move>,
    pub previous_move: Option<Move>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard opening position, white to move.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [Cell::default(); SQUARES],
            turn: Team::White,
            history: Vec::new(),
            previous_move: None,
        }
    }

    fn setup_initial_position(&mut self) {
        // White (bottom, rows 8-6)
        self.setup_pieces(Team::White, 8, 7, 6);

        // Black (top, rows 0-2)
        self.setup_pieces(Team::Black, 0, 1, 2);
    }

    fn setup_pieces(&mut self, team: Team, back_row: u8, middle_row: u8, front_row: u8) {
        let back = [
            PieceKind::Cannon,
            PieceKind::Archer,
            PieceKind::Lieutenant,
            PieceKind::General,
            PieceKind::King,
            PieceKind::General,
            PieceKind::Lieutenant,
            PieceKind::Archer,
            PieceKind::Cannon,
        ];

        for (col, kind) in (0u8..).zip(back) {
            self.place_on_field(back_row, col, kind, team);
        }

        for (col, kind) in [
            (1, PieceKind::Fortress),
            (3, PieceKind::Captain),
            (5, PieceKind::Captain),
            (7, PieceKind::Fortress),
        ] {
            self.place_on_field(middle_row, col, kind, team);
        }

        for col in 0..9u8 {
            let kind = match col {
                1 | 7 => PieceKind::Musketeer,
                _ if col % 2 == 0 => PieceKind::Pawn,
                _ => continue,
            };
            self.place_on_field(front_row, col, kind, team);
        }
    }

    fn place_on_field(&mut self, row: u8, col: u8, kind: PieceKind, team: Team) {
        if let Some(pos) = Position::new(row, col, FIELD_TIER) {
            self.place(pos, Piece::new(kind, team));
        }
    }

    #[must_use]
    pub const fn square_index(row: usize, col: usize) -> usize {
        row * COLS + col
    }

    #[must_use]
    pub const fn index_to_coord(sq: usize) -> (usize, usize) {
        (sq / COLS, sq % COLS)
    }

    /// Returns `None` for squares off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= ROWS || col >= COLS {
            return None;
        }
        self.cells.get(Self::square_index(row, col))
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells.get(pos.square()).and_then(|cell| cell.get(pos.tier))
    }

    /// Puts `piece` on the board, clearing its `onhold` flag. Returns the previous occupant.
    pub fn place(&mut self, pos: Position, mut piece: Piece) -> Option<Piece> {
        piece.onhold = false;
        let slot = self
            .cells
            .get_mut(pos.square())?
            .tiers
            .get_mut(pos.tier as usize)?;
        slot.replace(piece)
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cells
            .get_mut(pos.square())?
            .tiers
            .get_mut(pos.tier as usize)?
            .take()
    }

    pub fn clear(&mut self) {
        self.cells = [Cell::default(); SQUARES];
        self.history.clear();
        self.previous_move = None;
    }

    /// The occupant that moves for square (row, col), with its position.
    pub fn movable_piece(&self, row: usize, col: usize) -> Option<(Piece, Position)> {
        let cell = self.cell(row, col)?;
        let tier = cell.movable_tier()?;
        let piece = cell.get(tier)?;
        let pos = Position::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?, tier)?;
        Some((piece, pos))
    }

    /// Every occupant on the board, stacked ones included.
    pub fn all_pieces(&self) -> Vec<(Piece, Position)> {
        let mut pieces = Vec::with_capacity(64);
        for (sq, cell) in self.cells.iter().enumerate() {
            let (r, c) = Self::index_to_coord(sq);
            for (tier, slot) in cell.tiers.iter().enumerate() {
                if let Some(piece) = slot {
                    #[allow(clippy::cast_possible_truncation)]
                    let pos = Position {
                        row: r as u8,
                        col: c as u8,
                        tier: tier as u8,
                    };
                    pieces.push((*piece, pos));
                }
            }
        }
        pieces
    }

    pub fn has_king(&self, team: Team) -> bool {
        self.cells.iter().any(|cell| {
            cell.tiers
                .iter()
                .flatten()
                .any(|p| p.team == team && p.kind == PieceKind::King)
        })
    }

    /// All moves for `team`, in row-major square order. Empty when `team` cannot move.
    pub fn legal_moves(&self, team: Team) -> Result<Vec<Move>, MoveError> {
        MoveGenerator::new().generate_moves(self, team)
    }

    /// Commits `mv`: the origin occupant replaces whatever sits on the destination tier,
    /// the move is recorded and the turn passes. The board is untouched on error.
    pub fn apply_move(&mut self, mv: &Move) -> Result<(), MoveError> {
        let piece = self.remove(mv.from).ok_or(MoveError::NoPieceAtSource(mv.from))?;
        self.place(mv.to, piece);

        self.history.push(*mv);
        self.previous_move = Some(*mv);
        self.turn = self.turn.opposite();
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..ROWS {
            for c in 0..COLS {
                match self.movable_piece(r, c) {
                    Some((piece, _)) => {
                        let symbol = if piece.team == Team::White {
                            piece.kind.symbol().to_ascii_uppercase()
                        } else {
                            piece.kind.symbol()
                        };
                        let height = self.cell(r, c).map_or(0, Cell::height);
                        write!(f, " {symbol}{height}")?;
                    }
                    None => write!(f, " ..")?,
                }
            }
            writeln!(f)?;
        }
        let turn = match self.turn {
            Team::White => "white",
            Team::Black => "black",
        };
        write!(f, "{turn} to move")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8, tier: u8) -> Position {
        Position::new(row, col, tier).unwrap()
    }

    #[test]
    fn test_initial_setup() {
        let board = Board::new();

        let piece = board.get(pos(8, 4, 2)).unwrap();
        assert_eq!(piece.kind, PieceKind::King);
        assert_eq!(piece.team, Team::White);
        assert!(!piece.onhold);

        let piece = board.get(pos(0, 4, 2)).unwrap();
        assert_eq!(piece.kind, PieceKind::King);
        assert_eq!(piece.team, Team::Black);

        assert_eq!(board.turn, Team::White);
        assert_eq!(board.all_pieces().len(), 2 * (9 + 4 + 7));
    }

    #[test]
    fn test_initial_setup_is_mirrored() {
        let board = Board::new();
        for (piece, p) in board.all_pieces() {
            let mirror = board.get(pos(8 - p.row, p.col, p.tier)).unwrap();
            assert_eq!(mirror.kind, piece.kind);
            assert_eq!(mirror.team, piece.team.opposite());
        }
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(8, 8, 2).is_some());
        assert!(Position::new(9, 0, 0).is_none());
        assert!(Position::new(0, 9, 0).is_none());
        assert!(Position::new(0, 0, 3).is_none());
        assert!(Position::from_signed(-1, 0, 2).is_none());
        assert_eq!(Position::from_signed(3, 4, 1), Some(pos(3, 4, 1)));
    }

    #[test]
    fn test_piece_ids() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_id(i32::from(kind.id())), Some(kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(14), None);
        assert_eq!(PieceKind::Lieutenant.id(), 12);
    }

    #[test]
    fn test_movable_tier_is_lowest_occupied() {
        let mut board = Board::empty();
        board.place(pos(4, 4, 2), Piece::new(PieceKind::Pawn, Team::White));
        board.place(pos(4, 4, 1), Piece::new(PieceKind::Captain, Team::White));

        let (piece, at) = board.movable_piece(4, 4).unwrap();
        assert_eq!(piece.kind, PieceKind::Captain);
        assert_eq!(at, pos(4, 4, 1));
        assert_eq!(board.cell(4, 4).unwrap().height(), 2);
        assert!(board.movable_piece(3, 3).is_none());
    }

    #[test]
    fn test_apply_move() {
        let mut board = Board::new();
        let mv = Move {
            team: Team::White,
            kind: PieceKind::Pawn,
            to: pos(5, 4, 2),
            from: pos(6, 4, 2),
            capture: false,
        };
        board.apply_move(&mv).unwrap();

        assert!(board.get(pos(6, 4, 2)).is_none());
        let piece = board.get(pos(5, 4, 2)).unwrap();
        assert_eq!(piece.kind, PieceKind::Pawn);
        assert_eq!(board.turn, Team::Black);
        assert_eq!(board.history, vec![mv]);
        assert_eq!(board.previous_move, Some(mv));
    }

    #[test]
    fn test_apply_move_capture_replaces_occupant() {
        let mut board = Board::empty();
        board.place(pos(4, 4, 2), Piece::new(PieceKind::Cannon, Team::White));
        board.place(pos(4, 6, 2), Piece::new(PieceKind::Pawn, Team::Black));
        let mv = Move {
            team: Team::White,
            kind: PieceKind::Cannon,
            to: pos(4, 6, 2),
            from: pos(4, 4, 2),
            capture: true,
        };
        board.apply_move(&mv).unwrap();

        let piece = board.get(pos(4, 6, 2)).unwrap();
        assert_eq!(piece.kind, PieceKind::Cannon);
        assert_eq!(piece.team, Team::White);
        assert_eq!(board.all_pieces().len(), 1);
    }

    #[test]
    fn test_apply_move_from_empty_square_fails() {
        let mut board = Board::empty();
        let mv = Move {
            team: Team::White,
            kind: PieceKind::Pawn,
            to: pos(5, 4, 2),
            from: pos(6, 4, 2),
            capture: false,
        };
        assert_eq!(
            board.apply_move(&mv),
            Err(MoveError::NoPieceAtSource(pos(6, 4, 2)))
        );
        assert!(board.history.is_empty());
        assert_eq!(board.turn, Team::White);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new();
        let mut scratch = board.clone();
        let mv = Move {
            team: Team::White,
            kind: PieceKind::Pawn,
            to: pos(5, 0, 2),
            from: pos(6, 0, 2),
            capture: false,
        };
        scratch.apply_move(&mv).unwrap();

        assert!(board.get(pos(6, 0, 2)).is_some());
        assert!(board.history.is_empty());
        assert_ne!(board, scratch);
    }
}
