use crate::engine::Move;
use crate::logic::board::{Board, PieceKind, Position, Team, COLS, FIELD_TIER, ROWS};
use crate::logic::rules::MoveError;

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// What a piece finds when it tries to land on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    /// Nothing on the square: the piece lands on the field tier.
    Empty,
    /// Friendly non-king occupant: the piece stacks one tier below it.
    Stack(u8),
    /// First opposing occupant found: the piece replaces it.
    Capture(u8),
    Blocked,
}

/// The piece being moved. `kind` is its stored identity, which a captain keeps
/// even while it borrows another archetype's movement.
#[derive(Debug, Clone, Copy)]
struct Mover {
    team: Team,
    kind: PieceKind,
    from: Position,
}

impl Mover {
    /// Squares a ranged piece may travel: 3 - tier.
    fn reach(&self) -> i32 {
        3 - i32::from(self.from.tier)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    pub fn generate_moves(&self, board: &Board, team: Team) -> Result<Vec<Move>, MoveError> {
        let mut moves = Vec::with_capacity(64);

        for r in 0..ROWS {
            for c in 0..COLS {
                if let Some((piece, from)) = board.movable_piece(r, c) {
                    if piece.team == team {
                        self.generate_piece_moves(board, from, &mut moves)?;
                    }
                }
            }
        }

        Ok(moves)
    }

    /// Moves for the occupant standing at `from`.
    pub fn piece_moves(&self, board: &Board, from: Position) -> Result<Vec<Move>, MoveError> {
        let mut moves = Vec::with_capacity(16);
        self.generate_piece_moves(board, from, &mut moves)?;
        Ok(moves)
    }

    fn generate_piece_moves(
        &self,
        board: &Board,
        from: Position,
        moves: &mut Vec<Move>,
    ) -> Result<(), MoveError> {
        let piece = board.get(from).ok_or(MoveError::NoPieceAtSource(from))?;
        let mover = Mover {
            team: piece.team,
            kind: piece.kind,
            from,
        };

        match movement_kind(board, from, piece.kind) {
            PieceKind::Pawn => self.generate_pawn_moves(board, &mover, moves),
            PieceKind::King | PieceKind::Fortress => {
                self.generate_unstackable_moves(board, &mover, moves);
            }
            PieceKind::Captain => self.generate_step_moves(board, &mover, &KING_STEPS, moves),
            PieceKind::Cannon => self.generate_cannon_moves(board, &mover, moves),
            PieceKind::Musketeer => self.generate_musketeer_moves(board, &mover, moves),
            PieceKind::Archer => self.generate_archer_moves(board, &mover, moves),
            PieceKind::Lieutenant => self.generate_lieutenant_moves(board, &mover, moves),
            PieceKind::General => self.generate_general_moves(board, &mover, moves),
            kind @ (PieceKind::Spy | PieceKind::Knight | PieceKind::Samurai | PieceKind::Major) => {
                return Err(MoveError::UnimplementedArchetype(kind));
            }
        }

        Ok(())
    }

    fn generate_pawn_moves(&self, board: &Board, mover: &Mover, moves: &mut Vec<Move>) {
        let f = mover.team.forward();
        if mover.from.tier == FIELD_TIER {
            self.try_land(board, mover, f, 0, moves);
        } else {
            for dc in [-1, 0, 1] {
                self.try_land(board, mover, f, dc, moves);
            }
        }
    }

    /// King and fortress: one step onto the field tier, capturing only unstacked opponents.
    fn generate_unstackable_moves(&self, board: &Board, mover: &Mover, moves: &mut Vec<Move>) {
        for (dr, dc) in KING_STEPS {
            let Some((r, c)) = target_square(mover.from, dr, dc) else {
                continue;
            };
            let Some(cell) = board.cell(r, c) else {
                continue;
            };
            match cell.tiers {
                [None, None, None] => push_move(mover, r, c, FIELD_TIER, false, moves),
                [None, None, Some(occupant)] if occupant.team != mover.team => {
                    push_move(mover, r, c, FIELD_TIER, true, moves);
                }
                _ => {}
            }
        }
    }

    fn generate_cannon_moves(&self, board: &Board, mover: &Mover, moves: &mut Vec<Move>) {
        for (dr, dc) in ORTHOGONAL {
            self.slide(board, mover, dr, dc, mover.reach(), moves);
        }
    }

    fn generate_musketeer_moves(&self, board: &Board, mover: &Mover, moves: &mut Vec<Move>) {
        self.slide(board, mover, mover.team.forward(), 0, mover.reach(), moves);
    }

    fn generate_archer_moves(&self, board: &Board, mover: &Mover, moves: &mut Vec<Move>) {
        let n = mover.reach();
        for dr in -n..=n {
            for dc in -n..=n {
                if dr == 0 && dc == 0 {
                    continue;
                }
                self.try_land(board, mover, dr, dc, moves);
            }
        }
    }

    fn generate_lieutenant_moves(&self, board: &Board, mover: &Mover, moves: &mut Vec<Move>) {
        let f = mover.team.forward();
        match mover.from.tier {
            2 => {
                let offsets = [(f, -1), (f, 0), (f, 1), (-f, -1), (-f, 1)];
                self.generate_step_moves(board, mover, &offsets, moves);
            }
            1 => {
                let offsets = [(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 0), (1, 1)];
                self.generate_step_moves(board, mover, &offsets, moves);
            }
            _ => self.generate_step_moves(board, mover, &KING_STEPS, moves),
        }
    }

    fn generate_general_moves(&self, board: &Board, mover: &Mover, moves: &mut Vec<Move>) {
        let f = mover.team.forward();
        match mover.from.tier {
            2 => {
                let offsets = [(f, -1), (f, 0), (f, 1), (0, -1), (0, 1), (-f, 0)];
                self.generate_step_moves(board, mover, &offsets, moves);
            }
            1 => self.generate_step_moves(board, mover, &KING_STEPS, moves),
            _ => {
                self.generate_step_moves(board, mover, &KING_STEPS, moves);
                let leaps = [(2 * f, -1), (2 * f, 0), (2 * f, 1)];
                self.generate_step_moves(board, mover, &leaps, moves);
            }
        }
    }

    fn generate_step_moves(
        &self,
        board: &Board,
        mover: &Mover,
        offsets: &[(i32, i32)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in offsets {
            self.try_land(board, mover, dr, dc, moves);
        }
    }

    /// Walks up to `range` squares along (dr, dc), stopping at the first occupied square.
    fn slide(
        &self,
        board: &Board,
        mover: &Mover,
        dr: i32,
        dc: i32,
        range: i32,
        moves: &mut Vec<Move>,
    ) {
        for step in 1..=range {
            if self.try_land(board, mover, dr * step, dc * step, moves) != Some(Landing::Empty) {
                break;
            }
        }
    }

    /// Runs the landing scan on the square at offset (dr, dc) and records the move, if any.
    /// Returns `None` when the square is off the board.
    fn try_land(
        &self,
        board: &Board,
        mover: &Mover,
        dr: i32,
        dc: i32,
        moves: &mut Vec<Move>,
    ) -> Option<Landing> {
        let (r, c) = target_square(mover.from, dr, dc)?;
        let landing = scan_landing(board, mover.team, r, c);
        match landing {
            Landing::Empty => push_move(mover, r, c, FIELD_TIER, false, moves),
            Landing::Stack(tier) => push_move(mover, r, c, tier, false, moves),
            Landing::Capture(tier) => push_move(mover, r, c, tier, true, moves),
            Landing::Blocked => {}
        }
        Some(landing)
    }
}

/// Archetype whose movement the piece at `from` uses. A captain below the field tier
/// moves like the piece directly above it; the stored piece is never changed.
pub fn movement_kind(board: &Board, from: Position, kind: PieceKind) -> PieceKind {
    let mut kind = kind;
    let mut at = from;
    while kind == PieceKind::Captain && at.tier < FIELD_TIER {
        at.tier += 1;
        match board.get(at) {
            Some(above) => kind = above.kind,
            None => break,
        }
    }
    kind
}

fn target_square(from: Position, dr: i32, dc: i32) -> Option<(usize, usize)> {
    let r = usize::try_from(i32::from(from.row) + dr).ok()?;
    let c = usize::try_from(i32::from(from.col) + dc).ok()?;
    if r < ROWS && c < COLS {
        Some((r, c))
    } else {
        None
    }
}

/// Scans the square's tiers 0 -> 2 and reports where `team` could land.
fn scan_landing(board: &Board, team: Team, row: usize, col: usize) -> Landing {
    let Some(cell) = board.cell(row, col) else {
        return Landing::Blocked;
    };

    for (tier, slot) in (0u8..).zip(cell.tiers.iter()) {
        let Some(occupant) = slot else {
            continue;
        };
        if occupant.team != team {
            return Landing::Capture(tier);
        }
        if tier > 0 && occupant.kind != PieceKind::King {
            return Landing::Stack(tier - 1);
        }
        return Landing::Blocked;
    }

    Landing::Empty
}

fn push_move(mover: &Mover, row: usize, col: usize, tier: u8, capture: bool, moves: &mut Vec<Move>) {
    let (Ok(row), Ok(col)) = (u8::try_from(row), u8::try_from(col)) else {
        return;
    };
    if let Some(to) = Position::new(row, col, tier) {
        moves.push(Move {
            team: mover.team,
            kind: mover.kind,
            to,
            from: mover.from,
            capture,
        });
    }
}
