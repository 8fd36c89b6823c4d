use crate::logic::board::{PieceKind, Position, Team, FIELD_TIER};

// Piece Values (field tier)
pub const VAL_PAWN: f64 = 10.0;
pub const VAL_KING: f64 = 900.0;
pub const VAL_FORTRESS: f64 = 40.0;
pub const VAL_SPY: f64 = 30.0;
pub const VAL_CAPTAIN: f64 = 45.0;
pub const VAL_CANNON: f64 = 50.0;
pub const VAL_MUSKETEER: f64 = 35.0;
pub const VAL_KNIGHT: f64 = 35.0;
pub const VAL_SAMURAI: f64 = 45.0;
pub const VAL_ARCHER: f64 = 40.0;
pub const VAL_MAJOR: f64 = 40.0;
pub const VAL_LIEUTENANT: f64 = 35.0;
pub const VAL_GENERAL: f64 = 55.0;

// Range grows as a piece sits lower in a tower (3 - tier), so lower tiers weigh more.
pub const TIER_MULTIPLIER: [f64; 3] = [1.2, 1.1, 1.0];

// Piece-Square Tables, white's view, field tier only.
// Row 0 is black's back row; black reads the table with rows reversed.

#[rustfmt::skip]
pub const PST_DEFAULT: [[f64; 9]; 9] = [
    [-4.0, -5.0, -5.0, -6.0, -7.0, -6.0, -5.0, -5.0, -4.0],
    [-4.0, -5.0, -5.0, -6.0, -7.0, -6.0, -5.0, -5.0, -4.0],
    [-4.0, -5.0, -5.0, -6.0, -7.0, -6.0, -5.0, -5.0, -4.0],
    [-4.0, -5.0, -5.0, -6.0, -7.0, -6.0, -5.0, -5.0, -4.0],
    [-3.0, -4.0, -4.0, -5.0, -6.0, -5.0, -4.0, -4.0, -3.0],
    [-2.0, -3.0, -3.0, -4.0, -5.0, -4.0, -3.0, -3.0, -2.0],
    [-1.0, -2.0, -2.0, -3.0, -4.0, -3.0, -2.0, -2.0, -1.0],
    [ 2.0,  1.0,  1.0,  0.0,  0.0,  0.0,  1.0,  1.0,  2.0],
    [ 3.0,  2.0,  1.0,  1.0,  0.0,  1.0,  1.0,  2.0,  3.0],
];

#[rustfmt::skip]
pub const PST_FORTRESS: [[f64; 9]; 9] = [
    [-4.0, -5.0, -5.0, -6.0, -7.0, -6.0, -5.0, -5.0, -4.0],
    [-4.0, -5.0, -5.0, -6.0, -7.0, -6.0, -5.0, -5.0, -4.0],
    [-4.0, -5.0, -5.0, -6.0, -7.0, -6.0, -5.0, -5.0, -4.0],
    [-5.0, -2.0, -3.0, -3.0, -3.0, -3.0, -3.0, -2.0, -5.0],
    [-3.0, -4.0, -4.0, -2.0,  0.0, -2.0, -4.0, -4.0, -3.0],
    [-2.0,  0.0,  3.0,  3.0,  4.0,  3.0,  3.0,  0.0, -2.0],
    [-1.0,  2.0,  2.0,  2.0,  5.0,  2.0,  2.0,  2.0, -1.0],
    [ 1.0,  2.0,  2.0,  3.0,  6.0,  3.0,  2.0,  2.0,  1.0],
    [ 3.0,  4.0,  4.0,  4.0,  5.0,  4.0,  4.0,  4.0,  3.0],
];

pub const fn base_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => VAL_PAWN,
        PieceKind::King => VAL_KING,
        PieceKind::Fortress => VAL_FORTRESS,
        PieceKind::Spy => VAL_SPY,
        PieceKind::Captain => VAL_CAPTAIN,
        PieceKind::Cannon => VAL_CANNON,
        PieceKind::Musketeer => VAL_MUSKETEER,
        PieceKind::Knight => VAL_KNIGHT,
        PieceKind::Samurai => VAL_SAMURAI,
        PieceKind::Archer => VAL_ARCHER,
        PieceKind::Major => VAL_MAJOR,
        PieceKind::Lieutenant => VAL_LIEUTENANT,
        PieceKind::General => VAL_GENERAL,
    }
}

pub fn tier_multiplier(tier: u8) -> f64 {
    TIER_MULTIPLIER.get(tier as usize).copied().unwrap_or(1.0)
}

pub fn material_value(kind: PieceKind, tier: u8) -> f64 {
    base_value(kind) * tier_multiplier(tier)
}

const fn pst_for(kind: PieceKind) -> Option<&'static [[f64; 9]; 9]> {
    match kind {
        PieceKind::Fortress => Some(&PST_FORTRESS),
        PieceKind::Pawn
        | PieceKind::King
        | PieceKind::Captain
        | PieceKind::Cannon
        | PieceKind::Musketeer
        | PieceKind::Archer
        | PieceKind::Lieutenant
        | PieceKind::General => Some(&PST_DEFAULT),
        PieceKind::Spy | PieceKind::Knight | PieceKind::Samurai | PieceKind::Major => None,
    }
}

/// Positional bonus for `kind` owned by `team` at `pos`. Zero off the field tier.
pub fn get_pst_value(kind: PieceKind, team: Team, pos: Position) -> f64 {
    if pos.tier != FIELD_TIER {
        return 0.0;
    }
    let Some(table) = pst_for(kind) else {
        return 0.0;
    };
    let row = match team {
        Team::White => pos.row as usize,
        Team::Black => 8 - pos.row as usize,
    };
    table
        .get(row)
        .and_then(|r| r.get(pos.col as usize))
        .copied()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_table_is_row_mirror() {
        for row in 0..9u8 {
            for col in 0..9u8 {
                let w = Position::new(row, col, 2).unwrap();
                let b = Position::new(8 - row, col, 2).unwrap();
                assert_eq!(
                    get_pst_value(PieceKind::Fortress, Team::White, w),
                    get_pst_value(PieceKind::Fortress, Team::Black, b)
                );
            }
        }
    }

    #[test]
    fn test_stacked_tiers_have_no_positional_value() {
        let p = Position::new(8, 0, 1).unwrap();
        assert_eq!(get_pst_value(PieceKind::Pawn, Team::White, p), 0.0);
        let p = Position::new(8, 0, 2).unwrap();
        assert_eq!(get_pst_value(PieceKind::Pawn, Team::White, p), 3.0);
        assert_eq!(get_pst_value(PieceKind::Spy, Team::White, p), 0.0);
    }

    #[test]
    fn test_material_grows_toward_bottom_tier() {
        assert!(material_value(PieceKind::Cannon, 0) > material_value(PieceKind::Cannon, 1));
        assert!(material_value(PieceKind::Cannon, 1) > material_value(PieceKind::Cannon, 2));
        assert_eq!(material_value(PieceKind::Pawn, 2), VAL_PAWN);
    }
}
