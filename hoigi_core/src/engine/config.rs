use crate::logic::board::PieceKind;
use crate::logic::eval_constants::{
    TIER_MULTIPLIER, VAL_ARCHER, VAL_CANNON, VAL_CAPTAIN, VAL_FORTRESS, VAL_GENERAL, VAL_KING,
    VAL_KNIGHT, VAL_LIEUTENANT, VAL_MAJOR, VAL_MUSKETEER, VAL_PAWN, VAL_SAMURAI, VAL_SPY,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_pawn: f64,
    pub val_king: f64,
    pub val_fortress: f64,
    pub val_spy: f64,
    pub val_captain: f64,
    pub val_cannon: f64,
    pub val_musketeer: f64,
    pub val_knight: f64,
    pub val_samurai: f64,
    pub val_archer: f64,
    pub val_major: f64,
    pub val_lieutenant: f64,
    pub val_general: f64,
    pub tier_multiplier: [f64; 3],
    pub position_weight: f64,

    // Search Parameters
    pub search_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: VAL_PAWN,
            val_king: VAL_KING,
            val_fortress: VAL_FORTRESS,
            val_spy: VAL_SPY,
            val_captain: VAL_CAPTAIN,
            val_cannon: VAL_CANNON,
            val_musketeer: VAL_MUSKETEER,
            val_knight: VAL_KNIGHT,
            val_samurai: VAL_SAMURAI,
            val_archer: VAL_ARCHER,
            val_major: VAL_MAJOR,
            val_lieutenant: VAL_LIEUTENANT,
            val_general: VAL_GENERAL,
            tier_multiplier: TIER_MULTIPLIER,
            position_weight: 1.0,

            search_depth: 2,
        }
    }
}

/// Scale factors applied over the defaults.
#[derive(Deserialize)]
struct EngineConfigJson {
    val_pawn: Option<f64>,
    val_king: Option<f64>,
    val_fortress: Option<f64>,
    val_spy: Option<f64>,
    val_captain: Option<f64>,
    val_cannon: Option<f64>,
    val_musketeer: Option<f64>,
    val_knight: Option<f64>,
    val_samurai: Option<f64>,
    val_archer: Option<f64>,
    val_major: Option<f64>,
    val_lieutenant: Option<f64>,
    val_general: Option<f64>,
    tier_multiplier: Option<[f64; 3]>,
    position_weight: Option<f64>,

    search_depth: Option<u8>,
}

impl EngineConfig {
    /// Reads a config whose piece values are multipliers of the defaults.
    /// `tier_multiplier`, `position_weight` and `search_depth` are taken as given.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_pawn: apply_scale(default.val_pawn, json_config.val_pawn),
            val_king: apply_scale(default.val_king, json_config.val_king),
            val_fortress: apply_scale(default.val_fortress, json_config.val_fortress),
            val_spy: apply_scale(default.val_spy, json_config.val_spy),
            val_captain: apply_scale(default.val_captain, json_config.val_captain),
            val_cannon: apply_scale(default.val_cannon, json_config.val_cannon),
            val_musketeer: apply_scale(default.val_musketeer, json_config.val_musketeer),
            val_knight: apply_scale(default.val_knight, json_config.val_knight),
            val_samurai: apply_scale(default.val_samurai, json_config.val_samurai),
            val_archer: apply_scale(default.val_archer, json_config.val_archer),
            val_major: apply_scale(default.val_major, json_config.val_major),
            val_lieutenant: apply_scale(default.val_lieutenant, json_config.val_lieutenant),
            val_general: apply_scale(default.val_general, json_config.val_general),
            tier_multiplier: json_config
                .tier_multiplier
                .unwrap_or(default.tier_multiplier),
            position_weight: json_config
                .position_weight
                .unwrap_or(default.position_weight),

            search_depth: json_config.search_depth.unwrap_or(default.search_depth),
        })
    }

    pub const fn piece_value(&self, kind: PieceKind) -> f64 {
        match kind {
            PieceKind::Pawn => self.val_pawn,
            PieceKind::King => self.val_king,
            PieceKind::Fortress => self.val_fortress,
            PieceKind::Spy => self.val_spy,
            PieceKind::Captain => self.val_captain,
            PieceKind::Cannon => self.val_cannon,
            PieceKind::Musketeer => self.val_musketeer,
            PieceKind::Knight => self.val_knight,
            PieceKind::Samurai => self.val_samurai,
            PieceKind::Archer => self.val_archer,
            PieceKind::Major => self.val_major,
            PieceKind::Lieutenant => self.val_lieutenant,
            PieceKind::General => self.val_general,
        }
    }

    /// Material value of `kind` standing on `tier`.
    pub fn material(&self, kind: PieceKind, tier: u8) -> f64 {
        let multiplier = self.tier_multiplier.get(tier as usize).copied().unwrap_or(1.0);
        self.piece_value(kind) * multiplier
    }
}

fn apply_scale(default_val: f64, scale: Option<f64>) -> f64 {
    scale.map_or(default_val, |s| default_val * s)
}
