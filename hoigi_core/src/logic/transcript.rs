//! Plain-text move transcripts.
//!
//! One move is nine comma-separated integers,
//! `team,archetype,destRow,destCol,destTier,origRow,origCol,origTier,capture`,
//! with team `1` for white and `-1` for black and capture `0` or `1`.
//! Moves are joined by `|`.

use crate::engine::Move;
use crate::logic::board::{PieceKind, Position, Team};
use thiserror::Error;

const FIELDS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("move {index}: expected 9 fields, found {found}")]
    WrongArity { index: usize, found: usize },
    #[error("move {index}: `{field}` is not an integer")]
    NotAnInteger { index: usize, field: String },
    #[error("move {index}: unknown team {value}")]
    InvalidTeam { index: usize, value: i32 },
    #[error("move {index}: unknown archetype {value}")]
    InvalidArchetype { index: usize, value: i32 },
    #[error("move {index}: capture flag must be 0 or 1, found {value}")]
    InvalidCaptureFlag { index: usize, value: i32 },
    #[error("move {index}: ({row},{col},{tier}) is off the board")]
    OffBoard {
        index: usize,
        row: i32,
        col: i32,
        tier: i32,
    },
}

/// Canonical form: no trailing separator, empty string for no moves.
pub fn encode(moves: &[Move]) -> String {
    moves.iter().map(encode_move).collect::<Vec<_>>().join("|")
}

fn encode_move(mv: &Move) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{}",
        mv.team.sign(),
        mv.kind.id(),
        mv.to.row,
        mv.to.col,
        mv.to.tier,
        mv.from.row,
        mv.from.col,
        mv.from.tier,
        u8::from(mv.capture)
    )
}

/// Accepts the canonical form, one trailing `|`, and the empty string.
pub fn decode(text: &str) -> Result<Vec<Move>, TranscriptError> {
    let text = text.trim();
    let text = text.strip_suffix('|').unwrap_or(text);
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split('|')
        .enumerate()
        .map(|(index, chunk)| decode_move(index, chunk))
        .collect()
}

fn decode_move(index: usize, chunk: &str) -> Result<Move, TranscriptError> {
    let fields = chunk
        .split(',')
        .map(|field| {
            field
                .trim()
                .parse::<i32>()
                .map_err(|_| TranscriptError::NotAnInteger {
                    index,
                    field: field.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [team, kind, to_row, to_col, to_tier, from_row, from_col, from_tier, capture] =
        <[i32; FIELDS]>::try_from(fields.as_slice()).map_err(|_| TranscriptError::WrongArity {
            index,
            found: fields.len(),
        })?;

    let team = Team::from_sign(team).ok_or(TranscriptError::InvalidTeam { index, value: team })?;
    let kind =
        PieceKind::from_id(kind).ok_or(TranscriptError::InvalidArchetype { index, value: kind })?;
    let capture = match capture {
        0 => false,
        1 => true,
        value => return Err(TranscriptError::InvalidCaptureFlag { index, value }),
    };

    Ok(Move {
        team,
        kind,
        to: position(index, to_row, to_col, to_tier)?,
        from: position(index, from_row, from_col, from_tier)?,
        capture,
    })
}

fn position(index: usize, row: i32, col: i32, tier: i32) -> Result<Position, TranscriptError> {
    Position::from_signed(row, col, tier).ok_or(TranscriptError::OffBoard {
        index,
        row,
        col,
        tier,
    })
}
