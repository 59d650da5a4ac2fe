// Averages shown alongside a creature. Values are full precision; rounding
// happens when the view is formatted.

use serde::{Serialize, Serializer};

use crate::error::{AppError, Result};
use crate::moves::MoveDetail;
use crate::pokemon::StatValue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageMovePower {
    Value(f64),
    NotApplicable,
}

impl Serialize for AverageMovePower {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AverageMovePower::Value(v) => serializer.serialize_some(v),
            AverageMovePower::NotApplicable => serializer.serialize_none(),
        }
    }
}

/// Mean power over moves that have one; moves with no power count for nothing.
pub fn average_move_power(moves: &[MoveDetail]) -> AverageMovePower {
    let powers: Vec<i32> = moves.iter().filter_map(|m| m.power).collect();
    if powers.is_empty() {
        return AverageMovePower::NotApplicable;
    }
    let total: i64 = powers.iter().map(|&p| p as i64).sum();
    AverageMovePower::Value(total as f64 / powers.len() as f64)
}

pub fn average_base_stat(stats: &[StatValue]) -> Result<f64> {
    if stats.is_empty() {
        return Err(AppError::InvalidEntity("entity has no stats".to_string()));
    }
    let total: i64 = stats.iter().map(|s| s.base as i64).sum();
    Ok(total as f64 / stats.len() as f64)
}
