use serde::Serialize;

use crate::aggregate::AverageMovePower;
use crate::moves::MoveDetail;
use crate::pokemon::{Entity, StatValue};
use crate::region::RegionName;

/// Text shown wherever a value is not applicable.
pub const NOT_APPLICABLE: &str = "N/A";

/// Everything one successful cycle renders, built from a single entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub id: i32,
    pub name: String,
    pub sprite: Option<String>,
    pub region: RegionName,
    pub types: Vec<String>,
    pub moves: Vec<MoveDetail>,
    pub average_move_power: AverageMovePower,
    pub average_base_stat: f64,
    pub stats: Vec<StatValue>,
}

impl ViewModel {
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    pub fn display_region(&self) -> String {
        capitalize(self.region.as_str())
    }

    pub fn display_types(&self) -> String {
        self.types
            .iter()
            .map(|t| capitalize(t))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn display_average_move_power(&self) -> String {
        match self.average_move_power {
            AverageMovePower::Value(v) => format_average(v),
            AverageMovePower::NotApplicable => NOT_APPLICABLE.to_string(),
        }
    }

    pub fn display_average_base_stat(&self) -> String {
        format_average(self.average_base_stat)
    }

    pub fn display_moves(&self) -> Vec<MoveLine> {
        self.moves.iter().map(MoveLine::from).collect()
    }

    pub fn chart(&self, ceiling: u32) -> RadarChart {
        RadarChart::new(&self.stats, ceiling)
    }
}

impl ViewModel {
    pub fn assemble(
        entity: Entity,
        region: RegionName,
        moves: Vec<MoveDetail>,
        average_move_power: AverageMovePower,
        average_base_stat: f64,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            sprite: entity.sprite,
            region,
            types: entity.types,
            moves,
            average_move_power,
            average_base_stat,
            stats: entity.stats,
        }
    }
}

/// One rendered move entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveLine {
    pub name: String,
    pub type_name: String,
    pub power: String,
    pub effect: String,
}

impl From<&MoveDetail> for MoveLine {
    fn from(detail: &MoveDetail) -> Self {
        Self {
            name: detail.name.clone(),
            type_name: detail.type_name.clone(),
            power: detail
                .power
                .map(|p| p.to_string())
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            effect: detail.effect.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub label: String,
    pub value: i32,
    /// `value / ceiling`, clamped to `0.0..=1.0`.
    pub ratio: f64,
}

/// Radar chart keyed by stat name, scaled against a fixed ceiling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub ceiling: u32,
    pub axes: Vec<RadarAxis>,
}

impl RadarChart {
    pub fn new(stats: &[StatValue], ceiling: u32) -> Self {
        let axes = stats
            .iter()
            .map(|s| RadarAxis {
                label: s.name.clone(),
                value: s.base,
                ratio: (s.base as f64 / ceiling.max(1) as f64).clamp(0.0, 1.0),
            })
            .collect();
        Self { ceiling, axes }
    }
}

/// Uppercases the first character only.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_average(value: f64) -> String {
    format!("{:.2}", value)
}
