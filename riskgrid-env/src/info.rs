//! Per-step diagnostics.
use crate::{Pos, Tile};
use riskgrid_core::{
    record::{Record, RecordValue},
    Info,
};

/// Diagnostics of a step of [`RiskyPathEnv`](crate::RiskyPathEnv).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskyPathInfo {
    /// Position after the step.
    pub agent_pos: Pos,

    /// Position before the step.
    pub previous_pos: Pos,

    /// Displacement actually realized.
    pub actual_movement_vec: (i32, i32),

    /// Unit vector of the facing after the step.
    pub intended_movement_vec: (i32, i32),

    /// `true` if the agent slipped.
    pub slipped: bool,

    /// Tile at the resulting position, `None` on plain floor.
    pub current_cell_type: Option<Tile>,
}

impl Info for RiskyPathInfo {}

fn pair(v: (i32, i32)) -> RecordValue {
    RecordValue::Array1(vec![v.0 as f32, v.1 as f32])
}

impl From<&RiskyPathInfo> for Record {
    fn from(info: &RiskyPathInfo) -> Self {
        let cell = info.current_cell_type.map_or("none", Tile::name);
        Record::from_slice(&[
            ("agent_pos", pair(info.agent_pos.into())),
            ("previous_pos", pair(info.previous_pos.into())),
            ("actual_movement_vec", pair(info.actual_movement_vec)),
            ("intended_movement_vec", pair(info.intended_movement_vec)),
            ("slipped", RecordValue::Scalar(if info.slipped { 1.0 } else { 0.0 })),
            ("current_cell_type", RecordValue::String(cell.to_string())),
        ])
    }
}
