//! Warehouse robot telemetry models

use serde::{Deserialize, Serialize};

/// Operational state of a warehouse robot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RobotStatus {
    #[default]
    Idle,
    Moving,
    Picking,
    Charging,
    Error,
}

impl RobotStatus {
    /// Any robot that is not idle counts as active
    pub fn is_active(&self) -> bool {
        !matches!(self, RobotStatus::Idle)
    }
}

/// Position in the warehouse frame, in metres
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Latest telemetry snapshot for one robot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotTelemetry {
    /// Robot identifier
    pub robot_id: String,
    /// Current position
    pub position: Position,
    /// State of charge in [0.0, 1.0]
    pub battery_level: f64,
    /// Operational state
    pub status: RobotStatus,
}
