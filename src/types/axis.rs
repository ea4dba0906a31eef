//! Axis types for overlay grouping.

use serde::Serialize;

/// The three axes a log block can be placed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Resolve the axis of an overlay group from its directory name.
    ///
    /// Both `z` groups share one axis; they differ only in how the
    /// overlay tiles are oriented.
    pub fn from_overlay_group(group: &str) -> Option<Self> {
        match group {
            "logs_x" => Some(Axis::X),
            "logs_y" => Some(Axis::Y),
            "logs_z_horizontal" | "logs_z_vertical" => Some(Axis::Z),
            _ => None,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}
