//! Piece - one concrete unit rectangle produced by expanding a part.

use crate::units;
use serde::{Deserialize, Serialize};

/// Which bar of a frame part a piece is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameMember {
    Left,
    Right,
    Top,
    Bottom,
}

impl FrameMember {
    /// Members in expansion order.
    pub const ALL: [FrameMember; 4] = [
        FrameMember::Left,
        FrameMember::Right,
        FrameMember::Top,
        FrameMember::Bottom,
    ];

    /// Vertical bars span the reduced inner height.
    pub fn is_vertical(&self) -> bool {
        matches!(self, FrameMember::Left | FrameMember::Right)
    }
}

impl std::fmt::Display for FrameMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameMember::Left => write!(f, "left"),
            FrameMember::Right => write!(f, "right"),
            FrameMember::Top => write!(f, "top"),
            FrameMember::Bottom => write!(f, "bottom"),
        }
    }
}

/// A single rectangle to be cut. Always stands for exactly one copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    /// Unique within one expansion; built from the part's input position.
    pub id: String,
    pub original_part_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<FrameMember>,
    /// Width in mm.
    pub width: f64,
    /// Height in mm.
    pub height: f64,
    pub material_id: String,
}

impl Piece {
    /// Create a piece for a part.
    pub fn new(id: impl Into<String>, original_part_id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            original_part_id: original_part_id.into(),
            width,
            height,
            ..Default::default()
        }
    }

    /// A piece is always a single copy.
    pub const fn quantity(&self) -> u32 {
        1
    }

    /// Area in m².
    pub fn area_m2(&self) -> f64 {
        units::area_m2(self.width, self.height)
    }

    /// Check if this piece is a frame bar.
    pub fn is_frame_member(&self) -> bool {
        self.member.is_some()
    }
}
