//! CuttingPart - one line of a customer's cut list.

use super::{EdgeType, MaterialType};
use crate::units;
use serde::{Deserialize, Serialize};

/// Outline of a part. Layout and costing only use the bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "L-shape")]
    LShape,
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "custom")]
    Custom,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Rectangle => write!(f, "rectangle"),
            ShapeKind::LShape => write!(f, "L-shape"),
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Custom => write!(f, "custom"),
        }
    }
}

/// Rectangular cutout inside a part, relative to its lower-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Part outline with shape-specific details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartShape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cutouts: Vec<Cutout>,
}

impl PartShape {
    pub fn is_rectangle(&self) -> bool {
        self.kind == ShapeKind::Rectangle
    }
}

/// Side of a part that can carry edge banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl EdgeSide {
    /// All sides in clockwise order starting at the top.
    pub const ALL: [EdgeSide; 4] = [EdgeSide::Top, EdgeSide::Right, EdgeSide::Bottom, EdgeSide::Left];

    /// Length of this side for a `width` x `height` part, in mm.
    pub fn length_mm(&self, width: f64, height: f64) -> f64 {
        match self {
            EdgeSide::Top | EdgeSide::Bottom => width,
            EdgeSide::Left | EdgeSide::Right => height,
        }
    }
}

impl std::fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeSide::Top => write!(f, "top"),
            EdgeSide::Right => write!(f, "right"),
            EdgeSide::Bottom => write!(f, "bottom"),
            EdgeSide::Left => write!(f, "left"),
        }
    }
}

/// Edge banding assignment per side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeProcessing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<EdgeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<EdgeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<EdgeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<EdgeType>,
}

impl EdgeProcessing {
    /// Get the edge assigned to a side.
    pub fn get(&self, side: EdgeSide) -> Option<&EdgeType> {
        match side {
            EdgeSide::Top => self.top.as_ref(),
            EdgeSide::Right => self.right.as_ref(),
            EdgeSide::Bottom => self.bottom.as_ref(),
            EdgeSide::Left => self.left.as_ref(),
        }
    }

    /// Assign or clear the edge on a side.
    pub fn set(&mut self, side: EdgeSide, edge: Option<EdgeType>) {
        match side {
            EdgeSide::Top => self.top = edge,
            EdgeSide::Right => self.right = edge,
            EdgeSide::Bottom => self.bottom = edge,
            EdgeSide::Left => self.left = edge,
        }
    }

    /// Iterate over assigned edges in clockwise order.
    pub fn assigned(&self) -> impl Iterator<Item = (EdgeSide, &EdgeType)> {
        EdgeSide::ALL
            .into_iter()
            .filter_map(move |side| self.get(side).map(|edge| (side, edge)))
    }

    /// Check if no side has an edge.
    pub fn is_empty(&self) -> bool {
        self.assigned().next().is_none()
    }

    /// Sum of per-meter prices over all assigned edges.
    pub fn price_per_meter_sum(&self) -> f64 {
        self.assigned().map(|(_, edge)| edge.price_per_meter).sum()
    }
}

/// Frame settings: the part is built from four bars instead of one panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameSpec {
    pub enabled: bool,
    /// Bar width in mm; the engine default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_width: Option<f64>,
}

/// A rectangular cut specification with quantity, material and edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuttingPart {
    pub id: String,
    /// Width in mm.
    pub width: f64,
    /// Height in mm.
    pub height: f64,
    /// Number of identical copies.
    pub quantity: u32,
    pub material: MaterialType,
    #[serde(default)]
    pub shape: PartShape,
    #[serde(default)]
    pub edge_processing: EdgeProcessing,
    #[serde(default)]
    pub price_per_piece: f64,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<u32>,
}

impl CuttingPart {
    /// Create a plain rectangular part.
    pub fn new(
        id: impl Into<String>,
        width: f64,
        height: f64,
        quantity: u32,
        material: MaterialType,
    ) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            quantity,
            material,
            ..Default::default()
        }
    }

    /// Assign an edge to one side.
    pub fn with_edge(mut self, side: EdgeSide, edge: EdgeType) -> Self {
        self.edge_processing.set(side, Some(edge));
        self
    }

    /// Mark the part as a frame, optionally with its own bar width.
    pub fn with_frame(mut self, bar_width: Option<f64>) -> Self {
        self.frame = Some(FrameSpec {
            enabled: true,
            bar_width,
        });
        self
    }

    /// Group the part into a block.
    pub fn with_block(mut self, block_id: u32) -> Self {
        self.block_id = Some(block_id);
        self
    }

    /// Check if the part is split into frame members.
    pub fn is_frame(&self) -> bool {
        self.frame.map_or(false, |f| f.enabled)
    }

    /// Frame bar width for this part, falling back to `default_bar_width`.
    pub fn frame_bar_width(&self, default_bar_width: f64) -> f64 {
        self.frame
            .and_then(|f| f.bar_width)
            .unwrap_or(default_bar_width)
    }

    /// Area of one copy in m².
    pub fn area_m2(&self) -> f64 {
        units::area_m2(self.width, self.height)
    }

    /// Area of all copies in m².
    pub fn total_area_m2(&self) -> f64 {
        self.area_m2() * f64::from(self.quantity)
    }

    /// Get display dimensions (width x height).
    pub fn dimensions_string(&self) -> String {
        format!("{} x {} mm", self.width, self.height)
    }
}
