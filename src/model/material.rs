//! Board materials and edge banding types (shared reference data).

use serde::{Deserialize, Serialize};

/// A board material offered by the shop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialType {
    pub id: String,
    pub name: String,
    /// Price per m².
    pub price_per_unit: f64,
    /// Board thickness in mm.
    pub thickness: f64,
    pub category: String,
}

impl MaterialType {
    /// Create a material with a price per m².
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_per_unit: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_per_unit,
            ..Default::default()
        }
    }

    /// Get display label (name and thickness).
    pub fn label(&self) -> String {
        if self.thickness > 0.0 {
            format!("{} {} mm", self.name, self.thickness)
        } else {
            self.name.clone()
        }
    }
}

/// An edge banding type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeType {
    pub id: String,
    pub name: String,
    /// Price per running meter.
    pub price_per_meter: f64,
    /// Banding thickness in mm.
    pub thickness: f64,
}

impl EdgeType {
    /// Create an edge type with a price per meter.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_per_meter: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_per_meter,
            ..Default::default()
        }
    }
}
