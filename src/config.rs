//! Policy constants and engine configuration.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Standard raw board width in mm.
pub const STANDARD_SHEET_WIDTH_MM: f64 = 2800.0;

/// Standard raw board height in mm.
pub const STANDARD_SHEET_HEIGHT_MM: f64 = 2070.0;

/// Share of nominal sheet area that is assumed usable after packing.
pub const PACKING_EFFICIENCY: f64 = 0.85;

/// Labor surcharge as a fraction of material cost.
pub const LABOR_RATE: f64 = 0.10;

/// Saw blade width lost per cut, in mm.
pub const KERF_MM: f64 = 4.0;

/// Width of each bar when a frame part is split into members, in mm.
pub const DEFAULT_FRAME_BAR_WIDTH_MM: f64 = 50.0;

/// How edge banding is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgePricing {
    /// Full part perimeter times the summed per-meter price of every assigned edge.
    #[default]
    Perimeter,
    /// Each assigned edge is charged for the length of its own side only.
    PerSide,
}

impl std::fmt::Display for EdgePricing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgePricing::Perimeter => write!(f, "perimeter"),
            EdgePricing::PerSide => write!(f, "per-side"),
        }
    }
}

/// Fit test used by the layout optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// Admit a piece while the summed area stays within the usable budget.
    #[default]
    AreaBudget,
    /// Place pieces on horizontal shelves with real, non-overlapping coordinates.
    Shelf,
}

impl std::fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutStrategy::AreaBudget => write!(f, "area-budget"),
            LayoutStrategy::Shelf => write!(f, "shelf"),
        }
    }
}

impl std::str::FromStr for LayoutStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "area" | "area-budget" => Ok(LayoutStrategy::AreaBudget),
            "shelf" => Ok(LayoutStrategy::Shelf),
            _ => Err(format!("Unknown layout strategy: {}", s)),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Raw sheet width in mm.
    pub sheet_width: f64,
    /// Raw sheet height in mm.
    pub sheet_height: f64,
    /// Usable share of sheet area for the layout fit test.
    pub layout_efficiency: f64,
    /// Usable share of sheet area for the closed-form waste estimate.
    pub waste_efficiency: f64,
    /// Labor surcharge rate on material cost.
    pub labor_rate: f64,
    /// Saw kerf in mm (geometric layout only).
    pub kerf: f64,
    /// Frame bar width in mm, used when a frame part does not set its own.
    pub frame_bar_width: f64,
    /// Edge banding cost model.
    pub edge_pricing: EdgePricing,
    /// Allow 90° rotation in geometric layout.
    pub allow_rotation: bool,
    /// Layout fit test.
    pub strategy: LayoutStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sheet_width: STANDARD_SHEET_WIDTH_MM,
            sheet_height: STANDARD_SHEET_HEIGHT_MM,
            layout_efficiency: PACKING_EFFICIENCY,
            waste_efficiency: PACKING_EFFICIENCY,
            labor_rate: LABOR_RATE,
            kerf: KERF_MM,
            frame_bar_width: DEFAULT_FRAME_BAR_WIDTH_MM,
            edge_pricing: EdgePricing::default(),
            allow_rotation: true,
            strategy: LayoutStrategy::default(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration for a custom sheet size.
    pub fn with_sheet(sheet_width: f64, sheet_height: f64) -> Self {
        Self {
            sheet_width,
            sheet_height,
            ..Default::default()
        }
    }

    /// Nominal sheet area in m².
    pub fn sheet_area_m2(&self) -> f64 {
        crate::units::area_m2(self.sheet_width, self.sheet_height)
    }

    /// Area a single sheet may hold under the layout fit test, in m².
    pub fn layout_budget_m2(&self) -> f64 {
        self.sheet_area_m2() * self.layout_efficiency
    }

    /// Check the configuration before any computation uses it.
    pub fn validate(&self) -> Result<()> {
        if !(self.sheet_width.is_finite() && self.sheet_height.is_finite())
            || self.sheet_width <= 0.0
            || self.sheet_height <= 0.0
        {
            return Err(EngineError::InvalidSheet {
                width: self.sheet_width,
                height: self.sheet_height,
            });
        }

        for (name, factor) in [
            ("layout_efficiency", self.layout_efficiency),
            ("waste_efficiency", self.waste_efficiency),
        ] {
            if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} must be in (0, 1], got {}", name, factor),
                });
            }
        }

        for (name, value) in [
            ("labor_rate", self.labor_rate),
            ("kerf", self.kerf),
            ("frame_bar_width", self.frame_bar_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} must be a non-negative number, got {}", name, value),
                });
            }
        }

        Ok(())
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if `a` does not exceed `limit` beyond epsilon tolerance.
    #[inline]
    pub fn le(a: f64, limit: f64) -> bool {
        a <= limit + EPS
    }
}
