//! Price breakdown for a cut list.

use serde::{Deserialize, Serialize};

/// Cost composition and waste estimate for a list of parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCalculation {
    pub material_cost: f64,
    pub edge_processing_cost: f64,
    pub labor_cost: f64,
    /// Material + edges + labor. Waste does not add to it.
    pub total_cost: f64,
    /// Estimated unused share of the sheets, in [0, 1].
    pub material_waste: f64,
    /// Always `1 - material_waste`.
    pub efficiency: f64,
}
