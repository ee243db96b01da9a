//! Cost composition for a cut list.

use super::calculate_material_waste_with;
use crate::config::{EdgePricing, EngineConfig};
use crate::error::Result;
use crate::model::{CuttingPart, PriceCalculation};
use crate::units;
use crate::validation::ensure_valid;

/// Material cost of one copy of a part.
pub fn material_cost_per_piece(part: &CuttingPart) -> f64 {
    part.area_m2() * part.material.price_per_unit
}

/// Edge banding cost of one copy of a part.
///
/// `Perimeter` charges the whole perimeter once per assigned edge type,
/// regardless of which side the edge sits on.
pub fn edge_cost_per_piece(part: &CuttingPart, pricing: EdgePricing) -> f64 {
    match pricing {
        EdgePricing::Perimeter => {
            units::perimeter_m(part.width, part.height) * part.edge_processing.price_per_meter_sum()
        }
        EdgePricing::PerSide => part
            .edge_processing
            .assigned()
            .map(|(side, edge)| {
                units::mm_to_m(side.length_mm(part.width, part.height)) * edge.price_per_meter
            })
            .sum(),
    }
}

/// Price of one copy including labor.
pub fn part_unit_cost(part: &CuttingPart, config: &EngineConfig) -> f64 {
    let material = material_cost_per_piece(part);
    material + edge_cost_per_piece(part, config.edge_pricing) + material * config.labor_rate
}

/// Fill `price_per_piece` and `total_price` on every part.
pub fn apply_part_prices(parts: &mut [CuttingPart], config: &EngineConfig) -> Result<()> {
    ensure_valid(parts, config.frame_bar_width)?;
    for part in parts.iter_mut() {
        part.price_per_piece = part_unit_cost(part, config);
        part.total_price = part.price_per_piece * f64::from(part.quantity);
    }
    Ok(())
}

/// Price a part list with the default configuration.
pub fn calculate_price(parts: &[CuttingPart]) -> Result<PriceCalculation> {
    calculate_price_with(parts, &EngineConfig::default())
}

/// Price a part list.
///
/// Waste is reported alongside but is not added to `total_cost`.
pub fn calculate_price_with(parts: &[CuttingPart], config: &EngineConfig) -> Result<PriceCalculation> {
    config.validate()?;
    ensure_valid(parts, config.frame_bar_width)?;

    let mut material_cost = 0.0;
    let mut edge_processing_cost = 0.0;
    for part in parts {
        let quantity = f64::from(part.quantity);
        material_cost += material_cost_per_piece(part) * quantity;
        edge_processing_cost += edge_cost_per_piece(part, config.edge_pricing) * quantity;
    }

    let labor_cost = material_cost * config.labor_rate;
    let material_waste = calculate_material_waste_with(parts, config)?;

    Ok(PriceCalculation {
        material_cost,
        edge_processing_cost,
        labor_cost,
        total_cost: material_cost + edge_processing_cost + labor_cost,
        material_waste,
        efficiency: 1.0 - material_waste,
    })
}
