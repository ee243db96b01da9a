//! Closed-form material waste estimate.
//!
//! This does not run the layout optimizer. It assumes every sheet is filled to
//! the configured packing efficiency, so it can disagree with the efficiency
//! reported by an actual layout.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::CuttingPart;
use crate::validation::ensure_valid;

/// Number of standard sheets the estimate assumes for `total_area_m2`.
pub fn estimated_sheets(total_area_m2: f64, config: &EngineConfig) -> u64 {
    let usable = config.sheet_area_m2() * config.waste_efficiency;
    if total_area_m2 <= 0.0 || usable <= 0.0 {
        return 0;
    }
    (total_area_m2 / usable).ceil() as u64
}

/// Estimated waste fraction in [0, 1] for the default sheet.
pub fn calculate_material_waste(parts: &[CuttingPart]) -> Result<f64> {
    calculate_material_waste_with(parts, &EngineConfig::default())
}

/// Estimated waste fraction in [0, 1].
///
/// An empty list, or one whose copies are all zero, has no sheets and
/// reports zero waste.
pub fn calculate_material_waste_with(parts: &[CuttingPart], config: &EngineConfig) -> Result<f64> {
    config.validate()?;
    ensure_valid(parts, config.frame_bar_width)?;

    let total_area: f64 = parts.iter().map(CuttingPart::total_area_m2).sum();
    let sheets = estimated_sheets(total_area, config);
    if sheets == 0 {
        return Ok(0.0);
    }

    let sheet_total = sheets as f64 * config.sheet_area_m2();
    let waste = (sheet_total - total_area) / sheet_total;
    Ok(waste.clamp(0.0, 1.0))
}
