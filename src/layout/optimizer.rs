//! Greedy first-fit-decreasing sheet assignment.

use super::strategy::{strategy_for, FitStrategy};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::expand::expand_parts;
use crate::model::{CuttingPart, Piece, Sheet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Sheets produced by one layout run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// Sheet width in mm.
    pub sheet_width: f64,
    /// Sheet height in mm.
    pub sheet_height: f64,
    /// Name of the fit test used.
    pub strategy: String,
    pub sheets: Vec<Sheet>,
    /// Sum of placed piece areas in m².
    pub used_area_m2: f64,
    /// `used_area / (sheets x sheet area)`, 0 when no sheet was opened.
    pub efficiency: f64,
}

impl LayoutResult {
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn piece_count(&self) -> usize {
        self.sheets.iter().map(Sheet::piece_count).sum()
    }

    /// Unused share of all opened sheets.
    pub fn waste(&self) -> f64 {
        if self.sheets.is_empty() {
            0.0
        } else {
            1.0 - self.efficiency
        }
    }

    /// Find the sheet holding a piece.
    pub fn sheet_of(&self, piece_id: &str) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.parts.iter().any(|p| p.piece.id == piece_id))
    }
}

/// Lay out pieces with the strategy selected in `config`.
pub fn optimize_cutting_layout(pieces: &[Piece], config: &EngineConfig) -> Result<LayoutResult> {
    let strategy = strategy_for(config);
    optimize_with_strategy(pieces, config, strategy.as_ref())
}

/// Expand parts into pieces, then lay them out.
pub fn optimize_parts_layout(parts: &[CuttingPart], config: &EngineConfig) -> Result<LayoutResult> {
    let pieces = expand_parts(parts, config.frame_bar_width)?;
    optimize_cutting_layout(&pieces, config)
}

/// Lay out pieces with an explicit fit test.
///
/// Pieces are taken largest area first (ties keep input order) and go on the
/// first sheet, in creation order, whose fit test admits them. When none does
/// a new sheet is opened. A piece that does not fit on a fresh sheet is
/// reported as oversize.
pub fn optimize_with_strategy(
    pieces: &[Piece],
    config: &EngineConfig,
    strategy: &dyn FitStrategy,
) -> Result<LayoutResult> {
    config.validate()?;

    for piece in pieces {
        if !(piece.width.is_finite() && piece.height.is_finite())
            || piece.width <= 0.0
            || piece.height <= 0.0
        {
            return Err(EngineError::InvalidDimension {
                part_id: piece.id.clone(),
                width: piece.width,
                height: piece.height,
            });
        }
    }

    let mut order: Vec<&Piece> = pieces.iter().collect();
    order.sort_by(|a, b| b.area_m2().total_cmp(&a.area_m2()));

    let mut sheets: Vec<Sheet> = Vec::new();
    for piece in order {
        if sheets.iter_mut().any(|sheet| strategy.try_place(sheet, piece)) {
            continue;
        }

        let mut sheet = Sheet::new(sheets.len(), config.sheet_width, config.sheet_height);
        if !strategy.try_place(&mut sheet, piece) {
            return Err(EngineError::OversizePart {
                piece_id: piece.id.clone(),
                width: piece.width,
                height: piece.height,
                reason: strategy.oversize_reason(&sheet, piece),
            });
        }
        debug!("Opened sheet {} for piece {}", sheet.index + 1, piece.id);
        sheets.push(sheet);
    }

    let used_area_m2: f64 = sheets.iter().map(|s| s.used_area_m2).sum();
    let total_area = sheets.len() as f64 * config.sheet_area_m2();
    let efficiency = if total_area > 0.0 {
        used_area_m2 / total_area
    } else {
        0.0
    };

    info!(
        "Laid out {} piece(s) on {} sheet(s) using {} ({:.1}% used)",
        pieces.len(),
        sheets.len(),
        strategy.name(),
        efficiency * 100.0
    );

    Ok(LayoutResult {
        sheet_width: config.sheet_width,
        sheet_height: config.sheet_height,
        strategy: strategy.name().to_string(),
        sheets,
        used_area_m2,
        efficiency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutStrategy;
    use crate::layout::AreaBudgetFit;
    use crate::model::MaterialType;
    use pretty_assertions::assert_eq;

    fn pieces(sizes: &[(f64, f64)]) -> Vec<Piece> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| Piece::new(format!("p-{}", i + 1), "p", w, h))
            .collect()
    }

    fn shelf_config() -> EngineConfig {
        EngineConfig {
            strategy: LayoutStrategy::Shelf,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_piece_opens_one_sheet() {
        let result = optimize_cutting_layout(&pieces(&[(1000.0, 1000.0)]), &EngineConfig::default())
            .expect("Should lay out");
        assert_eq!(result.sheet_count(), 1);
        assert_eq!(result.piece_count(), 1);
        assert!((result.efficiency - 1.0 / 5.796).abs() < 1e-9);
        assert_eq!(result.strategy, "area-budget");
    }

    #[test]
    fn test_empty_input() {
        let result = optimize_cutting_layout(&[], &EngineConfig::default()).expect("Should lay out");
        assert_eq!(result.sheet_count(), 0);
        assert_eq!(result.efficiency, 0.0);
        assert_eq!(result.waste(), 0.0);
    }

    #[test]
    fn test_largest_first_order() {
        let result = optimize_cutting_layout(
            &pieces(&[(100.0, 100.0), (1000.0, 1000.0), (500.0, 500.0)]),
            &EngineConfig::default(),
        )
        .expect("Should lay out");
        let ids: Vec<&str> = result.sheets[0]
            .parts
            .iter()
            .map(|p| p.piece.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p-2", "p-3", "p-1"]);
    }

    #[test]
    fn test_first_fit_backfills_earlier_sheet() {
        // 2.6 m² opens sheet 1; neither 2.4 m² piece fits next to it, so both
        // go on sheet 2; the small piece still fits on sheet 1.
        let result = optimize_cutting_layout(
            &pieces(&[(2000.0, 1200.0), (2000.0, 1200.0), (2600.0, 1000.0), (300.0, 300.0)]),
            &EngineConfig::default(),
        )
        .expect("Should lay out");
        assert_eq!(result.sheet_count(), 2);
        assert_eq!(result.sheet_of("p-3").map(|s| s.index), Some(0));
        assert_eq!(result.sheet_of("p-1").map(|s| s.index), Some(1));
        assert_eq!(result.sheet_of("p-2").map(|s| s.index), Some(1));
        assert_eq!(result.sheet_of("p-4").map(|s| s.index), Some(0));
    }

    #[test]
    fn test_area_budget_invariant() {
        let sizes: Vec<(f64, f64)> = (0..60)
            .map(|i| (200.0 + (i * 37 % 900) as f64, 150.0 + (i * 53 % 1100) as f64))
            .collect();
        let config = EngineConfig::default();
        let result = optimize_cutting_layout(&pieces(&sizes), &config).expect("Should lay out");
        assert_eq!(result.piece_count(), 60);
        for sheet in &result.sheets {
            assert!(sheet.used_area_m2 <= config.layout_budget_m2());
        }
    }

    #[test]
    fn test_oversize_piece_rejected() {
        let err = optimize_cutting_layout(&pieces(&[(2800.0, 2070.0)]), &EngineConfig::default())
            .unwrap_err();
        match err {
            EngineError::OversizePart {
                piece_id, reason, ..
            } => {
                assert_eq!(piece_id, "p-1");
                assert!(reason.contains("4.9266 m²"));
            }
            other => panic!("Expected OversizePart, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_piece_rejected() {
        let result = optimize_cutting_layout(&pieces(&[(0.0, 100.0)]), &EngineConfig::default());
        assert!(matches!(result, Err(EngineError::InvalidDimension { .. })));
    }

    #[test]
    fn test_custom_strategy_efficiency() {
        let strict = AreaBudgetFit::new(0.5);
        let result = optimize_with_strategy(
            &pieces(&[(2000.0, 1000.0), (2000.0, 1000.0)]),
            &EngineConfig::default(),
            &strict,
        )
        .expect("Should lay out");
        // 2 m² each, budget 2.898 m² per sheet
        assert_eq!(result.sheet_count(), 2);
    }

    #[test]
    fn test_shelf_layout_has_no_overlaps() {
        let sizes: Vec<(f64, f64)> = (0..40)
            .map(|i| (150.0 + (i * 71 % 800) as f64, 100.0 + (i * 29 % 600) as f64))
            .collect();
        let result = optimize_cutting_layout(&pieces(&sizes), &shelf_config()).expect("Should lay out");
        assert_eq!(result.piece_count(), 40);

        for sheet in &result.sheets {
            let rects: Vec<(f64, f64, f64, f64)> = sheet
                .parts
                .iter()
                .map(|p| {
                    let pos = p.position.expect("Shelf layout sets positions");
                    (pos.x, pos.y, pos.x + p.placed_width(), pos.y + p.placed_height())
                })
                .collect();
            for r in &rects {
                assert!(r.0 >= 0.0 && r.1 >= 0.0);
                assert!(r.2 <= sheet.width + 1e-6 && r.3 <= sheet.height + 1e-6);
            }
            for i in 0..rects.len() {
                for j in i + 1..rects.len() {
                    let (a, b) = (rects[i], rects[j]);
                    let overlap = a.0 < b.2 && b.0 < a.2 && a.1 < b.3 && b.1 < a.3;
                    assert!(!overlap, "Pieces {} and {} overlap", i, j);
                }
            }
        }
    }

    #[test]
    fn test_shelf_oversize_reports_geometry() {
        let config = EngineConfig {
            allow_rotation: false,
            ..shelf_config()
        };
        let err = optimize_cutting_layout(&pieces(&[(3000.0, 100.0)]), &config).unwrap_err();
        match err {
            EngineError::OversizePart { reason, .. } => {
                assert!(reason.contains("2800 x 2070 mm"));
                assert!(!reason.contains("budget"));
            }
            other => panic!("Expected OversizePart, got {:?}", other),
        }
    }

    #[test]
    fn test_shelf_accepts_full_sheet_piece() {
        let result = optimize_cutting_layout(&pieces(&[(2800.0, 2070.0)]), &shelf_config())
            .expect("Should lay out");
        assert_eq!(result.sheet_count(), 1);
        assert!((result.efficiency - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parts_layout_expands_first() {
        let material = MaterialType::new("m", "Board", 10.0);
        let parts = vec![
            CuttingPart::new("a", 300.0, 500.0, 3, material.clone()),
            CuttingPart::new("b", 200.0, 600.0, 1, material).with_frame(None),
        ];
        let result = optimize_parts_layout(&parts, &EngineConfig::default()).expect("Should lay out");
        assert_eq!(result.piece_count(), 7);
        assert_eq!(result.sheet_count(), 1);
    }
}
