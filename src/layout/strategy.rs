//! Fit tests deciding whether a piece can go on a sheet.

use crate::config::{float_cmp, EngineConfig, LayoutStrategy};
use crate::model::{Piece, Position, Sheet, Shelf};

/// A replaceable fit test.
///
/// `try_place` adds the piece to the sheet and returns `true` when it fits.
/// On `false` the sheet must be left untouched.
pub trait FitStrategy {
    /// Strategy name reported in layout results.
    fn name(&self) -> &'static str;

    /// Try to place `piece` on `sheet`.
    fn try_place(&self, sheet: &mut Sheet, piece: &Piece) -> bool;

    /// Why `piece` does not fit on the empty `sheet`.
    fn oversize_reason(&self, sheet: &Sheet, _piece: &Piece) -> String {
        format!("does not fit on an empty {} x {} mm sheet", sheet.width, sheet.height)
    }
}

/// Build the fit test selected in the configuration.
pub fn strategy_for(config: &EngineConfig) -> Box<dyn FitStrategy> {
    match config.strategy {
        LayoutStrategy::AreaBudget => Box::new(AreaBudgetFit::new(config.layout_efficiency)),
        LayoutStrategy::Shelf => Box::new(ShelfFit::new(config.kerf, config.allow_rotation)),
    }
}

/// Admits a piece while the summed piece area stays within
/// `efficiency x sheet area`.
///
/// This only guarantees aggregate area feasibility. It never checks that the
/// pieces tile the sheet without overlapping, and placed pieces get no
/// coordinates.
#[derive(Debug, Clone, Copy)]
pub struct AreaBudgetFit {
    pub efficiency: f64,
}

impl AreaBudgetFit {
    pub fn new(efficiency: f64) -> Self {
        Self { efficiency }
    }

    /// Area a single sheet can hold, in m².
    pub fn budget_m2(&self, sheet: &Sheet) -> f64 {
        sheet.area_m2() * self.efficiency
    }

    /// Check the budget without placing.
    pub fn can_fit_in_sheet(&self, sheet: &Sheet, piece: &Piece) -> bool {
        sheet.used_area_m2 + piece.area_m2() <= self.budget_m2(sheet)
    }
}

impl Default for AreaBudgetFit {
    fn default() -> Self {
        Self::new(crate::config::PACKING_EFFICIENCY)
    }
}

impl FitStrategy for AreaBudgetFit {
    fn name(&self) -> &'static str {
        "area-budget"
    }

    fn try_place(&self, sheet: &mut Sheet, piece: &Piece) -> bool {
        if !self.can_fit_in_sheet(sheet, piece) {
            return false;
        }
        sheet.push(piece.clone(), None);
        true
    }

    fn oversize_reason(&self, sheet: &Sheet, piece: &Piece) -> String {
        format!(
            "area {:.4} m² exceeds the usable sheet budget of {:.4} m²",
            piece.area_m2(),
            self.budget_m2(sheet)
        )
    }
}

/// Shelf packing with real coordinates.
///
/// Pieces are laid left to right on horizontal shelves. A shelf is as tall as
/// the piece that opened it; a new shelf starts above the previous one.
/// `kerf` is kept between neighbours on a shelf and between shelves.
#[derive(Debug, Clone, Copy)]
pub struct ShelfFit {
    pub kerf: f64,
    pub allow_rotation: bool,
}

impl ShelfFit {
    pub fn new(kerf: f64, allow_rotation: bool) -> Self {
        Self {
            kerf,
            allow_rotation,
        }
    }

    /// Candidate (width, height, rotated) orientations, upright first.
    fn orientations(&self, piece: &Piece) -> Vec<(f64, f64, bool)> {
        let mut out = vec![(piece.width, piece.height, false)];
        if self.allow_rotation && !float_cmp::approx_eq(piece.width, piece.height) {
            out.push((piece.height, piece.width, true));
        }
        out
    }

    /// Bottom edge of the next shelf to open.
    fn next_shelf_y(&self, sheet: &Sheet) -> f64 {
        sheet
            .shelves
            .last()
            .map_or(0.0, |s| s.y + s.height + self.kerf)
    }
}

impl FitStrategy for ShelfFit {
    fn name(&self) -> &'static str {
        "shelf"
    }

    fn try_place(&self, sheet: &mut Sheet, piece: &Piece) -> bool {
        let orientations = self.orientations(piece);

        // Existing shelves: first shelf that takes the piece, tightest height.
        for idx in 0..sheet.shelves.len() {
            let shelf = sheet.shelves[idx];
            let best = orientations
                .iter()
                .filter(|(w, h, _)| {
                    float_cmp::le(*h, shelf.height) && float_cmp::le(shelf.used_width + w, sheet.width)
                })
                .min_by(|a, b| (shelf.height - a.1).total_cmp(&(shelf.height - b.1)));

            if let Some(&(w, _, rotated)) = best {
                sheet.shelves[idx].used_width += w + self.kerf;
                let position = Position {
                    x: shelf.used_width,
                    y: shelf.y,
                    rotated,
                };
                sheet.push(piece.clone(), Some(position));
                return true;
            }
        }

        // New shelf: flattest orientation that still fits.
        let y = self.next_shelf_y(sheet);
        let best = orientations
            .iter()
            .filter(|(w, h, _)| float_cmp::le(*w, sheet.width) && float_cmp::le(y + h, sheet.height))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match best {
            Some(&(w, h, rotated)) => {
                sheet.shelves.push(Shelf {
                    y,
                    height: h,
                    used_width: w + self.kerf,
                });
                sheet.push(piece.clone(), Some(Position { x: 0.0, y, rotated }));
                true
            }
            None => false,
        }
    }

    fn oversize_reason(&self, sheet: &Sheet, _piece: &Piece) -> String {
        let orientation = if self.allow_rotation {
            "in either orientation"
        } else {
            "with rotation disabled"
        };
        format!(
            "does not fit within {} x {} mm {}",
            sheet.width, sheet.height, orientation
        )
    }
}
