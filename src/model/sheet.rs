//! Sheet - one raw board in a layout result.

use super::Piece;
use crate::units;
use serde::{Deserialize, Serialize};

/// Lower-left corner of a placed piece on its sheet, in mm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    /// Piece is turned 90°, so it occupies `height` x `width`.
    pub rotated: bool,
}

/// A piece assigned to a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub piece: Piece,
    /// Only set by strategies that compute real coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl PlacedPiece {
    /// Occupied width on the sheet, honoring rotation.
    pub fn placed_width(&self) -> f64 {
        match self.position {
            Some(pos) if pos.rotated => self.piece.height,
            _ => self.piece.width,
        }
    }

    /// Occupied height on the sheet, honoring rotation.
    pub fn placed_height(&self) -> f64 {
        match self.position {
            Some(pos) if pos.rotated => self.piece.width,
            _ => self.piece.height,
        }
    }
}

/// Horizontal strip used by shelf packing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shelf {
    /// Bottom edge of the shelf in mm.
    pub y: f64,
    /// Height of the tallest piece on the shelf.
    pub height: f64,
    /// Width consumed so far, including kerf.
    pub used_width: f64,
}

/// One bin of a layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// Zero-based index in creation order.
    pub index: usize,
    /// Width in mm.
    pub width: f64,
    /// Height in mm.
    pub height: f64,
    pub parts: Vec<PlacedPiece>,
    /// Sum of placed piece areas in m².
    pub used_area_m2: f64,
    #[serde(skip)]
    pub shelves: Vec<Shelf>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(index: usize, width: f64, height: f64) -> Self {
        Self {
            index,
            width,
            height,
            ..Default::default()
        }
    }

    /// Add a piece and account for its area.
    pub fn push(&mut self, piece: Piece, position: Option<Position>) {
        self.used_area_m2 += piece.area_m2();
        self.parts.push(PlacedPiece { piece, position });
    }

    /// Nominal area in m².
    pub fn area_m2(&self) -> f64 {
        units::area_m2(self.width, self.height)
    }

    /// Used share of the sheet area.
    pub fn efficiency(&self) -> f64 {
        let area = self.area_m2();
        if area <= 0.0 {
            return 0.0;
        }
        self.used_area_m2 / area
    }

    /// Unused share of the sheet area.
    pub fn waste(&self) -> f64 {
        1.0 - self.efficiency()
    }

    pub fn piece_count(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
