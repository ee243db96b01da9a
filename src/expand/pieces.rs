//! Flatten quantities and frames into individual pieces.
//!
//! Enumeration is stable: input order, then frame member order
//! (left, right, top, bottom), then copy index. Piece ids are
//! `<part number>:<part id>[:<member>]:<copy>` with a 1-based part number,
//! so they stay unique even when part ids repeat or contain separators.

use crate::error::Result;
use crate::model::{CuttingPart, FrameMember, Piece};
use crate::validation::ensure_valid;
use tracing::debug;

/// Outer dimensions of one frame member, in mm.
///
/// Vertical bars are `bar_width` wide and span the height minus the two
/// horizontal bars. Horizontal bars span the full width.
pub fn frame_member_size(member: FrameMember, width: f64, height: f64, bar_width: f64) -> (f64, f64) {
    if member.is_vertical() {
        (bar_width, height - 2.0 * bar_width)
    } else {
        (width, bar_width)
    }
}

/// Expand the part at 1-based position `part_num` into its pieces, appending to `out`.
pub fn expand_part(part: &CuttingPart, part_num: usize, default_bar_width: f64, out: &mut Vec<Piece>) {
    let piece = |id: String, member: Option<FrameMember>, width: f64, height: f64| Piece {
        id,
        original_part_id: part.id.clone(),
        block_id: part.block_id,
        member,
        width,
        height,
        material_id: part.material.id.clone(),
    };

    if part.is_frame() {
        let bar = part.frame_bar_width(default_bar_width);
        for member in FrameMember::ALL {
            let (w, h) = frame_member_size(member, part.width, part.height, bar);
            for copy in 1..=part.quantity {
                out.push(piece(format!("{}:{}:{}:{}", part_num, part.id, member, copy), Some(member), w, h));
            }
        }
    } else {
        for copy in 1..=part.quantity {
            out.push(piece(format!("{}:{}:{}", part_num, part.id, copy), None, part.width, part.height));
        }
    }
}

/// Expand a part list into unit pieces.
///
/// Plain parts yield `quantity` pieces, frame parts `4 x quantity`.
pub fn expand_parts(parts: &[CuttingPart], default_bar_width: f64) -> Result<Vec<Piece>> {
    ensure_valid(parts, default_bar_width)?;

    let mut pieces = Vec::with_capacity(expanded_count(parts));
    for (idx, part) in parts.iter().enumerate() {
        expand_part(part, idx + 1, default_bar_width, &mut pieces);
    }

    debug!("Expanded {} part(s) into {} piece(s)", parts.len(), pieces.len());
    Ok(pieces)
}

/// Number of pieces `expand_parts` will produce.
pub fn expanded_count(parts: &[CuttingPart]) -> usize {
    parts
        .iter()
        .map(|p| {
            let per_copy = if p.is_frame() { FrameMember::ALL.len() } else { 1 };
            per_copy * p.quantity as usize
        })
        .sum()
}
