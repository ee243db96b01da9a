//! Validation logic for part lists.

use crate::error::{EngineError, Result};
use crate::model::CuttingPart;
use std::collections::HashSet;
use std::fmt;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One finding, tied to the part it was raised for.
#[derive(Debug, Clone, PartialEq)]
pub struct PartIssue {
    /// 1-based position in the cut list; `None` for list-level findings.
    pub part_num: Option<usize>,
    pub part_id: Option<String>,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for PartIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.part_num, &self.part_id) {
            (Some(n), Some(id)) => write!(f, "Part {} ({}): {}", n, id, self.message),
            (Some(n), None) => write!(f, "Part {}: {}", n, self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Everything validation found in a cut list.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub issues: Vec<PartIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// No errors; warnings are allowed.
    pub fn passed(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Warn about the whole list.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.issues.push(PartIssue {
            part_num: None,
            part_id: None,
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn warn_part(&mut self, part_num: usize, part: &CuttingPart, message: impl Into<String>) {
        self.push_part(part_num, part, Severity::Warning, message.into());
    }

    pub fn fail_part(&mut self, part_num: usize, part: &CuttingPart, message: impl Into<String>) {
        self.push_part(part_num, part, Severity::Error, message.into());
    }

    fn push_part(&mut self, part_num: usize, part: &CuttingPart, severity: Severity, message: String) {
        self.issues.push(PartIssue {
            part_num: Some(part_num),
            part_id: Some(part.id.clone()),
            severity,
            message,
        });
    }

    /// Findings raised for the part at `part_num`.
    pub fn for_part(&self, part_num: usize) -> impl Iterator<Item = &PartIssue> {
        self.issues
            .iter()
            .filter(move |i| i.part_num == Some(part_num))
    }

    /// Rendered warning messages, in input order.
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    /// Rendered error messages, in input order.
    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .map(ToString::to_string)
            .collect()
    }
}

fn is_valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_valid_price(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Check a single part and return the first problem as a typed error.
pub fn check_part(part: &CuttingPart, default_bar_width: f64) -> Result<()> {
    if !is_valid_dimension(part.width) || !is_valid_dimension(part.height) {
        return Err(EngineError::InvalidDimension {
            part_id: part.id.clone(),
            width: part.width,
            height: part.height,
        });
    }

    if !is_valid_price(part.material.price_per_unit) {
        return Err(EngineError::NonFiniteValue {
            part_id: part.id.clone(),
            field: "pricePerUnit".to_string(),
            value: part.material.price_per_unit,
        });
    }

    for (side, edge) in part.edge_processing.assigned() {
        if !is_valid_price(edge.price_per_meter) {
            return Err(EngineError::NonFiniteValue {
                part_id: part.id.clone(),
                field: format!("edgeProcessing.{}.pricePerMeter", side),
                value: edge.price_per_meter,
            });
        }
    }

    if part.is_frame() {
        let bar = part.frame_bar_width(default_bar_width);
        if !is_valid_dimension(bar) || 2.0 * bar >= part.width || 2.0 * bar >= part.height {
            return Err(EngineError::InvalidFrame {
                part_id: part.id.clone(),
                bar_width: bar,
                width: part.width,
                height: part.height,
            });
        }
    }

    Ok(())
}

/// Fail fast on the first invalid part.
pub fn ensure_valid(parts: &[CuttingPart], default_bar_width: f64) -> Result<()> {
    parts
        .iter()
        .try_for_each(|part| check_part(part, default_bar_width))
}

/// Validate a single part, adding every finding to `result`.
pub fn validate_part(
    result: &mut ValidationResult,
    part: &CuttingPart,
    part_num: usize,
    default_bar_width: f64,
) {
    if let Err(err) = check_part(part, default_bar_width) {
        let text = err.to_string();
        let prefix = format!("Part {}: ", part.id);
        result.fail_part(part_num, part, text.strip_prefix(&prefix).unwrap_or(&text));
    }

    if part.quantity == 0 {
        result.warn_part(part_num, part, "Quantity is zero");
    }

    if !part.shape.is_rectangle() {
        result.warn_part(
            part_num,
            part,
            format!("{} shape is costed as its bounding rectangle", part.shape.kind),
        );
    }
}

/// Validate all parts.
pub fn validate_parts(parts: &[CuttingPart], default_bar_width: f64) -> ValidationResult {
    let mut result = ValidationResult::new();

    if parts.is_empty() {
        result.warn("No parts to cut");
        return result;
    }

    let mut seen = HashSet::new();
    for (idx, part) in parts.iter().enumerate() {
        validate_part(&mut result, part, idx + 1, default_bar_width);

        if !seen.insert(part.id.as_str()) {
            result.warn_part(idx + 1, part, "Duplicate id");
        }
    }

    result
}
