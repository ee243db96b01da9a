//! cutplan - Cutting layout optimization and pricing for custom-cut board orders.
//!
//! The engine takes a customer's cut list (parts with size, quantity,
//! material, edge banding and optional frame/block settings), expands it into
//! unit pieces, assigns the pieces to raw sheets and prices the order.
//! Everything is pure and synchronous; no I/O happens outside [`parser`].
//!
//! # Example
//!
//! ```
//! use cutplan::{CuttingEngine, CuttingPart, MaterialType};
//!
//! let board = MaterialType::new("w980", "White chipboard", 10.0);
//! let parts = vec![CuttingPart::new("shelf", 1000.0, 1000.0, 2, board)];
//!
//! let quote = CuttingEngine::default().quote(&parts).unwrap();
//! assert_eq!(quote.layout.sheet_count(), 1);
//! assert!((quote.price.total_cost - 22.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod expand;
pub mod layout;
pub mod model;
pub mod observe;
pub mod order;
pub mod parser;
pub mod pricing;
pub mod units;
pub mod validation;

// Re-exports for convenience
pub use config::{EdgePricing, EngineConfig, LayoutStrategy};
pub use engine::{CuttingEngine, Quote};
pub use error::{EngineError, ErrorCode, Result};
pub use expand::expand_parts;
pub use layout::{
    optimize_cutting_layout, optimize_parts_layout, optimize_with_strategy, AreaBudgetFit,
    FitStrategy, LayoutResult, ShelfFit,
};
pub use model::{
    CustomerInfo, CuttingConfiguration, CuttingPart, EdgeProcessing, EdgeSide, EdgeType,
    FrameMember, FrameSpec, MaterialType, PartShape, Piece, PriceCalculation, Sheet, ShapeKind,
};
pub use observe::{PerfHook, TracingHook};
pub use order::{build_line_items, LineItem};
pub use parser::{load_configuration_file, load_engine_config, parse_configuration};
pub use pricing::{calculate_material_waste, calculate_price};
pub use units::format_currency;
pub use validation::{validate_parts, PartIssue, Severity, ValidationResult};

/// Quote a request file.
///
/// This is the main high-level function that performs the full pipeline:
/// 1. Load the request (parts array or configuration object)
/// 2. Validate the parts
/// 3. Expand and lay out the pieces
/// 4. Price the parts and refresh per-part totals
pub fn quote_file(input_path: &std::path::Path, config: EngineConfig) -> Result<(CuttingConfiguration, Quote)> {
    let mut configuration = load_configuration_file(input_path)?;
    let engine = CuttingEngine::new(config)?;
    let quote = engine.quote_configuration(&mut configuration)?;
    Ok((configuration, quote))
}
