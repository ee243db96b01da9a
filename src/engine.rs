//! CuttingEngine - configuration plus optional timing hook over the pipeline.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::expand::expand_parts;
use crate::layout::{optimize_cutting_layout, LayoutResult};
use crate::model::{CuttingConfiguration, CuttingPart, Piece, PriceCalculation};
use crate::observe::{timed, PerfHook};
use crate::pricing::{calculate_material_waste_with, calculate_price_with};
use crate::validation::{validate_parts, ValidationResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Price and layout for one cut list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub price: PriceCalculation,
    pub layout: LayoutResult,
    /// Number of unit pieces after expansion.
    pub piece_count: usize,
    pub warnings: Vec<String>,
}

/// Stateless engine; safe to share between threads.
#[derive(Clone, Default)]
pub struct CuttingEngine {
    config: EngineConfig,
    hook: Option<Arc<dyn PerfHook>>,
}

impl std::fmt::Debug for CuttingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CuttingEngine")
            .field("config", &self.config)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl CuttingEngine {
    /// Create an engine, rejecting an unusable configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, hook: None })
    }

    /// Install a timing hook.
    pub fn with_hook(mut self, hook: impl PerfHook + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn hook(&self) -> Option<&dyn PerfHook> {
        self.hook.as_deref()
    }

    /// Collect warnings and errors for a part list.
    pub fn validate(&self, parts: &[CuttingPart]) -> ValidationResult {
        validate_parts(parts, self.config.frame_bar_width)
    }

    pub fn expand(&self, parts: &[CuttingPart]) -> Result<Vec<Piece>> {
        timed(self.hook(), "expand", parts.len(), || {
            expand_parts(parts, self.config.frame_bar_width)
        })
    }

    pub fn calculate_material_waste(&self, parts: &[CuttingPart]) -> Result<f64> {
        timed(self.hook(), "waste", parts.len(), || {
            calculate_material_waste_with(parts, &self.config)
        })
    }

    pub fn calculate_price(&self, parts: &[CuttingPart]) -> Result<PriceCalculation> {
        timed(self.hook(), "price", parts.len(), || {
            calculate_price_with(parts, &self.config)
        })
    }

    /// Lay out already expanded pieces.
    pub fn optimize_pieces(&self, pieces: &[Piece]) -> Result<LayoutResult> {
        timed(self.hook(), "layout", pieces.len(), || {
            optimize_cutting_layout(pieces, &self.config)
        })
    }

    /// Expand parts and lay them out.
    pub fn optimize_layout(&self, parts: &[CuttingPart]) -> Result<LayoutResult> {
        let pieces = self.expand(parts)?;
        self.optimize_pieces(&pieces)
    }

    /// Price and lay out a part list.
    pub fn quote(&self, parts: &[CuttingPart]) -> Result<Quote> {
        let warnings = self.validate(parts).warnings();
        for warning in &warnings {
            warn!("{}", warning);
        }

        let pieces = self.expand(parts)?;
        let layout = self.optimize_pieces(&pieces)?;
        let price = self.calculate_price(parts)?;

        info!(
            "Quoted {} part(s): {} piece(s) on {} sheet(s), total {:.2}",
            parts.len(),
            pieces.len(),
            layout.sheet_count(),
            price.total_cost
        );

        Ok(Quote {
            price,
            layout,
            piece_count: pieces.len(),
            warnings,
        })
    }

    /// Quote a configuration and refresh its per-part prices and totals.
    pub fn quote_configuration(&self, configuration: &mut CuttingConfiguration) -> Result<Quote> {
        let quote = self.quote(&configuration.parts)?;
        configuration.recalculate(&self.config)?;
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutStrategy;
    use crate::error::EngineError;
    use crate::model::{EdgeSide, EdgeType, MaterialType};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    fn parts() -> Vec<CuttingPart> {
        let material = MaterialType::new("m", "Chipboard", 10.0);
        vec![
            CuttingPart::new("a", 1000.0, 1000.0, 2, material.clone()),
            CuttingPart::new("b", 200.0, 600.0, 1, material)
                .with_frame(None)
                .with_edge(EdgeSide::Top, EdgeType::new("e", "ABS", 1.0)),
        ]
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = EngineConfig::with_sheet(-1.0, 2070.0);
        assert!(matches!(
            CuttingEngine::new(config),
            Err(EngineError::InvalidSheet { .. })
        ));
    }

    #[test]
    fn test_quote_combines_price_and_layout() {
        let engine = CuttingEngine::default();
        let quote = engine.quote(&parts()).expect("Should quote");
        assert_eq!(quote.piece_count, 6);
        assert_eq!(quote.layout.piece_count(), 6);
        assert_eq!(quote.layout.sheet_count(), 1);
        assert_eq!(quote.price.efficiency, 1.0 - quote.price.material_waste);
        assert!(quote.warnings.is_empty());
    }

    #[test]
    fn test_hook_sees_each_stage() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let engine = CuttingEngine::default().with_hook(move |op: &str, _: Duration, _: usize| {
            sink.lock().unwrap().push(op.to_string());
        });

        engine.quote(&parts()).expect("Should quote");
        let ops = seen.lock().unwrap().clone();
        assert_eq!(ops, vec!["expand", "layout", "price"]);
    }

    #[test]
    fn test_quote_configuration_updates_totals() {
        let engine = CuttingEngine::default();
        let mut configuration = CuttingConfiguration::new(parts());
        let quote = engine
            .quote_configuration(&mut configuration)
            .expect("Should quote");
        assert_eq!(configuration.total_price, quote.price.total_cost);
        assert!(configuration.parts.iter().all(|p| p.total_price > 0.0));
    }

    #[test]
    fn test_shelf_engine() {
        let config = EngineConfig {
            strategy: LayoutStrategy::Shelf,
            ..Default::default()
        };
        let engine = CuttingEngine::new(config).expect("Valid config");
        let layout = engine.optimize_layout(&parts()).expect("Should lay out");
        assert_eq!(layout.strategy, "shelf");
        assert!(layout
            .sheets
            .iter()
            .flat_map(|s| &s.parts)
            .all(|p| p.position.is_some()));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_send_sync() {
        assert_send_sync::<CuttingEngine>();
        assert_send_sync::<Quote>();
    }

    #[test]
    fn test_shared_engine_matches_serial_quote() {
        const THREADS: usize = 4;
        const ROUNDS: usize = 8;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config = EngineConfig {
            strategy: LayoutStrategy::Shelf,
            ..Default::default()
        };
        let engine = CuttingEngine::new(config)
            .expect("Valid config")
            .with_hook(move |_: &str, _: Duration, _: usize| {
                counter.fetch_add(1, Ordering::Relaxed);
            });

        let parts = parts();
        let serial = engine.quote(&parts).expect("Should quote");
        let expected = serde_json::to_string(&serial).expect("Should serialize");

        let results: Vec<Quote> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        (0..ROUNDS)
                            .map(|_| engine.quote(&parts).expect("Should quote"))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().expect("Worker panicked"))
                .collect()
        });

        assert_eq!(results.len(), THREADS * ROUNDS);
        for quote in &results {
            assert_eq!(quote.price.total_cost.to_bits(), serial.price.total_cost.to_bits());
            assert_eq!(quote.layout.efficiency.to_bits(), serial.layout.efficiency.to_bits());
            assert_eq!(serde_json::to_string(quote).expect("Should serialize"), expected);
        }
        // expand, layout and price per quote
        assert_eq!(calls.load(Ordering::Relaxed), 3 * (THREADS * ROUNDS + 1));
    }
}
