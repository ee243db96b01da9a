//! Optional timing of engine operations.
//!
//! Nothing is measured unless the caller installs a hook on the engine.

use std::time::{Duration, Instant};
use tracing::debug;

/// Receives one record per timed engine operation.
pub trait PerfHook: Send + Sync {
    /// `items` is the number of parts or pieces the operation worked on.
    fn record(&self, operation: &str, elapsed: Duration, items: usize);
}

impl<F> PerfHook for F
where
    F: Fn(&str, Duration, usize) + Send + Sync,
{
    fn record(&self, operation: &str, elapsed: Duration, items: usize) {
        self(operation, elapsed, items)
    }
}

/// Emits timings as `debug` tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl PerfHook for TracingHook {
    fn record(&self, operation: &str, elapsed: Duration, items: usize) {
        debug!(
            operation,
            items,
            elapsed_us = elapsed.as_micros() as u64,
            "{} took {:.3} ms",
            operation,
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

/// Run `f`, reporting its duration to `hook` when one is installed.
pub fn timed<T>(hook: Option<&dyn PerfHook>, operation: &str, items: usize, f: impl FnOnce() -> T) -> T {
    match hook {
        Some(hook) => {
            let start = Instant::now();
            let out = f();
            hook.record(operation, start.elapsed(), items);
            out
        }
        None => f(),
    }
}
