//! # weft-bench
//!
//! Benchmark suite for the Weft cloth kernel.
//!
//! Provides procedural scenarios, a runner that records per-tick timing
//! and energy, and CSV export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
