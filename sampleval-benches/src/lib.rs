//! Benchmark support crate for sampleval.
//!
//! Provides seeded graph and series fixtures plus parameter labels used by
//! the Criterion benchmarks for samplers, metric analyzers and comparison
//! statistics.

pub mod error;
pub mod fixtures;
pub mod params;
