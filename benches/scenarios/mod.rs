//! Benchmarks for complete engines and chains.

mod chain;
mod engines;

pub use chain::bench_chain;
pub use engines::bench_engines;
