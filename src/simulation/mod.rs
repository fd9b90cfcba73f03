//! Random traffic generation for benchmarks and demos.

pub mod traffic;
