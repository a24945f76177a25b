//! # Benchmark Fixtures
//!
//! Synthetic floodfill populations. Shared by the criterion benches and the
//! integration flows so both exercise the same shape of data.

pub mod populations;
