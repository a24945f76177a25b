//! # NetDb Sentinel Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Synthetic populations shared with the criterion benches
//! └── integration/      # Attack simulations through the public API
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ns-tests
//!
//! # Benchmarks
//! cargo bench -p ns-tests
//! ```

pub mod benchmarks;
pub mod integration;
