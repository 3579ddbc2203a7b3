//! Fuzzing library for scholar-archive.
//!
//! Targets feed arbitrary bytes through payload normalization and article
//! mapping; neither step may panic on any JSON input.
//!
//! # Usage
//!
//! ```bash
//! cd crates/scholar-fuzz
//! cargo +nightly fuzz run fuzz_normalize -- -max_total_time=60
//! ```

pub use scholar_archive::{mapper, models, normalize};
