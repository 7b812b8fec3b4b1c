//! Property-based tests for Word Ocean
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Test Modules
//!
//! - `edit_distance_props`: Tests for the bounded edit distance
//!   - Identical strings have distance zero
//!   - Distance is symmetric
//!   - Length gaps above two always yield the sentinel
//!   - Otherwise distance never exceeds the longer length
//!
//! - `association_props`: Tests for merged association lists
//!   - No word appears twice
//!   - The selected word never appears
//!   - Spelling neighbours respect the configured limit
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod association_props;
mod edit_distance_props;
