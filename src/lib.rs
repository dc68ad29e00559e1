//! Line-oriented text sorting in Rust
//!
//! This crate takes a block of text, splits it into lines, optionally trims,
//! filters and deduplicates them, then orders them alphabetically, naturally
//! ("item2" before "item10"), numerically, by length or by a delimited
//! column. The whole pipeline is a pure function from text and configuration
//! to sorted text and statistics.
//!
//! ```
//! use linesort::config::presets;
//!
//! let outcome = linesort::run("item2\nitem10\nitem1", &presets::natural());
//! assert_eq!(outcome.output, "item1\nitem2\nitem10");
//! assert_eq!(outcome.stats.input_line_count, 3);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod config;
pub mod error;

// Pipeline stages
pub mod dedup;
pub mod delimiter;
pub mod key;
pub mod locale;
pub mod natural;
pub mod normalize;
pub mod ordering;
pub mod pipeline;

// Re-export commonly used types
pub use config::{Delimiter, SortConfig, SortConfigBuilder, SortMode, SortOrder};
pub use error::{SortError, SortResult};
pub use pipeline::{check, run, SortOutcome, SortStats};

/// Exit codes matching GNU sort
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;
