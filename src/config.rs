//! Configuration management for sort operations

use crate::error::{SortError, SortResult};
use std::fmt;
use std::str::FromStr;

/// How a line is split into columns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Sniff the first record: tab, then comma, then pipe
    #[default]
    Auto,
    Comma,
    Tab,
    Pipe,
    /// A literal separator; an empty string falls back to comma
    Custom(String),
}

/// Sort mode enumeration
///
/// Each variant carries only the settings that mean something for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortMode {
    /// Whole-line string ordering, optionally natural ("item2" < "item10")
    Alphabetical { natural: bool },
    /// Whole line parsed as a float, string ordering when either side fails
    Numeric,
    /// Shorter lines first, content breaks ties
    ByLength,
    /// Order by a single delimited column
    ByColumn {
        /// 1-based column index, clamped to at least 1
        column: usize,
        /// Parse the column as a float before falling back to strings
        numeric: bool,
        natural: bool,
        delimiter: Delimiter,
    },
}

/// Sort order enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Main configuration structure for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// Primary sort mode
    pub mode: SortMode,
    /// Ascending or descending
    pub order: SortOrder,
    /// Affects both duplicate identity and string comparison
    pub case_sensitive: bool,
    /// Trim leading/trailing whitespace from every line
    pub trim_lines: bool,
    /// Drop lines that are empty after trimming
    pub remove_empty_lines: bool,
    /// Keep only the first occurrence of each line
    pub remove_duplicates: bool,
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::Alphabetical { natural: false }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            mode: SortMode::default(),
            order: SortOrder::Ascending,
            case_sensitive: false,
            trim_lines: true,
            remove_empty_lines: true,
            remove_duplicates: false,
        }
    }
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sort mode
    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = mode.normalized();
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_trim_lines(mut self, trim_lines: bool) -> Self {
        self.trim_lines = trim_lines;
        self
    }

    pub fn with_remove_empty_lines(mut self, remove_empty_lines: bool) -> Self {
        self.remove_empty_lines = remove_empty_lines;
        self
    }

    pub fn with_remove_duplicates(mut self, remove_duplicates: bool) -> Self {
        self.remove_duplicates = remove_duplicates;
        self
    }

    /// Whether the order is reversed
    pub fn is_descending(&self) -> bool {
        self.order == SortOrder::Descending
    }

    /// Whether natural comparison applies to the active mode
    pub fn natural_sort(&self) -> bool {
        match self.mode {
            SortMode::Alphabetical { natural } => natural,
            SortMode::ByColumn { natural, .. } => natural,
            SortMode::Numeric | SortMode::ByLength => false,
        }
    }
}

impl SortMode {
    /// Column-sort mode with defaults for the other column settings
    pub fn column(column: usize) -> Self {
        SortMode::ByColumn {
            column: column.max(1),
            numeric: false,
            natural: false,
            delimiter: Delimiter::Auto,
        }
    }

    /// Clamp out-of-range settings to their nearest valid value
    pub fn normalized(self) -> Self {
        match self {
            SortMode::ByColumn {
                column,
                numeric,
                natural,
                delimiter,
            } => SortMode::ByColumn {
                column: column.max(1),
                numeric,
                natural,
                delimiter,
            },
            other => other,
        }
    }
}

impl FromStr for SortMode {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alphabetical" | "alpha" | "text" | "default" => {
                Ok(SortMode::Alphabetical { natural: false })
            }
            "natural" => Ok(SortMode::Alphabetical { natural: true }),
            "numeric" | "n" => Ok(SortMode::Numeric),
            "length" | "len" | "l" => Ok(SortMode::ByLength),
            "column" | "col" | "k" => Ok(SortMode::column(1)),
            _ => Err(SortError::parse_error(&format!("unknown sort mode: {s}"))),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::Alphabetical { natural: false } => "alphabetical",
            SortMode::Alphabetical { natural: true } => "natural",
            SortMode::Numeric => "numeric",
            SortMode::ByLength => "length",
            SortMode::ByColumn { .. } => "column",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SortOrder {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(SortError::parse_error(&format!("unknown sort order: {s}"))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "asc"),
            SortOrder::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for Delimiter {
    type Err = SortError;

    /// Named delimiters are matched case-insensitively; anything else is a
    /// literal custom separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "auto" => Delimiter::Auto,
            "comma" | "," => Delimiter::Comma,
            "tab" | "\t" | "\\t" => Delimiter::Tab,
            "pipe" | "|" => Delimiter::Pipe,
            _ => Delimiter::Custom(s.to_string()),
        })
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Auto => write!(f, "auto"),
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
            Delimiter::Pipe => write!(f, "pipe"),
            Delimiter::Custom(sep) => write!(f, "custom({sep:?})"),
        }
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    /// Set sort mode
    pub fn mode(mut self, mode: SortMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Sort descending
    pub fn reverse(mut self) -> Self {
        self.config.order = SortOrder::Descending;
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.config.order = order;
        self
    }

    pub fn case_sensitive(mut self) -> Self {
        self.config.case_sensitive = true;
        self
    }

    /// Keep surrounding whitespace on every line
    pub fn keep_whitespace(mut self) -> Self {
        self.config.trim_lines = false;
        self
    }

    pub fn keep_empty_lines(mut self) -> Self {
        self.config.remove_empty_lines = false;
        self
    }

    /// Enable duplicate removal
    pub fn unique(mut self) -> Self {
        self.config.remove_duplicates = true;
        self
    }

    /// Build the final configuration
    ///
    /// Never fails: out-of-range settings are clamped.
    pub fn build(self) -> SortConfig {
        let mut config = self.config;
        config.mode = config.mode.normalized();
        config
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a 1-based column argument, clamping zero to the first column
pub fn parse_column(spec: &str) -> SortResult<usize> {
    spec.trim()
        .parse::<usize>()
        .map(|column| column.max(1))
        .map_err(|_| SortError::invalid_column(spec))
}

/// Preset configurations for common use cases
pub mod presets {
    use super::*;

    /// Natural alphabetical ordering
    pub fn natural() -> SortConfig {
        SortConfig::new().with_mode(SortMode::Alphabetical { natural: true })
    }

    /// Configuration for numeric sorting
    pub fn numeric() -> SortConfig {
        SortConfig::new().with_mode(SortMode::Numeric)
    }

    pub fn by_length() -> SortConfig {
        SortConfig::new().with_mode(SortMode::ByLength)
    }

    /// Numeric ordering of one comma-separated column
    pub fn csv_column(column: usize) -> SortConfig {
        SortConfig::new().with_mode(SortMode::ByColumn {
            column,
            numeric: true,
            natural: false,
            delimiter: Delimiter::Comma,
        })
    }

    /// Configuration for sorting with unique output
    pub fn unique() -> SortConfig {
        SortConfig::new().with_remove_duplicates(true)
    }

    pub fn descending() -> SortConfig {
        SortConfig::new().with_order(SortOrder::Descending)
    }
}
