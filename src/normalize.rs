//! Splitting raw text into records, then trimming and empty-line removal

/// Records borrowed from the raw input, plus the pre-filter line count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<'a> {
    pub records: Vec<&'a str>,
    /// Number of lines before trimming or filtering
    pub input_line_count: usize,
}

/// Iterate over the lines of `raw`, split on `\n` with one trailing `\r`
/// removed from each line.
pub fn split_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Split, trim, then drop empties
///
/// Trimming runs first so that whitespace-only lines become eligible for
/// removal.
pub fn normalize(raw: &str, trim_lines: bool, remove_empty_lines: bool) -> Normalized<'_> {
    let mut input_line_count = 0;
    let records = split_lines(raw)
        .inspect(|_| input_line_count += 1)
        .map(|line| if trim_lines { line.trim() } else { line })
        .filter(|line| !(remove_empty_lines && line.is_empty()))
        .collect();

    Normalized {
        records,
        input_line_count,
    }
}
