//! linesort command line front end
//!
//! Reads lines from files or stdin, runs them through the sort pipeline once
//! and writes the result to stdout or a file.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use linesort::{
    config::{parse_column, Delimiter, SortConfig, SortConfigBuilder, SortMode},
    error::{SortContext, SortError, SortResult},
    pipeline, EXIT_SUCCESS,
};

/// Upper bound for --parallel
const MAX_THREADS: usize = 1024;

fn main() {
    match run() {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("linesort: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn run() -> SortResult<i32> {
    let matches = build_cli().get_matches();
    setup_tracing(matches.get_count("verbose"));
    execute(&matches)
}

fn build_cli() -> Command {
    Command::new("linesort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("linesort [OPTION]... [FILE]...")
        .about("Sort, filter and deduplicate lines of text")
        .long_about("Sort lines of text alphabetically, naturally, numerically, by length or by a delimited column.\n\nLines are trimmed and empty lines dropped by default; duplicates can be removed before ordering.")

        // Input files
        .arg(Arg::new("files")
            .help("Input files to sort (use '-' or omit for stdin)")
            .num_args(0..)
            .value_name("FILE"))

        // Sort modes
        .arg(Arg::new("mode")
            .long("mode")
            .help("Sort according to MODE")
            .long_help("Sort according to MODE: alphabetical, natural, numeric, length, column")
            .value_name("MODE")
            .value_parser(["alphabetical", "natural", "numeric", "length", "column"]))
        .arg(Arg::new("numeric-sort")
            .short('n')
            .long("numeric-sort")
            .help("Compare lines (or the --column key) as floating-point numbers")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("length-sort")
            .short('l')
            .long("length-sort")
            .help("Shorter lines first, content breaks ties")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("natural")
            .short('N')
            .long("natural")
            .help("Compare embedded numbers by value (item2 before item10)")
            .action(ArgAction::SetTrue))

        // Column options
        .arg(Arg::new("column")
            .short('k')
            .long("column")
            .help("Sort by the 1-based column N")
            .value_name("N"))
        .arg(Arg::new("column-numeric")
            .long("column-numeric")
            .help("Compare the column as a number when both sides parse")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("delimiter")
            .short('t')
            .long("delimiter")
            .help("Column delimiter: auto, comma, tab, pipe or a literal string")
            .value_name("SEP")
            .default_value("auto"))

        // Sort modifiers
        .arg(Arg::new("reverse")
            .short('r')
            .long("reverse")
            .help("Sort in descending order")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("case-sensitive")
            .short('s')
            .long("case-sensitive")
            .help("Distinguish case when comparing and deduplicating")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("unique")
            .short('u')
            .long("unique")
            .help("Keep only the first occurrence of each line")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("no-trim")
            .long("no-trim")
            .help("Keep leading and trailing whitespace")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("keep-empty")
            .long("keep-empty")
            .help("Keep empty lines")
            .action(ArgAction::SetTrue))

        // Operation modes
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; do not sort")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))
        .arg(Arg::new("stats")
            .long("stats")
            .help("Print line statistics to standard error")
            .action(ArgAction::SetTrue))

        // Performance options
        .arg(Arg::new("parallel")
            .long("parallel")
            .help("Use N threads for large inputs")
            .value_name("N"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Increase log verbosity (-v debug, -vv trace)")
            .action(ArgAction::Count))
}

fn setup_tracing(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "linesort=warn",
        1 => "linesort=debug",
        _ => "linesort=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Ignore a second initialization attempt
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}

/// Run one sort or check according to parsed arguments
fn execute(matches: &ArgMatches) -> SortResult<i32> {
    if let Some(parallel) = matches.get_one::<String>("parallel") {
        configure_thread_pool(parallel)?;
    }

    let config = parse_config_from_matches(matches)?;
    debug!(?config, "configuration parsed");

    let input_files: Vec<String> = matches
        .get_many::<String>("files")
        .unwrap_or_default()
        .cloned()
        .collect();
    let input = read_input(&input_files)?;

    if matches.get_flag("check") {
        return match pipeline::check(&input, &config) {
            Ok(()) => Ok(EXIT_SUCCESS),
            Err(line) => Err(SortError::not_sorted(&source_name(&input_files), line)),
        };
    }

    let outcome = pipeline::run(&input, &config);

    if matches.get_flag("stats") {
        eprintln!("input lines: {}", outcome.stats.input_line_count);
        eprintln!("output lines: {}", outcome.stats.output_line_count);
        eprintln!("unique lines: {}", outcome.stats.unique_count);
    }

    write_output(matches.get_one::<String>("output"), &outcome.output)?;
    Ok(EXIT_SUCCESS)
}

fn configure_thread_pool(spec: &str) -> SortResult<()> {
    let threads: usize = spec
        .parse()
        .map_err(|_| SortError::parse_error(&format!("invalid thread count: {spec}")))?;

    if threads == 0 {
        return Err(SortError::thread_pool_error("thread count must be positive"));
    }
    if threads > MAX_THREADS {
        return Err(SortError::thread_pool_error(&format!(
            "too many threads (maximum {MAX_THREADS})"
        )));
    }
    if threads > num_cpus::get() {
        warn!(threads, cpus = num_cpus::get(), "more threads than CPUs requested");
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| SortError::thread_pool_error(&e.to_string()))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &ArgMatches) -> SortResult<SortConfig> {
    let natural = matches.get_flag("natural");
    let numeric = matches.get_flag("numeric-sort");
    let length = matches.get_flag("length-sort");
    let column = matches
        .get_one::<String>("column")
        .map(|spec| parse_column(spec))
        .transpose()?;

    if numeric && length {
        return Err(SortError::conflicting_options(
            "cannot combine --numeric-sort and --length-sort",
        ));
    }
    if length && column.is_some() {
        return Err(SortError::conflicting_options(
            "cannot combine --length-sort and --column",
        ));
    }

    let mode_word = matches
        .get_one::<String>("mode")
        .map(|word| word.parse::<SortMode>())
        .transpose()?;
    let column_mode =
        column.is_some() || matches!(mode_word, Some(SortMode::ByColumn { .. }));
    if matches.get_flag("column-numeric") && !column_mode {
        return Err(SortError::conflicting_options(
            "--column-numeric requires --column or --mode column",
        ));
    }

    let delimiter: Delimiter = matches
        .get_one::<String>("delimiter")
        .map(|sep| sep.parse::<Delimiter>())
        .transpose()?
        .unwrap_or_default();

    let mode = match (column, mode_word) {
        (Some(column), _) => SortMode::ByColumn {
            column,
            numeric: numeric || matches.get_flag("column-numeric"),
            natural,
            delimiter,
        },
        (None, _) if numeric => SortMode::Numeric,
        (None, _) if length => SortMode::ByLength,
        (None, Some(word_mode)) => match word_mode {
            SortMode::ByColumn { .. } => SortMode::ByColumn {
                column: 1,
                numeric: matches.get_flag("column-numeric"),
                natural,
                delimiter,
            },
            SortMode::Alphabetical { natural: from_word } => SortMode::Alphabetical {
                natural: natural || from_word,
            },
            other => other,
        },
        (None, None) => SortMode::Alphabetical { natural },
    };

    let mut builder = SortConfigBuilder::new().mode(mode);

    if matches.get_flag("reverse") {
        builder = builder.reverse();
    }
    if matches.get_flag("case-sensitive") {
        builder = builder.case_sensitive();
    }
    if matches.get_flag("unique") {
        builder = builder.unique();
    }
    if matches.get_flag("no-trim") {
        builder = builder.keep_whitespace();
    }
    if matches.get_flag("keep-empty") {
        builder = builder.keep_empty_lines();
    }

    Ok(builder.build())
}

/// Name reported for the input in check mode: the files, or `-` for stdin
fn source_name(files: &[String]) -> String {
    if files.is_empty() {
        "-".to_string()
    } else {
        files.join(",")
    }
}

/// Read and concatenate the inputs, one trailing newline dropped per source
fn read_input(files: &[String]) -> SortResult<String> {
    if files.is_empty() {
        return read_source("-");
    }

    let mut parts = Vec::with_capacity(files.len());
    for file in files {
        parts.push(read_source(file)?);
    }
    Ok(parts.join("\n"))
}

fn read_source(name: &str) -> SortResult<String> {
    let mut bytes = Vec::new();
    if name == "-" {
        io::stdin().lock().read_to_end(&mut bytes)?;
    } else {
        File::open(name)
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .with_file_context(name)?;
    }

    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn write_output(path: Option<&String>, output: &str) -> SortResult<()> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(File::create(path).with_file_context(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(sink);

    if !output.is_empty() {
        writer.write_all(output.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
