//! Command-line interface for `jdiff`.
//!
//! Loads two JSON documents, diffs them with `jdiff-core` and writes the
//! rendered diff to STDOUT or to a file. Exit codes follow `diff(1)`:
//! 0 when the documents are equal, 1 when they differ, 2 on errors.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use jdiff_core::{DiffOptions, RenderConfig, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JDIFF_LOG";

const EXIT_SAME: i32 = 0;
const EXIT_DIFFERENT: i32 = 1;
const EXIT_TROUBLE: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "jdiff",
    version,
    about = "Finds and prints the difference between two JSON files, ignoring the order of object keys and, by default, of array items.",
    override_usage = "jdiff [OPTION]... FILE1 [FILE2]",
    after_help = "When FILE2 is omitted the second document is read from STDIN.\n\nExamples:\n  jdiff a.json b.json\n  cat b.json | jdiff a.json\n  jdiff -o a.json b.json"
)]
struct Cli {
    /// Compare arrays position by position instead of as unordered collections.
    #[arg(short = 'o', long = "keep-arrays-order", alias = "keep_arrays_order", action = ArgAction::SetTrue)]
    keep_arrays_order: bool,

    /// Render diff output using ANSI colors.
    #[arg(long = "color", action = ArgAction::SetTrue)]
    color: bool,

    /// Write output to FILE instead of STDOUT.
    #[arg(long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Positional inputs (FILE1 \[FILE2]).
    #[arg(required = true, num_args = 1..=2, value_name = "FILE")]
    inputs: Vec<OsString>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = writeln!(io::stderr(), "jdiff: {err:#}");
            std::process::exit(EXIT_TROUBLE);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(cli: &Cli) -> Result<i32> {
    let (first, second) = input_sources(&cli.inputs)?;

    let lhs_text = read_input(&first)?;
    let rhs_text = read_input(&second)?;
    let lhs = parse_value(&lhs_text).context("failed to parse first input")?;
    let rhs = parse_value(&rhs_text).context("failed to parse second input")?;
    debug!(first = %first, second = %second, "inputs loaded");

    let options = build_options(cli);
    let diff = lhs.diff(&rhs, &options);
    let rendered = diff.render(&RenderConfig::default().with_color(cli.color));

    write_output(cli.output.as_ref(), &rendered)?;

    let changed = diff.has_changes();
    info!(changed, "diff written");
    Ok(if changed { EXIT_DIFFERENT } else { EXIT_SAME })
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("<stdin>"),
        }
    }
}

fn input_sources(inputs: &[OsString]) -> Result<(InputSource, InputSource)> {
    match inputs {
        [first] => Ok((InputSource::File(path_from(first)?), InputSource::Stdin)),
        [first, second] => {
            Ok((InputSource::File(path_from(first)?), InputSource::File(path_from(second)?)))
        }
        _ => bail!("expected one or two input files, got {}", inputs.len()),
    }
}

fn path_from(input: &OsString) -> Result<PathBuf> {
    let path = PathBuf::from(input);
    if path.as_os_str().is_empty() {
        bail!("expected file path; got empty string");
    }
    Ok(path)
}

fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read STDIN")?;
            Ok(buffer)
        }
    }
}

fn parse_value(input: &str) -> Result<Value> {
    Ok(Value::from_json_str(input)?)
}

fn build_options(cli: &Cli) -> DiffOptions {
    let options = DiffOptions::default();
    if cli.keep_arrays_order {
        options.keep_array_order()
    } else {
        options
    }
}

fn write_output(target: Option<&PathBuf>, rendered: &str) -> Result<()> {
    match target {
        Some(path) => fs::write(path, rendered.as_bytes())
            .with_context(|| format!("failed to write output to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes()).context("failed to write to STDOUT")?;
            stdout.flush().context("failed to write to STDOUT")
        }
    }
}
