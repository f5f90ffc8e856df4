//! CLI binary for wg2pinyin.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wg2pinyin::{
    ConversionConfig, ConversionProgressCallback, Converter, ProgressCallback, Wg2PyError,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Progress bar over the document's text runs.
struct CliProgressCallback {
    bar: ProgressBar,
    changed: AtomicUsize,
}

impl CliProgressCallback {
    /// Spinner until `on_conversion_start` reports the run count.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening document…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            changed: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>5}/{len} runs  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
        self.bar.set_message("");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_nodes: usize) {
        self.activate_bar(total_nodes);
    }

    fn on_node_converted(&self, _index: usize, _total: usize, changed: bool) {
        if changed {
            let n = self.changed.fetch_add(1, Ordering::SeqCst) + 1;
            self.bar.set_message(format!("{n} changed"));
        }
        self.bar.inc(1);
    }

    // The summary line is printed by `run` once the file is saved.
    fn on_conversion_complete(&self, _total_nodes: usize, _changed_nodes: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert next to the source (writes thesis_pinyin.docx)
  wg2pinyin thesis.docx

  # Explicit destination
  wg2pinyin thesis.docx converted.docx
  wg2pinyin thesis.docx -o converted.docx

  # Also convert "to", "lung", "I", ... when lowercase or single-letter
  wg2pinyin -a romanised-only.docx

  # Include page headers and footers
  wg2pinyin --headers-footers thesis.docx

  # Convert a string without a document
  wg2pinyin --text "Mao Tse-tung left Peking"

  # Machine-readable result
  wg2pinyin --json thesis.docx > result.json

EXIT CODES:
  0  success
  1  unexpected failure or bad arguments
  2  invalid configuration or lexicon
  3  source is missing or not a readable .docx
  4  destination could not be written
"#;

#[derive(Parser, Debug)]
#[command(
    name = "wg2pinyin",
    version,
    about = "Convert Wade-Giles romanisation to Pinyin in .docx documents",
    long_about = "Convert Wade-Giles romanised Chinese (Mao Tse-tung, Ch'ing, Peking) to Hanyu \
Pinyin (Mao Zedong, Qing, Beijing) inside Word documents. Only run text changes; formatting, \
images and every other part of the file are preserved. The source file is never modified.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Source .docx document.
    #[arg(required_unless_present = "text")]
    input: Option<PathBuf>,

    /// Destination (default: <input>_pinyin.docx next to the source).
    #[arg(conflicts_with = "output_file")]
    output: Option<PathBuf>,

    /// Destination, as a flag.
    #[arg(short = 'o', long = "output-file", env = "WG2PINYIN_OUTPUT")]
    output_file: Option<PathBuf>,

    /// Convert common English words too ("to", "no", "lung", "a", "I", ...).
    #[arg(short, long, env = "WG2PINYIN_AGGRESSIVE")]
    aggressive: bool,

    /// Also convert page headers and footers.
    #[arg(long, env = "WG2PINYIN_HEADERS_FOOTERS")]
    headers_footers: bool,

    /// Suffix for the derived output name.
    #[arg(long, env = "WG2PINYIN_SUFFIX", default_value = wg2pinyin::config::DEFAULT_OUTPUT_SUFFIX)]
    suffix: String,

    /// Maximum text-box nesting depth.
    #[arg(long, env = "WG2PINYIN_MAX_DEPTH",
          default_value_t = wg2pinyin::config::DEFAULT_MAX_CONTAINER_DEPTH)]
    max_depth: usize,

    /// Convert this string and print the result instead of a document.
    #[arg(long, conflicts_with_all = ["input", "output", "output_file"])]
    text: Option<String>,

    /// Print the conversion result as JSON on stdout.
    #[arg(long, env = "WG2PINYIN_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "WG2PINYIN_NO_PROGRESS")]
    no_progress: bool,

    #[arg(short, long, env = "WG2PINYIN_VERBOSE")]
    verbose: bool,

    #[arg(short, long, env = "WG2PINYIN_QUIET")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", red("error:"));
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit code for the library error behind `e`, or 1.
fn exit_code(e: &anyhow::Error) -> u8 {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<Wg2PyError>())
        .map_or(1, |err| err.kind().exit_code())
}

fn run(cli: Cli) -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────
    // INFO logs would fight with the progress bar; it carries the feedback.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && cli.text.is_none();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;
    let converter = Converter::new(config).context("Failed to load conversion tables")?;

    // ── Text mode ────────────────────────────────────────────────────────
    if let Some(ref text) = cli.text {
        println!("{}", converter.convert_text(text));
        return Ok(());
    }

    // ── Document mode ────────────────────────────────────────────────────
    let input = cli
        .input
        .as_deref()
        .context("No input document given")?;
    let dest = cli.output.as_deref().or(cli.output_file.as_deref());

    let output = converter
        .convert_document(input, dest)
        .with_context(|| format!("Conversion of {} failed", input.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        let stats = &output.stats;
        eprintln!(
            "{}  {}/{} runs changed  {}ms  →  {}",
            green("✔"),
            stats.changed_nodes,
            stats.total_nodes(),
            stats.total_duration_ms,
            bold(&output.output_path.display().to_string()),
        );
        eprintln!(
            "   {}",
            dim(&format!(
                "{} body, {} in text boxes, {} in headers/footers",
                stats.body_nodes, stats.nested_nodes, stats.header_footer_nodes
            ))
        );
    }

    Ok(())
}

fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .aggressive(cli.aggressive)
        .output_suffix(cli.suffix.as_str())
        .include_headers_footers(cli.headers_footers)
        .max_container_depth(cli.max_depth);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
