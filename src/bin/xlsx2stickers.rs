//! CLI binary for xlsx2stickers.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `StickerConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use xlsx2stickers::{convert_to_file, inspect, StickerConfig};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion: one 45×80 mm sticker per row, barcode from the
  # "code" column (or the first column when no "code" header exists)
  xlsx2stickers inventory.xlsx

  # Custom output path
  xlsx2stickers inventory.xlsx -o warehouse-labels.pdf

  # Encode a different column
  xlsx2stickers inventory.xlsx --column sku

  # 60×40 mm stickers
  xlsx2stickers inventory.xlsx --width 60 --height 40

  # Inspect the workbook without composing anything
  xlsx2stickers --inspect-only inventory.xlsx

  # Machine-readable inspection
  xlsx2stickers --inspect-only --json inventory.xlsx

SUPPORTED INPUT FORMATS:
  .xlsx .xlsm .xlsb .xls .ods   (first sheet only; first row is the header)

STICKER LAYOUT (per page, top-left origin):
  border   2 mm inside each page edge
  barcode  Code128, at (5 mm, 10 mm), (width − 10 mm) × 30 mm
  label    10 pt Helvetica, centred, baseline 10 mm above the bottom edge

ENVIRONMENT VARIABLES:
  XLSX2STICKERS_OUTPUT   Default output path
  XLSX2STICKERS_COLUMN   Default barcode column
  RUST_LOG               Tracing filter override (e.g. debug)
"#;

/// Generate printable barcode-sticker PDFs from spreadsheet data.
#[derive(Parser, Debug)]
#[command(
    name = "xlsx2stickers",
    version,
    about = "Generate printable barcode-sticker PDFs from spreadsheet data",
    long_about = "Convert the first sheet of a workbook (.xlsx, .xls, .ods) into a PDF with one \
fixed-size sticker page per data row, each carrying a scannable Code128 barcode and a \
human-readable label.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Spreadsheet file (.xlsx, .xlsm, .xlsb, .xls, .ods).
    input: PathBuf,

    /// Write the PDF to this path.
    #[arg(short, long, env = "XLSX2STICKERS_OUTPUT", default_value = "stickers.pdf")]
    output: PathBuf,

    /// Column to encode. Default: "code" if the sheet has one, else the
    /// first column.
    #[arg(short, long, env = "XLSX2STICKERS_COLUMN")]
    column: Option<String>,

    /// Sticker width in millimetres.
    #[arg(long, env = "XLSX2STICKERS_WIDTH", default_value_t = 45.0)]
    width: f32,

    /// Sticker height in millimetres.
    #[arg(long, env = "XLSX2STICKERS_HEIGHT", default_value_t = 80.0)]
    height: f32,

    /// Print workbook metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Output inspection results as JSON (with --inspect-only).
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "XLSX2STICKERS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "XLSX2STICKERS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "XLSX2STICKERS_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the spinner is active; the
    // summary line at the end carries everything the user needs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
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

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let summary = inspect(&cli.input).context("Failed to inspect workbook")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
            );
        } else {
            println!("File:            {}", cli.input.display());
            println!("Sheet:           {}", summary.sheet);
            println!("Rows:            {}", summary.rows);
            println!("Columns:         {}", summary.columns.join(", "));
            if let Some(ref col) = summary.default_column {
                println!("Barcode column:  {col}");
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = StickerConfig::builder()
        .width_mm(cli.width)
        .height_mm(cli.height);
    if let Some(ref column) = cli.column {
        builder = builder.column(column);
    }
    let config = builder.build().context("Invalid sticker dimensions")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let spinner = if show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.set_message(cli.input.display().to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let result = convert_to_file(&cli.input, &cli.output, &config);

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let stats = result.context("Conversion failed")?;

    if stats.pages == 0 {
        if !cli.quiet {
            eprintln!(
                "{} no data rows in {}; nothing written",
                cyan("⚠"),
                cli.input.display()
            );
        }
        return Ok(());
    }

    if !cli.quiet {
        eprintln!(
            "{}  {} stickers  {}  {}ms  →  {}",
            green("✔"),
            bold(&stats.pages.to_string()),
            dim(&format!("{} bytes", stats.pdf_bytes)),
            stats.duration_ms,
            bold(&cli.output.display().to_string()),
        );
    }

    Ok(())
}
