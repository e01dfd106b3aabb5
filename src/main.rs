mod archive;
mod classify;
mod context;
mod index;
mod locator;
mod merge;
mod normalize;
mod pipeline;
mod quality;
mod quran;
mod reflow;
mod report;
mod scanner;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ayah_types::{Report, VerseRecord};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use archive::Archive;
use index::QuranIndex;

const DEFAULT_INPUT: &str = "result.json";
const DEFAULT_DATASET: &str = "ayahs_formatted.json";
const DEFAULT_REPORT: &str = "scripts/sync_report.json";

#[derive(Parser)]
#[command(
    name = "ayah_extract",
    about = "Rebuild a per-ayah Quran dataset from a Telegram channel export"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the export → ayah rows JSON + sync report
    Extract {
        /// Export JSON, or the export directory containing result.json
        #[arg(long, default_value = DEFAULT_INPUT)]
        input: PathBuf,
        /// Where to write the ayah rows
        #[arg(long, default_value = DEFAULT_DATASET)]
        output: PathBuf,
        /// Where to write the sync report
        #[arg(long, default_value = DEFAULT_REPORT)]
        report: PathBuf,
    },
    /// Check a dataset for invalid rows, gaps and duplicate keys
    Validate {
        #[arg(long, default_value = DEFAULT_DATASET)]
        dataset: PathBuf,
    },
    /// Count rows whose translation is still sitting in the commentary
    Audit {
        #[arg(long, default_value = DEFAULT_DATASET)]
        dataset: PathBuf,
    },
    /// Search surahs, or the ayahs of one surah
    Query {
        #[arg(long, default_value = DEFAULT_DATASET)]
        dataset: PathBuf,
        /// Restrict the search to this surah's ayahs
        #[arg(long)]
        surah: Option<u16>,
        /// With --surah, print this one ayah
        #[arg(long, requires = "surah")]
        ayah: Option<u16>,
        /// Search text, e.g. "baqarah", "patience"
        query: Vec<String>,
    },
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Extract {
            input,
            output,
            report,
        }) => run_extract(&input, &output, &report),
        Some(Command::Validate { dataset }) => run_validate(&dataset),
        Some(Command::Audit { dataset }) => run_audit(&dataset),
        Some(Command::Query {
            dataset,
            surah,
            ayah,
            query,
        }) => run_query(&dataset, surah, ayah, &query),
        // Default: extract with the stock paths
        None => run_extract(
            Path::new(DEFAULT_INPUT),
            Path::new(DEFAULT_DATASET),
            Path::new(DEFAULT_REPORT),
        ),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  FILE HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn read_text(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    // Some exporters prepend a UTF-8 BOM.
    Ok(match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

fn read_dataset(path: &Path) -> Result<Vec<VerseRecord>> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| {
        format!(
            "cannot parse {} as ayah rows (run `extract` first?)",
            path.display()
        )
    })
}

/// Pretty JSON with a trailing newline; parent directories are created.
fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let mut json = serde_json::to_string_pretty(data)
        .with_context(|| format!("cannot serialize {}", path.display()))?;
    json.push('\n');
    std::fs::write(path, &json).with_context(|| format!("cannot write {}", path.display()))?;
    info!(path = %path.display(), bytes = json.len(), "wrote file");
    Ok(())
}

fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("cannot serialize result")?;
    println!("{json}");
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: export → ayah rows + sync report
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(input: &Path, output: &Path, report_path: &Path) -> Result<()> {
    let export = scanner::resolve_input(input)?;
    info!(input = %export.display(), "reading export");

    let text = read_text(&export)?;
    let archive = Archive::from_json_str(&text)
        .with_context(|| format!("cannot load export {}", export.display()))?;
    info!(posts = archive.posts.len(), "loaded export");

    let extraction = pipeline::extract(&archive);

    write_json(output, &extraction.rows)?;
    write_json(report_path, &extraction.report)?;

    print_extract_summary(&extraction.report, output, report_path);
    Ok(())
}

fn print_extract_summary(report: &Report, output: &Path, report_path: &Path) {
    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  EXTRACTION SUMMARY");
    eprintln!("══════════════════════════════════════════");
    eprintln!("Wrote {} rows to {}", report.rows_written, output.display());
    eprintln!("Validation report written to {}", report_path.display());
    eprintln!(
        "Messages scanned: {} ({} with ayah blocks)",
        report.messages_scanned, report.messages_with_ayah_blocks
    );

    if report.surah_summary.is_empty() {
        eprintln!("\nNo ayahs found.");
        return;
    }
    eprintln!("\nBy surah:");
    for (surah, s) in &report.surah_summary {
        eprintln!("  surah {surah}: {} (missing {})", s.count, s.missing_count);
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  VALIDATE / AUDIT MODES: diagnostics over a written dataset
// ═══════════════════════════════════════════════════════════════════════

fn run_validate(dataset: &Path) -> Result<()> {
    let rows = read_dataset(dataset)?;
    let validation = quality::validate_rows(&rows);

    print_json(&validation)?;
    eprintln!("{}", validation.summarize());

    if !validation.is_clean() {
        anyhow::bail!(
            "{} failed validation: {} invalid row(s), {} duplicate key(s)",
            dataset.display(),
            validation.invalid_required,
            validation.duplicate_keys
        );
    }
    Ok(())
}

fn run_audit(dataset: &Path) -> Result<()> {
    let rows = read_dataset(dataset)?;
    let audit = quality::audit_translations(&rows);

    eprintln!(
        "rows {} empty {} recoverable {}",
        audit.rows, audit.empty_translation, audit.recoverable
    );
    eprintln!(
        "visible translation {} missing {}",
        audit.visible_translation,
        audit.rows - audit.visible_translation
    );
    for s in &audit.samples {
        let pid = s
            .source_post_id
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        eprintln!("  {}:{} pid:{pid}", s.surah_number, s.ayah_number);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  QUERY MODE: search the dataset index
// ═══════════════════════════════════════════════════════════════════════

fn run_query(
    dataset: &Path,
    surah: Option<u16>,
    ayah: Option<u16>,
    query_args: &[String],
) -> Result<()> {
    let rows = read_dataset(dataset)?;
    let quran_index = QuranIndex::build(&rows);
    let query = query_args.join(" ");

    match (surah, ayah) {
        (Some(n), Some(a)) => match quran_index.lookup(n, a) {
            Some(row) => print_json(row),
            None => anyhow::bail!("{n}:{a} is not in {}", dataset.display()),
        },
        (None, _) => {
            let hits = quran_index.filter_surahs(&query);
            eprintln!("{} surah(s) match {query:?}", hits.len());
            print_json(&hits)
        }
        (Some(n), None) => {
            let hits = index::filter_ayahs(quran_index.ayahs(n), &query);
            eprintln!("{} ayah(s) of surah {n} match {query:?}", hits.len());
            print_json(&hits)
        }
    }
}
