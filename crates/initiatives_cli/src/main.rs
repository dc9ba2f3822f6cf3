//! Initiative catalog command-line checker.
//!
//! # Responsibility
//! - Read a catalog document from a file or stdin.
//! - Print the validation or duplicate report and map it to an exit status.
//!
//! Exit status: `0` clean, `1` issues found, `2` unreadable or malformed input.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use initiatives_core::{
    category_advisories, init_logging, load_records, parse_catalog, render_text,
    scan_duplicates, validate_records, CatalogFormat, CatalogLoadError, CategoryAdvisory,
    CheckConfig, DuplicateReport, InitiativeRecord, ValidationReport,
};
use log::info;
use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Validates the social-impact initiative catalog.
#[derive(Parser, Debug)]
#[command(name = "initiative-catalog", version, about)]
struct Cli {
    /// Log level for file logs (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every initiative for the required fields.
    Validate(ValidateArgs),
    /// Report exact and near-duplicate initiative titles.
    Duplicates(DuplicatesArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Catalog file, or `-` for stdin.
    path: PathBuf,
    /// Catalog format; inferred from the file extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Also flag categories outside the known category list.
    #[arg(long)]
    strict_categories: bool,
}

#[derive(Args, Debug)]
struct DuplicatesArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Title similarity ratio in (0, 1] at which a pair is reported.
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for CatalogFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => CatalogFormat::Json,
            FormatArg::Yaml => CatalogFormat::Yaml,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = CheckConfig::from_env();
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }
    match &cli.command {
        Commands::Validate(args) => {
            config.format = args.source.format.map(Into::into);
            config.strict_categories = args.strict_categories;
        }
        Commands::Duplicates(args) => {
            config.format = args.source.format.map(Into::into);
            if let Some(threshold) = args.threshold {
                config.similarity_threshold = threshold;
            }
        }
    }
    config.validate().context("invalid configuration")?;

    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir).context("failed to initialize logging")?;
        info!(
            "event=cli_start module=cli status=ok core_version={}",
            initiatives_core::core_version()
        );
    }

    match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Duplicates(args) => run_duplicates(&args, &config),
    }
}

fn run_validate(args: &ValidateArgs, config: &CheckConfig) -> Result<ExitCode> {
    let (source, format) = read_source(&args.source.path, config)?;
    let records = parse_catalog(&source, format)
        .with_context(|| format!("cannot parse {}", args.source.path.display()))?;

    let report = validate_records(&records);
    let advisories = if config.strict_categories {
        category_advisories(&records)
    } else {
        Vec::new()
    };

    print_validation(&report, &advisories, args.source.json)?;
    Ok(exit_status(report.is_valid()))
}

fn print_validation(
    report: &ValidationReport,
    advisories: &[CategoryAdvisory],
    json: bool,
) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "valid": report.is_valid(),
            "record_count": report.record_count,
            "diagnostics": report.diagnostics,
            "messages": report.messages(),
            "advisories": advisories,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render_text(report, advisories));
    }
    Ok(())
}

fn run_duplicates(args: &DuplicatesArgs, config: &CheckConfig) -> Result<ExitCode> {
    let (source, format) = read_source(&args.source.path, config)?;
    let candidates = parse_catalog(&source, format)
        .with_context(|| format!("cannot parse {}", args.source.path.display()))?;

    let records = match load_records(&candidates) {
        Ok(records) => records,
        Err(CatalogLoadError::Incomplete(report)) => {
            eprintln!("catalog must validate before scanning for duplicates");
            print_validation(&report, &[], args.source.json)?;
            return Ok(exit_status(false));
        }
        Err(err) => return Err(err).context("cannot load catalog records"),
    };

    let report = scan_duplicates(&records, config.similarity_threshold);
    if args.source.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_duplicates(&report, &records));
    }
    Ok(exit_status(report.is_clean()))
}

fn read_source(path: &Path, config: &CheckConfig) -> Result<(String, CatalogFormat)> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("cannot read catalog from stdin")?;
        return Ok((source, config.resolve_format(None)));
    }
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    Ok((source, config.resolve_format(Some(path))))
}

fn render_duplicates(report: &DuplicateReport, records: &[InitiativeRecord]) -> String {
    let mut out = String::new();
    if report.is_clean() {
        let _ = writeln!(
            out,
            "PASS: all {} initiatives are unique",
            report.record_count
        );
        return out;
    }
    let _ = writeln!(
        out,
        "FOUND: {} potential duplicate issue(s) across {} initiatives",
        report.issue_count(),
        report.record_count
    );
    for group in &report.exact {
        let _ = writeln!(
            out,
            "  exact: '{}' appears {} times at {:?}",
            group.title,
            group.indices.len(),
            group.indices
        );
    }
    for pair in &report.similar {
        let _ = writeln!(
            out,
            "  similar ({:.1}%): {} '{}' / {} '{}'",
            pair.ratio * 100.0,
            pair.left,
            pair.left_title,
            pair.right,
            pair.right_title
        );
    }
    for group in &report.related {
        let _ = writeln!(out, "  related group of {}:", group.indices.len());
        for &index in &group.indices {
            let marker = if index == group.keep { "keep" } else { "drop" };
            let _ = writeln!(out, "    {marker} {index} '{}'", records[index].title);
        }
    }
    if !report.related.is_empty() {
        let _ = writeln!(out, "removal candidates: {}", report.removal_candidates());
    }
    out
}

fn exit_status(clean: bool) -> ExitCode {
    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
