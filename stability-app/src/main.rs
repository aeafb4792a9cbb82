use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use stability_core::{
    collector::TabKind,
    export::{self, ExportFormat},
    session::SampleSession,
};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod workflow;

/// Generate stability study sample lists for LabKey LIMS upload.
#[derive(Debug, Parser)]
#[command(name = "stability-app", version, about)]
struct Cli {
    /// Study request YAML file
    request: PathBuf,

    /// Directory the sample list is written to
    #[arg(long, default_value = "./data/runs")]
    output_dir: PathBuf,

    /// Output file format
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    format: FormatArg,

    /// Only generate these tabs (repeatable); all tabs in the request by default
    #[arg(long = "tab", value_enum)]
    tabs: Vec<TabArg>,

    /// Generate and summarize without writing a file
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TabArg {
    Dp,
    Ds,
    FreezeThaw,
    Transportation,
}

impl From<TabArg> for TabKind {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::Dp => TabKind::DpStability,
            TabArg::Ds => TabKind::DsStability,
            TabArg::FreezeThaw => TabKind::FreezeThaw,
            TabArg::Transportation => TabKind::Transportation,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("--- Stability Sample Generator ---");

    let request = config::load_request(&cli.request)?;

    let selected: Vec<TabKind> = if cli.tabs.is_empty() {
        TabKind::ALL.to_vec()
    } else {
        cli.tabs.iter().map(|t| TabKind::from(*t)).collect()
    };

    let mut session = SampleSession::new();
    let outcomes = workflow::run_tabs(&request, &selected, &mut session);
    println!("{}", workflow::summary_report(&request, &outcomes, &session));

    if session.is_empty() {
        info!("No samples generated; nothing to export");
        return Ok(());
    }
    if cli.dry_run {
        info!("Dry run; skipping export");
        return Ok(());
    }

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", cli.output_dir))?;

    let format = ExportFormat::from(cli.format);
    let file_name = export::export_file_name(
        &request.study.experiment_id,
        chrono::Local::now().naive_local(),
        format,
    );
    let path = cli.output_dir.join(file_name);
    export::write_samples(&path, session.samples(), format)
        .with_context(|| format!("Failed to export samples to {:?}", path))?;

    println!("Sample list written to '{}'", path.display());
    Ok(())
}
