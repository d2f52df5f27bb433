//! Asset Matrix: plans creative deliverables as the cross-product of
//! campaign dimensions and exports them as CSV, TSV, JSON or a table.

mod request;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use matrix_core::catalog::{STOCK_DURATIONS, STOCK_FUNNELS, STOCK_LANGUAGES, STOCK_REGIONS};
use matrix_core::{AppConfig, LineOfBusiness, MatrixResult, MatrixType, Platform};
use matrix_export::{export_filename, to_csv, to_json, to_tsv, TableView};
use matrix_generator::{project_assets, MatrixGenerator, MatrixSession};

use crate::request::SelectionArgs;

#[derive(Parser, Debug)]
#[command(name = "asset-matrix")]
#[command(about = "Creative asset matrix generator for campaign deliverables")]
#[command(version)]
struct Cli {
    /// TOML config file (environment variables still apply on top)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Region where every language is eligible (overrides config)
    #[arg(long, global = true, env = "ASSET_MATRIX__LANGUAGES__BILINGUAL_REGION")]
    bilingual_region: Option<String>,

    /// Size always offered on top of the catalog (overrides config)
    #[arg(long, global = true, env = "ASSET_MATRIX__SIZES__FALLBACK_SIZE")]
    fallback_size: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the asset matrix and write it out
    Generate {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the CSV under the export directory with the standard filename
        #[arg(long, default_value_t = false)]
        save: bool,

        /// Export directory used by --save (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Show the projected asset count for a selection
    Count {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List the sizes a matrix type and platform selection offers
    Sizes {
        /// Matrix type: display or social
        #[arg(long, default_value = "display")]
        matrix_type: String,

        /// Platform for social matrices (repeatable)
        #[arg(long = "platform")]
        platforms: Vec<String>,
    },

    /// List lines of business, platforms and stock options
    Catalog,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    /// Tab-separated, for pasting into a spreadsheet
    Tsv,
    Json,
    Table,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "asset_matrix=info,matrix_generator=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(region) = cli.bilingual_region {
        config.languages.bilingual_region = region;
    }
    if let Some(size) = cli.fallback_size {
        config.sizes.fallback_size = size;
    }

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Generate {
            selection,
            format,
            output,
            save,
            output_dir,
        } => {
            if let Some(dir) = output_dir {
                config.export.output_dir = dir.display().to_string();
            }
            cmd_generate(&config, &selection, format, output, save, today)
        }
        Commands::Count { selection } => cmd_count(&config, &selection, today),
        Commands::Sizes {
            matrix_type,
            platforms,
        } => cmd_sizes(&config, &matrix_type, &platforms),
        Commands::Catalog => {
            cmd_catalog();
            Ok(())
        }
    }
}

fn cmd_generate(
    config: &AppConfig,
    selection: &SelectionArgs,
    format: OutputFormat,
    output: Option<PathBuf>,
    save: bool,
    today: NaiveDate,
) -> Result<()> {
    let request = selection.build(&config.sizes.fallback_size, today)?;
    let projection = project_assets(&request);
    info!(
        projected = projection.total,
        breakdown = %projection.breakdown(),
        "generating asset matrix"
    );

    let mut session = MatrixSession::new(MatrixGenerator::from_config(config));
    if let Err(e) = session.generate(&request) {
        if e.is_validation() {
            eprintln!("Please select at least one option in each category ({e})");
        }
        return Err(e.into());
    }

    let Some(result) = session.current() else {
        return Ok(());
    };
    let summary = result.summary();
    info!(
        matrix_type = %summary.matrix_type,
        total_rows = summary.total_rows,
        size_columns = summary.size_columns,
        "matrix ready"
    );

    if save {
        let lob = selection.export_line_of_business(&request.meta)?;
        let path = Path::new(&config.export.output_dir).join(export_filename(
            lob,
            request.matrix_type,
            today,
        ));
        write_output(Some(path.as_path()), &to_csv(result))?;
        println!("Saved {} rows to {}", summary.total_rows, path.display());
        return Ok(());
    }

    let text = render(result, format)?;
    write_output(output.as_deref(), &text)
}

fn render(result: &MatrixResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Csv => to_csv(result),
        OutputFormat::Tsv => to_tsv(result),
        OutputFormat::Json => to_json(result)?,
        OutputFormat::Table => TableView::from_result(result).render(),
    })
}

/// Write to a file, or stdout when no path is given. Failures are reported
/// and returned; the generated matrix is not affected.
fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    let outcome = match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("writing {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("writing to stdout")
        }
    };
    if let Err(e) = &outcome {
        error!(error = %e, "Failed to write matrix output");
        eprintln!("Failed to write output. Please try again.");
    }
    outcome
}

fn cmd_count(config: &AppConfig, selection: &SelectionArgs, today: NaiveDate) -> Result<()> {
    let request = selection.build(&config.sizes.fallback_size, today)?;
    let projection = project_assets(&request);

    println!("Total assets: {}", projection.total);
    println!("{}", projection.breakdown());
    if projection.is_warning() {
        println!("Warning: select at least one option in each category to produce assets");
    }
    Ok(())
}

fn cmd_sizes(config: &AppConfig, matrix_type: &str, platforms: &[String]) -> Result<()> {
    let matrix_type: MatrixType = matrix_type.parse()?;
    let platforms = platforms
        .iter()
        .map(|p| p.parse::<Platform>())
        .collect::<Result<Vec<_>, _>>()?;

    let catalog =
        matrix_generator::resolve_sizes(matrix_type, &platforms, &config.sizes.fallback_size);
    let selected = catalog.default_selection();

    println!("{}", catalog.message());
    for size in &catalog.sizes {
        let mark = if selected.contains(size) { "x" } else { " " };
        println!("[{mark}] {size}");
    }
    Ok(())
}

fn cmd_catalog() {
    println!("Lines of business:");
    for lob in LineOfBusiness::ALL {
        let codes = lob.codes();
        println!("  {:<20} {} / {}", lob.display_name(), codes.client, codes.product);
    }

    println!("\nPlatforms:");
    for platform in Platform::ALL {
        println!("  {:<10} {}", platform.name(), platform.sizes().join(", "));
    }

    println!("\nFunnels:   {}", STOCK_FUNNELS.join(", "));
    println!("Regions:   {}", STOCK_REGIONS.join(", "));
    println!("Languages: {}", STOCK_LANGUAGES.join(", "));
    println!("Durations: {}", STOCK_DURATIONS.join(", "));
}
