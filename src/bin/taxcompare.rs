//! taxcompare - classifier agreement CLI
//!
//! Command-line interface for comparing harmonized taxonomic profiles.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use taxcompare::agreement::analyze;
use taxcompare::compare::build;
use taxcompare::config::AnalysisConfig;
use taxcompare::data::ProfileTable;
use taxcompare::error::{CompareError, Result};
use taxcompare::rank::rank;
use taxcompare::report::AnalysisReport;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Location of the standardised profile inside a taxprofiler results directory.
const TAXPASTA_PROFILE: &str = "taxpasta/taxpasta_standardised_profiles.tsv";

/// Output format for reports.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Compare taxonomic profiles from multiple classifiers
#[derive(Parser)]
#[command(name = "taxcompare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where to read the harmonized profile from.
#[derive(Args)]
struct InputArgs {
    /// Path to a harmonized profile TSV (overrides --results-dir)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pipeline results directory containing taxpasta/taxpasta_standardised_profiles.tsv
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,

    /// Path to analysis configuration YAML
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full comparison and write the summary report
    Compare {
        #[command(flatten)]
        input: InputArgs,

        /// Number of top taxa to compare
        #[arg(long)]
        top_n: Option<usize>,

        /// Prefix for output files
        #[arg(short, long)]
        output_prefix: Option<String>,

        /// Output format for stdout
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Only print the report, do not write files
        #[arg(long)]
        no_files: bool,
    },

    /// Rank taxa by abundance summed across tools
    Top {
        #[command(flatten)]
        input: InputArgs,

        /// Number of top taxa to show
        #[arg(long, default_value = "10")]
        top_n: usize,
    },

    /// Show shared and tool-specific taxa
    Agreement {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate an example analysis configuration
    Example {
        /// Output path for the example YAML
        #[arg(short, long, default_value = "taxcompare.yaml")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compare {
            input,
            top_n,
            output_prefix,
            format,
            no_files,
        } => cmd_compare(&input, top_n, output_prefix, format, no_files),

        Commands::Top { input, top_n } => cmd_top(&input, top_n),

        Commands::Agreement { input, format } => cmd_agreement(&input, format),

        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log level comes from RUST_LOG, then TAXCOMPARE_LOG, then the -v count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => std::env::var("TAXCOMPARE_LOG").unwrap_or_else(|_| "warn".to_string()),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level)),
        )
        .init();
}

fn load_config(input: &InputArgs) -> Result<AnalysisConfig> {
    match &input.config {
        Some(path) => {
            info!(path = %path.display(), "loading analysis configuration");
            AnalysisConfig::from_file(path)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn resolve_input(input: &InputArgs) -> Result<PathBuf> {
    let path = match &input.input {
        Some(path) => path.clone(),
        None => input.results_dir.join(TAXPASTA_PROFILE),
    };
    if !path.exists() {
        return Err(CompareError::InvalidParameter(format!(
            "could not find TAXPASTA file at {}; make sure the pipeline has completed",
            path.display()
        )));
    }
    Ok(path)
}

fn load_table(input: &InputArgs, config: &AnalysisConfig) -> Result<ProfileTable> {
    let path = resolve_input(input)?;
    eprintln!("Loading data from: {}", path.display());
    let table = ProfileTable::from_tsv_with_columns(&path, &config.columns)?;

    let tools: Vec<&str> = table.tools().iter().map(String::as_str).collect();
    eprintln!("Loaded {} taxonomic assignments", table.len());
    eprintln!("Tools analyzed: {}", tools.join(", "));
    Ok(table)
}

/// Run the full comparison
fn cmd_compare(
    input: &InputArgs,
    top_n: Option<usize>,
    output_prefix: Option<String>,
    format: OutputFormat,
    no_files: bool,
) -> Result<()> {
    let mut config = load_config(input)?;
    if let Some(n) = top_n {
        config.top_n = n;
    }
    if let Some(prefix) = output_prefix {
        config.output_prefix = prefix;
    }
    config.validate()?;

    let table = load_table(input, &config)?;
    let report = AnalysisReport::assemble(&table, &config)?;

    match format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Yaml => print!("{}", report.to_yaml()?),
    }

    if !no_files {
        let paths = report.write_outputs(&config.output_prefix)?;
        eprintln!("\nGenerated files:");
        for path in paths {
            eprintln!("  - {}", path.display());
        }
    }

    Ok(())
}

/// Print the top taxa and their per-tool abundance
fn cmd_top(input: &InputArgs, top_n: usize) -> Result<()> {
    let config = load_config(input)?;
    let table = load_table(input, &config)?;

    let ranking = rank(&table, top_n)?;
    if ranking.is_empty() {
        eprintln!("No taxa in input");
        return Ok(());
    }

    println!("Top taxa by total abundance:");
    print!("{}", ranking);

    let matrix = build(&table, &ranking.taxa())?;
    println!("\nAbundance comparison across tools:");
    print!("{}", matrix);
    Ok(())
}

/// Print the agreement analysis
fn cmd_agreement(input: &InputArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(input)?;
    let table = load_table(input, &config)?;
    let agreement = analyze(&table)?;

    match format {
        OutputFormat::Text => {
            print!("{}", agreement);
            let pairs = agreement.pairwise();
            if !pairs.is_empty() {
                println!("\nPairwise overlap:");
                for overlap in pairs {
                    println!("  {}", overlap);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&agreement)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&agreement)?),
    }
    Ok(())
}

/// Write an example configuration file
fn cmd_example(output: &Path) -> Result<()> {
    let yaml = AnalysisConfig::example().to_yaml()?;
    std::fs::write(output, yaml)?;
    eprintln!("Example configuration written to {}", output.display());
    Ok(())
}
