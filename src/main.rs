//! partner-finder: find comparable partner companies
//!
//! Ranks companies by weighted distance over normalized business metrics.

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use partner_finder::{
    cli,
    config::{self, AppConfig, ConfigPreset, DEFAULT_BASE_URI},
    ingest::DatasetFormat,
    pipeline::exit_codes,
    recommend::{EdgeMode, RecommendationRequest},
    reports::ReportFormat,
    scoring::ScoringMode,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nDataset Formats:",
        "\n  csv, json, split-csv",
        "\n\nOutput Formats:",
        "\n  json, csv, table, summary",
        "\n\nScoring Modes:",
        "\n  asymmetric-penalty (default), symmetric"
    )
}

#[derive(Parser)]
#[command(name = "partner-finder")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Find comparable partner companies by weighted metric distance", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Recommendations found (or command succeeded)
    1  No company matched the request
    3  Error occurred

EXAMPLES:
    # Rank the built-in demo companies against Samsung
    partner-finder recommend Samsung --factors stockPrice,ESGScore

    # Use your own data, keep the three closest, require ESG >= 70
    partner-finder recommend Acme -f ESGScore,MarketCap --dataset companies.csv --limit 3 --min ESGScore=70

    # Export the dataset as Turtle
    partner-finder export-triples --dataset data/ -O companies.ttl")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Configuration preset (default, symmetric, legacy)
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<ConfigPreset>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Dataset selection shared by every data command
#[derive(clap::Args)]
struct DatasetArgs {
    /// Dataset file or split-CSV directory (built-in demo if omitted)
    #[arg(short, long, env = "PARTNER_FINDER_DATASET")]
    dataset: Option<PathBuf>,

    /// Dataset layout (detected from the path if omitted)
    #[arg(long)]
    dataset_format: Option<DatasetFormat>,
}

/// Arguments for the `recommend` subcommand
#[derive(Parser)]
struct RecommendArgs {
    /// Company to find partners for
    company: String,

    /// Factors to compare on, comma-separated
    #[arg(short, long, value_delimiter = ',', required = true)]
    factors: Vec<String>,

    /// Distance semantics
    #[arg(long)]
    mode: Option<ScoringMode>,

    /// Edge labeling in the graph output
    #[arg(long)]
    edge_mode: Option<EdgeMode>,

    /// Keep only the N closest companies
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    limit: Option<usize>,

    /// Minimum cleaned value for a factor, as FACTOR=VALUE (repeatable)
    #[arg(long = "min", value_name = "FACTOR=VALUE", value_parser = parse_threshold)]
    thresholds: Vec<(String, f64)>,

    #[command(flatten)]
    dataset: DatasetArgs,

    /// Output format (auto: table on a terminal, JSON otherwise)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `factors` subcommand
#[derive(Parser)]
struct FactorsArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Output format (auto: JSON)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `export-triples` subcommand
#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Base URI for subjects and the `ex:` namespace
    #[arg(long, default_value = DEFAULT_BASE_URI)]
    base_uri: String,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the closest partner companies for a company
    Recommend(RecommendArgs),

    /// List the companies and selectable factors
    Factors(FactorsArgs),

    /// Export the dataset as Turtle triples
    ExportTriples(ExportArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the JSON Schema for the configuration file
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .partner-finder.yaml in the current directory
    Init,
}

fn parse_preset(name: &str) -> Result<ConfigPreset, String> {
    ConfigPreset::from_name(name).ok_or_else(|| {
        let known: Vec<String> = ConfigPreset::all()
            .iter()
            .map(|p| format!("\n  {p}: {}", p.description()))
            .collect();
        format!("unknown preset '{name}', expected one of:{}", known.concat())
    })
}

fn parse_threshold(arg: &str) -> Result<(String, f64), String> {
    cli::parse_threshold(arg).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match run(cli) {
        Ok(exit_code) => {
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Effective config: file (or defaults), then preset, then CLI flags.
fn effective_config(cli: &Cli, overrides: &AppConfig) -> AppConfig {
    let (mut config, loaded_from) = config::load_or_default(cli.config.as_deref());
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    if let Some(preset) = cli.preset {
        tracing::debug!("Applying preset {}", preset);
        config.merge(&AppConfig::from_preset(preset));
    }
    config.merge(overrides);
    config
}

fn cli_overrides(
    cli: &Cli,
    dataset: &DatasetArgs,
    output: Option<ReportFormat>,
    output_file: Option<PathBuf>,
) -> AppConfig {
    let mut builder = AppConfig::builder()
        .dataset_path(dataset.dataset.clone())
        .output_file(output_file)
        .no_color(cli.no_color);
    if let Some(format) = output {
        builder = builder.output_format(format);
    }
    builder.build()
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Recommend(args) => {
            let overrides =
                cli_overrides(&cli, &args.dataset, args.output, args.output_file.clone());
            let config = effective_config(&cli, &overrides);

            let mut request =
                RecommendationRequest::new(args.company.clone(), args.factors.iter().cloned())
                    .with_mode(args.mode)
                    .with_edge_mode(args.edge_mode)
                    .with_limit(args.limit);
            for (factor, min) in &args.thresholds {
                request = request.with_threshold(factor.clone(), *min);
            }

            cli::run_recommend(&config, &request, args.dataset.dataset_format)
        }

        Commands::Factors(args) => {
            let overrides =
                cli_overrides(&cli, &args.dataset, args.output, args.output_file.clone());
            let config = effective_config(&cli, &overrides);
            cli::run_factors(&config, args.dataset.dataset_format)?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::ExportTriples(args) => {
            let overrides = cli_overrides(&cli, &args.dataset, None, args.output_file.clone());
            let config = effective_config(&cli, &overrides);
            cli::run_export_triples(&config, args.dataset.dataset_format, &args.base_uri)?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "partner-finder", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema =
                config::generate_json_schema().context("failed to serialize config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config_action(action, &cli)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config_action(action: &ConfigAction, cli: &Cli) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = effective_config(cli, &AppConfig::default());
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
            Ok(())
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                ::dirs::config_dir().map(|p| p.join("partner-finder").display().to_string()),
                ::dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in config::file::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
            Ok(())
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".partner-finder.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
            Ok(())
        }
    }
}
