use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ccda_models::ClinicalDocument;
use ccda_validator::{PairingStrategy, Validator, ValidatorConfig};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "ccdacv",
    about = "Check C-CDA documents against reference scenarios",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Log comparison details to stderr (overridden by RUST_LOG).
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a submitted document against a scenario document.
    Validate {
        /// Path to the reference scenario XML file.
        #[arg(short, long)]
        scenario: PathBuf,
        /// Path to the submitted XML file (or "-" for stdin).
        #[arg(short, long)]
        document: PathBuf,
        /// Validator configuration YAML file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Pairing strategy for repeating entries: positional, by-primary-code, by-template-ids.
        #[arg(long)]
        pairing: Option<PairingStrategy>,
        /// Compare sections in parallel.
        #[arg(long, action = ArgAction::SetTrue)]
        parallel: bool,
        /// Output file path (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output.
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the canonical tree read from a document as JSON.
    Extract {
        /// Path to the XML file (or "-" for stdin).
        input: PathBuf,
        /// Output file path (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output.
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the default validator configuration as YAML.
    Config,

    /// Print CLI version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Config => {
            print!("{}", ValidatorConfig::default().to_yaml()?);
        }
        Commands::Extract {
            input,
            output,
            pretty,
        } => {
            let document = load_document(&input)?;
            let value =
                serde_json::to_value(&document).context("Failed to serialize extracted document")?;
            write_json_output(&value, output.as_deref(), pretty)?;
        }
        Commands::Validate {
            scenario,
            document,
            config,
            pairing,
            parallel,
            output,
            pretty,
        } => {
            let has_errors = run_validate(
                &scenario,
                &document,
                config.as_deref(),
                pairing,
                parallel,
                output.as_deref(),
                pretty,
            )?;
            if has_errors {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(default),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to initialise logging")?;
    Ok(())
}

fn run_validate(
    scenario: &Path,
    document: &Path,
    config: Option<&Path>,
    pairing: Option<PairingStrategy>,
    parallel: bool,
    output: Option<&Path>,
    pretty: bool,
) -> Result<bool> {
    let mut cfg = match config {
        Some(path) => {
            let yaml = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
            ValidatorConfig::from_yaml(&yaml)
                .with_context(|| format!("Invalid validator config in '{}'", path.display()))?
        }
        None => ValidatorConfig::default(),
    };
    if let Some(strategy) = pairing {
        cfg.pairing.strategy = strategy;
    }
    if parallel {
        cfg.exec.parallel_sections = true;
    }

    let validator = Validator::from_config(&cfg).context("Invalid validator config")?;

    let reference = load_document(scenario)?;
    let submitted = load_document(document)?;

    tracing::info!(
        scenario = %scenario.display(),
        document = %document.display(),
        pairing = %cfg.pairing.strategy,
        "Validating document"
    );
    let outcome = validator.validate(&reference, &submitted);
    if outcome.has_errors() {
        tracing::warn!(errors = outcome.error_count(), "Document does not conform");
    }

    write_json_output(&outcome.to_json(), output, pretty)?;
    Ok(outcome.has_errors())
}

fn load_document(path: &Path) -> Result<ClinicalDocument> {
    let xml = if path.to_string_lossy() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read document from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read document '{}'", path.display()))?
    };

    ccda_extract::extract(&xml)
        .with_context(|| format!("Failed to extract C-CDA content from '{}'", path.display()))
}

fn write_json_output(value: &Value, output: Option<&Path>, pretty: bool) -> Result<()> {
    let content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    if let Some(output_path) = output {
        fs::write(output_path, content)
            .with_context(|| format!("Failed to write to {:?}", output_path))?;
        eprintln!("Wrote output to {:?}", output_path);
    } else {
        println!("{content}");
    }

    Ok(())
}
