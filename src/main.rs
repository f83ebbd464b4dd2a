// HighlightWizard - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Highlight policy assembly
// 4. load → classify → render

use clap::{Parser, ValueEnum};
use highlight_wizard::app::policy::{self, PolicyOverrides};
use highlight_wizard::app::store::EventStore;
use highlight_wizard::core::export::{self, ExportFormat, Listing};
use highlight_wizard::platform::{
    self,
    config::{ConfigSource, PlatformPaths},
};
use highlight_wizard::util::{self, error::HighlightError};
use std::io::Write;
use std::path::{Path, PathBuf};

/// HighlightWizard - Football match highlight extractor.
///
/// Reads an event log of `<minute>,<category>,<description>` lines and
/// lists the highlights (goals and red cards unless configured otherwise).
#[derive(Parser, Debug)]
#[command(name = "highlight-wizard", version, about)]
struct Cli {
    /// Event log to read.
    event_log: PathBuf,

    /// Also list every loaded event before the highlights.
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Highlight category (repeatable). Replaces the configured categories.
    #[arg(short = 'c', long = "category")]
    categories: Vec<String>,

    /// Description regex that also marks a highlight (repeatable, case-insensitive).
    #[arg(short = 'k', long = "keyword")]
    keywords: Vec<String>,

    /// Config file to use instead of the platform default.
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ExportFormat::Text,
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let (config, config_warnings) = match &cli.config {
        Some(path) => platform::config::load_config(path, ConfigSource::Explicit),
        None => platform::config::load_config(
            &PlatformPaths::resolve().config_file,
            ConfigSource::PlatformDefault,
        ),
    };

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "HighlightWizard starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &platform::config::AppConfig) -> util::error::Result<()> {
    let overrides = PolicyOverrides {
        categories: cli.categories.clone(),
        keywords: cli.keywords.clone(),
    };
    let rule = policy::build_policy(config, &overrides)?;

    let mut store = EventStore::with_rule(Box::new(rule));
    store.load(&cli.event_log)?;
    store.classify();

    match &cli.output {
        Some(path) => {
            let file = platform::fs::create_output(path).map_err(|e| HighlightError::Io {
                path: path.clone(),
                operation: "create",
                source: e,
            })?;
            render(cli, &store, file, path)?;
            tracing::info!(path = %path.display(), "Output written");
        }
        None => {
            let stdout = std::io::stdout();
            render(cli, &store, stdout.lock(), Path::new("<stdout>"))?;
        }
    }

    Ok(())
}

/// Write the requested listings. Machine formats carry one listing only:
/// all events with `--all`, otherwise the highlights.
fn render<W: Write>(
    cli: &Cli,
    store: &EventStore,
    mut writer: W,
    path: &Path,
) -> util::error::Result<()> {
    let format = ExportFormat::from(cli.format);
    match format {
        ExportFormat::Text => {
            if cli.all {
                export::write_text(store.all_records(), Listing::AllEvents, &mut writer, path)?;
                writeln!(writer).map_err(|e| HighlightError::Io {
                    path: path.to_path_buf(),
                    operation: "write",
                    source: e,
                })?;
            }
            export::write_text(store.highlights(), Listing::Highlights, &mut writer, path)?;
        }
        ExportFormat::Csv | ExportFormat::Json => {
            let (records, listing) = if cli.all {
                (store.all_records(), Listing::AllEvents)
            } else {
                (store.highlights(), Listing::Highlights)
            };
            export::export(records, format, listing, &mut writer, path)?;
        }
    }
    writer.flush().map_err(|e| HighlightError::Io {
        path: path.to_path_buf(),
        operation: "flush",
        source: e,
    })?;
    Ok(())
}
