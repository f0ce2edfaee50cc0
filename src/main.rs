// Memoria - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Loading memories, applying the emotion filter, writing the result

use clap::{Parser, ValueEnum};
use memoria::app::{loader, selection::resolve_selection, session, state::FeedState};
use memoria::core::export::{self, ExportFormat};
use memoria::core::label::StripMode;
use memoria::platform::config::{load_config, AppConfig, PlatformPaths};
use memoria::util::{
    self,
    error::{MemoriaError, Result},
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output format flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ExportFormat::Text,
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

/// Strip mode flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StripArg {
    Codepoint,
    Cluster,
}

impl From<StripArg> for StripMode {
    fn from(arg: StripArg) -> Self {
        match arg {
            StripArg::Codepoint => StripMode::Codepoint,
            StripArg::Cluster => StripMode::Cluster,
        }
    }
}

/// Memoria - filter journal memories by emotion.
///
/// Reads a JSON array of memories and prints those whose emotion label
/// (ignoring a leading emoji) equals the requested label.
#[derive(Parser, Debug)]
#[command(name = "memoria", version, about)]
struct Cli {
    /// JSON file of memories (defaults to the file used last time).
    file: Option<PathBuf>,

    /// Emotion label to select; "All" or empty selects everything.
    #[arg(short = 'e', long = "emotion")]
    emotion: Option<String>,

    /// Output format.
    #[arg(long = "format", value_enum)]
    format: Option<FormatArg>,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print label counts instead of memories.
    #[arg(long = "labels")]
    labels: bool,

    /// How leading emoji are recognised.
    #[arg(long = "strip-mode", value_enum)]
    strip_mode: Option<StripArg>,

    /// Remember the file and label for the next run.
    #[arg(long = "remember")]
    remember: bool,

    /// Alternative config.toml location.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform_paths.config_file());

    // Config is read before logging exists; its problems are reported once
    // the subscriber is up.
    let (config, config_problems) = load_config(&config_path);
    util::logging::init(cli.debug, config.log_level.as_deref());

    // Config problems are not fatal; defaults stand in for bad values.
    for problem in config_problems {
        let err = MemoriaError::from(problem);
        tracing::warn!(error = %err, "Configuration warning");
    }

    tracing::debug!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Memoria starting"
    );

    if let Err(e) = run(&cli, &config, &platform_paths) {
        tracing::error!(error = %e, "Memoria failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &AppConfig, paths: &PlatformPaths) -> Result<()> {
    let session_file = session::session_path(&paths.data_dir);
    let previous = session::load(&session_file);

    let selection = resolve_selection(
        cli.file.as_deref(),
        cli.emotion.as_deref(),
        previous.as_ref(),
        config,
    )?;
    let strip_mode = cli.strip_mode.map(StripMode::from).unwrap_or(config.strip_mode);
    let format = cli.format.map(ExportFormat::from).unwrap_or(config.export_format);

    let memories = loader::load_memories(&selection.file)?;
    let mut state = FeedState::new(memories, strip_mode);
    state.set_query(selection.query.clone());

    let out_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("<stdout>"));

    match &cli.output {
        Some(path) => {
            let handle = File::create(path).map_err(|e| MemoriaError::Io {
                path: path.clone(),
                operation: "create output",
                source: e,
            })?;
            write_output(cli.labels, &state, format, BufWriter::new(handle), &out_path)?;
        }
        None => {
            let stdout = io::stdout();
            write_output(cli.labels, &state, format, stdout.lock(), &out_path)?;
        }
    }

    if cli.remember {
        if let Err(e) = session::save(&selection.remembered(), &session_file) {
            tracing::warn!(error = %e, "Could not save session");
        }
    }

    Ok(())
}

fn write_output<W: Write>(
    labels: bool,
    state: &FeedState,
    format: ExportFormat,
    writer: W,
    out_path: &Path,
) -> Result<()> {
    if labels {
        let written = export::export_label_counts(format, &state.summary(), writer, out_path)?;
        tracing::info!(labels = written, "Label counts written");
        return Ok(());
    }

    let visible = state.visible();
    let written = export::export(format, &visible, writer, out_path, state.strip_mode())?;
    tracing::info!(
        label = %state.selected_label(),
        total = state.memories.len(),
        written,
        "Memories written"
    );
    Ok(())
}
