//! CLI Entry Point for srdir
//!
//! Provides command-line interface for:
//! - Recording a simulated acquisition into an archive directory
//! - Printing the output module descriptor
//!
//! # Usage
//!
//! Record 1M samples of 8 logic and 2 analog channels:
//! ```bash
//! srdir simulate --output capture --samples 1000000 --analog-channels 2
//! cd capture && zip -9 ../capture.sr *
//! ```
//!
//! Settings come from `config/srdir.toml` and `SRDIR_*` environment
//! variables; command-line flags override both.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use srdir::config::{SrdirConfig, DEFAULT_CONFIG_PATH};
use srdir::tracing_init::{self, OutputFormat, TracingConfig};
use srdir_core::limits::CHUNK_SIZE;
use srdir_core::{SrdirError, StatusCode};
use srdir_storage::output::{MODULE_DESCRIPTION, MODULE_EXTENSIONS, MODULE_ID, MODULE_NAME};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "srdir")]
#[command(about = "Record acquisition streams into sigrok session directories", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Compact)]
    log_format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a mock acquisition into an archive directory
    Simulate(SimulateArgs),

    /// Print the output module descriptor
    Info,
}

#[derive(clap::Args, Debug, Default)]
struct SimulateArgs {
    /// Archive directory (must not exist)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Samples per channel
    #[arg(long)]
    samples: Option<u64>,

    /// Sample rate in Hz
    #[arg(long)]
    samplerate: Option<u64>,

    /// Number of logic channels
    #[arg(long)]
    logic_channels: Option<usize>,

    /// Number of analog channels
    #[arg(long)]
    analog_channels: Option<usize>,

    /// Channel index to disable (repeatable)
    #[arg(long = "disable")]
    disabled_channels: Vec<usize>,

    /// Samples per datafeed packet
    #[arg(long)]
    block_samples: Option<usize>,

    /// RNG seed for analog noise
    #[arg(long)]
    seed: Option<u64>,

    /// Byte budget of each sample buffer
    #[arg(long)]
    chunk_bytes: Option<usize>,
}

impl SimulateArgs {
    fn apply(self, config: &mut SrdirConfig) {
        if let Some(output) = self.output {
            config.archive.output_dir = output;
        }
        if let Some(chunk_bytes) = self.chunk_bytes {
            config.archive.chunk_bytes = chunk_bytes;
        }

        let mock = &mut config.mock;
        if let Some(samples) = self.samples {
            mock.samples = samples;
        }
        if let Some(samplerate) = self.samplerate {
            mock.samplerate = samplerate;
        }
        if let Some(count) = self.logic_channels {
            mock.logic_channels = count;
        }
        if let Some(count) = self.analog_channels {
            mock.analog_channels = count;
        }
        if !self.disabled_channels.is_empty() {
            mock.disabled_channels = self.disabled_channels;
        }
        if let Some(block_samples) = self.block_samples {
            mock.block_samples = block_samples;
        }
        if self.seed.is_some() {
            mock.seed = self.seed;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info => {
            print_info();
            Ok(())
        }
        Commands::Simulate(args) => {
            let mut config = SrdirConfig::load_from(&cli.config)
                .with_context(|| format!("loading {}", cli.config.display()))?;
            if let Some(level) = cli.log_level {
                config.application.log_level = level;
            }
            args.apply(&mut config);
            config.validate().map_err(anyhow::Error::msg)?;

            let tracing_config = TracingConfig::from_config(&config)
                .map_err(anyhow::Error::msg)?
                .with_format(cli.log_format);
            tracing_init::init(tracing_config).map_err(anyhow::Error::msg)?;

            simulate(&config)
        }
    }
}

fn simulate(config: &SrdirConfig) -> Result<()> {
    let summary = srdir::record_mock(config)
        .with_context(|| format!("recording into {}", config.archive.output_dir.display()))?;

    if !summary.created {
        println!("No samples received; nothing written.");
        return Ok(());
    }

    let stats = summary.stats;
    println!("Archive:        {}", summary.path.display());
    println!("Packets:        {}", summary.packets);
    println!("Logic samples:  {}", stats.logic_samples);
    println!("Analog samples: {}", stats.analog_samples);
    println!(
        "Chunks:         {} logic, {} analog ({} bytes)",
        stats.chunks.logic_chunks, stats.chunks.analog_chunks, stats.chunks.bytes_written
    );
    Ok(())
}

fn print_info() {
    let extensions: Vec<&str> = MODULE_EXTENSIONS
        .iter()
        .map(|ext| if ext.is_empty() { "(none)" } else { ext })
        .collect();

    println!("id:          {}", MODULE_ID);
    println!("name:        {}", MODULE_NAME);
    println!("description: {}", MODULE_DESCRIPTION);
    println!("extensions:  {}", extensions.join(", "));
    println!("options:     (none)");
    println!("chunk size:  {} bytes", CHUNK_SIZE);
}

/// Process exit status: the magnitude of the archive status code, 1 otherwise.
fn exit_status(error: &anyhow::Error) -> u8 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<SrdirError>())
        .map(|e| StatusCode::from(e).code().unsigned_abs() as u8)
        .unwrap_or(1)
}
