//! Configuration types for the `parade` command line.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Default maximum export size: 100 MiB.
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 100 * 1024 * 1024;

/// Where the raw project description comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputSource {
    File,
    Stdin,
}

/// Output rendering of a scheduled network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
}

/// Where formatted output is sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportDestination {
    #[default]
    File,
    Stdout,
}

/// Guards applied by the file exporter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportConfig {
    /// Every exported file must resolve inside this directory.
    /// `None` means the current working directory.
    pub allowed_base_dir: Option<PathBuf>,
    /// Maximum content size in bytes (`None` disables the check).
    pub max_file_size_bytes: Option<u64>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            allowed_base_dir: None,
            max_file_size_bytes: Some(DEFAULT_MAX_FILE_SIZE_BYTES),
        }
    }
}

/// Parade - Critical Path Method project scheduling.
#[derive(Parser, Debug, Clone)]
#[command(name = "parade", version)]
pub struct CliConfig {
    /// CSV file with activity_name,duration,depends_on columns ("-" or omitted reads stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format for the scheduled network
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Export destination for the formatted output
    #[arg(long, value_enum, default_value_t = ExportDestination::File)]
    pub destination: ExportDestination,

    /// Output file path (file destination only)
    #[arg(short, long, default_value = "project.json")]
    pub output: PathBuf,

    /// Directory that output files must stay within (defaults to the current directory)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Maximum output size in bytes (0 disables the limit)
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE_BYTES)]
    pub max_file_size: u64,

    /// Increase verbosity (-v changes, -vv checks, -vvv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CliConfig {
    pub fn input_source(&self) -> InputSource {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => InputSource::File,
            _ => InputSource::Stdin,
        }
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            allowed_base_dir: self.base_dir.clone(),
            max_file_size_bytes: (self.max_file_size > 0).then_some(self.max_file_size),
        }
    }
}
