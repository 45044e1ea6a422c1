//! End-to-end pipeline: read, parse, schedule, format, export.

use thiserror::Error;

use crate::adapters::{
    CsvParser, ExportError, Exporter, FileExporter, FileReader, FormatError, InputReader,
    JsonFormatter, ParseError, ProjectFormatter, ProjectParser, ReadError, StdinReader,
    StdoutExporter,
};
use crate::config::{CliConfig, ExportDestination, InputSource, OutputFormat};
use crate::error::CpmError;
use crate::scheduling::schedule;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Scheduling failed: {0}")]
    Schedule(#[from] CpmError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub fn reader_for(source: InputSource) -> Box<dyn InputReader> {
    match source {
        InputSource::File => Box::new(FileReader),
        InputSource::Stdin => Box::new(StdinReader),
    }
}

pub fn formatter_for(format: OutputFormat) -> Box<dyn ProjectFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

pub fn exporter_for(config: &CliConfig) -> Result<Box<dyn Exporter>, ExportError> {
    Ok(match config.destination {
        ExportDestination::File => Box::new(FileExporter::new(&config.export_config())?),
        ExportDestination::Stdout => Box::new(StdoutExporter),
    })
}

/// Parse `content`, schedule it and render the result.
pub fn schedule_text(
    content: &str,
    parser: &dyn ProjectParser,
    formatter: &dyn ProjectFormatter,
) -> Result<String, AppError> {
    let network = parser.parse(content)?;
    let scheduled = schedule(&network)?;
    tracing::info!(
        activities = scheduled.len(),
        project_duration = %scheduled.project_duration(),
        "scheduled project"
    );
    Ok(formatter.format(&scheduled)?)
}

/// Run the whole pipeline for a command line configuration.
///
/// Returns a description of where the output was written.
pub fn run(config: &CliConfig) -> Result<String, AppError> {
    // Fail on a bad base directory before doing any work.
    let exporter = exporter_for(config)?;

    let content = reader_for(config.input_source()).read(config.input.as_deref())?;
    let formatted = schedule_text(&content, &CsvParser, formatter_for(config.format).as_ref())?;
    Ok(exporter.export(&formatted, &config.output)?)
}
