//! Input and output adapters around the scheduling core.
//!
//! Each concern sits behind a small trait so the command line can swap
//! implementations by configuration:
//! - `reader`: raw text from a file or stdin
//! - `parser`: CSV text into a validated network
//! - `formatter`: scheduled network into JSON
//! - `exporter`: formatted text to a guarded file or stdout

pub mod exporter;
pub mod formatter;
pub mod parser;
pub mod reader;

pub use exporter::{ExportError, Exporter, FileExporter, StdoutExporter};
pub use formatter::{ActivityReport, FormatError, JsonFormatter, ProjectFormatter, ScheduleReport};
pub use parser::{CsvParser, ParseError, ProjectParser};
pub use reader::{FileReader, InputReader, ReadError, StdinReader};
