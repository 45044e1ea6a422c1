//! CSV parsing into unscheduled project networks.
//!
//! Expected format (columns in any order, cells trimmed):
//!
//! ```text
//! activity_name,duration,depends_on
//! A,5,
//! B,3,A
//! C,4,"A,B"
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::error::CpmError;
use crate::models::{ActivityName, Duration};
use crate::network::{ActivityRecord, UnscheduledNetwork};

const NAME_FIELD: &str = "activity_name";
const DURATION_FIELD: &str = "duration";
const DEPENDS_ON_FIELD: &str = "depends_on";
const EXPECTED_HEADERS: [&str; 3] = [NAME_FIELD, DURATION_FIELD, DEPENDS_ON_FIELD];

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("CSV file is empty or has no headers")]
    NoHeaders,
    #[error("Invalid CSV headers ({0})")]
    InvalidHeaders(String),
    #[error("No activities found in CSV")]
    NoActivities,
    #[error("Line {line}: Invalid CSV format: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("Line {line}: Field '{field}': {message}")]
    InvalidField {
        line: u64,
        field: &'static str,
        message: String,
    },
    /// The rows parsed but do not form a valid network.
    #[error(transparent)]
    Network(#[from] CpmError),
}

impl ParseError {
    /// CSV line the error refers to, when it concerns a single row.
    pub fn line(&self) -> Option<u64> {
        match self {
            ParseError::Csv { line, .. } | ParseError::InvalidField { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Turns raw text into a validated, unscheduled network.
pub trait ProjectParser {
    fn parse(&self, content: &str) -> Result<UnscheduledNetwork, ParseError>;
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    activity_name: String,
    duration: String,
    depends_on: String,
}

impl CsvRow {
    /// Check for blank required cells and split the dependency list.
    fn into_record(self, line: u64) -> Result<ActivityRecord, ParseError> {
        if self.activity_name.is_empty() {
            return Err(ParseError::InvalidField {
                line,
                field: NAME_FIELD,
                message: CpmError::InvalidName.to_string(),
            });
        }
        if self.duration.is_empty() {
            return Err(ParseError::InvalidField {
                line,
                field: DURATION_FIELD,
                message: "Duration cannot be empty".to_string(),
            });
        }

        let depends_on = self
            .depends_on
            .split(',')
            .map(str::trim)
            .filter(|dep| !dep.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();

        Ok(ActivityRecord {
            name: self.activity_name,
            duration: self.duration,
            depends_on,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl CsvParser {
    fn validate_headers(headers: &csv::StringRecord) -> Result<(), ParseError> {
        if headers.is_empty() {
            return Err(ParseError::NoHeaders);
        }

        let actual: Vec<&str> = headers.iter().collect();
        let count = |name: &str| actual.iter().filter(|h| **h == name).count();
        let mut missing: Vec<&str> = EXPECTED_HEADERS
            .iter()
            .copied()
            .filter(|expected| !actual.contains(expected))
            .collect();
        let mut extra: Vec<&str> = actual
            .iter()
            .copied()
            .filter(|header| !EXPECTED_HEADERS.contains(header))
            .collect();
        let mut duplicate: Vec<&str> = EXPECTED_HEADERS
            .iter()
            .copied()
            .filter(|expected| count(*expected) > 1)
            .collect();

        if missing.is_empty() && extra.is_empty() && duplicate.is_empty() {
            return Ok(());
        }

        missing.sort_unstable();
        extra.sort_unstable();
        duplicate.sort_unstable();

        let mut parts = Vec::new();
        if !missing.is_empty() {
            parts.push(format!("missing: {}", missing.join(", ")));
        }
        if !extra.is_empty() {
            parts.push(format!("extra: {}", extra.join(", ")));
        }
        if !duplicate.is_empty() {
            parts.push(format!("duplicate: {}", duplicate.join(", ")));
        }
        Err(ParseError::InvalidHeaders(parts.join("; ")))
    }

    fn validate_record(record: &ActivityRecord, line: u64) -> Result<(), ParseError> {
        let field_error = |field: &'static str, err: CpmError| ParseError::InvalidField {
            line,
            field,
            message: err.to_string(),
        };

        ActivityName::new(&record.name).map_err(|e| field_error(NAME_FIELD, e))?;
        record
            .duration
            .parse::<Duration>()
            .map_err(|e| field_error(DURATION_FIELD, e))?;
        Ok(())
    }
}

impl ProjectParser for CsvParser {
    fn parse(&self, content: &str) -> Result<UnscheduledNetwork, ParseError> {
        tracing::debug!("starting CSV parsing");

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|source| ParseError::Csv { line: 1, source })?
            .clone();
        Self::validate_headers(&headers)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|source| ParseError::Csv {
                line: source.position().map(|p| p.line()).unwrap_or(0),
                source,
            })?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            let parsed: CsvRow = row
                .deserialize(Some(&headers))
                .map_err(|source| ParseError::Csv { line, source })?;
            let record = parsed.into_record(line)?;
            Self::validate_record(&record, line)?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(ParseError::NoActivities);
        }

        tracing::info!(activities = records.len(), "parsed activities from CSV");
        Ok(UnscheduledNetwork::from_records(&records)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CpmErrorKind;

    const HEADER: &str = "activity_name,duration,depends_on\n";

    fn parse(body: &str) -> Result<UnscheduledNetwork, ParseError> {
        CsvParser.parse(&format!("{HEADER}{body}"))
    }

    fn dependency_names(network: &UnscheduledNetwork, name: &str) -> Vec<String> {
        network
            .get(name)
            .unwrap()
            .dependencies()
            .iter()
            .map(|d| d.to_string())
            .collect()
    }

    #[test]
    fn test_parse_simple_csv() {
        let network = parse("A,5,\nB,3,A\nC,4,\"A,B\"\n").unwrap();

        assert_eq!(network.len(), 3);
        assert_eq!(network.get("A").unwrap().duration(), Duration::from(5));
        assert!(dependency_names(&network, "A").is_empty());
        assert_eq!(dependency_names(&network, "B"), vec!["A"]);
        assert_eq!(dependency_names(&network, "C"), vec!["A", "B"]);
    }

    #[test]
    fn test_parse_decimal_durations() {
        let network = parse("A,2.5,\nB,0.75,A\nC,1e1,B\n").unwrap();
        assert_eq!(network.get("C").unwrap().duration(), Duration::from(10));
        assert_eq!(
            network.get("B").unwrap().duration(),
            "0.75".parse::<Duration>().unwrap()
        );
    }

    #[test]
    fn test_headers_in_any_order() {
        let network = CsvParser
            .parse("depends_on,activity_name,duration\n,A,1\nA,B,2\n")
            .unwrap();
        assert_eq!(dependency_names(&network, "B"), vec!["A"]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let network = parse("  A  , 5 ,  \n B , 3 ,\" A , \"\n").unwrap();
        assert!(network.contains("A"));
        assert_eq!(dependency_names(&network, "B"), vec!["A"]);
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(CsvParser.parse(""), Err(ParseError::NoHeaders)));
    }

    #[test]
    fn test_header_only() {
        assert!(matches!(parse(""), Err(ParseError::NoActivities)));
    }

    #[test]
    fn test_missing_and_extra_headers() {
        let err = CsvParser.parse("activity_name,duration\nA,1\n").unwrap_err();
        assert_eq!(err.to_string(), "Invalid CSV headers (missing: depends_on)");

        let err = CsvParser
            .parse("activity_name,duration,depends_on,owner\nA,1,,me\n")
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid CSV headers (extra: owner)");
    }

    #[test]
    fn test_empty_name_reports_line_and_field() {
        let err = parse("A,1,\n,5,\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidField {
                line: 3,
                field: "activity_name",
                ..
            }
        ));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_invalid_durations() {
        let err = parse("A,,\n").unwrap_err();
        assert_eq!(err.to_string(), "Line 2: Field 'duration': Duration cannot be empty");

        let err = parse("A,abc,\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { field: "duration", .. }));
        assert!(err.to_string().contains("must be a number"));

        let err = parse("A,-3,\n").unwrap_err();
        assert!(err.to_string().contains("Duration cannot be negative"));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse("A,1,,extra\n").unwrap_err();
        assert!(matches!(err, ParseError::Csv { .. }));
    }

    #[test]
    fn test_network_errors_are_wrapped() {
        let err = parse("A,1,B\nB,1,A\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Network(ref e) if e.kind() == CpmErrorKind::CyclicDependency
        ));

        let err = parse("A,1,Z\n").unwrap_err();
        assert!(err.to_string().contains("depends on non-existent activity Z"));

        let err = parse("A,1,\nA,2,\n").unwrap_err();
        assert!(matches!(err, ParseError::Network(CpmError::DuplicateName(_))));
    }
}
