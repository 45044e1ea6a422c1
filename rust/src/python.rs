//! Python bindings, built with the `python` feature.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::adapters::{ActivityReport, CsvParser, JsonFormatter, ScheduleReport};
use crate::app::schedule_text;
use crate::network::{ActivityRecord, UnscheduledNetwork};

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// A scheduled activity. Times are decimal strings.
#[pyclass(name = "ScheduledActivity", frozen)]
#[derive(Clone, Debug)]
pub struct PyScheduledActivity {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration: String,
    #[pyo3(get)]
    pub dependencies: Vec<String>,
    #[pyo3(get)]
    pub earliest_start: String,
    #[pyo3(get)]
    pub earliest_finish: String,
    #[pyo3(get)]
    pub latest_start: String,
    #[pyo3(get)]
    pub latest_finish: String,
    #[pyo3(get)]
    pub total_float: String,
    #[pyo3(get)]
    pub is_critical: bool,
}

impl From<ActivityReport> for PyScheduledActivity {
    fn from(report: ActivityReport) -> Self {
        Self {
            name: report.name,
            duration: report.duration,
            dependencies: report.dependencies,
            earliest_start: report.earliest_start,
            earliest_finish: report.earliest_finish,
            latest_start: report.latest_start,
            latest_finish: report.latest_finish,
            total_float: report.total_float,
            is_critical: report.is_critical,
        }
    }
}

#[pymethods]
impl PyScheduledActivity {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledActivity(name={:?}, es={}, ef={}, ls={}, lf={}, float={})",
            self.name,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.total_float
        )
    }
}

/// Result of scheduling a project.
#[pyclass(name = "ScheduleResult", frozen)]
#[derive(Clone, Debug)]
pub struct PyScheduleResult {
    #[pyo3(get)]
    pub project_duration: String,
    #[pyo3(get)]
    pub activities: Vec<PyScheduledActivity>,
}

#[pymethods]
impl PyScheduleResult {
    /// Names of activities with zero total float, in input order.
    fn critical_path(&self) -> Vec<String> {
        self.activities
            .iter()
            .filter(|a| a.is_critical)
            .map(|a| a.name.clone())
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(project_duration={}, activities={})",
            self.project_duration,
            self.activities.len()
        )
    }
}

/// Schedule a CSV document and return the JSON report.
///
/// # Raises
/// * ValueError on malformed CSV or an invalid network
#[pyfunction]
fn schedule_csv(content: &str) -> PyResult<String> {
    schedule_text(content, &CsvParser, &JsonFormatter).map_err(value_error)
}

/// Schedule `(name, duration, depends_on)` tuples.
///
/// Durations are decimal strings so no precision is lost crossing the
/// boundary.
///
/// # Raises
/// * ValueError on an invalid name, duration or network
#[pyfunction]
fn schedule(records: Vec<(String, String, Vec<String>)>) -> PyResult<PyScheduleResult> {
    let records: Vec<ActivityRecord> = records
        .into_iter()
        .map(|(name, duration, depends_on)| ActivityRecord::new(name, duration, depends_on))
        .collect();

    let network = UnscheduledNetwork::from_records(&records).map_err(value_error)?;
    let scheduled = crate::scheduling::schedule(&network).map_err(value_error)?;
    let report = ScheduleReport::from_network(&scheduled).map_err(value_error)?;

    Ok(PyScheduleResult {
        project_duration: report.project_duration,
        activities: report.activities.into_iter().map(Into::into).collect(),
    })
}

/// The parade Python module.
#[pymodule]
fn parade(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyScheduledActivity>()?;
    m.add_class::<PyScheduleResult>()?;

    m.add_function(wrap_pyfunction!(schedule_csv, m)?)?;
    m.add_function(wrap_pyfunction!(schedule, m)?)?;

    Ok(())
}
