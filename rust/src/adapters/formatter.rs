//! Rendering of scheduled networks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::ScheduledActivity;
use crate::error::CpmError;
use crate::network::ScheduledNetwork;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Schedule(#[from] CpmError),
}

/// Turns a scheduled network into text.
pub trait ProjectFormatter {
    fn format(&self, network: &ScheduledNetwork) -> Result<String, FormatError>;
}

/// One activity of a schedule report. Decimals are kept as strings so no
/// precision is lost on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub name: String,
    pub duration: String,
    /// Sorted dependency names.
    pub dependencies: Vec<String>,
    pub earliest_start: String,
    pub earliest_finish: String,
    pub latest_start: String,
    pub latest_finish: String,
    pub total_float: String,
    pub is_critical: bool,
}

impl ActivityReport {
    pub fn from_activity(activity: &ScheduledActivity) -> Result<Self, CpmError> {
        Ok(Self {
            name: activity.name().to_string(),
            duration: activity.duration().to_string(),
            dependencies: activity
                .dependencies()
                .iter()
                .map(|dep| dep.to_string())
                .collect(),
            earliest_start: activity.earliest_start().to_string(),
            earliest_finish: activity.earliest_finish().to_string(),
            latest_start: activity.latest_start().to_string(),
            latest_finish: activity.latest_finish().to_string(),
            total_float: activity.total_float()?.to_string(),
            is_critical: activity.is_critical(),
        })
    }
}

/// Flat, serializable view of a scheduled network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub project_duration: String,
    pub activities: Vec<ActivityReport>,
}

impl ScheduleReport {
    pub fn from_network(network: &ScheduledNetwork) -> Result<Self, CpmError> {
        Ok(Self {
            project_duration: network.project_duration().to_string(),
            activities: network
                .iter()
                .map(ActivityReport::from_activity)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

/// Pretty-printed JSON, activities in network order.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl ProjectFormatter for JsonFormatter {
    fn format(&self, network: &ScheduledNetwork) -> Result<String, FormatError> {
        let report = ScheduleReport::from_network(network)?;
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
