//! Critical Path Method scheduling for project networks.
//!
//! A project is a set of named activities with durations and finish-to-start
//! dependencies. [`ProjectNetwork::new`] validates the graph and [`schedule`]
//! computes earliest/latest start and finish times for every activity.

pub mod activity;
pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod interner;
pub mod logging;
pub mod models;
pub mod network;
#[cfg(feature = "python")]
mod python;
pub mod scheduling;

pub use activity::{Activity, NetworkNode, ScheduledActivity};
pub use error::{CpmError, CpmErrorKind, DurationFault, Result};
pub use models::{ActivityName, Duration, Float};
pub use network::{ActivityRecord, ProjectNetwork, ScheduledNetwork, UnscheduledNetwork};
pub use scheduling::schedule;
