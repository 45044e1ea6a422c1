//! Activities before and after scheduling.
//!
//! An [`Activity`] is the bare task: name, duration and the names it depends on.
//! A [`ScheduledActivity`] wraps one and adds the four CPM times. The two are
//! never handled through a shared interface; the scheduler converts one into
//! the other.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::models::{ActivityName, Duration, Float};

/// Read access shared by both activity variants, used by network validation.
pub trait NetworkNode {
    fn name(&self) -> &ActivityName;
    fn dependencies(&self) -> &BTreeSet<ActivityName>;
}

/// A project activity that has not been scheduled yet.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Activity {
    name: ActivityName,
    duration: Duration,
    dependencies: BTreeSet<ActivityName>,
}

impl Activity {
    pub fn new(
        name: ActivityName,
        duration: Duration,
        dependencies: impl IntoIterator<Item = ActivityName>,
    ) -> Self {
        Self {
            name,
            duration,
            dependencies: dependencies.into_iter().collect(),
        }
    }

    /// Build an activity from raw strings, validating each name.
    pub fn parse<I, S>(name: &str, duration: Duration, depends_on: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dependencies = depends_on
            .into_iter()
            .map(ActivityName::new)
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Self {
            name: ActivityName::new(name)?,
            duration,
            dependencies,
        })
    }

    #[inline]
    pub fn name(&self) -> &ActivityName {
        &self.name
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Dependency names in sorted order.
    #[inline]
    pub fn dependencies(&self) -> &BTreeSet<ActivityName> {
        &self.dependencies
    }
}

impl NetworkNode for Activity {
    fn name(&self) -> &ActivityName {
        &self.name
    }

    fn dependencies(&self) -> &BTreeSet<ActivityName> {
        &self.dependencies
    }
}

/// An activity with its computed earliest and latest times.
///
/// Finish times are derived from start times and the duration when the value is
/// built, so `earliest_finish = earliest_start + duration` and
/// `latest_finish = latest_start + duration` always hold.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScheduledActivity {
    activity: Activity,
    earliest_start: Duration,
    earliest_finish: Duration,
    latest_start: Duration,
    latest_finish: Duration,
}

impl ScheduledActivity {
    pub fn new(
        activity: Activity,
        earliest_start: Duration,
        latest_start: Duration,
    ) -> Result<Self> {
        let earliest_finish = earliest_start.checked_add(activity.duration)?;
        let latest_finish = latest_start.checked_add(activity.duration)?;
        Ok(Self {
            activity,
            earliest_start,
            earliest_finish,
            latest_start,
            latest_finish,
        })
    }

    #[inline]
    pub fn name(&self) -> &ActivityName {
        &self.activity.name
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.activity.duration
    }

    #[inline]
    pub fn dependencies(&self) -> &BTreeSet<ActivityName> {
        &self.activity.dependencies
    }

    /// The unscheduled activity this was computed from.
    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn earliest_start(&self) -> Duration {
        self.earliest_start
    }

    pub fn earliest_finish(&self) -> Duration {
        self.earliest_finish
    }

    pub fn latest_start(&self) -> Duration {
        self.latest_start
    }

    pub fn latest_finish(&self) -> Duration {
        self.latest_finish
    }

    /// Total float = latest start - earliest start.
    ///
    /// Fails only if the stored times are inconsistent (latest before earliest).
    pub fn total_float(&self) -> Result<Float> {
        self.latest_start
            .checked_sub(self.earliest_start)
            .map(Float::from)
    }

    pub fn is_critical(&self) -> bool {
        self.latest_start == self.earliest_start
    }
}

impl NetworkNode for ScheduledActivity {
    fn name(&self) -> &ActivityName {
        &self.activity.name
    }

    fn dependencies(&self) -> &BTreeSet<ActivityName> {
        &self.activity.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CpmError;

    fn make_activity(name: &str, duration: u32, deps: &[&str]) -> Activity {
        Activity::parse(name, Duration::from(duration), deps.iter().copied()).unwrap()
    }

    #[test]
    fn test_activity_dependencies() {
        let a = make_activity("A", 5, &[]);
        assert!(a.dependencies().is_empty());

        let c = make_activity("C", 2, &["B", " A ", "B"]);
        let deps: Vec<&str> = c.dependencies().iter().map(|n| n.as_str()).collect();
        assert_eq!(deps, vec!["A", "B"]);
        assert!(c.dependencies().contains("A"));
        assert!(!c.dependencies().contains("Z"));
    }

    #[test]
    fn test_activity_rejects_blank_dependency_name() {
        let result = Activity::parse("A", Duration::from(1), ["  "]);
        assert_eq!(result, Err(CpmError::InvalidName));
    }

    #[test]
    fn test_scheduled_activity_derives_finish_and_float() {
        let c = make_activity("C", 3, &["A"]);
        let scheduled =
            ScheduledActivity::new(c, Duration::from(2), Duration::from(4)).unwrap();

        assert_eq!(scheduled.earliest_finish(), Duration::from(5));
        assert_eq!(scheduled.latest_finish(), Duration::from(7));
        assert_eq!(scheduled.total_float().unwrap(), Float::from(Duration::from(2)));
        assert!(!scheduled.is_critical());
        assert!(scheduled.dependencies().contains("A"));
    }

    #[test]
    fn test_zero_float_is_critical() {
        let a = make_activity("A", 5, &[]);
        let scheduled = ScheduledActivity::new(a, Duration::ZERO, Duration::ZERO).unwrap();
        assert!(scheduled.is_critical());
        assert!(scheduled.total_float().unwrap().is_zero());
    }
}
