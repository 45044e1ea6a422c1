//! Validated project networks.
//!
//! A [`ProjectNetwork`] can only be obtained through its validating
//! constructor, which checks, in order and stopping at the first failure:
//! 1. The network is not empty
//! 2. Activity names are unique
//! 3. Every dependency names a member activity
//! 4. The dependency graph has no cycle (self-dependencies included)

use serde::{Deserialize, Serialize};

use crate::activity::{Activity, NetworkNode, ScheduledActivity};
use crate::error::{CpmError, Result};
use crate::interner::{ActivityId, ActivityIndex};
use crate::models::Duration;

/// Immutable, validated set of activities of one variant.
///
/// Activities keep the order they were supplied in; lookups by name go
/// through a dense index built during validation.
#[derive(Debug, Clone)]
pub struct ProjectNetwork<A> {
    activities: Vec<A>,
    index: ActivityIndex,
}

pub type UnscheduledNetwork = ProjectNetwork<Activity>;
pub type ScheduledNetwork = ProjectNetwork<ScheduledActivity>;

/// Plain-data activity description as produced by input parsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub name: String,
    pub duration: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl ActivityRecord {
    pub fn new(
        name: impl Into<String>,
        duration: impl Into<String>,
        depends_on: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            duration: duration.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_activity(&self) -> Result<Activity> {
        let duration: Duration = self.duration.parse()?;
        Activity::parse(&self.name, duration, &self.depends_on)
    }
}

impl<A: NetworkNode> ProjectNetwork<A> {
    pub fn new(activities: impl IntoIterator<Item = A>) -> Result<Self> {
        let activities: Vec<A> = activities.into_iter().collect();

        validate_not_empty(&activities)?;
        let index = validate_unique_names(&activities)?;
        validate_dependencies_exist(&activities, &index)?;
        validate_no_cycles(&activities, &index)?;

        tracing::debug!(activities = activities.len(), "validated project network");

        Ok(Self { activities, index })
    }

    /// Activities in the order they were supplied.
    #[inline]
    pub fn activities(&self) -> &[A] {
        &self.activities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.activities.iter()
    }

    pub fn get(&self, name: &str) -> Option<&A> {
        self.index
            .get(name)
            .and_then(|id| self.activities.get(id as usize))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Name index whose IDs equal positions in [`Self::activities`].
    pub(crate) fn index(&self) -> &ActivityIndex {
        &self.index
    }
}

impl ProjectNetwork<Activity> {
    /// Convert raw records into activities, then validate them as a network.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a ActivityRecord>,
    ) -> Result<Self> {
        let activities = records
            .into_iter()
            .map(ActivityRecord::to_activity)
            .collect::<Result<Vec<_>>>()?;
        Self::new(activities)
    }
}

impl ProjectNetwork<ScheduledActivity> {
    /// Minimum time to finish the whole project: the largest earliest finish.
    pub fn project_duration(&self) -> Duration {
        self.activities
            .iter()
            .map(ScheduledActivity::earliest_finish)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Activities with zero total float, in network order.
    pub fn critical_activities(&self) -> impl Iterator<Item = &ScheduledActivity> {
        self.activities.iter().filter(|a| a.is_critical())
    }
}

impl<'a, A> IntoIterator for &'a ProjectNetwork<A> {
    type Item = &'a A;
    type IntoIter = std::slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.activities.iter()
    }
}

fn validate_not_empty<A>(activities: &[A]) -> Result<()> {
    if activities.is_empty() {
        return Err(CpmError::EmptyNetwork);
    }
    Ok(())
}

/// Intern every name; a name that does not receive a fresh ID is a duplicate.
fn validate_unique_names<A: NetworkNode>(activities: &[A]) -> Result<ActivityIndex> {
    let mut index = ActivityIndex::with_capacity(activities.len());
    for (position, activity) in activities.iter().enumerate() {
        let id = index.intern(activity.name());
        if id as usize != position {
            return Err(CpmError::DuplicateName(activity.name().to_string()));
        }
    }
    Ok(index)
}

fn validate_dependencies_exist<A: NetworkNode>(
    activities: &[A],
    index: &ActivityIndex,
) -> Result<()> {
    for activity in activities {
        for dependency in activity.dependencies() {
            if index.get(dependency.as_str()).is_none() {
                return Err(CpmError::UnknownDependency {
                    activity: activity.name().to_string(),
                    dependency: dependency.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Depth-first search over activity -> dependency edges.
///
/// Uses an explicit stack so deep dependency chains cannot exhaust the call
/// stack. Every activity is tried as a root so disconnected cyclic components
/// are found too. Reaching a node that is still on the current path is a cycle.
fn validate_no_cycles<A: NetworkNode>(activities: &[A], index: &ActivityIndex) -> Result<()> {
    let n = activities.len();
    let adjacency: Vec<Vec<ActivityId>> = activities
        .iter()
        .map(|activity| {
            activity
                .dependencies()
                .iter()
                .filter_map(|dep| index.get(dep.as_str()))
                .collect()
        })
        .collect();

    let mut visited = vec![false; n];
    let mut on_path = vec![false; n];
    // (node, next edge to explore)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        on_path[root] = true;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, edge) = *frame;
            match adjacency[node].get(edge) {
                Some(&next) => {
                    frame.1 += 1;
                    let next = next as usize;
                    if on_path[next] {
                        return Err(CpmError::CyclicDependency {
                            activity: activities[next].name().to_string(),
                        });
                    }
                    if !visited[next] {
                        visited[next] = true;
                        on_path[next] = true;
                        stack.push((next, 0));
                    }
                }
                None => {
                    on_path[node] = false;
                    stack.pop();
                }
            }
        }
    }

    Ok(())
}
