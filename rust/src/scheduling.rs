//! Critical Path Method scheduling using forward and backward passes.
//!
//! Both passes walk one topological order of the dependency graph (Kahn's
//! algorithm), so every activity is computed exactly once after all the
//! activities it depends on (forward) or that depend on it (backward).
//! Total work is O(V + E) and no recursion is involved.

use std::collections::VecDeque;

use crate::activity::{Activity, ScheduledActivity};
use crate::error::Result;
use crate::interner::ActivityId;
use crate::models::Duration;
use crate::network::{ScheduledNetwork, UnscheduledNetwork};

/// Dependency edges in both directions, indexed by network position.
struct DependencyGraph {
    /// Activities each activity waits for.
    dependencies: Vec<Vec<ActivityId>>,
    /// Reverse edges: activities that wait for each activity.
    successors: Vec<Vec<ActivityId>>,
}

impl DependencyGraph {
    fn build(network: &UnscheduledNetwork) -> Self {
        let n = network.len();
        let index = network.index();
        let mut dependencies: Vec<Vec<ActivityId>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<ActivityId>> = vec![Vec::new(); n];

        for (idx, activity) in network.iter().enumerate() {
            for dep in activity.dependencies() {
                // Validation guarantees every dependency is indexed
                if let Some(dep_id) = index.get(dep.as_str()) {
                    dependencies[idx].push(dep_id);
                    successors[dep_id as usize].push(idx as ActivityId);
                }
            }
        }

        Self {
            dependencies,
            successors,
        }
    }

    fn len(&self) -> usize {
        self.dependencies.len()
    }
}

/// Earliest times for every activity plus the overall project end.
struct ForwardPassResult {
    earliest_start: Vec<Duration>,
    earliest_finish: Vec<Duration>,
    project_end: Duration,
}

/// Latest times for every activity.
struct BackwardPassResult {
    latest_start: Vec<Duration>,
    latest_finish: Vec<Duration>,
}

/// Compute the CPM schedule of a validated network.
///
/// Returns a new scheduled network; the input is left untouched. Every
/// network is validated (and therefore acyclic) on construction, so the only
/// possible error is an `InvalidDuration` from an arithmetic overflow or an
/// impossible negative time, both of which indicate a defect rather than bad
/// input.
pub fn schedule(network: &UnscheduledNetwork) -> Result<ScheduledNetwork> {
    let graph = DependencyGraph::build(network);
    let order = topological_order(&graph);
    debug_assert_eq!(order.len(), graph.len(), "validated network must be acyclic");

    let forward = forward_pass(network.activities(), &graph, &order)?;
    tracing::debug!(project_end = %forward.project_end, "forward pass complete");

    let backward = backward_pass(network.activities(), &graph, &order, forward.project_end)?;
    tracing::debug!("backward pass complete");

    let scheduled = network
        .iter()
        .enumerate()
        .map(|(idx, activity)| -> Result<ScheduledActivity> {
            let scheduled = ScheduledActivity::new(
                activity.clone(),
                forward.earliest_start[idx],
                backward.latest_start[idx],
            )?;
            debug_assert_eq!(scheduled.earliest_finish(), forward.earliest_finish[idx]);
            debug_assert_eq!(scheduled.latest_finish(), backward.latest_finish[idx]);
            Ok(scheduled)
        })
        .collect::<Result<Vec<_>>>()?;

    let result = ScheduledNetwork::new(scheduled)?;
    tracing::debug!(
        activities = result.len(),
        critical = result.critical_activities().count(),
        "scheduled project network"
    );
    Ok(result)
}

/// Order activities so each appears after all of its dependencies.
///
/// Ties are broken by network order, which keeps the output deterministic.
fn topological_order(graph: &DependencyGraph) -> Vec<usize> {
    let mut in_degree: Vec<usize> = graph.dependencies.iter().map(Vec::len).collect();

    let mut queue: VecDeque<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(idx, _)| idx)
        .collect();

    let mut order = Vec::with_capacity(graph.len());

    while let Some(idx) = queue.pop_front() {
        order.push(idx);

        for &successor in &graph.successors[idx] {
            let succ_idx = successor as usize;
            in_degree[succ_idx] -= 1;
            if in_degree[succ_idx] == 0 {
                queue.push_back(succ_idx);
            }
        }
    }

    order
}

/// Earliest start is zero without dependencies, otherwise the latest
/// earliest-finish among them.
fn forward_pass(
    activities: &[Activity],
    graph: &DependencyGraph,
    order: &[usize],
) -> Result<ForwardPassResult> {
    let n = activities.len();
    let mut earliest_start = vec![Duration::ZERO; n];
    let mut earliest_finish = vec![Duration::ZERO; n];

    for &idx in order {
        let start = graph.dependencies[idx]
            .iter()
            .map(|&dep| earliest_finish[dep as usize])
            .max()
            .unwrap_or(Duration::ZERO);

        earliest_start[idx] = start;
        earliest_finish[idx] = start.checked_add(activities[idx].duration())?;
    }

    let project_end = earliest_finish
        .iter()
        .copied()
        .max()
        .unwrap_or(Duration::ZERO);

    Ok(ForwardPassResult {
        earliest_start,
        earliest_finish,
        project_end,
    })
}

/// Latest finish is the project end without successors, otherwise the
/// earliest latest-start among them.
fn backward_pass(
    activities: &[Activity],
    graph: &DependencyGraph,
    order: &[usize],
    project_end: Duration,
) -> Result<BackwardPassResult> {
    let n = activities.len();
    let mut latest_start = vec![Duration::ZERO; n];
    let mut latest_finish = vec![Duration::ZERO; n];

    for &idx in order.iter().rev() {
        let finish = graph.successors[idx]
            .iter()
            .map(|&succ| latest_start[succ as usize])
            .min()
            .unwrap_or(project_end);

        latest_finish[idx] = finish;
        latest_start[idx] = finish.checked_sub(activities[idx].duration())?;
    }

    Ok(BackwardPassResult {
        latest_start,
        latest_finish,
    })
}
