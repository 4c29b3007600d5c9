//! Workload-balanced agent assignment
//!
//! Picks the least-loaded eligible agent for a task entering work. The pool
//! is the project's linked active agents, falling back to all active agents;
//! an empty pool is a valid outcome, not an error. The policy is greedy and
//! non-reassigning: it never moves tasks off an agent to rebalance.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::BoardResult;
use crate::model::{Agent, AgentStatus};
use crate::store::BoardStore;

/// Result of one policy invocation
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOutcome {
    /// Assign the task to this agent
    Assigned { agent: Agent, workload: i64 },
    /// No active agent exists in or out of the project pool
    NoCandidate,
}

/// Select the least-loaded active agent for a task in this project
///
/// Candidates are ranked by `(workload ascending, name ascending)`; the name
/// comparison makes the choice deterministic for a fixed store snapshot.
/// Workload is the count of the agent's assigned tasks in the project whose
/// column role is not `Done`, read from the store on every call.
pub fn select_agent(store: &BoardStore, project_id: Uuid) -> BoardResult<AssignmentOutcome> {
    let mut pool: Vec<Agent> = store
        .project_agents(project_id)?
        .into_iter()
        .filter(|a| a.status == AgentStatus::Active)
        .collect();

    if pool.is_empty() {
        debug!(%project_id, "no active project agents, falling back to global pool");
        pool = store
            .all_agents()?
            .into_iter()
            .filter(|a| a.status == AgentStatus::Active)
            .collect();
    }

    if pool.is_empty() {
        warn!(%project_id, "no active agents available for auto-assignment");
        return Ok(AssignmentOutcome::NoCandidate);
    }

    let mut ranked = Vec::with_capacity(pool.len());
    for agent in pool {
        let workload = store.agent_workload(agent.id, project_id)?;
        ranked.push((workload, agent));
    }
    ranked.sort_by(|(wa, a), (wb, b)| wa.cmp(wb).then_with(|| a.name.cmp(&b.name)));

    let (workload, agent) = ranked.remove(0);
    info!(
        agent_id = %agent.id,
        agent_name = %agent.name,
        workload,
        "selected least-loaded agent"
    );
    Ok(AssignmentOutcome::Assigned { agent, workload })
}
