//! Board engine: move protocol, task CRUD, and workflow automation
//!
//! The engine is the single write path for task placement. Every operation
//! locks the shared store for its duration and commits its multi-row
//! position updates in one transaction, so concurrent callers serialize and
//! the dense-ordering invariant holds after every call, never just
//! eventually.

pub mod assignment;
pub mod threads;
pub mod trigger;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{AutomationSection, EngineConfig};
use crate::error::{BoardError, BoardResult};
use crate::model::{AuthorType, Column, ColumnRole, Priority, Task};
use crate::ordering::clamp_insert_index;
use crate::store::{BoardStore, NewTask, StoreHandle, TaskPatch};

pub use assignment::{select_agent, AssignmentOutcome};
pub use threads::{StoreThreadSink, ThreadSink};
pub use trigger::{TriggerOutcome, TriggerSummary};

/// The task board engine
pub struct Engine {
    store: StoreHandle,
    threads: Arc<dyn ThreadSink>,
    automation: AutomationSection,
}

impl Engine {
    /// Create an engine with the store-backed thread sink
    pub fn new(store: StoreHandle, automation: AutomationSection) -> Self {
        let threads = Arc::new(StoreThreadSink::new(store.clone()));
        Self {
            store,
            threads,
            automation,
        }
    }

    /// Build an engine from configuration, opening the store it names
    pub fn from_config(config: &EngineConfig) -> BoardResult<Self> {
        let store = if config.storage.path == ":memory:" {
            StoreHandle::in_memory()?
        } else {
            StoreHandle::open(Path::new(&config.storage.path))?
        };
        Ok(Self::new(store, config.automation.clone()))
    }

    /// Create an engine with a custom conversation sink
    pub fn with_thread_sink(
        store: StoreHandle,
        automation: AutomationSection,
        threads: Arc<dyn ThreadSink>,
    ) -> Self {
        Self {
            store,
            threads,
            automation,
        }
    }

    /// Shared store handle, for callers that stand up boards and agents
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Create a task appended to the end of a column
    pub fn create_task(&self, new: NewTask) -> BoardResult<Task> {
        let store = self.store.lock();
        if store.get_column(new.column_id)?.is_none() {
            return Err(BoardError::not_found("column", new.column_id));
        }
        if let Some(parent_id) = new.parent_task_id {
            validate_parent(&store, None, parent_id, self.automation.max_parent_depth)?;
        }
        let index = store.column_task_count(new.column_id)?;
        store.insert_task_at(&new, index)
    }

    /// Move a task to `(destination column, destination index)`
    ///
    /// Rejects a negative index before any read. A move to the task's
    /// current slot produces no writes anywhere. A qualifying cross-column
    /// transition (backlog role to active role, task unassigned) runs the
    /// assignment policy and appends exactly one system thread message,
    /// whether or not a candidate was found.
    pub fn move_task(
        &self,
        task_id: Uuid,
        destination_column_id: Uuid,
        destination_index: i64,
    ) -> BoardResult<Task> {
        if destination_index < 0 {
            return Err(BoardError::invalid_argument(format!(
                "destination index must be >= 0, got {destination_index}"
            )));
        }

        // Holds the note to append after the store lock is released.
        let mut pending_note: Option<String> = None;

        let moved = {
            let store = self.store.lock();
            let task = store
                .get_task(task_id)?
                .ok_or_else(|| BoardError::not_found("task", task_id))?;
            let dest = store
                .get_column(destination_column_id)?
                .ok_or_else(|| BoardError::not_found("column", destination_column_id))?;
            let source = store.get_column(task.column_id)?.ok_or_else(|| {
                BoardError::internal(format!("task {task_id} references missing column"))
            })?;

            let same_column = source.id == dest.id;
            let dest_count = store.column_task_count(dest.id)?;
            // Within the same column the task already occupies a slot, so
            // the highest reachable index is count-1; across columns an
            // index of count appends.
            let max_len = if same_column { dest_count - 1 } else { dest_count };
            let index = clamp_insert_index(destination_index, max_len.max(0));

            if same_column && index == task.position {
                debug!(%task_id, "move is a no-op");
                return Ok(task);
            }

            let mut assignee = None;
            if !same_column && self.automation.auto_assign {
                if let Some(note) =
                    self.run_transition_check(&store, &task, &source, &dest, &mut assignee)?
                {
                    pending_note = Some(note);
                }
            }

            info!(
                %task_id,
                from_column = %source.id,
                to_column = %dest.id,
                index,
                "moving task"
            );
            store.move_task_row(&task, dest.id, index, assignee)?
        };

        if let Some(note) = pending_note {
            self.threads.append(task_id, AuthorType::System, &note)?;
        }
        Ok(moved)
    }

    /// Delete a task, closing the position gap it leaves behind
    pub fn delete_task(&self, task_id: Uuid) -> BoardResult<()> {
        let store = self.store.lock();
        if !store.delete_task(task_id)? {
            return Err(BoardError::not_found("task", task_id));
        }
        info!(%task_id, "deleted task");
        Ok(())
    }

    /// Apply a direct edit to a task's fields
    ///
    /// Parent changes re-run the ancestry check; self-parenting and cycles
    /// are rejected with `InvalidArgument` before any write.
    pub fn update_task(&self, task_id: Uuid, patch: TaskPatch) -> BoardResult<Task> {
        let store = self.store.lock();
        if store.get_task(task_id)?.is_none() {
            return Err(BoardError::not_found("task", task_id));
        }
        if let Some(Some(parent_id)) = patch.parent_task_id {
            validate_parent(
                &store,
                Some(task_id),
                parent_id,
                self.automation.max_parent_depth,
            )?;
        }
        store.update_task_fields(task_id, &patch)
    }

    /// Position-ordered tasks of a column
    pub fn column_tasks(&self, column_id: Uuid) -> BoardResult<Vec<Task>> {
        let store = self.store.lock();
        if store.get_column(column_id)?.is_none() {
            return Err(BoardError::not_found("column", column_id));
        }
        store.column_tasks(column_id)
    }

    /// Execute a cron job trigger now
    pub fn trigger_cron_job(&self, cron_job_id: Uuid) -> BoardResult<TriggerOutcome> {
        self.trigger_cron_job_at(cron_job_id, Utc::now())
    }

    /// Execute a cron job trigger as of the given instant
    ///
    /// `last_run_at` is stamped unconditionally; a job without both a target
    /// column and a template is a heartbeat-only run. Materialized tasks are
    /// always appended to the end of the target column.
    pub fn trigger_cron_job_at(
        &self,
        cron_job_id: Uuid,
        at: DateTime<Utc>,
    ) -> BoardResult<TriggerOutcome> {
        let store = self.store.lock();
        let job = store
            .get_cron_job(cron_job_id)?
            .ok_or_else(|| BoardError::not_found("cron job", cron_job_id))?;

        store.set_cron_last_run(job.id, at)?;

        let (Some(column_id), Some(template)) = (job.target_column_id, job.template.as_ref())
        else {
            debug!(cron_job_id = %job.id, "trigger without template, heartbeat only");
            return Ok(TriggerOutcome::heartbeat());
        };

        let column = store
            .get_column(column_id)?
            .ok_or_else(|| BoardError::not_found("column", column_id))?;
        let board = store.get_board(column.board_id)?.ok_or_else(|| {
            BoardError::internal(format!("column {column_id} references missing board"))
        })?;
        let project = store.get_project(board.project_id)?.ok_or_else(|| {
            BoardError::internal(format!("board {} references missing project", board.id))
        })?;

        let date = trigger::format_trigger_date(at);
        let new = NewTask {
            column_id,
            title: trigger::render_template_field(&template.title, &date),
            description: trigger::render_template_field(&template.description, &date),
            priority: template.priority.unwrap_or(Priority::Medium),
            assigned_agent_id: template.assigned_agent_id.or(job.agent_id),
            parent_task_id: None,
        };
        let index = store.column_task_count(column_id)?;
        let task = store.insert_task_at(&new, index)?;

        info!(
            cron_job_id = %job.id,
            task_id = %task.id,
            column = %column.name,
            "materialized task from cron template"
        );
        Ok(TriggerOutcome::created(TriggerSummary {
            task,
            column_name: column.name,
            board_name: board.name,
            project_name: project.name,
        }))
    }

    /// Run the assignment policy for a qualifying transition and produce the
    /// system note to append after commit
    fn run_transition_check(
        &self,
        store: &BoardStore,
        task: &Task,
        source: &Column,
        dest: &Column,
        assignee: &mut Option<Uuid>,
    ) -> BoardResult<Option<String>> {
        let qualifies = source.role == ColumnRole::Backlog
            && dest.role == ColumnRole::Active
            && task.assigned_agent_id.is_none();
        if !qualifies {
            return Ok(None);
        }

        let board = store.get_board(dest.board_id)?.ok_or_else(|| {
            BoardError::internal(format!("column {} references missing board", dest.id))
        })?;

        let note = match select_agent(store, board.project_id)? {
            AssignmentOutcome::Assigned { agent, workload } => {
                *assignee = Some(agent.id);
                format!(
                    "Automatically assigned to {} (current workload: {workload})",
                    agent.name
                )
            }
            AssignmentOutcome::NoCandidate => {
                "Could not auto-assign an agent: no active agents available".to_string()
            }
        };
        Ok(Some(note))
    }
}

/// Reject self-parenting and ancestor cycles before a parent write
///
/// `task_id` is None when the task does not exist yet (creation). The walk
/// follows the prospective parent's chain with a visited set, bounded by
/// `max_depth`.
fn validate_parent(
    store: &BoardStore,
    task_id: Option<Uuid>,
    parent_id: Uuid,
    max_depth: usize,
) -> BoardResult<()> {
    if task_id == Some(parent_id) {
        return Err(BoardError::invalid_argument(
            "a task cannot be its own parent",
        ));
    }
    if store.get_task(parent_id)?.is_none() {
        return Err(BoardError::not_found("task", parent_id));
    }

    let mut visited: HashSet<Uuid> = HashSet::new();
    let mut current = parent_id;
    for _ in 0..max_depth {
        if Some(current) == task_id {
            return Err(BoardError::invalid_argument(
                "parent chain would form a cycle",
            ));
        }
        if !visited.insert(current) {
            return Err(BoardError::invalid_argument(
                "parent chain already contains a cycle",
            ));
        }
        match store.get_task(current)?.and_then(|t| t.parent_task_id) {
            Some(next) => current = next,
            None => return Ok(()),
        }
    }
    Err(BoardError::invalid_argument(format!(
        "parent chain exceeds maximum depth {max_depth}"
    )))
}
