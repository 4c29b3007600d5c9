//! SQLite-backed ordering store
//!
//! Holds the board relations (projects, boards, columns, tasks, agents, cron
//! jobs, thread messages) and applies reindexer shift plans. Every multi-row
//! write sequence runs inside one transaction so a mid-sequence failure rolls
//! back fully and no partial positions are ever observable.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{BoardError, BoardResult};
use crate::model::{
    Agent, AgentStatus, AuthorType, Board, Column, ColumnRole, CronJob, Priority, Project, Task,
    TaskTemplate, ThreadMessage,
};
use crate::ordering::{PositionShift, ShiftPlan};

/// Shared handle to the board store
///
/// Callers lock the handle for the duration of one engine operation; the
/// mutex serializes concurrent operations while the store's transactions
/// guarantee atomicity of each one.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<Mutex<BoardStore>>,
}

impl StoreHandle {
    pub fn new(store: BoardStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Open (or create) the database at the given path
    pub fn open(path: &Path) -> BoardResult<Self> {
        Ok(Self::new(BoardStore::open(path)?))
    }

    /// Ephemeral in-memory database, used by tests
    pub fn in_memory() -> BoardResult<Self> {
        Ok(Self::new(BoardStore::in_memory()?))
    }

    /// Acquire the store for one operation
    pub fn lock(&self) -> MutexGuard<'_, BoardStore> {
        // Poisoning only happens if another caller panicked mid-operation;
        // its transaction already rolled back, so the data is consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// The persistent relation store
pub struct BoardStore {
    conn: Connection,
}

/// New-task payload for insertion paths
#[derive(Debug, Clone)]
pub struct NewTask {
    pub column_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assigned_agent_id: Option<Uuid>,
    pub parent_task_id: Option<Uuid>,
}

/// Partial update for direct task edits
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the assignee
    pub assigned_agent_id: Option<Option<Uuid>>,
    /// `Some(None)` detaches the task from its parent
    pub parent_task_id: Option<Option<Uuid>>,
    pub awaiting_input: Option<bool>,
}

impl BoardStore {
    /// Open (or create) a database file and run migrations
    pub fn open(path: &Path) -> BoardResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// In-memory database for tests
    pub fn in_memory() -> BoardResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> BoardResult<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.run_migrations()?;
        Ok(())
    }

    fn run_migrations(&self) -> BoardResult<()> {
        // No unique index on (column_id, position): range shifts would
        // collide mid-update. Density is maintained by the reindexer plans.
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS projects (
                id BLOB PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS boards (
                id BLOB PRIMARY KEY,
                project_id BLOB NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS columns (
                id BLOB PRIMARY KEY,
                board_id BLOB NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                ordinal INTEGER NOT NULL,
                role TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id BLOB PRIMARY KEY,
                column_id BLOB NOT NULL REFERENCES columns(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                priority TEXT NOT NULL DEFAULT 'medium',
                assigned_agent_id BLOB,
                parent_task_id BLOB,
                awaiting_input INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS agents (
                id BLOB PRIMARY KEY,
                name TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS agent_projects (
                agent_id BLOB NOT NULL REFERENCES agents(id) ON DELETE CASCADE,
                project_id BLOB NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                UNIQUE(agent_id, project_id)
            );

            CREATE TABLE IF NOT EXISTS cron_jobs (
                id BLOB PRIMARY KEY,
                name TEXT NOT NULL,
                schedule TEXT NOT NULL,
                enabled INTEGER NOT NULL DEFAULT 1,
                agent_id BLOB,
                target_column_id BLOB,
                template_json TEXT,
                last_run_at TEXT
            );

            CREATE TABLE IF NOT EXISTS thread_messages (
                id BLOB PRIMARY KEY,
                task_id BLOB NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                author TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_column ON tasks(column_id, position);
            CREATE INDEX IF NOT EXISTS idx_tasks_agent ON tasks(assigned_agent_id);
            CREATE INDEX IF NOT EXISTS idx_agent_projects ON agent_projects(project_id);
            CREATE INDEX IF NOT EXISTS idx_thread_task ON thread_messages(task_id);
            ",
        )?;
        Ok(())
    }

    // ── Projects / boards / columns ───────────────────────────────────

    pub fn create_project(&self, name: &str) -> BoardResult<Project> {
        let project = Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO projects (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![project.id, project.name, project.created_at],
        )?;
        Ok(project)
    }

    pub fn get_project(&self, id: Uuid) -> BoardResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM projects WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], |row| {
            Ok(Project {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        rows.next().transpose().map_err(Into::into)
    }

    pub fn create_board(&self, project_id: Uuid, name: &str) -> BoardResult<Board> {
        if self.get_project(project_id)?.is_none() {
            return Err(BoardError::not_found("project", project_id));
        }
        let board = Board {
            id: Uuid::new_v4(),
            project_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO boards (id, project_id, name, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![board.id, board.project_id, board.name, board.created_at],
        )?;
        Ok(board)
    }

    pub fn get_board(&self, id: Uuid) -> BoardResult<Option<Board>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, project_id, name, created_at FROM boards WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], |row| {
            Ok(Board {
                id: row.get(0)?,
                project_id: row.get(1)?,
                name: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        rows.next().transpose().map_err(Into::into)
    }

    /// Create a column; when `role` is absent it defaults from the name
    pub fn create_column(
        &self,
        board_id: Uuid,
        name: &str,
        ordinal: i64,
        role: Option<ColumnRole>,
    ) -> BoardResult<Column> {
        if self.get_board(board_id)?.is_none() {
            return Err(BoardError::not_found("board", board_id));
        }
        let column = Column {
            id: Uuid::new_v4(),
            board_id,
            name: name.to_string(),
            ordinal,
            role: role.unwrap_or_else(|| ColumnRole::classify_name(name)),
        };
        self.conn.execute(
            "INSERT INTO columns (id, board_id, name, ordinal, role) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                column.id,
                column.board_id,
                column.name,
                column.ordinal,
                column.role.as_str()
            ],
        )?;
        Ok(column)
    }

    pub fn get_column(&self, id: Uuid) -> BoardResult<Option<Column>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, board_id, name, ordinal, role FROM columns WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], map_column)?;
        rows.next().transpose().map_err(Into::into)
    }

    /// Number of tasks currently in a column
    pub fn column_task_count(&self, column_id: Uuid) -> BoardResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE column_id = ?1",
            params![column_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Tasks in a column, position-ordered
    pub fn column_tasks(&self, column_id: Uuid) -> BoardResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, column_id, position, title, description, priority, assigned_agent_id,
                    parent_task_id, awaiting_input, created_at, updated_at
             FROM tasks WHERE column_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![column_id], map_task)?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    // ── Tasks ─────────────────────────────────────────────────────────

    pub fn get_task(&self, id: Uuid) -> BoardResult<Option<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, column_id, position, title, description, priority, assigned_agent_id,
                    parent_task_id, awaiting_input, created_at, updated_at
             FROM tasks WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], map_task)?;
        rows.next().transpose().map_err(Into::into)
    }

    /// Insert a task at the given index, shifting siblings in one transaction
    pub fn insert_task_at(&self, new: &NewTask, index: i64) -> BoardResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            column_id: new.column_id,
            position: index,
            title: new.title.clone(),
            description: new.description.clone(),
            priority: new.priority,
            assigned_agent_id: new.assigned_agent_id,
            parent_task_id: new.parent_task_id,
            awaiting_input: false,
            created_at: now,
            updated_at: now,
        };

        let tx = self.conn.unchecked_transaction()?;
        let plan = crate::ordering::plan(crate::ordering::ColumnEdit::Insert { index });
        apply_plan(&tx, new.column_id, &plan)?;
        tx.execute(
            "INSERT INTO tasks (id, column_id, position, title, description, priority,
                                assigned_agent_id, parent_task_id, awaiting_input,
                                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                task.id,
                task.column_id,
                task.position,
                task.title,
                task.description,
                task.priority.as_str(),
                task.assigned_agent_id,
                task.parent_task_id,
                task.awaiting_input,
                task.created_at,
                task.updated_at
            ],
        )?;
        tx.commit()?;

        debug!(task_id = %task.id, column_id = %task.column_id, position = index, "inserted task");
        Ok(task)
    }

    /// Relocate a task, shifting siblings in the affected column(s)
    ///
    /// `assignee` is written in the same transaction when the move protocol's
    /// transition check picked one. Positions are assumed pre-validated.
    pub fn move_task_row(
        &self,
        task: &Task,
        dest_column_id: Uuid,
        dest_index: i64,
        assignee: Option<Uuid>,
    ) -> BoardResult<Task> {
        use crate::ordering::{plan, ColumnEdit};

        let tx = self.conn.unchecked_transaction()?;
        if task.column_id == dest_column_id {
            let edit = ColumnEdit::MoveWithin {
                from: task.position,
                to: dest_index,
            };
            apply_plan(&tx, task.column_id, &plan(edit))?;
        } else {
            let remove = plan(ColumnEdit::Remove {
                index: task.position,
            });
            let insert = plan(ColumnEdit::Insert { index: dest_index });
            apply_plan(&tx, task.column_id, &remove)?;
            apply_plan(&tx, dest_column_id, &insert)?;
        }

        match assignee {
            Some(agent_id) => tx.execute(
                "UPDATE tasks SET column_id = ?1, position = ?2, assigned_agent_id = ?3,
                                  updated_at = ?4 WHERE id = ?5",
                params![dest_column_id, dest_index, agent_id, Utc::now(), task.id],
            )?,
            None => tx.execute(
                "UPDATE tasks SET column_id = ?1, position = ?2, updated_at = ?3 WHERE id = ?4",
                params![dest_column_id, dest_index, Utc::now(), task.id],
            )?,
        };
        tx.commit()?;

        self.get_task(task.id)?
            .ok_or_else(|| BoardError::internal(format!("task {} vanished during move", task.id)))
    }

    /// Delete a task and close the position gap it leaves behind
    ///
    /// Returns false when no such task exists.
    pub fn delete_task(&self, id: Uuid) -> BoardResult<bool> {
        let Some(task) = self.get_task(id)? else {
            return Ok(false);
        };

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        let plan = crate::ordering::plan(crate::ordering::ColumnEdit::Remove {
            index: task.position,
        });
        apply_plan(&tx, task.column_id, &plan)?;
        tx.commit()?;
        Ok(true)
    }

    /// Apply a direct edit; all field updates commit atomically
    pub fn update_task_fields(&self, id: Uuid, patch: &TaskPatch) -> BoardResult<Task> {
        let tx = self.conn.unchecked_transaction()?;
        let now = Utc::now();
        if let Some(ref title) = patch.title {
            tx.execute(
                "UPDATE tasks SET title = ?1, updated_at = ?2 WHERE id = ?3",
                params![title, now, id],
            )?;
        }
        if let Some(ref description) = patch.description {
            tx.execute(
                "UPDATE tasks SET description = ?1, updated_at = ?2 WHERE id = ?3",
                params![description, now, id],
            )?;
        }
        if let Some(priority) = patch.priority {
            tx.execute(
                "UPDATE tasks SET priority = ?1, updated_at = ?2 WHERE id = ?3",
                params![priority.as_str(), now, id],
            )?;
        }
        if let Some(assignee) = patch.assigned_agent_id {
            tx.execute(
                "UPDATE tasks SET assigned_agent_id = ?1, updated_at = ?2 WHERE id = ?3",
                params![assignee, now, id],
            )?;
        }
        if let Some(parent) = patch.parent_task_id {
            tx.execute(
                "UPDATE tasks SET parent_task_id = ?1, updated_at = ?2 WHERE id = ?3",
                params![parent, now, id],
            )?;
        }
        if let Some(awaiting) = patch.awaiting_input {
            tx.execute(
                "UPDATE tasks SET awaiting_input = ?1, updated_at = ?2 WHERE id = ?3",
                params![awaiting, now, id],
            )?;
        }
        tx.commit()?;

        self.get_task(id)?
            .ok_or_else(|| BoardError::not_found("task", id))
    }

    // ── Agents & membership directory ─────────────────────────────────

    pub fn create_agent(&self, name: &str, status: AgentStatus) -> BoardResult<Agent> {
        let agent = Agent {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status,
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO agents (id, name, status, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![agent.id, agent.name, agent.status.as_str(), agent.created_at],
        )?;
        Ok(agent)
    }

    pub fn get_agent(&self, id: Uuid) -> BoardResult<Option<Agent>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, status, created_at FROM agents WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], map_agent)?;
        rows.next().transpose().map_err(Into::into)
    }

    pub fn set_agent_status(&self, id: Uuid, status: AgentStatus) -> BoardResult<()> {
        let count = self.conn.execute(
            "UPDATE agents SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        if count == 0 {
            return Err(BoardError::not_found("agent", id));
        }
        Ok(())
    }

    /// Link an agent into a project's candidate pool; idempotent
    pub fn link_agent_to_project(&self, agent_id: Uuid, project_id: Uuid) -> BoardResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO agent_projects (agent_id, project_id) VALUES (?1, ?2)",
            params![agent_id, project_id],
        )?;
        Ok(())
    }

    /// Agents explicitly linked to a project, name-ordered
    pub fn project_agents(&self, project_id: Uuid) -> BoardResult<Vec<Agent>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.name, a.status, a.created_at
             FROM agents a JOIN agent_projects ap ON ap.agent_id = a.id
             WHERE ap.project_id = ?1 ORDER BY a.name",
        )?;
        let rows = stmt.query_map(params![project_id], map_agent)?;
        collect_rows(rows)
    }

    /// All registered agents, name-ordered
    pub fn all_agents(&self) -> BoardResult<Vec<Agent>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, status, created_at FROM agents ORDER BY name")?;
        let rows = stmt.query_map([], map_agent)?;
        collect_rows(rows)
    }

    /// An agent's workload within a project: assigned tasks whose column
    /// role is not `done`
    pub fn agent_workload(&self, agent_id: Uuid, project_id: Uuid) -> BoardResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*)
             FROM tasks t
             JOIN columns c ON c.id = t.column_id
             JOIN boards b ON b.id = c.board_id
             WHERE t.assigned_agent_id = ?1 AND b.project_id = ?2 AND c.role != 'done'",
            params![agent_id, project_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Cron jobs ─────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn create_cron_job(
        &self,
        name: &str,
        schedule: &str,
        enabled: bool,
        agent_id: Option<Uuid>,
        target_column_id: Option<Uuid>,
        template: Option<&TaskTemplate>,
    ) -> BoardResult<CronJob> {
        let template_json = template
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| BoardError::invalid_argument(format!("invalid task template: {e}")))?;
        let job = CronJob {
            id: Uuid::new_v4(),
            name: name.to_string(),
            schedule: schedule.to_string(),
            enabled,
            agent_id,
            target_column_id,
            template: template.cloned(),
            last_run_at: None,
        };
        self.conn.execute(
            "INSERT INTO cron_jobs (id, name, schedule, enabled, agent_id, target_column_id,
                                    template_json, last_run_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL)",
            params![
                job.id,
                job.name,
                job.schedule,
                job.enabled,
                job.agent_id,
                job.target_column_id,
                template_json
            ],
        )?;
        Ok(job)
    }

    pub fn get_cron_job(&self, id: Uuid) -> BoardResult<Option<CronJob>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, schedule, enabled, agent_id, target_column_id, template_json,
                    last_run_at
             FROM cron_jobs WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], map_cron_job)?;
        rows.next().transpose().map_err(Into::into)
    }

    pub fn set_cron_last_run(&self, id: Uuid, at: DateTime<Utc>) -> BoardResult<()> {
        let count = self.conn.execute(
            "UPDATE cron_jobs SET last_run_at = ?1 WHERE id = ?2",
            params![at, id],
        )?;
        if count == 0 {
            return Err(BoardError::not_found("cron job", id));
        }
        Ok(())
    }

    // ── Thread messages ───────────────────────────────────────────────

    pub fn append_thread_message(
        &self,
        task_id: Uuid,
        author: AuthorType,
        content: &str,
    ) -> BoardResult<ThreadMessage> {
        let message = ThreadMessage {
            id: Uuid::new_v4(),
            task_id,
            author,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO thread_messages (id, task_id, author, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                message.id,
                message.task_id,
                message.author.as_str(),
                message.content,
                message.created_at
            ],
        )?;
        Ok(message)
    }

    pub fn thread_messages(&self, task_id: Uuid) -> BoardResult<Vec<ThreadMessage>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_id, author, content, created_at
             FROM thread_messages WHERE task_id = ?1 ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map(params![task_id], map_thread_message)?;
        collect_rows(rows)
    }
}

/// Apply every shift of a plan as one ranged UPDATE per shift
fn apply_plan(tx: &Transaction<'_>, column_id: Uuid, plan: &ShiftPlan) -> BoardResult<()> {
    for shift in &plan.shifts {
        apply_shift(tx, column_id, shift)?;
    }
    Ok(())
}

fn apply_shift(tx: &Transaction<'_>, column_id: Uuid, shift: &PositionShift) -> BoardResult<()> {
    match shift.hi {
        Some(hi) => tx.execute(
            "UPDATE tasks SET position = position + ?1
             WHERE column_id = ?2 AND position >= ?3 AND position <= ?4",
            params![shift.delta, column_id, shift.lo, hi],
        )?,
        None => tx.execute(
            "UPDATE tasks SET position = position + ?1
             WHERE column_id = ?2 AND position >= ?3",
            params![shift.delta, column_id, shift.lo],
        )?,
    };
    Ok(())
}

// ── Row mappers ───────────────────────────────────────────────────────

fn bad_enum(idx: usize, what: &str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        format!("invalid {what}: {value}").into(),
    )
}

fn map_column(row: &Row<'_>) -> rusqlite::Result<Column> {
    let role: String = row.get(4)?;
    Ok(Column {
        id: row.get(0)?,
        board_id: row.get(1)?,
        name: row.get(2)?,
        ordinal: row.get(3)?,
        role: ColumnRole::parse(&role).ok_or_else(|| bad_enum(4, "column role", &role))?,
    })
}

fn map_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let priority: String = row.get(5)?;
    Ok(Task {
        id: row.get(0)?,
        column_id: row.get(1)?,
        position: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        priority: Priority::parse(&priority).ok_or_else(|| bad_enum(5, "priority", &priority))?,
        assigned_agent_id: row.get(6)?,
        parent_task_id: row.get(7)?,
        awaiting_input: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn map_agent(row: &Row<'_>) -> rusqlite::Result<Agent> {
    let status: String = row.get(2)?;
    Ok(Agent {
        id: row.get(0)?,
        name: row.get(1)?,
        status: AgentStatus::parse(&status).ok_or_else(|| bad_enum(2, "agent status", &status))?,
        created_at: row.get(3)?,
    })
}

fn map_cron_job(row: &Row<'_>) -> rusqlite::Result<CronJob> {
    let template_json: Option<String> = row.get(6)?;
    let template = match template_json {
        Some(ref json) => Some(
            serde_json::from_str(json)
                .map_err(|e| bad_enum(6, "task template", &e.to_string()))?,
        ),
        None => None,
    };
    Ok(CronJob {
        id: row.get(0)?,
        name: row.get(1)?,
        schedule: row.get(2)?,
        enabled: row.get(3)?,
        agent_id: row.get(4)?,
        target_column_id: row.get(5)?,
        template,
        last_run_at: row.get(7)?,
    })
}

fn map_thread_message(row: &Row<'_>) -> rusqlite::Result<ThreadMessage> {
    let author: String = row.get(2)?;
    Ok(ThreadMessage {
        id: row.get(0)?,
        task_id: row.get(1)?,
        author: AuthorType::parse(&author).ok_or_else(|| bad_enum(2, "author type", &author))?,
        content: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn collect_rows<T>(
    rows: impl Iterator<Item = rusqlite::Result<T>>,
) -> BoardResult<Vec<T>> {
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
