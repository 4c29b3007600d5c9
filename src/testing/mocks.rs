//! Mock implementations and fixtures for testing
//!
//! Provides a recording thread sink and a seeded board fixture so the
//! engine's automation paths can be exercised without standing up the
//! dashboard around them.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::config::AutomationSection;
use crate::engine::{Engine, ThreadSink};
use crate::error::BoardResult;
use crate::model::{AgentStatus, AuthorType, ColumnRole, Priority};
use crate::store::{NewTask, StoreHandle};

/// One append captured by [`RecordingSink`]
pub type RecordedNote = (Uuid, AuthorType, String);

/// Thread sink that records appends instead of persisting them
#[derive(Default)]
pub struct RecordingSink {
    notes: Mutex<Vec<RecordedNote>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notes(&self) -> Vec<RecordedNote> {
        self.notes.lock().unwrap().clone()
    }
}

impl ThreadSink for RecordingSink {
    fn append(&self, task_id: Uuid, author: AuthorType, content: &str) -> BoardResult<()> {
        self.notes
            .lock()
            .unwrap()
            .push((task_id, author, content.to_string()));
        Ok(())
    }
}

/// A seeded single-board fixture with a backlog, an active, and a done column
pub struct BoardFixture {
    pub engine: Engine,
    pub sink: Arc<RecordingSink>,
    pub project_id: Uuid,
    pub board_id: Uuid,
    pub ideas: Uuid,
    pub todo: Uuid,
    pub done: Uuid,
}

impl BoardFixture {
    /// In-memory engine over a fresh board with default automation
    pub fn new() -> Self {
        Self::with_automation(AutomationSection::default())
    }

    pub fn with_automation(automation: AutomationSection) -> Self {
        let store = StoreHandle::in_memory().expect("in-memory store");
        let (project_id, board_id, ideas, todo, done) = {
            let guard = store.lock();
            let project = guard.create_project("orchestrator").expect("project");
            let board = guard.create_board(project.id, "main").expect("board");
            let ideas = guard
                .create_column(board.id, "Ideas", 0, Some(ColumnRole::Backlog))
                .expect("ideas column");
            let todo = guard
                .create_column(board.id, "Todo", 1, Some(ColumnRole::Active))
                .expect("todo column");
            let done = guard
                .create_column(board.id, "Done", 2, Some(ColumnRole::Done))
                .expect("done column");
            (project.id, board.id, ideas.id, todo.id, done.id)
        };
        let sink = RecordingSink::new();
        let engine = Engine::with_thread_sink(store, automation, sink.clone());
        Self {
            engine,
            sink,
            project_id,
            board_id,
            ideas,
            todo,
            done,
        }
    }

    /// Create an unassigned medium-priority task in a column
    pub fn task(&self, column_id: Uuid, title: &str) -> Uuid {
        self.engine
            .create_task(NewTask {
                column_id,
                title: title.to_string(),
                description: String::new(),
                priority: Priority::Medium,
                assigned_agent_id: None,
                parent_task_id: None,
            })
            .expect("task")
            .id
    }

    /// Register an agent linked to the fixture project
    pub fn project_agent(&self, name: &str, status: AgentStatus) -> Uuid {
        let guard = self.engine.store().lock();
        let agent = guard.create_agent(name, status).expect("agent");
        guard
            .link_agent_to_project(agent.id, self.project_id)
            .expect("link");
        agent.id
    }

    /// Positions of a column's tasks, in listing order
    pub fn positions(&self, column_id: Uuid) -> Vec<(Uuid, i64)> {
        self.engine
            .column_tasks(column_id)
            .expect("tasks")
            .into_iter()
            .map(|t| (t.id, t.position))
            .collect()
    }
}

impl Default for BoardFixture {
    fn default() -> Self {
        Self::new()
    }
}
