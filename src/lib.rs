//! Agentboard - Task Board Ordering & Workflow Automation Engine
//!
//! The core subsystem of an AI-agent orchestration dashboard: dense, gapless
//! task ordering within and across kanban columns, plus the two automation
//! rules driven by task placement.
//!
//! # Overview
//!
//! This crate provides:
//! - A SQLite-backed ordering store with transactional position updates
//! - A pure position reindexer keeping every column's positions dense
//! - The move protocol (`MoveTask`) with its backlog-to-active transition
//!   check and automatic agent assignment
//! - The workload-balanced assignment policy
//! - The cron trigger materializer expanding stored task templates
//!
//! # Quick Start
//!
//! ```rust
//! use agentboard::config::AutomationSection;
//! use agentboard::engine::Engine;
//! use agentboard::model::{ColumnRole, Priority};
//! use agentboard::store::{NewTask, StoreHandle};
//!
//! let store = StoreHandle::in_memory().unwrap();
//! let (todo, doing) = {
//!     let guard = store.lock();
//!     let project = guard.create_project("orchestrator").unwrap();
//!     let board = guard.create_board(project.id, "main").unwrap();
//!     let todo = guard
//!         .create_column(board.id, "Ideas", 0, Some(ColumnRole::Backlog))
//!         .unwrap();
//!     let doing = guard
//!         .create_column(board.id, "Doing", 1, Some(ColumnRole::Active))
//!         .unwrap();
//!     (todo.id, doing.id)
//! };
//!
//! let engine = Engine::new(store, AutomationSection::default());
//! let task = engine
//!     .create_task(NewTask {
//!         column_id: todo,
//!         title: "Wire up discovery".to_string(),
//!         description: String::new(),
//!         priority: Priority::High,
//!         assigned_agent_id: None,
//!         parent_task_id: None,
//!     })
//!     .unwrap();
//!
//! // Move it into work; positions in both columns stay dense.
//! let moved = engine.move_task(task.id, doing, 0).unwrap();
//! assert_eq!(moved.position, 0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod observability;
pub mod ordering;
pub mod store;
pub mod testing;

pub use config::EngineConfig;
pub use engine::{AssignmentOutcome, Engine, ThreadSink, TriggerOutcome, TriggerSummary};
pub use error::{BoardError, BoardResult};
pub use model::*;
pub use store::{BoardStore, NewTask, StoreHandle, TaskPatch};
