//! Domain records for the task board engine
//!
//! Defines the entities the ordering and automation paths operate on:
//! projects, boards, columns, tasks, agents, cron jobs, and thread messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project owning one board and a pool of linked agents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A kanban board; its column set is fixed after creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Semantic role of a column, used by automation rules
///
/// Automation keys off this role, never off the display name: a task moving
/// from a `Backlog` column into an `Active` column triggers auto-assignment,
/// and tasks in `Done` columns are excluded from workload counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Backlog,
    Active,
    Done,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Backlog => "backlog",
            ColumnRole::Active => "active",
            ColumnRole::Done => "done",
        }
    }

    /// Parse a stored role string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "backlog" => Some(ColumnRole::Backlog),
            "active" => Some(ColumnRole::Active),
            "done" => Some(ColumnRole::Done),
            _ => None,
        }
    }

    /// Default role for a column created without an explicit one, derived
    /// from its display name (case-insensitive)
    pub fn classify_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "ideas" | "idea" | "backlog" | "inbox" => ColumnRole::Backlog,
            "done" | "complete" | "completed" | "archive" => ColumnRole::Done,
            _ => ColumnRole::Active,
        }
    }
}

/// A named bucket within a board holding an ordered list of tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    /// Fixed display order among sibling columns; not touched by the engine
    pub ordinal: i64,
    pub role: ColumnRole,
}

/// Ordinal priority scale for tasks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }
}

/// The central mutable entity
///
/// `position` is unique and dense within the owning column: a column with N
/// tasks holds positions exactly `{0, …, N-1}`. Every write path preserves
/// this invariant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub column_id: Uuid,
    /// Dense 0-based index within the owning column
    pub position: i64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assigned_agent_id: Option<Uuid>,
    /// Shallow hierarchy; cycle-checked on write
    pub parent_task_id: Option<Uuid>,
    pub awaiting_input: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Agent lifecycle status; only `Active` agents participate in auto-assignment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Paused,
    Archived,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Paused => "paused",
            AgentStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(AgentStatus::Active),
            "paused" => Some(AgentStatus::Paused),
            "archived" => Some(AgentStatus::Archived),
            _ => None,
        }
    }
}

/// A registered agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub status: AgentStatus,
    pub created_at: DateTime<Utc>,
}

/// Stored template expanded by the trigger materializer
///
/// `title` and `description` may contain the literal token `{{date}}`,
/// replaced at trigger time with the current date as `"Mon D, YYYY"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskTemplate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Option<Priority>,
    pub assigned_agent_id: Option<Uuid>,
}

/// A scheduled job; the schedule string is interpreted by an external
/// scheduler, not by this engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CronJob {
    pub id: Uuid,
    pub name: String,
    pub schedule: String,
    pub enabled: bool,
    /// Default assignee when the template names none
    pub agent_id: Option<Uuid>,
    pub target_column_id: Option<Uuid>,
    pub template: Option<TaskTemplate>,
    pub last_run_at: Option<DateTime<Utc>>,
}

/// Author classification for thread messages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthorType {
    User,
    Agent,
    System,
}

impl AuthorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorType::User => "user",
            AuthorType::Agent => "agent",
            AuthorType::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(AuthorType::User),
            "agent" => Some(AuthorType::Agent),
            "system" => Some(AuthorType::System),
            _ => None,
        }
    }
}

/// One entry in a task's conversation thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadMessage {
    pub id: Uuid,
    pub task_id: Uuid,
    pub author: AuthorType,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
