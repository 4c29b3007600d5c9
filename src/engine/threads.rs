//! Conversation thread sink
//!
//! The move protocol reports automation outcomes as system-authored thread
//! messages. The sink is a trait so the dashboard's conversation service can
//! stand in for the store-backed default, and tests can record appends.

use uuid::Uuid;

use crate::error::BoardResult;
use crate::model::AuthorType;
use crate::store::StoreHandle;

/// Destination for task conversation entries
pub trait ThreadSink: Send + Sync {
    fn append(&self, task_id: Uuid, author: AuthorType, content: &str) -> BoardResult<()>;
}

/// Default sink writing to the board store's thread table
///
/// Holds its own store handle and locks it per append; the engine only calls
/// the sink after releasing its operation lock.
pub struct StoreThreadSink {
    store: StoreHandle,
}

impl StoreThreadSink {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }
}

impl ThreadSink for StoreThreadSink {
    fn append(&self, task_id: Uuid, author: AuthorType, content: &str) -> BoardResult<()> {
        self.store.lock().append_thread_message(task_id, author, content)?;
        Ok(())
    }
}
