//! External collaborator abstractions.
//!
//! The orchestrator consumes two capabilities:
//!
//! | Trait | Used By | Failure Handling |
//! |-------|---------|------------------|
//! | [`MessageBackend`] | Delegation stage | Errors become a fallback reply |
//! | [`MemoryStore`] | Memory search decision | Errors mark the decision failed |
//!
//! Both are object-safe (`Arc<dyn …>`) so stubs and real clients can be
//! injected at construction time.

mod echo;
mod memory;

pub use echo::EchoBackend;
pub use memory::InMemoryStore;

use crate::Result;
use crate::models::{BackendReply, MemoryRecord, MessageOptions};
use async_trait::async_trait;

/// Final response generation.
#[async_trait]
pub trait MessageBackend: Send + Sync {
    /// The backend name.
    fn name(&self) -> &'static str;

    /// Sends a message together with the enhanced context and selected models.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or rejects the request.
    async fn send_message(&self, text: &str, options: MessageOptions) -> Result<BackendReply>;
}

/// Memory retrieval.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Loads the user's personal memories.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    async fn load_personal_memories(&self, user_id: &str) -> Result<Vec<MemoryRecord>>;

    /// Searches system-wide patterns relevant to the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    ///
    /// Default implementation returns no results.
    async fn search_system_patterns(&self, _query: &str) -> Result<Vec<MemoryRecord>> {
        Ok(Vec::new())
    }

    /// Searches memories related to the given topics.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    ///
    /// Default implementation returns no results.
    async fn search_related(&self, _topics: &[String]) -> Result<Vec<MemoryRecord>> {
        Ok(Vec::new())
    }
}
