//! In-memory memory store.

use super::MemoryStore;
use crate::Result;
use crate::models::MemoryRecord;
use async_trait::async_trait;

/// Memory store over a fixed set of records.
///
/// Personal lookups filter by user; system and related searches match on
/// lowercase substrings of the query or topics.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    personal: Vec<MemoryRecord>,
    system: Vec<MemoryRecord>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            personal: Vec::new(),
            system: Vec::new(),
        }
    }

    /// Adds a personal memory.
    #[must_use]
    pub fn with_personal(mut self, record: MemoryRecord) -> Self {
        self.personal.push(record);
        self
    }

    /// Adds a system-wide pattern.
    #[must_use]
    pub fn with_system(mut self, record: MemoryRecord) -> Self {
        self.system.push(record);
        self
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn load_personal_memories(&self, user_id: &str) -> Result<Vec<MemoryRecord>> {
        Ok(self
            .personal
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn search_system_patterns(&self, query: &str) -> Result<Vec<MemoryRecord>> {
        let words: Vec<String> = crate::classifier::extract_topics(query);
        Ok(self
            .system
            .iter()
            .filter(|r| {
                let content = r.content.to_lowercase();
                words.iter().any(|w| content.contains(w.as_str()))
            })
            .cloned()
            .collect())
    }

    async fn search_related(&self, topics: &[String]) -> Result<Vec<MemoryRecord>> {
        Ok(self
            .personal
            .iter()
            .chain(self.system.iter())
            .filter(|r| {
                let content = r.content.to_lowercase();
                topics.iter().any(|t| content.contains(t.as_str()))
            })
            .cloned()
            .collect())
    }
}
