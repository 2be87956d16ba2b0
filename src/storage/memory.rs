use crate::state::CrawlState;
use crate::storage::traits::{StateStore, StorageResult};

/// In-memory `StateStore`, mainly for exercising the run loop without a disk
#[derive(Debug, Clone)]
pub struct MemoryStateStore {
    start_url: String,
    saved: Option<CrawlState>,
    saves: usize,
}

impl MemoryStateStore {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            saved: None,
            saves: 0,
        }
    }

    /// Pre-populates the store as if a previous run had saved `state`
    pub fn with_state(start_url: impl Into<String>, state: CrawlState) -> Self {
        Self {
            start_url: start_url.into(),
            saved: Some(state),
            saves: 0,
        }
    }

    /// Last saved state, if any
    pub fn saved(&self) -> Option<&CrawlState> {
        self.saved.as_ref()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> StorageResult<CrawlState> {
        Ok(self
            .saved
            .clone()
            .unwrap_or_else(|| CrawlState::new(self.start_url.clone())))
    }

    fn save(&mut self, state: &CrawlState) -> StorageResult<()> {
        self.saved = Some(state.clone());
        self.saves += 1;
        Ok(())
    }

    fn reset(&mut self) -> StorageResult<()> {
        self.saved = None;
        Ok(())
    }
}
