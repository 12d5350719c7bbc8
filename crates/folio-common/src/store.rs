//! Persistence boundary consumed by the selection engine.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::paper::{Paper, PaperId, PaperStatus};

/// One `unpicked -> picked` move, carrying which terminal outcome applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub id: PaperId,
    pub status: PaperStatus,
}

impl StatusTransition {
    pub fn new(id: PaperId, status: PaperStatus) -> Self {
        Self { id, status }
    }
}

/// Storage operations the engine needs.
///
/// Implementations own all persistent paper state. `mark_picked` must apply
/// the whole batch atomically: either every transition lands or none does.
/// A transition whose paper is no longer `unpicked` fails the batch.
pub trait PaperStore {
    /// All papers still in the candidate pool, in insertion order.
    fn list_unpicked(&self) -> Result<Vec<Paper>>;

    /// Papers ingested at or after `since`, regardless of status.
    fn list_recent_since(&self, since: DateTime<Utc>) -> Result<Vec<Paper>>;

    /// Apply a batch of terminal transitions in one atomic unit.
    fn mark_picked(&mut self, transitions: &[StatusTransition]) -> Result<()>;

    /// Size of the candidate pool.
    fn count_unpicked(&self) -> Result<usize> {
        Ok(self.list_unpicked()?.len())
    }
}
