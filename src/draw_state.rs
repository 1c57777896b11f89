use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// One complete draw. Snapshots are never mutated after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawSnapshot {
    pub winning_numbers: Vec<u32>,
    pub drawn_at: Option<DateTime<Utc>>,
}

/// Holder of the latest winning numbers for the lifetime of the process.
///
/// A draw swaps in a whole new snapshot, so a reader sees either the previous
/// list or the new one. Nothing is persisted.
#[derive(Debug, Default)]
pub struct DrawState {
    current: RwLock<Arc<DrawSnapshot>>,
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Arc<DrawSnapshot> {
        Arc::clone(&*self.current.read().await)
    }

    /// Replaces the current draw and returns the new snapshot.
    pub async fn replace(&self, winning_numbers: Vec<u32>) -> Arc<DrawSnapshot> {
        let next = Arc::new(DrawSnapshot {
            winning_numbers,
            drawn_at: Some(Utc::now()),
        });
        let mut current = self.current.write().await;
        *current = Arc::clone(&next);
        next
    }
}
