use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::feed::{self, FeedItem};
use crate::error::{Error, Result};
use crate::store::Store;

/// The merged agenda over tasks and events.
///
/// Items are addressed by the stable id each feed row carries, so a
/// mutation resolves to its source collection no matter how the sort
/// rearranged the rows.
#[derive(Debug, Clone)]
pub struct FeedRepo {
    store: Store,
}

impl FeedRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list(&self, today: NaiveDate) -> Vec<FeedItem> {
        feed::build(&self.store.load(), today)
    }

    /// Flip `done` on the underlying task or event.
    pub fn toggle_done(&self, id: Uuid) -> Result<()> {
        let mut doc = self.store.load();
        if let Some(task) = doc.tasks.iter_mut().find(|t| t.id == id) {
            task.done = !task.done;
        } else if let Some(event) = doc.events.iter_mut().find(|e| e.id == id) {
            event.done = !event.done;
        } else {
            return Err(Error::NotFound(format!("no feed item {id}")));
        }
        self.store.save(&doc)
    }

    /// Remove the underlying task or event.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut doc = self.store.load();
        let before = doc.tasks.len() + doc.events.len();
        doc.tasks.retain(|t| t.id != id);
        doc.events.retain(|e| e.id != id);
        if doc.tasks.len() + doc.events.len() == before {
            return Err(Error::NotFound(format!("no feed item {id}")));
        }
        self.store.save(&doc)
    }
}
