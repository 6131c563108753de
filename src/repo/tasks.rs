use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::task::Task;
use crate::error::{Error, Result};
use crate::store::Store;

/// CRUD over the `tasks` collection. Every mutation re-reads the document
/// and writes it back whole.
#[derive(Debug, Clone)]
pub struct TaskRepo {
    store: Store,
}

impl TaskRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Append a new task. The title is trimmed; an empty title is
    /// rejected. `date: None` makes the task float to "today" on every
    /// read.
    pub fn add(&self, title: &str, date: Option<NaiveDate>) -> Result<Task> {
        self.add_with_details(title, date, "")
    }

    pub fn add_with_details(
        &self,
        title: &str,
        date: Option<NaiveDate>,
        details: &str,
    ) -> Result<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::ValidationFailed("task title is empty".into()));
        }
        let mut doc = self.store.load();
        let mut task = Task::new(title, date);
        task.details = details.trim().to_string();
        doc.tasks.push(task.clone());
        self.store.save(&doc)?;
        Ok(task)
    }

    /// Flip `done` at a position. Toggling twice restores the original.
    pub fn toggle_done(&self, index: usize) -> Result<Task> {
        let mut doc = self.store.load();
        let task = doc
            .tasks
            .get_mut(index)
            .ok_or_else(|| Error::NotFound(format!("no task at index {index}")))?;
        task.done = !task.done;
        let task = task.clone();
        self.store.save(&doc)?;
        Ok(task)
    }

    /// Remove the task at a position, returning it.
    pub fn delete(&self, index: usize) -> Result<Task> {
        let mut doc = self.store.load();
        if index >= doc.tasks.len() {
            return Err(Error::NotFound(format!("no task at index {index}")));
        }
        let task = doc.tasks.remove(index);
        self.store.save(&doc)?;
        Ok(task)
    }

    pub fn toggle_done_by_id(&self, id: Uuid) -> Result<Task> {
        let mut doc = self.store.load();
        let task = doc
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("no task {id}")))?;
        task.done = !task.done;
        let task = task.clone();
        self.store.save(&doc)?;
        Ok(task)
    }

    pub fn delete_by_id(&self, id: Uuid) -> Result<Task> {
        let mut doc = self.store.load();
        let pos = doc
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("no task {id}")))?;
        let task = doc.tasks.remove(pos);
        self.store.save(&doc)?;
        Ok(task)
    }

    /// The full collection in insertion order.
    pub fn list(&self) -> Vec<Task> {
        self.store.load().tasks
    }

    /// Tasks due on `date`. A task without a date counts as due today.
    pub fn list_for_date(&self, date: NaiveDate, today: NaiveDate) -> Vec<Task> {
        self.store
            .load()
            .tasks
            .into_iter()
            .filter(|t| t.is_due_on(date, today))
            .collect()
    }
}
