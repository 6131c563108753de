use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::core::event::Event;
use crate::error::{Error, Result};
use crate::store::Store;

/// CRUD over the `events` collection, same read-modify-write shape as
/// the task repository.
#[derive(Debug, Clone)]
pub struct EventRepo {
    store: Store,
}

impl EventRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Append a new event. The title is trimmed; an empty title is
    /// rejected.
    pub fn add(
        &self,
        title: &str,
        date: NaiveDate,
        time: Option<NaiveTime>,
        details: &str,
    ) -> Result<Event> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::ValidationFailed("event title is empty".into()));
        }
        let mut doc = self.store.load();
        let mut event = Event::new(title, date);
        event.time = time;
        event.details = details.trim().to_string();
        doc.events.push(event.clone());
        self.store.save(&doc)?;
        Ok(event)
    }

    pub fn toggle_done(&self, index: usize) -> Result<Event> {
        let mut doc = self.store.load();
        let event = doc
            .events
            .get_mut(index)
            .ok_or_else(|| Error::NotFound(format!("no event at index {index}")))?;
        event.done = !event.done;
        let event = event.clone();
        self.store.save(&doc)?;
        Ok(event)
    }

    pub fn delete(&self, index: usize) -> Result<Event> {
        let mut doc = self.store.load();
        if index >= doc.events.len() {
            return Err(Error::NotFound(format!("no event at index {index}")));
        }
        let event = doc.events.remove(index);
        self.store.save(&doc)?;
        Ok(event)
    }

    pub fn toggle_done_by_id(&self, id: Uuid) -> Result<Event> {
        let mut doc = self.store.load();
        let event = doc
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("no event {id}")))?;
        event.done = !event.done;
        let event = event.clone();
        self.store.save(&doc)?;
        Ok(event)
    }

    pub fn delete_by_id(&self, id: Uuid) -> Result<Event> {
        let mut doc = self.store.load();
        let pos = doc
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("no event {id}")))?;
        let event = doc.events.remove(pos);
        self.store.save(&doc)?;
        Ok(event)
    }

    /// The full collection in insertion order.
    pub fn list(&self) -> Vec<Event> {
        self.store.load().events
    }

    /// Events on a given day, insertion order preserved.
    pub fn list_for_date(&self, date: NaiveDate) -> Vec<Event> {
        self.store
            .load()
            .events
            .into_iter()
            .filter(|e| e.date == date)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_repo() -> (tempfile::TempDir, EventRepo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = EventRepo::new(Store::new(dir.path().join("data.json")));
        (dir, repo)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_appends_with_defaults() {
        let (_dir, repo) = temp_repo();
        let event = repo
            .add(
                "Chemistry lab",
                ymd(2024, 2, 1),
                NaiveTime::from_hms_opt(9, 30, 0),
                "Bring goggles",
            )
            .unwrap();
        assert!(!event.done);

        let listed = repo.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].details, "Bring goggles");
    }

    #[test]
    fn empty_title_is_rejected() {
        let (_dir, repo) = temp_repo();
        assert!(matches!(
            repo.add("  ", ymd(2024, 2, 1), None, ""),
            Err(Error::ValidationFailed(_))
        ));
        assert!(repo.list().is_empty());
    }

    #[test]
    fn positional_toggle_and_delete() {
        let (_dir, repo) = temp_repo();
        repo.add("One", ymd(2024, 2, 1), None, "").unwrap();
        repo.add("Two", ymd(2024, 2, 2), None, "").unwrap();

        assert!(repo.toggle_done(1).unwrap().done);
        assert!(!repo.toggle_done(1).unwrap().done);
        assert!(matches!(repo.toggle_done(5), Err(Error::NotFound(_))));

        assert_eq!(repo.delete(0).unwrap().title, "One");
        assert_eq!(repo.list()[0].title, "Two");
    }

    #[test]
    fn list_for_date_filters() {
        let (_dir, repo) = temp_repo();
        repo.add("On the day", ymd(2024, 2, 1), None, "").unwrap();
        repo.add("Day after", ymd(2024, 2, 2), None, "").unwrap();

        let day = repo.list_for_date(ymd(2024, 2, 1));
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].title, "On the day");
    }
}
