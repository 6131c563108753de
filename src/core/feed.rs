use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::store::Document;

use super::event::Event;
use super::task::Task;

/// Which collection a feed item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Task,
    Event,
}

impl Kind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Event => "event",
        }
    }
}

/// One row of the merged agenda: a task or event normalized for display.
/// Carries the source item's id so mutations resolve without positional
/// indices.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub details: String,
    pub done: bool,
    pub kind: Kind,
}

impl FeedItem {
    fn from_task(task: &Task, today: NaiveDate) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            date: task.effective_date(today),
            time: None,
            details: task.details.clone(),
            done: task.done,
            kind: Kind::Task,
        }
    }

    fn from_event(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            date: event.date,
            time: event.time,
            details: event.details.clone(),
            done: event.done,
            kind: Kind::Event,
        }
    }
}

/// Merge tasks and events into one list, most recent date first.
///
/// The sort is stable: items sharing a date keep insertion order, tasks
/// before events. Undated tasks are slotted at `today`.
pub fn build(doc: &Document, today: NaiveDate) -> Vec<FeedItem> {
    let mut feed: Vec<FeedItem> = doc
        .tasks
        .iter()
        .map(|t| FeedItem::from_task(t, today))
        .collect();
    feed.extend(doc.events.iter().map(FeedItem::from_event));
    feed.sort_by(|a, b| b.date.cmp(&a.date));
    feed
}
