use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Stable identity; synthesized on load for documents that predate it.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Older documents named this field `task`.
    #[serde(alias = "task")]
    pub title: String,
    #[serde(default)]
    pub done: bool,
    /// Due date. A task without one counts as due today, whatever today
    /// happens to be when the list is read.
    #[serde(
        default,
        with = "date::opt_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl Task {
    pub fn new(title: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            done: false,
            date,
            details: String::new(),
        }
    }

    /// The date this task counts against: its own, or today for undated
    /// tasks.
    pub fn effective_date(&self, today: NaiveDate) -> NaiveDate {
        self.date.unwrap_or(today)
    }

    pub fn is_due_on(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.effective_date(today) == date
    }
}
