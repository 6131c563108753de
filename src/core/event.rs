use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Stable identity; synthesized on load for documents that predate it.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(with = "date::req_date")]
    pub date: NaiveDate,
    #[serde(
        default,
        with = "date::opt_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(default)]
    pub done: bool,
}

impl Event {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            time: None,
            details: String::new(),
            done: false,
        }
    }
}
