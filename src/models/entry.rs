use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Distinguishes an effort log from the terminal fulfillment note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Energy,
    Fulfillment,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Energy => write!(f, "energy"),
            EntryKind::Fulfillment => write!(f, "fulfillment"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "energy" => Ok(EntryKind::Energy),
            "fulfillment" => Ok(EntryKind::Fulfillment),
            _ => Err(format!(
                "Invalid entry kind '{}'. Valid options: energy, fulfillment",
                s
            )),
        }
    }
}

/// One timestamped user action against a wish.
///
/// Entries are append-only: created once, never edited or deleted.
/// Timestamps are local time because the calendar view matches entries
/// to the user's calendar day, not to UTC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Entry {
    pub fn new(kind: EntryKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The calendar day this entry belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}
