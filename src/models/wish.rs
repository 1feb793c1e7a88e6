use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::entry::{Entry, EntryKind};

/// One user-declared goal with a difficulty threshold.
///
/// `current_energy` caches the number of energy entries; the store
/// reconciles it against `entries` when a snapshot is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wish {
    pub id: Uuid,
    pub challenge: String,
    pub difficulty: u32,
    pub goal: String,
    pub current_energy: u32,
    pub fulfilled: bool,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
    pub entries: Vec<Entry>,
}

impl Wish {
    pub fn new(challenge: impl Into<String>, difficulty: u32, goal: impl Into<String>) -> Self {
        let now = Local::now();
        Self {
            id: Uuid::new_v4(),
            challenge: challenge.into(),
            difficulty,
            goal: goal.into(),
            current_energy: 0,
            fulfilled: false,
            created_at: now,
            updated_at: now,
            entries: Vec::new(),
        }
    }

    /// Progress toward fulfillment, capped at 100.
    pub fn progress_percent(&self) -> u32 {
        let pct = (f64::from(self.current_energy) * 100.0 / f64::from(self.difficulty)).round();
        (pct as u32).min(100)
    }

    /// Counts the energy entries actually recorded, ignoring the cached counter.
    pub fn energy_entry_count(&self) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Energy)
            .count() as u32
    }
}

impl fmt::Display for Wish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wish: {}", self.goal)?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(f, "Challenge: {}", self.challenge)?;
        writeln!(f, "Difficulty: {}/100", self.difficulty)?;
        writeln!(
            f,
            "Energy: {}/{} ({}%)",
            self.current_energy,
            self.difficulty,
            self.progress_percent()
        )?;
        if self.fulfilled {
            writeln!(f, "Status: fulfilled")?;
        } else {
            writeln!(f, "Status: active")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wish_new() {
        let wish = Wish::new("procrastination", 50, "finish project");

        assert_eq!(wish.challenge, "procrastination");
        assert_eq!(wish.difficulty, 50);
        assert_eq!(wish.goal, "finish project");
        assert_eq!(wish.current_energy, 0);
        assert!(!wish.fulfilled);
        assert!(wish.entries.is_empty());
        assert_eq!(wish.created_at, wish.updated_at);
    }

    #[test]
    fn test_progress_percent() {
        let mut wish = Wish::new("challenge", 50, "goal");
        assert_eq!(wish.progress_percent(), 0);

        wish.current_energy = 3;
        assert_eq!(wish.progress_percent(), 6);

        wish.current_energy = 50;
        assert_eq!(wish.progress_percent(), 100);
    }

    #[test]
    fn test_progress_percent_rounds() {
        let mut wish = Wish::new("challenge", 3, "goal");
        wish.current_energy = 1;
        // 33.33 rounds down
        assert_eq!(wish.progress_percent(), 33);

        wish.current_energy = 2;
        // 66.67 rounds up
        assert_eq!(wish.progress_percent(), 67);
    }

    #[test]
    fn test_progress_percent_caps_at_100() {
        let mut wish = Wish::new("challenge", 10, "goal");
        wish.current_energy = 25;
        assert_eq!(wish.progress_percent(), 100);
    }

    #[test]
    fn test_energy_entry_count_ignores_fulfillment() {
        let mut wish = Wish::new("challenge", 50, "goal");
        wish.entries.push(Entry::new(EntryKind::Energy, "one"));
        wish.entries.push(Entry::new(EntryKind::Energy, "two"));
        wish.entries.push(Entry::new(EntryKind::Fulfillment, "done"));

        assert_eq!(wish.energy_entry_count(), 2);
    }

    #[test]
    fn test_wish_display() {
        let mut wish = Wish::new("too busy", 50, "learn the cello");
        wish.current_energy = 3;

        let output = format!("{}", wish);
        assert!(output.contains("learn the cello"));
        assert!(output.contains("too busy"));
        assert!(output.contains("3/50 (6%)"));
        assert!(output.contains("Status: active"));
    }

    #[test]
    fn test_wish_json_roundtrip() {
        let mut wish = Wish::new("challenge", 42, "goal");
        wish.entries
            .push(Entry::new(EntryKind::Energy, "worked on it"));
        wish.current_energy = 1;

        let json = serde_json::to_string(&wish).unwrap();
        let parsed: Wish = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, wish);
    }
}
