//! The record store: single source of truth for all wishes and entries.
//!
//! The store owns the full collection in memory and writes it back to its
//! storage backend as one JSON snapshot after every mutation. A failed
//! persist surfaces as [`StoreError::Persistence`] but does not roll back
//! the in-memory change; the next successful mutation writes everything.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Entry, EntryKind, Wish};
use crate::storage::StorageBackend;

mod error;

pub use error::StoreError;

/// Difficulty bounds for a new wish.
pub const MIN_DIFFICULTY: u32 = 1;
pub const MAX_DIFFICULTY: u32 = 100;

/// An entry paired with the wish it belongs to, for the per-day view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntryOnDate {
    pub wish_id: Uuid,
    pub wish_goal: String,
    pub entry: Entry,
}

pub struct WishStore<S: StorageBackend> {
    wishes: Vec<Wish>,
    storage: S,
}

impl<S: StorageBackend> WishStore<S> {
    /// Opens the store, loading the snapshot from the backend.
    ///
    /// A missing snapshot means an empty store. An unreadable or
    /// unparseable snapshot is a persistence error; the caller decides
    /// whether to give up or point at a different data file.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let wishes: Vec<Wish> = match storage
            .load()
            .map_err(|e| StoreError::Persistence(e.to_string()))?
        {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Persistence(format!("corrupt snapshot: {}", e)))?,
            None => Vec::new(),
        };

        debug!(wishes = wishes.len(), "loaded snapshot");

        let mut store = Self { wishes, storage };
        store.reconcile_energy();
        Ok(store)
    }

    /// Validates the cached energy counters against the entry lists.
    ///
    /// A mismatch is a recoverable inconsistency: the entries are the
    /// source of truth, so the counter is repaired in memory. The fix
    /// reaches disk with the next persisted mutation.
    fn reconcile_energy(&mut self) {
        for wish in &mut self.wishes {
            let counted = wish.energy_entry_count();
            if wish.current_energy != counted {
                warn!(
                    wish_id = %wish.id,
                    cached = wish.current_energy,
                    counted,
                    "energy counter disagrees with entries, repairing"
                );
                wish.current_energy = counted;
            }
        }
    }

    /// Creates a new wish and persists the snapshot.
    ///
    /// The returned wish is an owned copy; later mutations go through the
    /// store, not through the returned value.
    pub fn create_wish(
        &mut self,
        challenge: &str,
        difficulty: u32,
        goal: &str,
    ) -> Result<Wish, StoreError> {
        let challenge = challenge.trim();
        let goal = goal.trim();

        if challenge.is_empty() {
            return Err(StoreError::Validation(
                "challenge must not be empty".to_string(),
            ));
        }
        if goal.is_empty() {
            return Err(StoreError::Validation("goal must not be empty".to_string()));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(StoreError::Validation(format!(
                "difficulty must be between {} and {}, got {}",
                MIN_DIFFICULTY, MAX_DIFFICULTY, difficulty
            )));
        }

        let wish = Wish::new(challenge, difficulty, goal);
        self.wishes.push(wish.clone());
        self.persist()?;
        Ok(wish)
    }

    /// Looks up a wish by id. Pure read; `None` means not found.
    pub fn get_wish(&self, id: &Uuid) -> Option<&Wish> {
        self.wishes.iter().find(|w| &w.id == id)
    }

    /// All wishes in insertion order. Display ordering is the caller's job.
    pub fn list_wishes(&self) -> &[Wish] {
        &self.wishes
    }

    /// Appends an energy entry to a wish and bumps its counter.
    ///
    /// Fulfilled wishes are terminal and reject further energy.
    pub fn inject_energy(&mut self, wish_id: &Uuid, content: &str) -> Result<Entry, StoreError> {
        let wish = self
            .wishes
            .iter_mut()
            .find(|w| &w.id == wish_id)
            .ok_or(StoreError::NotFound(*wish_id))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(StoreError::Validation(
                "energy note must not be empty".to_string(),
            ));
        }
        if wish.fulfilled {
            return Err(StoreError::AlreadyFulfilled(*wish_id));
        }

        let entry = Entry::new(EntryKind::Energy, content);
        wish.entries.push(entry.clone());
        wish.current_energy += 1;
        wish.updated_at = Local::now();

        self.persist()?;
        Ok(entry)
    }

    /// Marks a wish fulfilled and records the reflection note.
    ///
    /// This is the terminal transition; it happens at most once per wish.
    pub fn fulfill_wish(&mut self, wish_id: &Uuid, content: &str) -> Result<(), StoreError> {
        let wish = self
            .wishes
            .iter_mut()
            .find(|w| &w.id == wish_id)
            .ok_or(StoreError::NotFound(*wish_id))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(StoreError::Validation(
                "fulfillment note must not be empty".to_string(),
            ));
        }
        if wish.fulfilled {
            return Err(StoreError::AlreadyFulfilled(*wish_id));
        }

        wish.fulfilled = true;
        wish.entries.push(Entry::new(EntryKind::Fulfillment, content));
        wish.updated_at = Local::now();

        self.persist()
    }

    /// All entries whose local calendar day equals `date`.
    ///
    /// Wishes are scanned in store order, entries within a wish in append
    /// order, matching the order the calendar detail view shows them.
    pub fn entries_on_date(&self, date: NaiveDate) -> Vec<EntryOnDate> {
        let mut found = Vec::new();
        for wish in &self.wishes {
            for entry in &wish.entries {
                if entry.date() == date {
                    found.push(EntryOnDate {
                        wish_id: wish.id,
                        wish_goal: wish.goal.clone(),
                        entry: entry.clone(),
                    });
                }
            }
        }
        found
    }

    /// The distinct local dates that have at least one entry.
    pub fn dates_with_entries(&self) -> BTreeSet<NaiveDate> {
        self.wishes
            .iter()
            .flat_map(|w| w.entries.iter())
            .map(|e| e.date())
            .collect()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&self.wishes)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;
        self.storage
            .save(&bytes)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        debug!(wishes = self.wishes.len(), "persisted snapshot");
        Ok(())
    }
}
