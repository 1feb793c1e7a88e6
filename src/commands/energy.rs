use clap::Args;
use uuid::Uuid;

use crate::storage::StorageBackend;
use crate::store::WishStore;

use super::MIN_NOTE_LEN;

#[derive(Args)]
pub struct EnergyCommand {
    /// Wish ID (UUID)
    pub id: String,

    /// What you did toward the wish
    pub content: String,
}

impl EnergyCommand {
    pub fn run<S: StorageBackend>(
        &self,
        store: &mut WishStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let id =
            Uuid::parse_str(&self.id).map_err(|_| format!("Invalid wish ID: {}", self.id))?;
        check_note_length(&self.content)?;

        store.inject_energy(&id, &self.content)?;

        // inject_energy guarantees the wish exists at this point
        if let Some(wish) = store.get_wish(&id) {
            println!("Energy injected into '{}'.", wish.goal);
            println!(
                "Energy: {}/{} ({}%)",
                wish.current_energy,
                wish.difficulty,
                wish.progress_percent()
            );
        }

        Ok(())
    }
}

#[derive(Args)]
pub struct FulfillCommand {
    /// Wish ID (UUID)
    pub id: String,

    /// Your reflection on the fulfilled wish
    pub content: String,
}

impl FulfillCommand {
    pub fn run<S: StorageBackend>(
        &self,
        store: &mut WishStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let id =
            Uuid::parse_str(&self.id).map_err(|_| format!("Invalid wish ID: {}", self.id))?;
        check_note_length(&self.content)?;

        store.fulfill_wish(&id, &self.content)?;

        if let Some(wish) = store.get_wish(&id) {
            println!("Wish fulfilled: {}", wish.goal);
            println!("Entries logged: {}", wish.entries.len());
        }

        Ok(())
    }
}

fn check_note_length(content: &str) -> Result<(), String> {
    if content.trim().chars().count() < MIN_NOTE_LEN {
        return Err(format!("The note needs at least {} characters", MIN_NOTE_LEN));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_note_length() {
        assert!(check_note_length("worked for two hours").is_ok());
        assert!(check_note_length("short").is_err());
        // Whitespace padding does not count toward the minimum
        assert!(check_note_length("      tiny      ").is_err());
    }
}
