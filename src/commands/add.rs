use clap::Args;

use crate::storage::StorageBackend;
use crate::store::WishStore;

use super::MIN_TEXT_LEN;

#[derive(Args)]
pub struct AddCommand {
    /// The desired outcome
    pub goal: String,

    /// The obstacle standing in the way
    #[arg(long)]
    pub challenge: String,

    /// Energy needed to fulfill the wish (1-100)
    #[arg(long, short, default_value_t = 50)]
    pub difficulty: u32,
}

impl AddCommand {
    pub fn run<S: StorageBackend>(
        &self,
        store: &mut WishStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.goal.trim().chars().count() < MIN_TEXT_LEN
            || self.challenge.trim().chars().count() < MIN_TEXT_LEN
        {
            return Err(format!(
                "Goal and challenge need at least {} characters",
                MIN_TEXT_LEN
            )
            .into());
        }

        let wish = store.create_wish(&self.challenge, self.difficulty, &self.goal)?;

        println!("Wish planted:");
        println!();
        println!("{}", wish);
        println!("Wish ID: {}", wish.id);

        Ok(())
    }
}
