use clap::{Args, ValueEnum};
use uuid::Uuid;

use crate::models::Wish;
use crate::storage::StorageBackend;
use crate::store::WishStore;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show only fulfilled wishes
    #[arg(long, conflicts_with = "active")]
    pub fulfilled: bool,

    /// Show only active wishes
    #[arg(long)]
    pub active: bool,
}

impl ListCommand {
    pub fn run<S: StorageBackend>(
        &self,
        store: &WishStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut wishes: Vec<&Wish> = store
            .list_wishes()
            .iter()
            .filter(|w| {
                if self.fulfilled {
                    w.fulfilled
                } else if self.active {
                    !w.fulfilled
                } else {
                    true
                }
            })
            .collect();

        // Newest first, matching the original card list
        wishes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if wishes.is_empty() {
            println!("No wishes yet. Plant one with 'wish add'.");
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&wishes)?);
            }
            OutputFormat::Text => {
                for wish in &wishes {
                    let status = if wish.fulfilled { " (fulfilled)" } else { "" };
                    println!("{}{}", wish.goal, status);
                    println!(
                        "  {} {}/{} ({}%)",
                        progress_bar(wish.progress_percent()),
                        wish.current_energy,
                        wish.difficulty,
                        wish.progress_percent()
                    );
                    println!("  ID: {}", wish.id);
                    println!();
                }
                println!("Total: {} wish(es)", wishes.len());
            }
        }

        Ok(())
    }
}

#[derive(Args)]
pub struct ShowCommand {
    /// Wish ID (UUID)
    pub id: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ShowCommand {
    pub fn run<S: StorageBackend>(
        &self,
        store: &WishStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let id =
            Uuid::parse_str(&self.id).map_err(|_| format!("Invalid wish ID: {}", self.id))?;
        let wish = store
            .get_wish(&id)
            .ok_or_else(|| format!("Wish not found: {}", self.id))?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(wish)?);
            }
            OutputFormat::Text => {
                println!("{}", wish);
                println!("Created: {}", wish.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated: {}", wish.updated_at.format("%Y-%m-%d %H:%M"));

                if !wish.entries.is_empty() {
                    println!();
                    println!("Entries:");
                    for entry in &wish.entries {
                        println!(
                            "  {}  [{}] {}",
                            entry.timestamp.format("%Y-%m-%d %H:%M"),
                            entry.kind,
                            entry.content
                        );
                    }
                }

                println!();
                println!("Wish ID: {}", wish.id);
            }
        }

        Ok(())
    }
}

/// Fixed-width text progress bar, like the card view's energy bar.
fn progress_bar(percent: u32) -> String {
    const WIDTH: usize = 20;
    let filled = (percent as usize * WIDTH) / 100;
    format!("[{}{}]", "=".repeat(filled), " ".repeat(WIDTH - filled))
}
