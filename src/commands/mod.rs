mod add;
mod calendar;
mod config_cmd;
mod energy;
mod list;

pub use add::AddCommand;
pub use calendar::{CalendarCommand, DayCommand};
pub use config_cmd::ConfigCommand;
pub use energy::{EnergyCommand, FulfillCommand};
pub use list::{ListCommand, ShowCommand};

/// Minimum input lengths enforced at the command layer, not in the store.
pub const MIN_TEXT_LEN: usize = 5;
pub const MIN_NOTE_LEN: usize = 10;
