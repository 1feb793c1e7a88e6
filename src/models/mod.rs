mod entry;
mod wish;

pub use entry::{Entry, EntryKind};
pub use wish::Wish;
