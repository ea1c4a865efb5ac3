pub mod entry;

pub use entry::{Entry, EntryDraft, EntryPage, EntriesByDate, Mood, UnknownMood};
