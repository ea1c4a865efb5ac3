pub mod journal;
pub mod navigator;
pub mod storage;
pub mod store;
pub mod ui;

pub use journal::{Entry, EntriesByDate, Mood};
pub use navigator::{CalendarNavigator, CalendarState, DateRange, Direction, ViewMode};
pub use store::{EntryStore, HttpEntryStore, StoreError};
