pub mod entry_list;
pub mod month;
pub mod week;
