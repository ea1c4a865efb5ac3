mod calendar_views;
mod dialogs;
mod presentation;
mod screen;
mod session;

pub use session::run_tui;
