pub mod month_view;
pub mod theme;
pub mod week_view;
