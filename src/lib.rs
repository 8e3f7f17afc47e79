pub mod app;
pub mod shared;
pub mod templates;
pub mod tui;
pub mod wizard;
