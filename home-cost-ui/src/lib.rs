pub mod app;
pub mod config;
pub mod logging;
pub mod quote;
pub mod state;
pub mod templates;
pub mod views;
