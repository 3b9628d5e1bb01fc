//! Terminal views.
//!
//! - `calculator` draws the whole calculator screen
//! - `status_bar` renders the key hint line at the bottom

mod calculator;
mod status_bar;

pub use calculator::render;
pub use status_bar::{KeyHint, hints, status_line};
