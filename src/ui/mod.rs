//! Terminal UI
//!
//! Colors, glyphs, markdown rendering, and the loading spinner.

pub mod markdown;
pub mod spinner;
pub mod style;
