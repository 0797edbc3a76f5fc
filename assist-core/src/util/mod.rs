//! Small display-layer helpers: dates and text snippets.

pub mod date;
pub mod text;
