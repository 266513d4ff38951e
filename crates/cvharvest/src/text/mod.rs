//! Text normalization applied to everything an extractor produces.

pub mod cleaner;

pub use cleaner::{clean_text, cleaned_length};
