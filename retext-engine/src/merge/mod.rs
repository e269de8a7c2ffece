//! Merged view construction and span coordinate translation.

pub mod view;

pub use view::{build_merged, translate_to_merged, MergedView};
