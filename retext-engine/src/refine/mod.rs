//! Guarded intraline refinement of coarse alignment.

pub mod lines;
pub mod refiner;

pub use lines::LineTable;
pub use refiner::{refine, Refined, RefineStats};
