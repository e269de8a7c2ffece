//! Configuration system for retext.
//! TOML-based: compiled defaults < `retext.toml` < environment variables.

pub mod refine_config;
pub mod retext_config;
pub mod transform_config;

pub use refine_config::RefineConfig;
pub use retext_config::RetextConfig;
pub use transform_config::TransformConfig;
