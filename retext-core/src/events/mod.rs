//! Coarse-grained progress events.
//! Progress carries no correctness obligation; events may be dropped or
//! coalesced by handlers.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::EventHandler;
pub use types::{
    RefineSkippedEvent, RuleProgressEvent, RuleSkippedEvent, TransformCompleteEvent,
    TransformStartedEvent,
};
