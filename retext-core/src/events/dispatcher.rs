//! Synchronous event dispatch.

use std::sync::Arc;

use super::handler::EventHandler;
use super::types::*;

/// Fans events out to registered handlers, in registration order.
///
/// A panicking handler is isolated: the panic is caught and the remaining
/// handlers still receive the event. With no handlers registered, emitting
/// iterates an empty Vec and costs nothing.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn emit<F: Fn(&dyn EventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if outcome.is_err() {
                tracing::warn!("event handler panicked; remaining handlers still notified");
            }
        }
    }

    pub fn emit_transform_started(&self, event: &TransformStartedEvent) {
        self.emit(|h| h.on_transform_started(event));
    }

    pub fn emit_rule_progress(&self, event: &RuleProgressEvent) {
        self.emit(|h| h.on_rule_progress(event));
    }

    pub fn emit_rule_skipped(&self, event: &RuleSkippedEvent) {
        self.emit(|h| h.on_rule_skipped(event));
    }

    pub fn emit_transform_complete(&self, event: &TransformCompleteEvent) {
        self.emit(|h| h.on_transform_complete(event));
    }

    pub fn emit_refine_skipped(&self, event: &RefineSkippedEvent) {
        self.emit(|h| h.on_refine_skipped(event));
    }
}
