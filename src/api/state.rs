//! Application state for the HTTP API.

use std::sync::Arc;

use crate::engine::Scheduler;

/// Shared application state passed to all handlers.
///
/// The scheduler is stateless between requests, so one shared instance
/// serves every concurrent solve.
#[derive(Clone)]
pub struct AppState {
    scheduler: Arc<Scheduler>,
}

impl AppState {
    /// Creates application state around a scheduler.
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler: Arc::new(scheduler),
        }
    }

    /// Returns the shared scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
