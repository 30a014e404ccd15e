//! HTTP API module for the roster engine.
//!
//! This module provides the REST API endpoint for solving monthly duty
//! schedules.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ScheduleRequestBody;
pub use response::ApiError;
pub use state::AppState;
