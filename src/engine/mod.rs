//! The scheduling engine: model construction, the relaxation cascade, and
//! result assembly.
//!
//! A solve runs in three stages. First the request is validated and every
//! name resolved into a [`context::SolveContext`]. Then, for each level of
//! the relaxation ladder, a constraint model is built and handed to the
//! solver under a wall-clock budget. The first accepted solution is
//! assembled into a read-only schedule; if no level yields one, exhaustion
//! is reported as an outcome rather than an error.

mod assemble;
mod context;
mod model;
mod plan;
mod relaxation;

pub use plan::{ObjectiveWeights, RELAXATION_LEVELS, RelaxationPolicy, SolvePlan};
pub use relaxation::Scheduler;
