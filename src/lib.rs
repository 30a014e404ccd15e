//! Constraint-based monthly duty roster scheduling engine.
//!
//! Given a roster of employees, a set of duty locations, and a target month,
//! this crate produces a day-by-day shift assignment (who works which duty,
//! who is off, who is on holiday) that satisfies all mandatory rest and
//! coverage rules and minimizes a weighted penalty over violated soft rules.
//! When the strictest formulation is infeasible, a relaxation cascade retries
//! with progressively laxer objectives so a best-effort answer is always
//! produced when any answer exists.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
