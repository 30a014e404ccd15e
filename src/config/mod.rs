//! Configuration loading and management for the roster engine.
//!
//! Engine tunables live in a single YAML file: objective weights, the
//! priority-to-penalty table, and the per-attempt solver time budget.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Relief weight: {}", config.weights.relief);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::EngineConfig;
