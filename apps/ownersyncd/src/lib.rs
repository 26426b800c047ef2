//! Library surface of the owner-tag sync daemon.
//!
//! The binary in `main.rs` wires these pieces together; they are exposed
//! here so integration tests can exercise the real router and scheduler.

pub mod config;
pub mod logging;
pub mod routes;
pub mod scheduler;
pub mod state;
