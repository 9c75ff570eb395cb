//! Placement, retrieval, waste-collection and time-simulation engine for a
//! fleet of cargo containers (§1 Purpose & Scope).
//!
//! [`Core`] is the only entry point external callers need; everything else
//! is exported for callers who want to drive the pieces directly (tests,
//! benches, alternative orchestration).

pub mod config;
pub mod container;
pub mod core;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod item;
pub mod placement;
pub mod plan;
pub mod retrieval;
pub mod scoring;
pub mod simulator;
pub mod space;
pub mod store;
pub mod waste;

pub use container::Container;
pub use core::Core;
pub use error::{Error, Result};
pub use item::Item;
pub use store::Store;

#[cfg(feature = "init_env_logger")]
pub fn init_logger() {
    let _ = env_logger::try_init();
}
