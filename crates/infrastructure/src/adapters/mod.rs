//! Adapters implementing application ports
//!
//! This module contains concrete implementations of the port traits
//! defined in the application layer.

mod system_clock;

pub use system_clock::SystemClock;
