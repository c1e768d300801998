//! # Netcheck Core
//!
//! The reachability probing engine: one [`network::Prober`] per protocol and
//! the [`runner::Runner`] that sweeps a configuration with them.

pub mod network;
pub mod runner;
