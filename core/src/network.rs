//! The **abstraction** over reachability probes.
//!
//! Each protocol gets one implementation of [`Prober`]. The runner only ever
//! talks to the trait, which keeps the sweep logic independent of sockets
//! and lets tests swap in scripted probers.

use std::time::Duration;

use async_trait::async_trait;
use netcheck_common::network::outcome::{ProbeOutcome, Protocol};
use netcheck_common::network::target::Target;

pub mod resolve;
pub mod tcp;
pub mod udp;

pub use tcp::TcpProber;
pub use udp::UdpProber;

/// Decides OPEN or CLOSED for one target over one protocol.
#[async_trait]
pub trait Prober: Send + Sync {
    fn protocol(&self) -> Protocol;

    /// Runs a single attempt. Never fails: every error becomes a CLOSED outcome.
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeOutcome;
}
