use std::time::Duration;

use async_trait::async_trait;
use netcheck_common::error::ProbeError;
use netcheck_common::network::outcome::{ProbeOutcome, Protocol};
use netcheck_common::network::target::Target;
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout};
use tracing::debug;

use super::Prober;
use super::resolve;

/// OPEN iff a TCP handshake completes within the timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct TcpProber;

#[async_trait]
impl Prober for TcpProber {
    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    async fn probe(&self, target: &Target, probe_timeout: Duration) -> ProbeOutcome {
        let start: Instant = Instant::now();

        match handshake(target, probe_timeout).await {
            Ok(()) => ProbeOutcome::open(target.clone(), Protocol::Tcp, start.elapsed()),
            Err(cause) => {
                debug!(endpoint = %target, %cause, "tcp probe closed");
                ProbeOutcome::closed(target.clone(), Protocol::Tcp, cause, start.elapsed())
            }
        }
    }
}

/// Dials the target once. Resolution and connect share the same budget, and
/// the connection is closed as soon as it is established.
pub async fn handshake(target: &Target, probe_timeout: Duration) -> Result<(), ProbeError> {
    let attempt = async {
        let addrs = resolve::resolve(target).await?;
        let stream: TcpStream = TcpStream::connect(&addrs[..])
            .await
            .map_err(ProbeError::from_dial)?;

        debug!(endpoint = %target, peer = ?stream.peer_addr().ok(), "tcp handshake completed");
        drop(stream);
        Ok::<(), ProbeError>(())
    };

    match timeout(probe_timeout, attempt).await {
        Ok(result) => result,
        Err(_elapsed) => Err(ProbeError::Timeout(probe_timeout)),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
