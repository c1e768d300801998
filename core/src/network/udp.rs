//! Best-effort UDP liveness.
//!
//! UDP has no handshake, so sending a datagram proves nothing about the
//! remote side. The probe sends a fixed payload and treats any non-empty
//! reply, from any sender, as OPEN. Silence is CLOSED, even if a listener
//! received the datagram and chose not to answer.
//!
//! One deadline, fixed on entry, bounds resolution, the send
//! and the read. The reply wait is a race between the socket read, bounded
//! by that deadline, and a backstop two seconds past it. Whichever future
//! loses is dropped, which cancels it, so no task outlives the probe.

use std::future::Future;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use netcheck_common::error::ProbeError;
use netcheck_common::network::outcome::{ProbeOutcome, Protocol};
use netcheck_common::network::target::Target;
use tokio::net::UdpSocket;
use tokio::time::error::Elapsed;
use tokio::time::{Instant, sleep_until, timeout_at};
use tracing::{debug, warn};

use super::Prober;
use super::resolve;

pub const PROBE_PAYLOAD: &[u8] = b"CONNECTED-MODE SOCKET";
pub const BACKSTOP_SLACK: Duration = Duration::from_secs(2);
const RECV_BUFFER_SIZE: usize = 1500;

/// OPEN iff any bytes come back before the deadline.
#[derive(Clone, Copy, Debug, Default)]
pub struct UdpProber;

#[async_trait]
impl Prober for UdpProber {
    fn protocol(&self) -> Protocol {
        Protocol::Udp
    }

    async fn probe(&self, target: &Target, probe_timeout: Duration) -> ProbeOutcome {
        let start: Instant = Instant::now();

        match exchange(target, probe_timeout).await {
            Ok(received) => {
                debug!(endpoint = %target, received, "udp reply received");
                ProbeOutcome::open(target.clone(), Protocol::Udp, start.elapsed())
            }
            Err(cause) => {
                debug!(endpoint = %target, %cause, "udp probe closed");
                ProbeOutcome::closed(target.clone(), Protocol::Udp, cause, start.elapsed())
            }
        }
    }
}

/// Sends the probe payload and waits for a reply. Returns the reply size,
/// which is always non-zero on success.
pub async fn exchange(target: &Target, probe_timeout: Duration) -> Result<usize, ProbeError> {
    exchange_with(target, probe_timeout, resolve::resolve(target)).await
}

/// [`exchange`] with the address lookup supplied by the caller. The lookup
/// is awaited under the same deadline as the send and the read.
async fn exchange_with<L>(target: &Target, probe_timeout: Duration, lookup: L) -> Result<usize, ProbeError>
where
    L: Future<Output = Result<Vec<SocketAddr>, ProbeError>>,
{
    let start: Instant = Instant::now();
    let deadline: Instant = start + probe_timeout;
    let backstop_at: Instant = deadline + BACKSTOP_SLACK;

    let remote: SocketAddr = match timeout_at(deadline, lookup).await {
        Ok(addrs) => addrs?
            .into_iter()
            .next()
            .ok_or_else(|| ProbeError::Resolution(format!("no addresses found for {target}")))?,
        Err(_elapsed) => return Err(ProbeError::Timeout(probe_timeout)),
    };

    let socket: UdpSocket = UdpSocket::bind(wildcard_for(&remote)).await.map_err(|e| {
        warn!(endpoint = %target, "unable to open local udp socket: {e}");
        ProbeError::Socket(e.to_string())
    })?;

    match timeout_at(deadline, socket.send_to(PROBE_PAYLOAD, remote)).await {
        Ok(Ok(_sent)) => {}
        Ok(Err(e)) => return Err(ProbeError::Write(e.to_string())),
        Err(_elapsed) => return Err(ProbeError::Timeout(probe_timeout)),
    }

    let mut buf: [u8; RECV_BUFFER_SIZE] = [0u8; RECV_BUFFER_SIZE];
    let read_waiter = timeout_at(deadline, socket.recv_from(&mut buf));
    let received: Result<usize, ProbeError> = await_reply(read_waiter, backstop_at, target, probe_timeout).await;

    drop(socket);

    match received? {
        0 => Err(ProbeError::NoResponse),
        n => Ok(n),
    }
}

/// Races the deadline-bound read against the backstop at `backstop_at`.
async fn await_reply<R>(
    read_waiter: R,
    backstop_at: Instant,
    target: &Target,
    probe_timeout: Duration,
) -> Result<usize, ProbeError>
where
    R: Future<Output = Result<io::Result<(usize, SocketAddr)>, Elapsed>>,
{
    tokio::select! {
        read = read_waiter => match read {
            Ok(Ok((n, from))) => {
                debug!(endpoint = %target, %from, n, "udp datagram received");
                Ok(n)
            }
            Ok(Err(e)) => Err(ProbeError::Socket(e.to_string())),
            Err(_elapsed) => Err(ProbeError::Timeout(probe_timeout)),
        },
        _ = sleep_until(backstop_at) => {
            warn!(endpoint = %target, "udp read deadline did not fire, backstop elapsed");
            Err(ProbeError::Timeout(probe_timeout + BACKSTOP_SLACK))
        }
    }
}

/// Unspecified local address of the same family as `remote`, ephemeral port.
fn wildcard_for(remote: &SocketAddr) -> SocketAddr {
    let ip: IpAddr = match remote {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    SocketAddr::new(ip, 0)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
