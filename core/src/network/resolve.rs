use std::net::SocketAddr;

use netcheck_common::error::ProbeError;
use netcheck_common::network::target::Target;
use tokio::net;
use tracing::debug;

/// Resolves a target to every address it maps to.
///
/// Not time-bounded on its own: callers run it under the same deadline as
/// the rest of the attempt. A malformed target fails here without any
/// lookup, IP literals never touch DNS, and an empty answer counts as a
/// resolution failure.
pub async fn resolve(target: &Target) -> Result<Vec<SocketAddr>, ProbeError> {
    target.check().map_err(ProbeError::Resolution)?;

    let addrs: Vec<SocketAddr> = net::lookup_host(target.as_str())
        .await
        .map_err(|e| ProbeError::Resolution(e.to_string()))?
        .collect();

    if addrs.is_empty() {
        return Err(ProbeError::Resolution(format!("no addresses found for {target}")));
    }

    debug!(endpoint = %target, ?addrs, "resolved");
    Ok(addrs)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
