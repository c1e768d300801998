//! # Probe Target Model
//!
//! A target is one `host:port` endpoint exactly as an operator wrote it in
//! the configuration. Loading a configuration never rejects a target: the
//! string is kept verbatim and its shape is checked once, up front. A
//! malformed entry still takes its place in the run and is reported CLOSED
//! when the run reaches it, like a host that fails to resolve.
//!
//! Accepted forms:
//! * **Hostname**: `db.internal:5432`
//! * **IPv4**: `192.168.33.10:8300`
//! * **IPv6** (bracketed): `[::1]:53`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// A single `host:port` endpoint. Duplicates are legal and probed independently.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    raw: String,
    /// End of the host part and the port, or why the string is not `host:port`.
    shape: Result<(usize, u16), String>,
}

impl Target {
    /// Keeps `raw` as written, well-formed or not.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw: String = raw.into().trim().to_string();
        let shape = split_host_port(&raw);
        Target { raw, shape }
    }

    /// The address string as configured, suitable for handing to a resolver.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `Err` carries a message naming the target and what is wrong with it.
    pub fn check(&self) -> Result<(), String> {
        self.shape.as_ref().map(|_| ()).map_err(|e| e.clone())
    }

    pub fn is_well_formed(&self) -> bool {
        self.shape.is_ok()
    }

    /// Host part without brackets.
    pub fn host(&self) -> Option<&str> {
        let (host_end, _) = self.shape.as_ref().ok()?;
        let host: &str = &self.raw[..*host_end];
        Some(
            host.strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .unwrap_or(host),
        )
    }

    pub fn port(&self) -> Option<u16> {
        self.shape.as_ref().ok().map(|(_, port)| *port)
    }
}

fn split_host_port(raw: &str) -> Result<(usize, u16), String> {
    let Some((host, port_str)) = raw.rsplit_once(':') else {
        return Err(format!("invalid target '{raw}': expected host:port"));
    };

    if host.is_empty() || host == "[]" {
        return Err(format!("invalid target '{raw}': empty host"));
    }

    if host.contains(':') && !(host.starts_with('[') && host.ends_with(']')) {
        return Err(format!(
            "invalid target '{raw}': IPv6 addresses must be written as [addr]:port"
        ));
    }

    let port: u16 = port_str
        .parse::<u16>()
        .map_err(|e| format!("invalid port in target '{raw}': {e}"))?;

    Ok((host.len(), port))
}

/// Strict parse: only well-formed targets are returned.
impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let target = Target::new(s);
        target.check()?;
        Ok(target)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        Ok(Target::new(s))
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
