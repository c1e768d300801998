use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Why a probe ended CLOSED.
///
/// Every variant collapses to the same CLOSED verdict; the cause exists only
/// for reporting. Messages are kept as strings so outcomes stay `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The address could not be parsed or resolved.
    #[error("resolution failed: {0}")]
    Resolution(String),

    #[error("connection refused")]
    Refused,

    /// Any other failure to establish a TCP connection (unreachable, reset, ...).
    #[error("dial failed: {0}")]
    Dial(String),

    /// The UDP probe datagram could not be sent.
    #[error("write failed: {0}")]
    Write(String),

    /// The bounded wait elapsed without a qualifying response.
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// A reply arrived but carried no bytes.
    #[error("no response")]
    NoResponse,

    /// The local socket could not be opened or read.
    #[error("socket error: {0}")]
    Socket(String),
}

impl ProbeError {
    pub fn from_dial(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => ProbeError::Refused,
            _ => ProbeError::Dial(err.to_string()),
        }
    }
}

/// Failures while obtaining the probe configuration. These are the only
/// fatal errors: they abort before any probe is attempted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("timeout_seconds is not set")]
    MissingTimeout,

    #[error("timeout_seconds must be greater than zero")]
    ZeroTimeout,

    #[error("no tcp or udp targets configured")]
    NoTargets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dial_maps_refused() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(ProbeError::from_dial(refused), ProbeError::Refused);

        let reset = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
        assert!(matches!(ProbeError::from_dial(reset), ProbeError::Dial(msg) if msg.contains("reset")));
    }

    #[test]
    fn test_timeout_message_in_seconds() {
        let err = ProbeError::Timeout(Duration::from_secs(3));
        assert_eq!(err.to_string(), "timed out after 3s");
    }
}
