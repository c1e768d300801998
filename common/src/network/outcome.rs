use std::fmt;
use std::time::Duration;

use crate::error::ProbeError;
use crate::network::target::Target;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("TCP"),
            Protocol::Udp => f.write_str("UDP"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Open,
    Closed,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Open => f.write_str("OPEN"),
            Verdict::Closed => f.write_str("CLOSED"),
        }
    }
}

/// The result of probing one target over one protocol.
///
/// Built only through [`ProbeOutcome::open`] and [`ProbeOutcome::closed`],
/// so an OPEN outcome never carries a cause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub target: Target,
    pub protocol: Protocol,
    pub verdict: Verdict,
    pub cause: Option<ProbeError>,
    pub elapsed: Duration,
}

impl ProbeOutcome {
    pub fn open(target: Target, protocol: Protocol, elapsed: Duration) -> Self {
        Self {
            target,
            protocol,
            verdict: Verdict::Open,
            cause: None,
            elapsed,
        }
    }

    pub fn closed(target: Target, protocol: Protocol, cause: ProbeError, elapsed: Duration) -> Self {
        Self {
            target,
            protocol,
            verdict: Verdict::Closed,
            cause: Some(cause),
            elapsed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.verdict == Verdict::Open
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.protocol, self.verdict)?;
        if let Some(cause) = &self.cause {
            write!(f, " ({cause})")?;
        }
        Ok(())
    }
}
