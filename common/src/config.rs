//! Probe configuration.
//!
//! The configuration file is a small YAML document:
//!
//! ```yaml
//! tcp:
//!   - "192.168.33.10:8300"
//!   - "192.168.33.10:8500"
//! udp:
//!   - "192.168.33.10:8600"
//! timeout_seconds: 2
//! ```
//!
//! A missing or zero timeout is rejected at validation time rather than
//! being passed through to the probers. A target that is not `host:port` is
//! not a configuration error: it is kept in place and reported CLOSED when
//! the run reaches it.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::network::target::Target;
use crate::{info, warn};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub tcp: Vec<Target>,

    #[serde(default)]
    pub udp: Vec<Target>,

    /// Shared by every probe in a run, whole seconds.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl ProbeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path: &Path = path.as_ref();
        let content: String = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ProbeConfig = Self::from_yaml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        info!(
            "Loaded {} tcp and {} udp targets from {}",
            config.tcp.len(),
            config.udp.len(),
            path.display()
        );
        for target in config.malformed_targets() {
            if let Err(reason) = target.check() {
                warn!("{reason}");
            }
        }
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Replaces the file's timeout, e.g. with a command line override.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        match self.timeout_seconds {
            None => Err(ConfigError::MissingTimeout),
            Some(0) => Err(ConfigError::ZeroTimeout),
            Some(secs) => Ok(Duration::from_secs(secs)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timeout()?;
        if self.target_count() == 0 {
            return Err(ConfigError::NoTargets);
        }
        Ok(())
    }

    pub fn target_count(&self) -> usize {
        self.tcp.len() + self.udp.len()
    }

    /// Entries that will be reported CLOSED without any network activity.
    pub fn malformed_targets(&self) -> impl Iterator<Item = &Target> {
        self.tcp.iter().chain(&self.udp).filter(|t| !t.is_well_formed())
    }
}

/// Presentation and scheduling flags coming from the command line.
#[derive(Clone, Debug)]
pub struct Settings {
    /// 0 prints everything, 1 hides headers, 2 prints only CLOSED lines.
    pub quiet: u8,

    /// Upper bound on probes in flight within a sweep. 1 probes sequentially.
    pub jobs: usize,

    /// Exit non-zero when any target is CLOSED.
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quiet: 0,
            jobs: 1,
            strict: false,
        }
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
