//! Drives the probers over a [`ProbeConfig`].
//!
//! The TCP list is swept completely before the UDP list starts, and outcomes
//! are delivered in the order targets appear in their lists. With `jobs > 1`
//! a sweep keeps up to `jobs` probes in flight and buffers early finishers
//! until every target before them has been reported, so the observable
//! sequence is the same as a sequential run.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use netcheck_common::config::ProbeConfig;
use netcheck_common::error::{ConfigError, ProbeError};
use netcheck_common::network::outcome::{ProbeOutcome, Protocol};
use netcheck_common::network::target::Target;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};
use tokio::time::Instant;
use tracing::{Instrument, debug, error, info_span};

use crate::network::{Prober, TcpProber, UdpProber};

pub struct Runner {
    tcp: Arc<dyn Prober>,
    udp: Arc<dyn Prober>,
    jobs: usize,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(Arc::new(TcpProber), Arc::new(UdpProber))
    }
}

impl Runner {
    pub fn new(tcp: Arc<dyn Prober>, udp: Arc<dyn Prober>) -> Self {
        Self { tcp, udp, jobs: 1 }
    }

    /// Bounds probes in flight per sweep. Zero is treated as one.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Probes every configured target once and returns the outcomes in
    /// report order. `on_outcome` sees each outcome as soon as it is in order.
    ///
    /// Fails only when the configuration has no usable timeout; a failing
    /// target never stops the run.
    pub async fn run<F>(&self, config: &ProbeConfig, mut on_outcome: F) -> Result<Vec<ProbeOutcome>, ConfigError>
    where
        F: FnMut(&ProbeOutcome),
    {
        let probe_timeout: Duration = config.timeout()?;
        let mut outcomes: Vec<ProbeOutcome> = Vec::with_capacity(config.target_count());

        let mut emit = |outcome: ProbeOutcome| {
            on_outcome(&outcome);
            outcomes.push(outcome);
        };

        for (prober, targets) in [(&self.tcp, &config.tcp), (&self.udp, &config.udp)] {
            if targets.is_empty() {
                continue;
            }

            let protocol: Protocol = prober.protocol();
            let span = info_span!("sweep", %protocol, targets = targets.len());
            let start: Instant = Instant::now();

            self.sweep(prober, targets, probe_timeout, &mut emit)
                .instrument(span)
                .await;

            debug!(%protocol, elapsed = ?start.elapsed(), "sweep finished");
        }

        Ok(outcomes)
    }

    async fn sweep(
        &self,
        prober: &Arc<dyn Prober>,
        targets: &[Target],
        probe_timeout: Duration,
        emit: &mut dyn FnMut(ProbeOutcome),
    ) {
        if self.jobs == 1 {
            for target in targets {
                let span = info_span!("probe", endpoint = %target);
                emit(prober.probe(target, probe_timeout).instrument(span).await);
            }
            return;
        }

        let semaphore: Arc<Semaphore> = Arc::new(Semaphore::new(self.jobs));
        let mut set: JoinSet<(usize, ProbeOutcome)> = JoinSet::new();
        let mut slots: HashMap<Id, usize> = HashMap::with_capacity(targets.len());

        for (idx, target) in targets.iter().cloned().enumerate() {
            let prober: Arc<dyn Prober> = Arc::clone(prober);
            let semaphore: Arc<Semaphore> = Arc::clone(&semaphore);
            let span = info_span!("probe", endpoint = %target);

            let handle = set.spawn(
                async move {
                    let _permit = semaphore.acquire_owned().await;
                    (idx, prober.probe(&target, probe_timeout).await)
                }
                .instrument(span),
            );
            slots.insert(handle.id(), idx);
        }

        let mut pending: Vec<Option<ProbeOutcome>> = vec![None; targets.len()];
        let mut next: usize = 0;

        while let Some(joined) = set.join_next_with_id().await {
            match joined {
                Ok((_id, (idx, outcome))) => pending[idx] = Some(outcome),
                Err(e) => {
                    let Some(&idx) = slots.get(&e.id()) else {
                        continue;
                    };
                    error!(endpoint = %targets[idx], "probe task failed: {e}");
                    pending[idx] = Some(ProbeOutcome::closed(
                        targets[idx].clone(),
                        prober.protocol(),
                        ProbeError::Socket(e.to_string()),
                        Duration::ZERO,
                    ));
                }
            }

            while let Some(outcome) = pending.get_mut(next).and_then(Option::take) {
                emit(outcome);
                next += 1;
            }
        }
    }
}

/// Open and closed counts for a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub open: usize,
    pub closed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.open + self.closed
    }
}

impl From<&[ProbeOutcome]> for Summary {
    fn from(outcomes: &[ProbeOutcome]) -> Self {
        let open: usize = outcomes.iter().filter(|o| o.is_open()).count();
        Summary {
            open,
            closed: outcomes.len() - open,
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
