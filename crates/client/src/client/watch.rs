//! Deployment status polling.
//!
//! Responsibilities:
//! - Poll a deployment at the configured interval while it is provisioning.
//! - Keep polling through transient network failures.
//! - Apply the hard cutoff that follows a retry action.
//!
//! Does NOT handle:
//! - Rendering progress (callers get every fetched deployment).
//!
//! Invariants:
//! - Polling stops as soon as the status is anything but `provisioning`.
//! - Dropping the returned future stops polling; no fetch happens after.
//! - A `WatchOutcome::TimedOut` is not an error.

use std::time::Duration;

use tracing::debug;

use crate::client::ProvisioningClient;
use crate::error::Result;
use crate::models::{Deployment, DeploymentStatus};

/// How a watch ended.
#[derive(Debug, Clone)]
pub enum WatchOutcome {
    /// The deployment left `provisioning`.
    Settled(Deployment),
    /// The cutoff passed first. Carries the last fetched state, if any.
    TimedOut { last: Option<Deployment> },
}

impl WatchOutcome {
    pub fn deployment(&self) -> Option<&Deployment> {
        match self {
            Self::Settled(d) => Some(d),
            Self::TimedOut { last } => last.as_ref(),
        }
    }
}

impl ProvisioningClient {
    /// Poll `id` until it leaves `provisioning` or `deadline` passes.
    ///
    /// The first fetch happens immediately. `on_update` sees every fetched
    /// state.
    ///
    /// # Errors
    ///
    /// Non-transient errors (including [`crate::ClientError::SessionExpired`])
    /// end the watch.
    pub async fn watch_deployment<F>(
        &self,
        id: &str,
        deadline: Option<Duration>,
        on_update: F,
    ) -> Result<WatchOutcome>
    where
        F: FnMut(&Deployment),
    {
        self.poll_until_settled(id, deadline, false, None, on_update)
            .await
    }

    /// Retry a failed deployment and watch it with the retry cutoff.
    ///
    /// `on_update` first sees the optimistic `provisioning` state, then every
    /// fetched state. Polling starts one interval after the retry is accepted.
    pub async fn retry_and_watch<F>(&self, id: &str, mut on_update: F) -> Result<WatchOutcome>
    where
        F: FnMut(&Deployment),
    {
        let mut optimistic = self
            .retry_deployment(id)
            .await?
            .unwrap_or_else(|| Deployment::stub(id, DeploymentStatus::Provisioning));
        optimistic.status = DeploymentStatus::Provisioning;
        on_update(&optimistic);

        let cutoff = self.polling.retry_timeout;
        self.poll_until_settled(id, Some(cutoff), true, Some(optimistic), on_update)
            .await
    }

    async fn poll_until_settled<F>(
        &self,
        id: &str,
        deadline: Option<Duration>,
        delay_first: bool,
        mut last: Option<Deployment>,
        mut on_update: F,
    ) -> Result<WatchOutcome>
    where
        F: FnMut(&Deployment),
    {
        let started = tokio::time::Instant::now();
        let interval = self.polling.interval;

        // Never sleep past the cutoff.
        let pause = |elapsed: Duration| match deadline {
            Some(limit) => interval.min(limit.saturating_sub(elapsed)),
            None => interval,
        };

        if delay_first {
            tokio::time::sleep(pause(started.elapsed())).await;
        }

        loop {
            match self.get_deployment(id).await {
                Ok(deployment) => {
                    on_update(&deployment);
                    if !deployment.status.is_provisioning() {
                        debug!(id, status = %deployment.status, "Deployment settled");
                        return Ok(WatchOutcome::Settled(deployment));
                    }
                    last = Some(deployment);
                }
                Err(e) if e.is_transient() => {
                    debug!(id, error = %e, "Transient failure while polling, continuing");
                }
                Err(e) => return Err(e),
            }

            if let Some(limit) = deadline
                && started.elapsed() >= limit
            {
                debug!(id, ?limit, "Stopped watching deployment at cutoff");
                return Ok(WatchOutcome::TimedOut { last });
            }

            tokio::time::sleep(pause(started.elapsed())).await;
        }
    }
}
