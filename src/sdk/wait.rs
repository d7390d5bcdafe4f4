//! Bounded polling of asynchronous platform jobs.

use std::thread;
use std::time::Duration;

use tracing::debug;

use super::types::{DistributionStatus, OrchestrationRequest, RequestState, Service};
use super::{Catalog, Orchestrator};
use crate::config::WaitSettings;
use crate::error::{HarnessError, Result};

/// How often and how long to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Sleep between two polls.
    pub interval: Duration,
    /// Polls before giving up.
    pub max_attempts: u32,
}

impl WaitPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Poll without sleeping.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(Duration::ZERO, max_attempts)
    }
}

impl From<WaitSettings> for WaitPolicy {
    fn from(settings: WaitSettings) -> Self {
        Self::new(
            Duration::from_secs(settings.interval_secs),
            settings.max_attempts,
        )
    }
}

/// Outcome of one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll<T> {
    Ready(T),
    Pending,
}

/// Call `poll` until it is ready, fails, or the policy runs out.
///
/// `poll` receives the 1-based attempt number. No sleep follows the last
/// attempt.
///
/// # Errors
///
/// Returns the first error `poll` returns, or `OrchestrationTimeout`
/// naming `what` when every attempt was pending.
pub fn wait_until<T>(
    policy: WaitPolicy,
    what: &str,
    mut poll: impl FnMut(u32) -> Result<Poll<T>>,
) -> Result<T> {
    for attempt in 1..=policy.max_attempts {
        match poll(attempt)? {
            Poll::Ready(value) => return Ok(value),
            Poll::Pending => {
                debug!(
                    "{} not ready (attempt {}/{})",
                    what, attempt, policy.max_attempts
                );
                if attempt < policy.max_attempts && !policy.interval.is_zero() {
                    thread::sleep(policy.interval);
                }
            }
        }
    }

    Err(HarnessError::OrchestrationTimeout {
        what: what.to_string(),
        attempts: policy.max_attempts,
    })
}

/// Wait until an orchestration request completes.
///
/// # Errors
///
/// Returns `OrchestrationFailed` if the request ends failed.
pub fn wait_for_request(
    orchestrator: &dyn Orchestrator,
    request: &OrchestrationRequest,
    policy: WaitPolicy,
) -> Result<()> {
    let what = format!("orchestration request {}", request.request_id);
    wait_until(policy, &what, |_| {
        match orchestrator.request_state(request)? {
            RequestState::Complete => Ok(Poll::Ready(())),
            RequestState::InProgress => Ok(Poll::Pending),
            RequestState::Failed(message) => Err(HarnessError::OrchestrationFailed {
                request_id: request.request_id.clone(),
                message,
            }),
        }
    })
}

/// Wait until a service is distributed.
///
/// # Errors
///
/// Returns `OrchestrationFailed` if distribution ends failed.
pub fn wait_for_distribution(
    catalog: &dyn Catalog,
    service: &Service,
    policy: WaitPolicy,
) -> Result<()> {
    let what = format!("distribution of service {}", service.name);
    wait_until(policy, &what, |_| match catalog.distribution_status(service)? {
        DistributionStatus::Distributed => Ok(Poll::Ready(())),
        DistributionStatus::NotDistributed | DistributionStatus::InProgress => Ok(Poll::Pending),
        DistributionStatus::Failed(message) => Err(HarnessError::OrchestrationFailed {
            request_id: service.uuid.clone(),
            message,
        }),
    })
}
