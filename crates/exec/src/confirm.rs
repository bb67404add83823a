//! Confirmation waiter.
//!
//! Polls an adapter for a transaction receipt under a bounded retry budget.
//! Exhausting the budget is a [`Timeout`](ExecutionError::Timeout), which is
//! deliberately a different failure kind from a revert: a timed-out
//! transaction may still be included later.

use std::time::Duration;

use alloy_primitives::B256;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::adapter::{Receipt, ReceiptStatus, SigningAdapter};
use crate::error::{ExecutionError, Result};

/// Default polling interval between receipt probes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Default maximum number of receipt probes.
pub const DEFAULT_MAX_RETRIES: u32 = 20;

/// Default delay before retrying after a transient adapter error.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Polling policy for the confirmation waiter.
///
/// One policy value is passed wherever confirmation is awaited; different
/// chains have different finality latency, so these are configuration
/// points rather than constants baked into call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Interval between receipt probes.
    pub interval: Duration,
    /// Maximum number of probes before giving up.
    pub max_retries: u32,
    /// Extra delay before re-probing after a transient adapter error.
    pub retry_delay: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl ConfirmationPolicy {
    /// Create a policy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the polling interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the maximum number of probes.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay applied after a transient adapter error.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }
}

/// Wait until `tx_hash` is confirmed, reverted, or the retry budget runs out.
///
/// Safe to call repeatedly for an already-confirmed hash: each call only
/// probes receipts and never re-broadcasts anything.
pub async fn wait_for_confirmation<A: SigningAdapter>(
    adapter: &A,
    tx_hash: B256,
    policy: &ConfirmationPolicy,
) -> Result<Receipt> {
    wait_for_confirmation_with_cancel(adapter, tx_hash, policy, &CancellationToken::new()).await
}

/// [`wait_for_confirmation`] observing a cancellation token.
///
/// Cancelling the token stops the polling loop promptly and returns
/// [`ExecutionError::Cancelled`], so an abandoned caller does not leave a
/// dangling poller behind.
pub async fn wait_for_confirmation_with_cancel<A: SigningAdapter>(
    adapter: &A,
    tx_hash: B256,
    policy: &ConfirmationPolicy,
    cancel: &CancellationToken,
) -> Result<Receipt> {
    for attempt in 0..policy.max_retries {
        if cancel.is_cancelled() {
            return Err(ExecutionError::Cancelled { tx_hash });
        }

        if attempt > 0 {
            tokio::select! {
                () = cancel.cancelled() => return Err(ExecutionError::Cancelled { tx_hash }),
                () = tokio::time::sleep(policy.interval) => {}
            }
        }

        match adapter.transaction_receipt(tx_hash).await {
            Ok(Some(receipt)) => match receipt.status {
                ReceiptStatus::Success => {
                    debug!(%tx_hash, attempt, "transaction confirmed");
                    return Ok(receipt);
                }
                ReceiptStatus::Reverted => {
                    warn!(%tx_hash, "transaction reverted on-chain");
                    return Err(ExecutionError::Reverted { tx_hash });
                }
            },
            Ok(None) => {
                debug!(%tx_hash, attempt, "receipt not yet available");
            }
            Err(e) => {
                // Transient probe failures consume an attempt but do not
                // abort the wait; the transaction may already be in flight.
                warn!(%tx_hash, attempt, error = %e, "receipt probe failed");
                tokio::select! {
                    () = cancel.cancelled() => return Err(ExecutionError::Cancelled { tx_hash }),
                    () = tokio::time::sleep(policy.retry_delay) => {}
                }
            }
        }
    }

    Err(ExecutionError::Timeout {
        tx_hash,
        attempts: policy.max_retries,
    })
}
