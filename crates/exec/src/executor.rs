//! Plan executor.
//!
//! Interprets an [`ExecutionPlan`] against an injected [`SigningAdapter`]
//! and produces a single, uniform outcome regardless of which wallet
//! integration sits underneath.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::adapter::SigningAdapter;
use crate::confirm::{wait_for_confirmation_with_cancel, ConfirmationPolicy};
use crate::error::{ExecutionError, Result};
use crate::plan::{ExecutionPlan, TransactionOutcome, TransactionRequest};

/// Drives an [`ExecutionPlan`] to a confirmed [`TransactionOutcome`].
///
/// The executor borrows its adapter, so "missing adapter" is a compile-time
/// impossibility rather than a runtime check. One executor may resolve many
/// plans sequentially; each `execute` call owns its transaction pair and
/// polling loop exclusively.
///
/// # Example
///
/// ```no_run
/// use aave_rs_exec::{ConfirmationPolicy, LocalSignerAdapter, PlanExecutor};
///
/// # async fn run(plan: aave_rs_exec::ExecutionPlan) -> aave_rs_exec::Result<()> {
/// let adapter = LocalSignerAdapter::new("https://eth.llamarpc.com", "0x...")?;
/// let executor = PlanExecutor::new(&adapter).with_policy(ConfirmationPolicy::default());
/// let outcome = executor.execute(plan).await?;
/// println!("confirmed: {}", outcome.tx_hash);
/// # Ok(())
/// # }
/// ```
pub struct PlanExecutor<'a, A: SigningAdapter> {
    adapter: &'a A,
    policy: ConfirmationPolicy,
    cancel: CancellationToken,
}

impl<'a, A: SigningAdapter> PlanExecutor<'a, A> {
    /// Create an executor with the default confirmation policy.
    pub fn new(adapter: &'a A) -> Self {
        Self {
            adapter,
            policy: ConfirmationPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Set the confirmation policy used for every awaited transaction.
    pub fn with_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Associate a cancellation token with the executor's polling loops.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the confirmation policy in use.
    pub fn policy(&self) -> &ConfirmationPolicy {
        &self.policy
    }

    /// Resolve a plan into a confirmed transaction outcome.
    ///
    /// - A plain transaction is sent once and awaited once.
    /// - An approval pair is strictly sequential: the original transaction
    ///   is never sent unless the approval's confirmation resolved
    ///   successfully.
    /// - An insufficient-balance rejection makes zero adapter calls and
    ///   returns [`ExecutionError::Validation`] carrying the backend's
    ///   required/available amounts.
    pub async fn execute(&self, plan: ExecutionPlan) -> Result<TransactionOutcome> {
        match plan {
            ExecutionPlan::TransactionRequest(tx) => {
                let receipt_hash = self.send_and_confirm(&tx).await?;
                Ok(TransactionOutcome::new(receipt_hash))
            }
            ExecutionPlan::ApprovalRequired {
                approval,
                original_transaction,
                reason,
                ..
            } => {
                debug!(%reason, "approval required before operation");
                // The second leg depends on the first leg's state; if the
                // approval fails or times out, the operation is aborted here.
                self.send_and_confirm(&approval).await?;
                let receipt_hash = self.send_and_confirm(&original_transaction).await?;
                Ok(TransactionOutcome::new(receipt_hash))
            }
            ExecutionPlan::InsufficientBalance {
                required,
                available,
            } => Err(ExecutionError::Validation {
                required,
                available,
            }),
        }
    }

    /// Send one transaction and await its confirmation.
    async fn send_and_confirm(&self, tx: &TransactionRequest) -> Result<alloy_primitives::B256> {
        let tx_hash = self.adapter.send_transaction(tx).await?;
        debug!(%tx_hash, chain_id = tx.chain_id, to = %tx.to, "transaction broadcast");
        let receipt =
            wait_for_confirmation_with_cancel(self.adapter, tx_hash, &self.policy, &self.cancel)
                .await?;
        Ok(receipt.tx_hash)
    }
}
