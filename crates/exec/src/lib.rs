//! Execution plan resolution and transaction orchestration.
//!
//! The backend answers every state-changing request (supply, borrow, repay,
//! withdraw, vault operations) with an [`ExecutionPlan`]: either a
//! ready-to-send transaction, an approval-then-transaction pair, or a
//! terminal insufficient-balance rejection. This crate interprets that plan
//! against a pluggable [`SigningAdapter`] and reports one uniform outcome
//! no matter which wallet integration is underneath.
//!
//! # Example
//!
//! ```no_run
//! use aave_rs_exec::{ConfirmationPolicy, LocalSignerAdapter, PlanExecutor};
//!
//! # async fn run(plan: aave_rs_exec::ExecutionPlan) -> aave_rs_exec::Result<()> {
//! let adapter = LocalSignerAdapter::new(
//!     "https://eth.llamarpc.com",
//!     "0x...", // private key
//! )?;
//!
//! let executor = PlanExecutor::new(&adapter)
//!     .with_policy(ConfirmationPolicy::default().with_max_retries(30));
//!
//! let outcome = executor.execute(plan).await?;
//! println!("confirmed in tx {}", outcome.tx_hash);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All failures flow through [`ExecutionError`], which keeps the four
//! user-visible states apart: rejected before any on-chain effect,
//! broadcast but unconfirmed within budget, confirmed but reverted, and
//! confirmed and succeeded.

pub mod adapter;
pub mod confirm;
pub mod error;
pub mod executor;
pub mod local;
pub mod permit;
pub mod plan;
pub mod scalars;

mod provider;

pub use adapter::{Receipt, ReceiptStatus, SigningAdapter};
pub use confirm::{
    wait_for_confirmation, wait_for_confirmation_with_cancel, ConfirmationPolicy,
    DEFAULT_INTERVAL, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY,
};
pub use error::{ExecutionError, Result};
pub use executor::PlanExecutor;
pub use local::LocalSignerAdapter;
pub use permit::{sign_permit, PermitSignature};
pub use plan::{ExecutionPlan, TransactionOutcome, TransactionRequest};
pub use provider::HttpProvider;

// Re-exported so callers can build permit payloads without a direct alloy
// dependency.
pub use alloy::dyn_abi::TypedData;
pub use tokio_util::sync::CancellationToken;
