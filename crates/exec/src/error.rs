//! Error types for plan execution.

use alloy_primitives::{B256, U256};
use thiserror::Error;

/// Errors that can occur while resolving an execution plan.
///
/// The variants preserve the distinction between "rejected before any
/// on-chain effect" ([`Validation`](Self::Validation),
/// [`Signing`](Self::Signing)), "broadcast but outcome unknown"
/// ([`Timeout`](Self::Timeout)), and "broadcast and reverted"
/// ([`Reverted`](Self::Reverted)). Collapsing these into one generic
/// failure loses information callers need.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The backend rejected the operation before signing.
    #[error("insufficient balance: required {required}, available {available}")]
    Validation { required: U256, available: U256 },

    /// The signer rejected or failed to produce a signature or broadcast.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Confirmation was not observed within the retry budget.
    ///
    /// The transaction may still land later. Callers should re-check the
    /// transaction status rather than treat this as a failure.
    #[error("transaction {tx_hash} not confirmed after {attempts} attempts; outcome unknown")]
    Timeout { tx_hash: B256, attempts: u32 },

    /// The chain included the transaction but it reverted.
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: B256 },

    /// The caller cancelled the confirmation wait.
    #[error("confirmation wait for {tx_hash} was cancelled")]
    Cancelled { tx_hash: B256 },

    /// Invalid private key.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// RPC connection failed.
    #[error("RPC connection failed: {0}")]
    RpcConnection(String),

    /// Any error outside the taxonomy above. Always surfaced, never swallowed.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Result type alias for execution operations.
pub type Result<T> = std::result::Result<T, ExecutionError>;
