//! Signing backend adapter capability.
//!
//! Each wallet integration (local private-key signer, custodial signer,
//! embedded wallet, ...) implements [`SigningAdapter`]. The executor and
//! the confirmation waiter are written once against this trait and never
//! against a concrete integration, so they can be unit tested with a fake
//! adapter instead of a real wallet.

#![allow(async_fn_in_trait)]

use alloy::dyn_abi::TypedData;
use alloy_primitives::{Signature, B256};
use serde::{Deserialize, Serialize};

use crate::error::{ExecutionError, Result};
use crate::plan::TransactionRequest;

/// Inclusion status reported by the chain for a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    /// The transaction executed successfully.
    Success,
    /// The transaction was included but reverted.
    Reverted,
}

/// A confirmed transaction receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the confirmed transaction.
    pub tx_hash: B256,
    /// Execution status.
    pub status: ReceiptStatus,
    /// Block the transaction was included in, when the adapter reports it.
    pub block_number: Option<u64>,
}

/// Capability for signing and broadcasting transactions.
///
/// Adapters must be safe for sequential reuse across calls. Concurrent
/// calls on behalf of one account are not required to be supported, since
/// nonce ordering on a single account is inherently sequential.
pub trait SigningAdapter {
    /// Sign and broadcast a transaction, returning its hash.
    ///
    /// Must return as soon as the transaction is broadcast; waiting for
    /// inclusion is the confirmation waiter's job.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256>;

    /// Probe the chain once for a transaction receipt.
    ///
    /// Returns `Ok(None)` while the transaction has not been included yet.
    /// The polling loop lives in
    /// [`wait_for_confirmation`](crate::confirm::wait_for_confirmation),
    /// not in the adapter.
    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<Receipt>>;

    /// Sign an EIP-712 typed-data payload without broadcasting anything.
    ///
    /// Broadcast-only adapters may leave the default, which reports the
    /// capability as unsupported.
    async fn sign_typed_data(&self, _payload: &TypedData) -> Result<Signature> {
        Err(ExecutionError::Signing(
            "adapter does not support typed-data signing".to_string(),
        ))
    }
}
