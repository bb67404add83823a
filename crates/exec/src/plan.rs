//! Execution plan model.
//!
//! An [`ExecutionPlan`] is the polymorphic result of requesting a
//! state-changing operation (supply, borrow, repay, withdraw, vault
//! deposit, ...) from the backend. It tells the caller what to sign and
//! send next, or why the operation cannot proceed. Plans are ephemeral:
//! returned per-call, never mutated, and consumed exactly once by the
//! [`PlanExecutor`](crate::executor::PlanExecutor).

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::scalars::{deserialize_bigint, serialize_bigint};

/// A ready-to-send transaction descriptor returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Chain the transaction must be submitted to.
    pub chain_id: u64,
    /// Sender address.
    pub from: Address,
    /// Target contract address.
    pub to: Address,
    /// ABI-encoded calldata.
    pub data: Bytes,
    /// Native currency value to attach.
    #[serde(
        deserialize_with = "deserialize_bigint",
        serialize_with = "serialize_bigint"
    )]
    pub value: U256,
}

/// The outcome of requesting an operation from the backend.
///
/// Exactly one variant is populated. The enum is tagged on the GraphQL
/// `__typename` discriminator, so a new backend variant is a compile error
/// for every exhaustive `match` over plans rather than a silent fallthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum ExecutionPlan {
    /// A single transaction can be sent as-is.
    TransactionRequest(TransactionRequest),

    /// Two transactions must be sent in order: the approval first, then the
    /// original transaction once the approval is confirmed.
    #[serde(rename_all = "camelCase")]
    ApprovalRequired {
        /// The token approval granting the protocol an allowance.
        approval: TransactionRequest,
        /// The operation itself; only valid after the approval confirms.
        original_transaction: TransactionRequest,
        /// Backend-supplied reason the approval is needed.
        reason: String,
        /// Allowance the operation requires.
        #[serde(
            deserialize_with = "deserialize_bigint",
            serialize_with = "serialize_bigint"
        )]
        required_amount: U256,
        /// Allowance currently granted on-chain.
        #[serde(
            deserialize_with = "deserialize_bigint",
            serialize_with = "serialize_bigint"
        )]
        current_allowance: U256,
    },

    /// Terminal rejection; no transaction is possible.
    #[serde(rename_all = "camelCase")]
    InsufficientBalance {
        /// Balance the operation requires.
        #[serde(
            deserialize_with = "deserialize_bigint",
            serialize_with = "serialize_bigint"
        )]
        required: U256,
        /// Balance actually held.
        #[serde(
            deserialize_with = "deserialize_bigint",
            serialize_with = "serialize_bigint"
        )]
        available: U256,
    },
}

/// The result of a fully confirmed send.
///
/// Created only after the confirmation waiter observes finality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    /// Hash of the terminal transaction.
    pub tx_hash: B256,
    /// Operation tag for multi-step flows (e.g. vault operations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

impl TransactionOutcome {
    /// Create an outcome for a confirmed transaction.
    pub fn new(tx_hash: B256) -> Self {
        Self {
            tx_hash,
            operation: None,
        }
    }

    /// Attach an operation tag to the outcome.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }
}
