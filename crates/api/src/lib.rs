//! Aave Rust API Library
//!
//! This crate resolves lending operations (supply, borrow, repay, withdraw,
//! vault deposits and withdrawals) into execution plans via the backend
//! GraphQL API, and drives those plans to confirmed transactions through a
//! pluggable signing adapter from [`aave_rs_exec`].
//!
//! # Example
//!
//! ```no_run
//! use aave_rs_api::{AaveClient, AaveClientConfig, Erc20Amount, SupplyRequest};
//! use alloy_primitives::{Address, U256};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), aave_rs_api::ApiError> {
//!     // API-only client (plans, no execution)
//!     let client = AaveClient::new();
//!
//!     // Full client with transaction support
//!     let config = AaveClientConfig::new()
//!         .with_rpc_url("https://eth.llamarpc.com")
//!         .with_private_key("0x...");
//!     let client = AaveClient::with_config(config)?;
//!
//!     let market: Address = "0x...".parse().unwrap();
//!     let usdc: Address = "0x...".parse().unwrap();
//!     let request = SupplyRequest {
//!         market,
//!         amount: Erc20Amount::new(usdc, U256::from(1_000_000u64)),
//!         sender: client.signer_address().unwrap(),
//!         chain_id: 1,
//!     };
//!     let outcome = client.supply(&request).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All errors are unified through [`ApiError`], which wraps transport and
//! GraphQL failures and passes execution failures through unchanged, so
//! callers can still distinguish a pre-broadcast rejection from an
//! unconfirmed or reverted transaction.

pub mod client;
pub mod error;
pub mod gateway;
pub mod operations;

// Re-export main types at crate root
pub use client::{
    AaveApiClient, AaveClient, AaveClientConfig, VAULT_DEPOSIT_TAG, VAULT_WITHDRAW_TAG,
};
pub use error::{ApiError, Result};
pub use gateway::{ClientConfig, QueryGateway, DEFAULT_API_URL};
pub use operations::{
    BorrowRequest, Erc20Amount, PermitTypedDataRequest, RepayRequest, SupplyRequest,
    VaultDepositRequest, VaultWithdrawRequest, WithdrawRequest,
};

pub use aave_rs_exec::{
    ConfirmationPolicy, ExecutionError, ExecutionPlan, LocalSignerAdapter, PermitSignature,
    PlanExecutor, Receipt, ReceiptStatus, SigningAdapter, TransactionOutcome, TransactionRequest,
    TypedData,
};
