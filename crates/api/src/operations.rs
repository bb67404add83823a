//! Typed operation requests and their GraphQL documents.
//!
//! Every state-changing operation resolves to an
//! [`ExecutionPlan`](aave_rs_exec::ExecutionPlan) on the backend; the
//! request types here are the variables each operation is called with.
//! Amounts carry an optional [`PermitSignature`] so a previously collected
//! permit can stand in for the approval leg of a plan.

use aave_rs_exec::{scalars::serialize_bigint, PermitSignature};
use alloy_primitives::{Address, U256};
use serde::Serialize;

/// Plan selection shared by every mutation-like operation.
const PLAN_FIELDS: &str = "__typename \
     ... on TransactionRequest { chainId from to data value } \
     ... on ApprovalRequired { \
         approval { chainId from to data value } \
         originalTransaction { chainId from to data value } \
         reason requiredAmount currentAllowance \
     } \
     ... on InsufficientBalance { required available }";

/// Build the GraphQL document for a plan-returning operation.
pub(crate) fn plan_document(operation_name: &str, field: &str, input_type: &str) -> String {
    format!(
        "mutation {operation_name}($request: {input_type}!) {{ \
             {field}(request: $request) {{ {PLAN_FIELDS} }} \
         }}"
    )
}

/// Build the GraphQL document for the permit typed-data query.
pub(crate) fn permit_typed_data_document() -> String {
    "query PermitTypedData($request: PermitTypedDataRequest!) { \
         permitTypedData(request: $request) \
     }"
    .to_string()
}

/// An ERC-20 amount input, optionally carrying a permit signature.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20Amount {
    /// Token address.
    pub currency: Address,
    /// Raw token amount.
    #[serde(serialize_with = "serialize_bigint")]
    pub value: U256,
    /// Permit substituting for an approval transaction, if one was signed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_sig: Option<PermitSignature>,
}

impl Erc20Amount {
    /// Create an amount input without a permit.
    pub fn new(currency: Address, value: U256) -> Self {
        Self {
            currency,
            value,
            permit_sig: None,
        }
    }

    /// Attach a permit signature to the amount.
    pub fn with_permit(mut self, permit_sig: PermitSignature) -> Self {
        self.permit_sig = Some(permit_sig);
        self
    }
}

/// Variables for the `supply` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyRequest {
    /// Market (pool) address.
    pub market: Address,
    /// Amount to supply.
    pub amount: Erc20Amount,
    /// Account performing the operation.
    pub sender: Address,
    /// Chain the market lives on.
    pub chain_id: u64,
}

/// Variables for the `borrow` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    /// Market (pool) address.
    pub market: Address,
    /// Amount to borrow.
    pub amount: Erc20Amount,
    /// Account performing the operation.
    pub sender: Address,
    /// Chain the market lives on.
    pub chain_id: u64,
}

/// Variables for the `repay` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepayRequest {
    /// Market (pool) address.
    pub market: Address,
    /// Amount to repay.
    pub amount: Erc20Amount,
    /// Account performing the operation.
    pub sender: Address,
    /// Chain the market lives on.
    pub chain_id: u64,
}

/// Variables for the `withdraw` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    /// Market (pool) address.
    pub market: Address,
    /// Amount to withdraw.
    pub amount: Erc20Amount,
    /// Account performing the operation.
    pub sender: Address,
    /// Chain the market lives on.
    pub chain_id: u64,
}

/// Variables for the `vaultDeposit` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultDepositRequest {
    /// Vault address.
    pub vault: Address,
    /// Amount to deposit.
    pub amount: Erc20Amount,
    /// Account performing the operation.
    pub sender: Address,
    /// Chain the vault lives on.
    pub chain_id: u64,
}

/// Variables for the `vaultWithdraw` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultWithdrawRequest {
    /// Vault address.
    pub vault: Address,
    /// Amount to withdraw.
    pub amount: Erc20Amount,
    /// Account performing the operation.
    pub sender: Address,
    /// Chain the vault lives on.
    pub chain_id: u64,
}

/// Variables for the `permitTypedData` query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitTypedDataRequest {
    /// Token to permit.
    pub currency: Address,
    /// Amount the permit covers.
    #[serde(serialize_with = "serialize_bigint")]
    pub amount: U256,
    /// Token owner granting the permit.
    pub owner: Address,
    /// Spender the permit authorizes.
    pub spender: Address,
    /// Chain the token lives on.
    pub chain_id: u64,
}
