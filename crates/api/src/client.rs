//! API client and the unified query + execution client.

use aave_rs_exec::{
    sign_permit, ConfirmationPolicy, ExecutionPlan, LocalSignerAdapter, PermitSignature,
    PlanExecutor, SigningAdapter, TransactionOutcome, TypedData,
};
use serde::Serialize;
use serde_json::json;

use crate::error::{ApiError, Result};
use crate::gateway::{ClientConfig, QueryGateway};
use crate::operations::{
    permit_typed_data_document, plan_document, BorrowRequest, PermitTypedDataRequest,
    RepayRequest, SupplyRequest, VaultDepositRequest, VaultWithdrawRequest, WithdrawRequest,
};

/// Operation tag attached to vault deposit outcomes.
pub const VAULT_DEPOSIT_TAG: &str = "VAULT_DEPOSIT";

/// Operation tag attached to vault withdraw outcomes.
pub const VAULT_WITHDRAW_TAG: &str = "VAULT_WITHDRAW";

/// Client for resolving operations into execution plans via the backend.
#[derive(Debug, Clone)]
pub struct AaveApiClient {
    gateway: QueryGateway,
}

impl Default for AaveApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AaveApiClient {
    /// Create a new API client with default configuration.
    pub fn new() -> Self {
        Self {
            gateway: QueryGateway::new(),
        }
    }

    /// Create a new API client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            gateway: QueryGateway::with_config(config),
        }
    }

    /// Returns the underlying query gateway.
    pub fn gateway(&self) -> &QueryGateway {
        &self.gateway
    }

    /// Resolve a supply operation into an execution plan.
    pub async fn supply(&self, request: &SupplyRequest) -> Result<ExecutionPlan> {
        self.plan("Supply", "supply", "SupplyRequest", request).await
    }

    /// Resolve a borrow operation into an execution plan.
    pub async fn borrow(&self, request: &BorrowRequest) -> Result<ExecutionPlan> {
        self.plan("Borrow", "borrow", "BorrowRequest", request).await
    }

    /// Resolve a repay operation into an execution plan.
    pub async fn repay(&self, request: &RepayRequest) -> Result<ExecutionPlan> {
        self.plan("Repay", "repay", "RepayRequest", request).await
    }

    /// Resolve a withdraw operation into an execution plan.
    pub async fn withdraw(&self, request: &WithdrawRequest) -> Result<ExecutionPlan> {
        self.plan("Withdraw", "withdraw", "WithdrawRequest", request)
            .await
    }

    /// Resolve a vault deposit operation into an execution plan.
    pub async fn vault_deposit(&self, request: &VaultDepositRequest) -> Result<ExecutionPlan> {
        self.plan(
            "VaultDeposit",
            "vaultDeposit",
            "VaultDepositRequest",
            request,
        )
        .await
    }

    /// Resolve a vault withdraw operation into an execution plan.
    pub async fn vault_withdraw(&self, request: &VaultWithdrawRequest) -> Result<ExecutionPlan> {
        self.plan(
            "VaultWithdraw",
            "vaultWithdraw",
            "VaultWithdrawRequest",
            request,
        )
        .await
    }

    /// Fetch the EIP-712 typed-data document for a permit.
    pub async fn permit_typed_data(
        &self,
        request: &PermitTypedDataRequest,
    ) -> Result<TypedData> {
        let data = self
            .gateway
            .execute(
                "PermitTypedData",
                &permit_typed_data_document(),
                json!({ "request": request }),
            )
            .await?;

        let value = data
            .get("permitTypedData")
            .cloned()
            .ok_or_else(|| ApiError::Parse("permitTypedData missing from response".to_string()))?;

        serde_json::from_value(value)
            .map_err(|e| ApiError::Parse(format!("invalid permit typed data: {}", e)))
    }

    /// Execute a plan-returning operation and deserialize its plan.
    async fn plan<R: Serialize>(
        &self,
        operation_name: &str,
        field: &str,
        input_type: &str,
        request: &R,
    ) -> Result<ExecutionPlan> {
        let document = plan_document(operation_name, field, input_type);
        let data = self
            .gateway
            .execute(operation_name, &document, json!({ "request": request }))
            .await?;

        let value = data
            .get(field)
            .cloned()
            .ok_or_else(|| ApiError::Parse(format!("{field} missing from response")))?;

        serde_json::from_value(value)
            .map_err(|e| ApiError::Parse(format!("invalid {field} plan: {}", e)))
    }
}

/// Configuration for the unified [`AaveClient`].
#[derive(Debug, Clone, Default)]
pub struct AaveClientConfig {
    /// API configuration.
    pub api_config: Option<ClientConfig>,
    /// RPC URL for on-chain interactions.
    pub rpc_url: Option<String>,
    /// Private key for signing transactions.
    pub private_key: Option<String>,
    /// Confirmation policy for awaited transactions.
    pub confirmation_policy: Option<ConfirmationPolicy>,
}

impl AaveClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API configuration.
    pub fn with_api_config(mut self, config: ClientConfig) -> Self {
        self.api_config = Some(config);
        self
    }

    /// Set the RPC URL.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Set the private key.
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Set the confirmation policy.
    pub fn with_confirmation_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.confirmation_policy = Some(policy);
        self
    }
}

/// Unified client combining backend queries and plan execution.
///
/// API-only by default; with a signing adapter configured, each operation
/// resolves its plan and drives it to a confirmed
/// [`TransactionOutcome`]. Any [`SigningAdapter`] works; the default is the
/// local private-key adapter.
///
/// # Example
///
/// ```no_run
/// use aave_rs_api::{AaveClient, AaveClientConfig, Erc20Amount, SupplyRequest};
/// use alloy_primitives::{Address, U256};
///
/// #[tokio::main]
/// async fn main() -> Result<(), aave_rs_api::ApiError> {
///     let config = AaveClientConfig::new()
///         .with_rpc_url("https://eth.llamarpc.com")
///         .with_private_key("0x...");
///     let client = AaveClient::with_config(config)?;
///
///     let market: Address = "0x...".parse().unwrap();
///     let usdc: Address = "0x...".parse().unwrap();
///     let request = SupplyRequest {
///         market,
///         amount: Erc20Amount::new(usdc, U256::from(1_000_000u64)),
///         sender: client.signer_address().unwrap(),
///         chain_id: 1,
///     };
///
///     let outcome = client.supply(&request).await?;
///     println!("supplied in tx {}", outcome.tx_hash);
///     Ok(())
/// }
/// ```
pub struct AaveClient<A: SigningAdapter = LocalSignerAdapter> {
    api: AaveApiClient,
    adapter: Option<A>,
    policy: ConfirmationPolicy,
}

impl Default for AaveClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AaveClient {
    /// Create an API-only client (no transaction support).
    pub fn new() -> Self {
        Self {
            api: AaveApiClient::new(),
            adapter: None,
            policy: ConfirmationPolicy::default(),
        }
    }

    /// Create a client from configuration.
    ///
    /// If both `rpc_url` and `private_key` are provided, transaction support
    /// is enabled through a [`LocalSignerAdapter`].
    pub fn with_config(config: AaveClientConfig) -> Result<Self> {
        let api = match config.api_config {
            Some(api_config) => AaveApiClient::with_config(api_config),
            None => AaveApiClient::new(),
        };

        let adapter = match (&config.rpc_url, &config.private_key) {
            (Some(rpc_url), Some(private_key)) => {
                Some(LocalSignerAdapter::new(rpc_url, private_key)?)
            }
            _ => None,
        };

        Ok(Self {
            api,
            adapter,
            policy: config.confirmation_policy.unwrap_or_default(),
        })
    }

    /// The signer's address if transaction support is configured.
    pub fn signer_address(&self) -> Option<alloy_primitives::Address> {
        self.adapter.as_ref().map(|a| a.signer_address())
    }
}

impl<A: SigningAdapter> AaveClient<A> {
    /// Create a client with an explicit signing adapter.
    pub fn with_adapter(api: AaveApiClient, adapter: A) -> Self {
        Self {
            api,
            adapter: Some(adapter),
            policy: ConfirmationPolicy::default(),
        }
    }

    /// Set the confirmation policy for awaited transactions.
    pub fn with_confirmation_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the API client for plan-level access.
    pub fn api(&self) -> &AaveApiClient {
        &self.api
    }

    /// Check if transaction support is configured.
    pub fn has_transaction_support(&self) -> bool {
        self.adapter.is_some()
    }

    /// Supply assets to a market.
    pub async fn supply(&self, request: &SupplyRequest) -> Result<TransactionOutcome> {
        let plan = self.api.supply(request).await?;
        self.execute(plan).await
    }

    /// Borrow assets from a market.
    pub async fn borrow(&self, request: &BorrowRequest) -> Result<TransactionOutcome> {
        let plan = self.api.borrow(request).await?;
        self.execute(plan).await
    }

    /// Repay a borrow position.
    pub async fn repay(&self, request: &RepayRequest) -> Result<TransactionOutcome> {
        let plan = self.api.repay(request).await?;
        self.execute(plan).await
    }

    /// Withdraw supplied assets from a market.
    pub async fn withdraw(&self, request: &WithdrawRequest) -> Result<TransactionOutcome> {
        let plan = self.api.withdraw(request).await?;
        self.execute(plan).await
    }

    /// Deposit assets into a vault. The outcome carries the
    /// [`VAULT_DEPOSIT_TAG`] operation tag.
    pub async fn vault_deposit(
        &self,
        request: &VaultDepositRequest,
    ) -> Result<TransactionOutcome> {
        let plan = self.api.vault_deposit(request).await?;
        Ok(self.execute(plan).await?.with_operation(VAULT_DEPOSIT_TAG))
    }

    /// Withdraw assets from a vault. The outcome carries the
    /// [`VAULT_WITHDRAW_TAG`] operation tag.
    pub async fn vault_withdraw(
        &self,
        request: &VaultWithdrawRequest,
    ) -> Result<TransactionOutcome> {
        let plan = self.api.vault_withdraw(request).await?;
        Ok(self.execute(plan).await?.with_operation(VAULT_WITHDRAW_TAG))
    }

    /// Fetch and sign the permit typed data for a token, producing a
    /// [`PermitSignature`] to attach to a subsequent amount input.
    pub async fn sign_permit(
        &self,
        request: &PermitTypedDataRequest,
    ) -> Result<PermitSignature> {
        let adapter = self.require_adapter()?;
        let typed_data = self.api.permit_typed_data(request).await?;
        Ok(sign_permit(adapter, &typed_data).await?)
    }

    /// Execute a resolved plan with the configured adapter.
    pub async fn execute(&self, plan: ExecutionPlan) -> Result<TransactionOutcome> {
        let adapter = self.require_adapter()?;
        let executor = PlanExecutor::new(adapter).with_policy(self.policy);
        Ok(executor.execute(plan).await?)
    }

    fn require_adapter(&self) -> Result<&A> {
        self.adapter
            .as_ref()
            .ok_or(ApiError::TransactionNotConfigured)
    }
}
