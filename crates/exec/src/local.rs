//! Local private-key signer adapter.
//!
//! Reference [`SigningAdapter`] implementation backed by an in-process
//! private key and an HTTP JSON-RPC provider. Custodial or embedded-wallet
//! integrations implement the same trait with their own signing transport.

use alloy::{
    dyn_abi::TypedData,
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest as RpcTransactionRequest,
    signers::{local::PrivateKeySigner, Signer},
};
use alloy_primitives::{Signature, B256};

use crate::adapter::{Receipt, ReceiptStatus, SigningAdapter};
use crate::error::{ExecutionError, Result};
use crate::plan::TransactionRequest;
use crate::provider::HttpProvider;

/// Adapter that signs with a local private key and broadcasts over HTTP RPC.
pub struct LocalSignerAdapter {
    provider: HttpProvider,
    signer: PrivateKeySigner,
}

impl LocalSignerAdapter {
    /// Create a new local signer adapter.
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|_| ExecutionError::InvalidPrivateKey)?;
        let wallet = EthereumWallet::from(signer.clone());

        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| ExecutionError::RpcConnection(format!("{}", e)))?;

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

        Ok(Self { provider, signer })
    }

    /// The signer's address.
    pub fn signer_address(&self) -> alloy_primitives::Address {
        self.signer.address()
    }
}

impl SigningAdapter for LocalSignerAdapter {
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256> {
        let mut request = RpcTransactionRequest::default()
            .to(tx.to)
            .input(tx.data.clone().into())
            .value(tx.value);
        request.from = Some(tx.from);

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| ExecutionError::Signing(format!("failed to send transaction: {}", e)))?;

        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<Receipt>> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ExecutionError::Unexpected(format!("failed to get receipt: {}", e)))?;

        Ok(receipt.map(|r| Receipt {
            tx_hash,
            status: if r.status() {
                ReceiptStatus::Success
            } else {
                ReceiptStatus::Reverted
            },
            block_number: r.block_number,
        }))
    }

    async fn sign_typed_data(&self, payload: &TypedData) -> Result<Signature> {
        self.signer
            .sign_dynamic_typed_data(payload)
            .await
            .map_err(|e| ExecutionError::Signing(format!("typed-data signing failed: {}", e)))
    }
}
