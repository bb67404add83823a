//! Test helper utilities for API crate integration tests.

use std::sync::Mutex;

use aave_rs_api::{ClientConfig, Receipt, ReceiptStatus, SigningAdapter, TransactionRequest};
use alloy_primitives::{Signature, B256, U256};
use url::Url;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a mock GraphQL server.
pub async fn start_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a ClientConfig pointing to a mock server, with fast retries.
pub fn client_config_with_mock(mock: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_api_url(Url::parse(&mock.uri()).unwrap())
        .with_retry_base_delay_ms(10)
}

/// Mock a GraphQL POST request with a JSON body.
pub async fn mock_graphql_response(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mock a GraphQL error response with a single error message.
pub async fn mock_graphql_error(server: &MockServer, error_message: &str) {
    let body = serde_json::json!({
        "errors": [{"message": error_message}],
        "data": null
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Adapter that confirms every broadcast on the first probe.
#[derive(Default)]
pub struct InstantAdapter {
    pub sends: Mutex<Vec<TransactionRequest>>,
    pub typed_data_signs: Mutex<u32>,
}

impl InstantAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash the adapter assigns to a broadcast: the target address
    /// left-aligned in 32 bytes.
    pub fn hash_for(to: alloy_primitives::Address) -> B256 {
        let mut hash = B256::ZERO;
        hash[..20].copy_from_slice(to.as_slice());
        hash
    }

    pub fn send_count(&self) -> usize {
        self.sends.lock().unwrap().len()
    }
}

impl SigningAdapter for InstantAdapter {
    async fn send_transaction(&self, tx: &TransactionRequest) -> aave_rs_exec::Result<B256> {
        self.sends.lock().unwrap().push(tx.clone());
        Ok(Self::hash_for(tx.to))
    }

    async fn transaction_receipt(
        &self,
        tx_hash: B256,
    ) -> aave_rs_exec::Result<Option<Receipt>> {
        Ok(Some(Receipt {
            tx_hash,
            status: ReceiptStatus::Success,
            block_number: Some(1),
        }))
    }

    async fn sign_typed_data(
        &self,
        _payload: &aave_rs_api::TypedData,
    ) -> aave_rs_exec::Result<Signature> {
        *self.typed_data_signs.lock().unwrap() += 1;
        Ok(Signature::new(U256::from(1u64), U256::from(2u64), false))
    }
}

/// A plan payload for a single ready-to-send transaction.
pub fn transaction_request_plan(to: &str) -> serde_json::Value {
    serde_json::json!({
        "__typename": "TransactionRequest",
        "chainId": 1,
        "from": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        "to": to,
        "data": "0x617ba037",
        "value": "0"
    })
}

/// A plan payload requiring an approval before the original transaction.
pub fn approval_required_plan(approval_to: &str, original_to: &str) -> serde_json::Value {
    serde_json::json!({
        "__typename": "ApprovalRequired",
        "approval": {
            "chainId": 1,
            "from": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "to": approval_to,
            "data": "0x095ea7b3",
            "value": "0"
        },
        "originalTransaction": {
            "chainId": 1,
            "from": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "to": original_to,
            "data": "0x617ba037",
            "value": "0"
        },
        "reason": "Supply requires an allowance on the reserve asset",
        "requiredAmount": "1000000",
        "currentAllowance": "0"
    })
}
