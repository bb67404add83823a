//! Executor and confirmation-waiter integration tests against a scripted
//! fake adapter.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256};

use aave_rs_exec::{
    sign_permit, wait_for_confirmation, wait_for_confirmation_with_cancel, CancellationToken,
    ConfirmationPolicy, ExecutionError, ExecutionPlan, PlanExecutor, Receipt, ReceiptStatus,
    SigningAdapter, TransactionRequest, TypedData,
};

/// Everything the fake adapter was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Send(Address),
    Probe(B256),
    SignTypedData,
}

/// Scripted in-memory adapter that records every call.
#[derive(Default)]
struct MockAdapter {
    events: Mutex<Vec<Event>>,
    /// Receipt status reported once a hash is found. Hashes absent from the
    /// map are never found.
    confirmed: Mutex<HashMap<B256, ReceiptStatus>>,
    /// Number of not-found probes per hash before the receipt appears.
    probes_until_found: u32,
    /// Number of leading probe attempts that fail with a transport error.
    transient_probe_errors: u32,
    /// Fail the first send with a signing error.
    fail_first_send: bool,
    /// Fail typed-data signing.
    fail_typed_data: bool,
    probe_counts: Mutex<HashMap<B256, u32>>,
}

impl MockAdapter {
    fn new() -> Self {
        Self::default()
    }

    /// Deterministic hash the mock assigns to a transaction: the target
    /// address left-aligned in 32 bytes.
    fn hash_for(to: Address) -> B256 {
        let mut hash = B256::ZERO;
        hash[..20].copy_from_slice(to.as_slice());
        hash
    }

    fn confirm(self, to: Address, status: ReceiptStatus) -> Self {
        self.confirmed
            .lock()
            .unwrap()
            .insert(Self::hash_for(to), status);
        self
    }

    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn send_count(&self, to: Address) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == Event::Send(to))
            .count()
    }

    fn probe_count(&self, hash: B256) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == Event::Probe(hash))
            .count()
    }
}

impl SigningAdapter for MockAdapter {
    async fn send_transaction(&self, tx: &TransactionRequest) -> aave_rs_exec::Result<B256> {
        let first = self.events.lock().unwrap().is_empty();
        self.events.lock().unwrap().push(Event::Send(tx.to));
        if self.fail_first_send && first {
            return Err(ExecutionError::Signing("user rejected".to_string()));
        }
        Ok(Self::hash_for(tx.to))
    }

    async fn transaction_receipt(&self, tx_hash: B256) -> aave_rs_exec::Result<Option<Receipt>> {
        self.events.lock().unwrap().push(Event::Probe(tx_hash));
        let mut counts = self.probe_counts.lock().unwrap();
        let count = counts.entry(tx_hash).or_insert(0);
        *count += 1;

        if *count <= self.transient_probe_errors {
            return Err(ExecutionError::Unexpected("rpc hiccup".to_string()));
        }
        if *count <= self.transient_probe_errors + self.probes_until_found {
            return Ok(None);
        }

        Ok(self
            .confirmed
            .lock()
            .unwrap()
            .get(&tx_hash)
            .map(|status| Receipt {
                tx_hash,
                status: *status,
                block_number: Some(1),
            }))
    }

    async fn sign_typed_data(
        &self,
        _payload: &TypedData,
    ) -> aave_rs_exec::Result<alloy_primitives::Signature> {
        self.events.lock().unwrap().push(Event::SignTypedData);
        if self.fail_typed_data {
            return Err(ExecutionError::Signing("user rejected".to_string()));
        }
        Ok(alloy_primitives::Signature::new(
            U256::from(1u64),
            U256::from(2u64),
            false,
        ))
    }
}

fn fast_policy() -> ConfirmationPolicy {
    ConfirmationPolicy::new()
        .with_interval(Duration::from_millis(1))
        .with_retry_delay(Duration::from_millis(1))
}

fn tx_to(to: Address) -> TransactionRequest {
    TransactionRequest {
        chain_id: 1,
        from: Address::repeat_byte(0xaa),
        to,
        data: Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
        value: U256::ZERO,
    }
}

const TARGET: Address = Address::repeat_byte(0x01);
const SPENDER: Address = Address::repeat_byte(0x02);

#[tokio::test]
async fn test_direct_plan_sends_once_then_waits_once() {
    let adapter = MockAdapter::new().confirm(TARGET, ReceiptStatus::Success);
    let executor = PlanExecutor::new(&adapter).with_policy(fast_policy());

    let plan = ExecutionPlan::TransactionRequest(tx_to(TARGET));
    let outcome = executor.execute(plan).await.unwrap();

    assert_eq!(outcome.tx_hash, MockAdapter::hash_for(TARGET));
    assert_eq!(outcome.operation, None);
    assert_eq!(
        adapter.events(),
        vec![
            Event::Send(TARGET),
            Event::Probe(MockAdapter::hash_for(TARGET)),
        ]
    );
}

#[tokio::test]
async fn test_approval_plan_sends_both_legs_in_order() {
    let adapter = MockAdapter::new()
        .confirm(SPENDER, ReceiptStatus::Success)
        .confirm(TARGET, ReceiptStatus::Success);
    let executor = PlanExecutor::new(&adapter).with_policy(fast_policy());

    let plan = ExecutionPlan::ApprovalRequired {
        approval: tx_to(SPENDER),
        original_transaction: tx_to(TARGET),
        reason: "allowance below requested amount".to_string(),
        required_amount: U256::from(1_000_000u64),
        current_allowance: U256::ZERO,
    };

    let outcome = executor.execute(plan).await.unwrap();

    // The outcome is the original transaction's, not the approval's.
    assert_eq!(outcome.tx_hash, MockAdapter::hash_for(TARGET));

    // 2 sends + 2 confirmations, and the approval is confirmed before the
    // original transaction is ever sent.
    assert_eq!(
        adapter.events(),
        vec![
            Event::Send(SPENDER),
            Event::Probe(MockAdapter::hash_for(SPENDER)),
            Event::Send(TARGET),
            Event::Probe(MockAdapter::hash_for(TARGET)),
        ]
    );
}

#[tokio::test]
async fn test_approval_confirmation_timeout_suppresses_original_send() {
    // The approval hash is never found, so confirmation exhausts its budget.
    let adapter = MockAdapter::new().confirm(TARGET, ReceiptStatus::Success);
    let executor = PlanExecutor::new(&adapter).with_policy(fast_policy().with_max_retries(20));

    let plan = ExecutionPlan::ApprovalRequired {
        approval: tx_to(SPENDER),
        original_transaction: tx_to(TARGET),
        reason: "allowance below requested amount".to_string(),
        required_amount: U256::from(100u64),
        current_allowance: U256::ZERO,
    };

    let result = executor.execute(plan).await;
    match result {
        Err(ExecutionError::Timeout { tx_hash, attempts }) => {
            assert_eq!(tx_hash, MockAdapter::hash_for(SPENDER));
            assert_eq!(attempts, 20);
        }
        other => panic!("Expected Timeout, got: {other:?}"),
    }

    assert_eq!(adapter.send_count(TARGET), 0);
    assert_eq!(adapter.probe_count(MockAdapter::hash_for(SPENDER)), 20);
}

#[tokio::test]
async fn test_approval_signing_failure_suppresses_original_send() {
    let adapter = MockAdapter {
        fail_first_send: true,
        ..MockAdapter::new()
    }
    .confirm(TARGET, ReceiptStatus::Success);
    let executor = PlanExecutor::new(&adapter).with_policy(fast_policy());

    let plan = ExecutionPlan::ApprovalRequired {
        approval: tx_to(SPENDER),
        original_transaction: tx_to(TARGET),
        reason: "allowance below requested amount".to_string(),
        required_amount: U256::from(100u64),
        current_allowance: U256::ZERO,
    };

    let result = executor.execute(plan).await;
    assert!(matches!(result, Err(ExecutionError::Signing(_))));
    assert_eq!(adapter.send_count(TARGET), 0);
    // A rejected signature never reaches the polling stage.
    assert_eq!(adapter.probe_count(MockAdapter::hash_for(SPENDER)), 0);
}

#[tokio::test]
async fn test_insufficient_balance_makes_zero_adapter_calls() {
    let adapter = MockAdapter::new();
    let executor = PlanExecutor::new(&adapter).with_policy(fast_policy());

    let plan = ExecutionPlan::InsufficientBalance {
        required: U256::from(100u64),
        available: U256::from(40u64),
    };

    let result = executor.execute(plan).await;
    match result {
        Err(ExecutionError::Validation {
            required,
            available,
        }) => {
            assert_eq!(required, U256::from(100u64));
            assert_eq!(available, U256::from(40u64));
        }
        other => panic!("Expected Validation, got: {other:?}"),
    }
    assert!(adapter.events().is_empty());
}

#[tokio::test]
async fn test_reverted_transaction_is_not_a_timeout() {
    let adapter = MockAdapter::new().confirm(TARGET, ReceiptStatus::Reverted);
    let executor = PlanExecutor::new(&adapter).with_policy(fast_policy());

    let result = executor.execute(ExecutionPlan::TransactionRequest(tx_to(TARGET))).await;
    match result {
        Err(ExecutionError::Reverted { tx_hash }) => {
            assert_eq!(tx_hash, MockAdapter::hash_for(TARGET));
        }
        other => panic!("Expected Reverted, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_for_confirmation_is_idempotent() {
    let adapter = MockAdapter::new().confirm(TARGET, ReceiptStatus::Success);
    let hash = MockAdapter::hash_for(TARGET);
    let policy = fast_policy();

    let first = wait_for_confirmation(&adapter, hash, &policy).await.unwrap();
    let second = wait_for_confirmation(&adapter, hash, &policy).await.unwrap();

    assert_eq!(first, second);
    // Two waits, two probes, zero sends.
    assert_eq!(adapter.probe_count(hash), 2);
    assert_eq!(adapter.send_count(TARGET), 0);
}

#[tokio::test]
async fn test_zero_max_retries_times_out_without_probing() {
    let adapter = MockAdapter::new().confirm(TARGET, ReceiptStatus::Success);
    let hash = MockAdapter::hash_for(TARGET);
    let policy = fast_policy().with_max_retries(0);

    let result = wait_for_confirmation(&adapter, hash, &policy).await;
    assert!(matches!(
        result,
        Err(ExecutionError::Timeout { attempts: 0, .. })
    ));
    assert!(adapter.events().is_empty());
}

#[tokio::test]
async fn test_confirmation_found_after_several_misses() {
    let adapter = MockAdapter {
        probes_until_found: 5,
        ..MockAdapter::new()
    }
    .confirm(TARGET, ReceiptStatus::Success);
    let hash = MockAdapter::hash_for(TARGET);

    let receipt = wait_for_confirmation(&adapter, hash, &fast_policy())
        .await
        .unwrap();
    assert_eq!(receipt.status, ReceiptStatus::Success);
    assert_eq!(adapter.probe_count(hash), 6);
}

#[tokio::test]
async fn test_transient_probe_errors_consume_attempts_but_do_not_abort() {
    let adapter = MockAdapter {
        transient_probe_errors: 3,
        ..MockAdapter::new()
    }
    .confirm(TARGET, ReceiptStatus::Success);
    let hash = MockAdapter::hash_for(TARGET);

    let receipt = wait_for_confirmation(&adapter, hash, &fast_policy())
        .await
        .unwrap();
    assert_eq!(receipt.status, ReceiptStatus::Success);
    assert_eq!(adapter.probe_count(hash), 4);
}

#[tokio::test]
async fn test_cancelled_token_stops_wait_before_any_probe() {
    let adapter = MockAdapter::new();
    let hash = MockAdapter::hash_for(TARGET);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result =
        wait_for_confirmation_with_cancel(&adapter, hash, &fast_policy(), &cancel).await;
    assert!(matches!(result, Err(ExecutionError::Cancelled { .. })));
    assert!(adapter.events().is_empty());
}

#[tokio::test]
async fn test_cancellation_interrupts_a_long_wait() {
    let adapter = MockAdapter::new();
    let hash = MockAdapter::hash_for(TARGET);
    let policy = ConfirmationPolicy::new()
        .with_interval(Duration::from_millis(5))
        .with_max_retries(10_000);
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(25)).await;
        canceller.cancel();
    });

    let result = wait_for_confirmation_with_cancel(&adapter, hash, &policy, &cancel).await;
    handle.await.unwrap();

    assert!(matches!(result, Err(ExecutionError::Cancelled { .. })));
    // Cancelled long before the 10k-attempt budget was spent.
    assert!(adapter.probe_count(hash) < 100);
}

fn permit_payload() -> TypedData {
    serde_json::from_value(serde_json::json!({
        "types": {
            "EIP712Domain": [
                {"name": "name", "type": "string"},
                {"name": "chainId", "type": "uint256"},
                {"name": "verifyingContract", "type": "address"}
            ],
            "Permit": [
                {"name": "owner", "type": "address"},
                {"name": "spender", "type": "address"},
                {"name": "value", "type": "uint256"},
                {"name": "nonce", "type": "uint256"},
                {"name": "deadline", "type": "uint256"}
            ]
        },
        "primaryType": "Permit",
        "domain": {
            "name": "USD Coin",
            "chainId": 1,
            "verifyingContract": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
        },
        "message": {
            "owner": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "spender": "0x0202020202020202020202020202020202020202",
            "value": "1000000",
            "nonce": "7",
            "deadline": "1735689600"
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_sign_permit_carries_message_deadline() {
    let adapter = MockAdapter::new();
    let permit = sign_permit(&adapter, &permit_payload()).await.unwrap();

    assert_eq!(permit.deadline, U256::from(1_735_689_600u64));
    assert_eq!(adapter.events(), vec![Event::SignTypedData]);
}

#[tokio::test]
async fn test_sign_permit_rejection_yields_signing_error() {
    let adapter = MockAdapter {
        fail_typed_data: true,
        ..MockAdapter::new()
    };

    let result = sign_permit(&adapter, &permit_payload()).await;
    assert!(matches!(result, Err(ExecutionError::Signing(_))));
}
