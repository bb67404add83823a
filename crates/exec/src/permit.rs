//! Permit signing.
//!
//! Turns a backend-supplied EIP-712 typed-data document into a
//! [`PermitSignature`] by delegating to a [`SigningAdapter`]. Signing only;
//! nothing is broadcast. The resulting signature is opaque to this module:
//! callers attach it to a subsequent amount input and the backend interprets
//! it when building the next plan. Deadline validity is enforced by the
//! backend and the chain, never assumed here.

use alloy::dyn_abi::TypedData;
use alloy_primitives::{Signature, U256};
use serde::{Serialize, Serializer};

use crate::adapter::SigningAdapter;
use crate::error::{ExecutionError, Result};
use crate::scalars::{parse_bigint, serialize_bigint};

/// An off-chain EIP-712 signature substituting for an approval transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitSignature {
    /// The signature over the typed-data payload.
    #[serde(serialize_with = "serialize_signature")]
    pub value: Signature,
    /// Deadline taken from the typed-data message.
    #[serde(serialize_with = "serialize_bigint")]
    pub deadline: U256,
}

/// Serialize a signature as a 0x-prefixed 65-byte hex string.
fn serialize_signature<S>(sig: &Signature, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{}", alloy_primitives::hex::encode(sig.as_bytes())))
}

/// Sign an EIP-712 typed-data document, producing a [`PermitSignature`].
///
/// A single user interaction either produces a signature or it does not;
/// signing rejections are returned as [`ExecutionError::Signing`] without
/// retry.
pub async fn sign_permit<A: SigningAdapter>(
    adapter: &A,
    typed_data: &TypedData,
) -> Result<PermitSignature> {
    let deadline = extract_deadline(typed_data)?;
    let value = adapter.sign_typed_data(typed_data).await?;
    Ok(PermitSignature { value, deadline })
}

/// Pull the permit deadline out of the typed-data message.
fn extract_deadline(typed_data: &TypedData) -> Result<U256> {
    let raw = typed_data.message.get("deadline").ok_or_else(|| {
        ExecutionError::Unexpected("permit typed data has no deadline field".to_string())
    })?;

    let parsed = match raw {
        serde_json::Value::String(s) => parse_bigint(s),
        serde_json::Value::Number(n) => n.as_u64().map(U256::from),
        _ => None,
    };

    parsed.ok_or_else(|| {
        ExecutionError::Unexpected(format!("unparseable permit deadline: {raw}"))
    })
}
