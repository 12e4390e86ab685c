use crate::determinism::json_canonical;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

pub const ZERO_HASH_64: &str = "0000000000000000000000000000000000000000000000000000000000000000";

pub const ACTION_DOCUMENT_CREATED: &str = "DOCUMENT_CREATED";
pub const ACTION_PARTY_SIGNED: &str = "PARTY_SIGNED";
pub const ACTION_PAYMENT_COMPLETED: &str = "PAYMENT_COMPLETED";
pub const ACTION_SYSTEM_NOTE: &str = "SYSTEM_NOTE";

const ALLOWED_ACTIONS: [&str; 4] = [
    ACTION_DOCUMENT_CREATED,
    ACTION_PARTY_SIGNED,
    ACTION_PAYMENT_COMPLETED,
    ACTION_SYSTEM_NOTE,
];

/// One link in a contract's audit chain. Written exactly once at append time
/// and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEvent {
    pub id: String,           // evt_<ULID>
    pub sequence_number: u64, // 1-based, dense
    pub ts_utc: String,       // RFC3339 UTC string
    pub action: String,
    pub payload: Value,
    pub prev_fingerprint: String, // hex 64
    pub fingerprint: String,      // hex 64
}

// The stored fingerprint cannot participate in its own digest, so it is forced
// to ZERO_HASH_64 while hashing the canonical bytes of the full envelope. That
// keeps recompute-from-stored-fields reproducible for verification.
pub fn compute_fingerprint(event: &AuditEvent) -> CoreResult<String> {
    let mut e = event.clone();
    e.fingerprint = ZERO_HASH_64.to_string();
    let bytes = json_canonical::to_canonical_bytes(&e)?;
    let mut h = Sha256::new();
    h.update(bytes);
    Ok(hex::encode(h.finalize()))
}

pub fn finalize_event(mut event: AuditEvent) -> CoreResult<AuditEvent> {
    if event.prev_fingerprint.len() != 64
        || !event.prev_fingerprint.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(CoreError::InvalidInputError(
            "prev_fingerprint must be 64 hex chars".to_string(),
        ));
    }
    validate_action(&event.action)?;
    let fp = compute_fingerprint(&event)?;
    event.fingerprint = fp;
    Ok(event)
}

pub fn validate_action(action: &str) -> CoreResult<()> {
    if !ALLOWED_ACTIONS.contains(&action) {
        return Err(CoreError::UnknownActionError(action.to_string()));
    }
    Ok(())
}
