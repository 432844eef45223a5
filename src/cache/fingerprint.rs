//! Deterministic cache-key derivation from a leave request.
//!
//! The key is a 32-bit rolling hash of a canonical JSON form of twelve
//! request fields, rendered base-36 and namespaced. The same logical
//! request (after trimming free text) always derives the same key, across
//! process restarts. 32 bits cannot rule out collisions; with the store
//! bounded at a few dozen entries that risk is accepted and a colliding
//! key silently serves the other request's letter.

use serde::Serialize;

use crate::request::{LeaveRequest, LeaveType, Tone};

/// Namespace prepended to every derived key, keeping cache entries
/// distinguishable from other records in the same flat store.
pub const KEY_PREFIX: &str = "leave_request_cache_";

/// Canonical ordered field subset the key is derived from.
///
/// `word_limit` is deliberately absent: it only shapes the prompt, and two
/// requests differing in word limit share one cached letter.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalFields<'a> {
    full_name: &'a str,
    position: &'a str,
    recipient_name: &'a str,
    recipient_position: &'a str,
    leave_type: LeaveType,
    start_date: &'a str,
    end_date: &'a str,
    reason: &'a str,
    notes: &'a str,
    tone: Tone,
    remote_work: bool,
    check_email: bool,
}

/// Derive the namespaced cache key for a request.
pub fn fingerprint(request: &LeaveRequest) -> String {
    let canonical = CanonicalFields {
        full_name: request.full_name.trim(),
        position: request.position.trim(),
        recipient_name: request.recipient_name.trim(),
        recipient_position: request.recipient_position.trim(),
        leave_type: request.leave_type,
        start_date: request.start_date.trim(),
        end_date: request.end_date.trim(),
        reason: request.reason.trim(),
        notes: request.notes.trim(),
        tone: request.tone,
        remote_work: request.remote_work,
        check_email: request.check_email,
    };
    // Struct serialization preserves declaration order, so the canonical
    // string is stable for equal inputs.
    let json = serde_json::to_string(&canonical)
        .unwrap_or_else(|_| unreachable!("canonical form has no non-serializable fields"));
    format!("{KEY_PREFIX}{}", to_base36(rolling_hash(&json)))
}

/// 32-bit rolling hash (`h = h*31 + unit`) over UTF-16 code units, folded
/// to its absolute value.
fn rolling_hash(s: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    // 7 digits cover u32::MAX in base 36.
    let mut buf = [0u8; 7];
    let mut i = buf.len();
    while n > 0 {
        i -= 1;
        buf[i] = DIGITS[(n % 36) as usize];
        n /= 36;
    }
    String::from_utf8_lossy(&buf[i..]).into_owned()
}
