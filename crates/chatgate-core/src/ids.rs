//! Random identifier generation.
//!
//! Completion identifiers and UUIDs are opaque correlation tokens, not
//! secrets, so the thread-local RNG is sufficient.

use rand::distributions::{Alphanumeric, DistString};
use uuid::Uuid;

/// Prefix used for completion identifiers when the caller has no preference.
pub const DEFAULT_COMPLETION_PREFIX: &str = "cmpl-";

/// Number of random characters appended to a completion identifier prefix.
pub const COMPLETION_ID_SUFFIX_LEN: usize = 28;

/// Generate a completion identifier: `prefix` followed by 28 characters drawn
/// uniformly (with replacement) from `[a-zA-Z0-9]`.
pub fn new_completion_id(prefix: &str) -> String {
    let mut id = String::with_capacity(prefix.len() + COMPLETION_ID_SUFFIX_LEN);
    id.push_str(prefix);
    Alphanumeric.append_string(&mut rand::thread_rng(), &mut id, COMPLETION_ID_SUFFIX_LEN);
    id
}

/// Generate a random (v4) UUID in its hyphenated lowercase form.
pub fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}
