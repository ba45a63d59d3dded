//! Ephemeral namespace tokens.

use uuid::Uuid;

/// Issue a fresh ephemeral token.
///
/// The token is the sole handle to a temporary upload namespace:
/// 128-bit-class randomness, no registry, no expiry. Its only record
/// is the directory it seeds.
pub fn issue_token() -> String {
    Uuid::new_v4().to_string()
}
