//! ID generation utilities.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a unique conversation ID.
///
/// Returns a UUID v4 string prefixed with "conv_".
#[must_use]
pub fn generate_conversation_id() -> String {
    format!("conv_{}", Uuid::new_v4().simple())
}

/// Generate a unique message ID.
///
/// Returns a UUID v4 string prefixed with "msg_".
#[must_use]
pub fn generate_message_id() -> String {
    format!("msg_{}", Uuid::new_v4().simple())
}

/// Get the current UTC timestamp.
#[must_use]
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_id_prefix() {
        let id = generate_conversation_id();
        assert!(id.starts_with("conv_"));
        assert_eq!(id.len(), 37); // "conv_" + 32 hex chars
    }

    #[test]
    fn test_message_ids_unique() {
        assert_ne!(generate_message_id(), generate_message_id());
    }
}
