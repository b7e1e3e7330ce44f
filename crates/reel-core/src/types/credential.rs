//! Persisted credential slot.
//!
//! A process holds at most one credential at a time. No expiry is trusted
//! client-side; validity is confirmed empirically by probing an
//! authenticated endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bearer token plus the moment it was obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// The bearer token value
    pub token: String,
    /// When the token was acquired
    pub obtained_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential obtained now
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            obtained_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_creation() {
        let before = Utc::now();
        let cred = Credential::new("abc123");
        let after = Utc::now();

        assert_eq!(cred.token, "abc123");
        assert!(cred.obtained_at >= before && cred.obtained_at <= after);
    }

    #[test]
    fn test_credential_serialization_roundtrip() {
        let cred = Credential::new("tok");
        let json = serde_json::to_string(&cred).unwrap();
        let back: Credential = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cred);
    }
}
