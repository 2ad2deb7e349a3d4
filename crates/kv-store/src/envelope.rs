use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Result, StorageError};

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// The serialized form of a cart written into a storage slot.
///
/// The whole line list is written on every save, so the envelope always
/// describes the complete cart at `saved_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedCart<T> {
    /// Layout version of this envelope.
    pub schema_version: u32,

    /// When the cart was written.
    pub saved_at: DateTime<Utc>,

    /// The cart lines, in insertion order.
    pub lines: Vec<T>,
}

impl<T> PersistedCart<T> {
    /// Wraps lines in an envelope stamped with the current schema version.
    pub fn new(lines: Vec<T>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            lines,
        }
    }

    /// Unwraps the envelope into its lines.
    pub fn into_lines(self) -> Vec<T> {
        self.lines
    }
}

impl<T: Serialize> PersistedCart<T> {
    /// Serializes the envelope to a JSON string.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T: DeserializeOwned> PersistedCart<T> {
    /// Parses an envelope, rejecting unknown schema versions.
    pub fn decode(raw: &str) -> Result<Self> {
        let envelope: Self = serde_json::from_str(raw)?;
        if envelope.schema_version != CURRENT_SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchema {
                found: envelope.schema_version,
                expected: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestLine {
        sku: String,
        quantity: u32,
    }

    fn lines() -> Vec<TestLine> {
        vec![
            TestLine {
                sku: "tee".to_string(),
                quantity: 2,
            },
            TestLine {
                sku: "cap".to_string(),
                quantity: 1,
            },
        ]
    }

    #[test]
    fn encode_and_decode_preserve_lines_and_order() {
        let envelope = PersistedCart::new(lines());
        let raw = envelope.encode().unwrap();

        let decoded: PersistedCart<TestLine> = PersistedCart::decode(&raw).unwrap();
        assert_eq!(decoded.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(decoded.saved_at, envelope.saved_at);
        assert_eq!(decoded.into_lines(), lines());
    }

    #[test]
    fn decode_rejects_garbage() {
        let result: Result<PersistedCart<TestLine>> = PersistedCart::decode("{not json");
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn decode_rejects_other_schema_versions() {
        let raw = serde_json::json!({
            "schema_version": 99,
            "saved_at": "2024-01-01T00:00:00Z",
            "lines": []
        })
        .to_string();

        let result: Result<PersistedCart<TestLine>> = PersistedCart::decode(&raw);
        assert!(matches!(
            result,
            Err(StorageError::UnsupportedSchema {
                found: 99,
                expected: CURRENT_SCHEMA_VERSION
            })
        ));
    }
}
