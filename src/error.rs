// Error types for durable storage and enum parsing

use thiserror::Error;

/// Failures of the best-effort key-value cache
///
/// None of these are fatal: record and preference stores fall back to their
/// seed or default data on any of them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("durable storage is not available")]
    Unavailable,

    #[error("nothing stored under key {key}")]
    NotFound { key: String },

    #[error("stored collection under key {key} is empty")]
    Empty { key: String },

    #[error("duplicate record id {id} under key {key}")]
    DuplicateId { key: String, id: String },

    #[error("invalid storage key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("failed to parse value stored under key {key}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize value for key {key}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage I/O error")]
    Io(#[from] std::io::Error),

    #[error("storage database error")]
    Sqlite(#[from] rusqlite::Error),
}

/// A string that names none of an enum's variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_messages() {
        let err = StorageError::NotFound {
            key: "estatery-properties".to_string(),
        };
        assert_eq!(err.to_string(), "nothing stored under key estatery-properties");

        let err = StorageError::InvalidKey {
            key: "bad/key".to_string(),
            reason: "must be alphanumeric with _/-",
        };
        assert!(err.to_string().contains("bad/key"));
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let source = serde_json::from_str::<Vec<i64>>("not json").unwrap_err();
        let err = StorageError::Parse {
            key: "k".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unknown_variant_display() {
        let err = UnknownVariant::new("property status", "sold");
        assert_eq!(err.to_string(), "unknown property status: \"sold\"");
    }
}
