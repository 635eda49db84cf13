//! Error types for the MinIO operator
//!
//! Errors carry the instance name and, for validation, the offending field
//! path so a rejected MinIOInstance can be fixed without reading the source.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for MinIO operator operations
#[derive(Debug, Error)]
pub enum Error {
    /// Validation error for a MinIOInstance spec
    #[error("validation error for {instance}: {message}")]
    Validation {
        /// Name of the MinIOInstance with invalid configuration
        instance: String,
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g., "spec.zones[0].servers")
        field: Option<String>,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The resource kind being serialized (if known)
        kind: Option<String>,
    },

    /// Failed to read or write a manifest file
    #[error("io error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a validation error with instance context and field path
    pub fn validation_for_field(
        instance: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Validation {
            instance: instance.into(),
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a serialization error with resource kind context
    pub fn serialization_for_kind(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the field path for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            kind: None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            kind: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_instance_and_message() {
        let err = Error::validation_for_field("tenant-a", "spec.zones", "at least one zone");
        assert_eq!(
            err.to_string(),
            "validation error for tenant-a: at least one zone"
        );
        assert_eq!(err.field(), Some("spec.zones"));
    }

    #[test]
    fn io_error_keeps_source() {
        let err = Error::io(
            "/tmp/instance.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/tmp/instance.yaml"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.field().is_none());
    }

    #[test]
    fn yaml_error_converts_to_serialization() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("{unclosed")
            .expect_err("invalid yaml should fail");
        let err: Error = yaml_err.into();
        assert!(matches!(err, Error::Serialization { kind: None, .. }));
    }

    #[test]
    fn serialization_error_with_kind() {
        let err = Error::serialization_for_kind("MinIOInstance", "unexpected field");
        match err {
            Error::Serialization { kind, message } => {
                assert_eq!(kind.as_deref(), Some("MinIOInstance"));
                assert_eq!(message, "unexpected field");
            }
            _ => panic!("expected Serialization error"),
        }
    }
}
