//! Error types for document operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A mutating operation on a [`DocumentStore`](crate::DocumentStore).
///
/// Used to name the rejected operation when the store is backed by a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Set,
  Merge,
  Push,
}

impl Operation {
  pub fn as_str(&self) -> &'static str {
    match self {
      Operation::Set => "set",
      Operation::Merge => "merge",
      Operation::Push => "push",
    }
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Errors that can occur while reading or writing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
  /// The parent directory of a local document could not be created.
  #[error("failed to create directory '{}': {source}", path.display())]
  DirectoryCreation {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Bytes could not be written to the local document.
  #[error("failed to write '{}': {source}", path.display())]
  FileWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Bytes could not be read from the document location (file or URL).
  #[error("failed to read '{location}': {source}")]
  FileRead {
    location: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  /// The bytes read were not valid JSON, or did not match the requested type.
  #[error("invalid JSON in '{location}': {source}")]
  JsonDecode {
    location: String,
    #[source]
    source: serde_json::Error,
  },

  /// The in-memory value could not be serialized to JSON.
  #[error("failed to encode JSON: {0}")]
  JsonEncode(#[source] serde_json::Error),

  /// A mutating operation was attempted on a remote (read-only) document.
  #[error("'{operation}' is not supported for remote document '{location}'")]
  UnsupportedOperation { operation: Operation, location: String },

  /// The current document does not have the shape the operation needs.
  #[error("cannot {operation} '{location}': document is not {expected}")]
  DocumentShape {
    operation: Operation,
    location: String,
    expected: &'static str,
  },
}

impl DocumentError {
  /// The operation name carried by an [`DocumentError::UnsupportedOperation`].
  pub fn unsupported_operation(&self) -> Option<Operation> {
    match self {
      DocumentError::UnsupportedOperation { operation, .. } => Some(*operation),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn operation_names() {
    assert_eq!(Operation::Set.to_string(), "set");
    assert_eq!(Operation::Merge.to_string(), "merge");
    assert_eq!(Operation::Push.to_string(), "push");
  }

  #[test]
  fn unsupported_operation_message_names_operation() {
    let err = DocumentError::UnsupportedOperation {
      operation: Operation::Merge,
      location: "https://example.com/doc.json".to_string(),
    };
    assert_eq!(
      err.to_string(),
      "'merge' is not supported for remote document 'https://example.com/doc.json'"
    );
    assert_eq!(err.unsupported_operation(), Some(Operation::Merge));
  }

  #[test]
  fn write_error_keeps_source() {
    use std::error::Error as _;

    let err = DocumentError::FileWrite {
      path: PathBuf::from("/tmp/doc.json"),
      source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.to_string().contains("/tmp/doc.json"));
    assert!(err.source().is_some());
    assert!(err.unsupported_operation().is_none());
  }
}
