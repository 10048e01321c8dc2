//! Document store.
//!
//! A [`DocumentStore`] is bound to one [`Location`] for its lifetime. Every
//! operation reads the full document fresh from the transport; nothing is
//! cached between calls. Mutations rewrite the whole document.
//!
//! There is no locking. Two concurrent `merge` or `push` calls against the
//! same file can lose one side's update; callers needing atomicity must
//! serialize access themselves.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::Result;
use crate::codec;
use crate::error::{DocumentError, Operation};
use crate::location::Location;
use crate::options::StoreOptions;
use crate::transport;

/// A decoded JSON document.
pub type Document = Value;

/// Reads and writes a single JSON document on disk or behind a URL.
#[derive(Debug, Clone)]
pub struct DocumentStore {
  location: Location,
  options: StoreOptions,
}

impl DocumentStore {
  /// Open a store with default options.
  ///
  /// See [`DocumentStore::open_with`].
  pub fn open(filepath: &str) -> Result<Self> {
    Self::open_with(filepath, StoreOptions::default())
  }

  /// Open a store bound to `filepath`.
  ///
  /// Initialization is eager: if `filepath` is a local path and no file
  /// exists there yet, the parent directory is created and the file is
  /// written with `{}` before this returns. URLs are only classified.
  pub fn open_with(filepath: &str, options: StoreOptions) -> Result<Self> {
    let location = Location::parse(filepath);

    if let Location::Path(path) = &location {
      if !path.exists() {
        transport::ensure_parent_dir(path, options.dir_mode)?;
        let empty = codec::encode(&Value::Object(Map::new()), options.pretty)?;
        transport::write(path, &empty)?;
        info!(path = ?path, "initialized empty document");
      }
    }

    Ok(Self { location, options })
  }

  pub fn location(&self) -> &Location {
    &self.location
  }

  pub fn options(&self) -> &StoreOptions {
    &self.options
  }

  /// Whether the document is remote, and therefore read-only.
  pub fn is_remote(&self) -> bool {
    self.location.is_remote()
  }

  /// Read and decode the current document.
  pub fn get(&self) -> Result<Document> {
    self.get_as()
  }

  /// Read the current document and deserialize it into `T`.
  ///
  /// A document that is valid JSON but does not fit `T` is a
  /// [`DocumentError::JsonDecode`].
  pub fn get_as<T: DeserializeOwned>(&self) -> Result<T> {
    let bytes = transport::read(&self.location, &self.options)?;
    codec::decode_as(&bytes, &self.location.to_string())
  }

  /// Replace the document with `content`.
  pub fn set(&self, content: &Document) -> Result<()> {
    self.set_as(content)
  }

  /// Serialize `content` and replace the document with it.
  pub fn set_as<T: Serialize + ?Sized>(&self, content: &T) -> Result<()> {
    self.write(Operation::Set, content)
  }

  /// Overlay the keys of `content` onto the current document.
  ///
  /// The merge is shallow: each top-level key in `content` replaces the
  /// same key in the document, and keys absent from `content` are kept.
  /// Returns the document as written.
  pub fn merge(&self, content: Map<String, Value>) -> Result<Document> {
    self.ensure_writable(Operation::Merge)?;

    let mut current = match self.get()? {
      Value::Object(map) => map,
      _ => return Err(self.shape_error(Operation::Merge, "an object")),
    };

    debug!(location = %self.location, keys = content.len(), "merging document");
    for (key, value) in content {
      current.insert(key, value);
    }

    let merged = Value::Object(current);
    self.write(Operation::Merge, &merged)?;
    Ok(merged)
  }

  /// Append `content` as one new trailing element of the document.
  ///
  /// The document must be an array. An empty object, which is what a new
  /// store is initialized with, counts as an empty array.
  /// Returns the document as written.
  pub fn push(&self, content: Document) -> Result<Document> {
    self.ensure_writable(Operation::Push)?;

    let mut items = match self.get()? {
      Value::Array(items) => items,
      Value::Object(map) if map.is_empty() => Vec::new(),
      _ => return Err(self.shape_error(Operation::Push, "an array")),
    };

    items.push(content);
    debug!(location = %self.location, len = items.len(), "pushed to document");

    let pushed = Value::Array(items);
    self.write(Operation::Push, &pushed)?;
    Ok(pushed)
  }

  fn write<T: Serialize + ?Sized>(&self, operation: Operation, content: &T) -> Result<()> {
    let path = self.ensure_writable(operation)?;
    let bytes = codec::encode(content, self.options.pretty)?;
    transport::write(path, &bytes)
  }

  /// The local path to write to, or an error naming `operation` for URLs.
  fn ensure_writable(&self, operation: Operation) -> Result<&std::path::Path> {
    self
      .location
      .as_path()
      .ok_or_else(|| DocumentError::UnsupportedOperation {
        operation,
        location: self.location.to_string(),
      })
  }

  fn shape_error(&self, operation: Operation, expected: &'static str) -> DocumentError {
    DocumentError::DocumentShape {
      operation,
      location: self.location.to_string(),
      expected,
    }
  }
}
