//! jsondoc: read, write, merge and append to a single JSON document.
//!
//! A [`DocumentStore`] is bound to one location, either a local file or a
//! URL. Local documents support every operation; remote documents are
//! read-only.
//!
//! - [`DocumentStore::get`]: read and decode the whole document
//! - [`DocumentStore::set`]: replace the whole document
//! - [`DocumentStore::merge`]: shallow key overlay onto an object document
//! - [`DocumentStore::push`]: append one element to an array document
//!
//! ```no_run
//! use jsondoc::DocumentStore;
//! use serde_json::json;
//!
//! # fn main() -> jsondoc::Result<()> {
//! let store = DocumentStore::open("data/settings.json")?;
//! store.set(&json!({"theme": "dark"}))?;
//! let doc = store.get()?;
//! assert_eq!(doc["theme"], "dark");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod location;
pub mod options;
pub mod store;
pub mod transport;

pub use error::{DocumentError, Operation};
pub use location::Location;
pub use options::StoreOptions;
pub use store::{Document, DocumentStore};

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;
