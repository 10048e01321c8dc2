//! Document locations.
//!
//! A location is classified exactly once, when the store is opened. A string
//! that parses as an absolute URL with a host is remote; anything else is a
//! filesystem path (absolute or relative). A `file://` URL naming a local
//! file is treated as that path.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Url;

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  /// A local file. Readable and writable.
  Path(PathBuf),
  /// A remote resource. Read-only.
  Url(Url),
}

impl Location {
  /// Classify a raw location string.
  pub fn parse(raw: &str) -> Self {
    match Url::parse(raw) {
      Ok(url) if url.scheme() == "file" => match url.to_file_path() {
        Ok(path) => Location::Path(path),
        Err(()) => Location::Url(url),
      },
      Ok(url) if url.has_host() => Location::Url(url),
      _ => Location::Path(PathBuf::from(raw)),
    }
  }

  pub fn is_remote(&self) -> bool {
    matches!(self, Location::Url(_))
  }

  /// The local path, if this location is not a URL.
  pub fn as_path(&self) -> Option<&Path> {
    match self {
      Location::Path(path) => Some(path),
      Location::Url(_) => None,
    }
  }
}

impl From<&str> for Location {
  fn from(raw: &str) -> Self {
    Location::parse(raw)
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Location::Path(path) => write!(f, "{}", path.display()),
      Location::Url(url) => write!(f, "{}", url),
    }
  }
}
