//! Byte transport for documents.
//!
//! Reads come from a local file or an HTTP(S) URL. Writes only ever go to a
//! local file, and replace it whole: bytes land in a sibling `.tmp` file which
//! is then renamed over the target, so a failed write leaves the previous
//! contents in place.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::DocumentError;
use crate::location::Location;
use crate::options::StoreOptions;

/// Read the raw bytes of a document.
pub fn read(location: &Location, options: &StoreOptions) -> Result<Vec<u8>, DocumentError> {
  match location {
    Location::Path(path) => read_file(path),
    Location::Url(url) => fetch_url(url, options),
  }
}

fn read_file(path: &Path) -> Result<Vec<u8>, DocumentError> {
  let bytes = fs::read(path).map_err(|e| DocumentError::FileRead {
    location: path.display().to_string(),
    source: Box::new(e),
  })?;
  debug!(path = ?path, size = bytes.len(), "read document");
  Ok(bytes)
}

fn fetch_url(url: &Url, options: &StoreOptions) -> Result<Vec<u8>, DocumentError> {
  let read_err = |source: Box<dyn std::error::Error + Send + Sync>| DocumentError::FileRead {
    location: url.to_string(),
    source,
  };

  if !matches!(url.scheme(), "http" | "https") {
    return Err(read_err(
      format!("unsupported URL scheme '{}'", url.scheme()).into(),
    ));
  }

  info!(url = %url, "fetching remote document");

  let client = Client::builder()
    .timeout(options.fetch_timeout())
    .user_agent(options.user_agent.as_str())
    .build()
    .map_err(|e| read_err(Box::new(e)))?;

  let response = client
    .get(url.clone())
    .send()
    .and_then(|response| response.error_for_status())
    .map_err(|e| read_err(Box::new(e)))?;

  let bytes = response.bytes().map_err(|e| read_err(Box::new(e)))?;

  debug!(url = %url, size = bytes.len(), "fetched remote document");
  Ok(bytes.to_vec())
}

/// Replace the contents of a local file.
///
/// An existing target is resolved through symlinks first, and its
/// permission bits carry over to the replacement.
pub fn write(path: &Path, bytes: &[u8]) -> Result<(), DocumentError> {
  let write_err = |source| DocumentError::FileWrite {
    path: path.to_path_buf(),
    source,
  };

  let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
  let permissions = fs::metadata(&target).ok().map(|metadata| metadata.permissions());
  let temp_path = temp_path_for(&target);

  if let Err(e) = fs::write(&temp_path, bytes) {
    let _ = fs::remove_file(&temp_path);
    return Err(write_err(e));
  }
  if let Some(permissions) = permissions {
    if let Err(e) = fs::set_permissions(&temp_path, permissions) {
      let _ = fs::remove_file(&temp_path);
      return Err(write_err(e));
    }
  }
  if let Err(e) = fs::rename(&temp_path, &target) {
    let _ = fs::remove_file(&temp_path);
    return Err(write_err(e));
  }

  debug!(path = ?target, size = bytes.len(), "wrote document");
  Ok(())
}

/// Path of the temporary file a write goes through (`<path>.tmp`).
fn temp_path_for(path: &Path) -> PathBuf {
  let mut name = OsString::from(path.as_os_str());
  name.push(".tmp");
  PathBuf::from(name)
}

/// Ensure the parent directory of `path` exists, creating it recursively.
///
/// On Unix the new directories get `mode` (subject to the process umask).
pub fn ensure_parent_dir(path: &Path, mode: u32) -> Result<(), DocumentError> {
  let parent = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => return Ok(()),
  };

  if parent.is_dir() {
    return Ok(());
  }

  let mut builder = fs::DirBuilder::new();
  builder.recursive(true);

  #[cfg(unix)]
  {
    use std::os::unix::fs::DirBuilderExt;
    builder.mode(mode);
  }
  #[cfg(not(unix))]
  let _ = mode;

  builder.create(parent).map_err(|source| DocumentError::DirectoryCreation {
    path: parent.to_path_buf(),
    source,
  })?;

  info!(path = ?parent, "created document directory");
  Ok(())
}
