//! Store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default mode for parent directories created on open (before umask).
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// Default timeout for remote reads, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Options controlling how a [`DocumentStore`](crate::DocumentStore) reads and writes.
///
/// Deserializable so an embedding application can keep these in its own
/// config file; missing fields fall back to [`StoreOptions::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
  /// Write multi-line, indented JSON instead of compact JSON.
  pub pretty: bool,

  /// Mode for parent directories created on open. Ignored off Unix.
  pub dir_mode: u32,

  /// Timeout for fetching remote documents.
  pub fetch_timeout_secs: u64,

  /// User-Agent header sent with remote reads.
  pub user_agent: String,
}

impl StoreOptions {
  pub fn fetch_timeout(&self) -> Duration {
    Duration::from_secs(self.fetch_timeout_secs)
  }
}

impl Default for StoreOptions {
  fn default() -> Self {
    Self {
      pretty: true,
      dir_mode: DEFAULT_DIR_MODE,
      fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
      user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
    }
  }
}
