//! # Storage Layer
//!
//! The record store persists everything through a small string-keyed
//! [`KeyValueStore`], the same shape as a browser's local storage: whole
//! values are read and written at once, there is no partial update.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, one file per key inside a data directory
//!   - `crm_data` lives in `crm_data.txt`, `theme` in `theme.txt`
//!   - Writes go to a temporary file that is then renamed over the target
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! Values are raw bytes. Interpreting them (and deciding what malformed data
//! means) is left to the caller.

use crate::error::Result;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Key holding the encoded customer blob.
pub const DATA_KEY: &str = "crm_data";

/// Key holding the theme preference (`"light"` or `"dark"`).
pub const THEME_KEY: &str = "theme";

/// Abstract interface for key-value persistence.
pub trait KeyValueStore {
    /// Read a value, `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the value stored under `key` in a single write.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Where the value for `key` lives on disk (for file-based stores).
    fn location(&self, key: &str) -> Option<PathBuf>;
}
