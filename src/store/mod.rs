//! Content store access.
//!
//! Blobs are keyed by hexadecimal content id. The store resolves an id to a
//! stable row id, reports blob lengths, and yields byte ranges on demand so
//! that response streaming can be chunked across event-loop turns.

pub mod fs;
pub mod mem;

pub use fs::FsStore;
pub use mem::MemStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no blob with that content id")]
    NotFound,

    #[error("read offset past end of blob")]
    BadOffset,

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous blob store. Metadata calls are expected to be fast; body
/// reads go through `read_range` in bounded chunks so a large transfer never
/// holds up the serving thread for long.
pub trait ContentStore: Send + Sync {
    /// Resolves a hex content id to a stable row id.
    fn resolve(&self, hex_id: &str) -> Result<u64, StoreError>;

    /// Total byte length of the blob behind `rowid`.
    fn open_length(&self, rowid: u64) -> Result<u64, StoreError>;

    /// Reads up to `max_len` bytes starting at `offset`. Returns fewer bytes
    /// only at the end of the blob.
    fn read_range(&self, rowid: u64, offset: u64, max_len: usize) -> Result<Vec<u8>, StoreError>;
}
