use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ContentStore, StoreError};

/// In-memory store for tests and demos. Row ids are insertion indices;
/// `resolve_count` exposes how many lookups the server has issued.
#[derive(Default)]
pub struct MemStore {
    blobs: Mutex<Vec<(String, Vec<u8>)>>,
    resolves: AtomicUsize,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a blob and returns its row id.
    pub fn insert(&self, hex_id: impl Into<String>, bytes: Vec<u8>) -> u64 {
        let mut blobs = self.blobs.lock().unwrap();
        blobs.push((hex_id.into(), bytes));
        (blobs.len() - 1) as u64
    }

    /// Number of `resolve` calls made against this store.
    pub fn resolve_count(&self) -> usize {
        self.resolves.load(Ordering::Relaxed)
    }
}

impl ContentStore for MemStore {
    fn resolve(&self, hex_id: &str) -> Result<u64, StoreError> {
        self.resolves.fetch_add(1, Ordering::Relaxed);
        self.blobs
            .lock()
            .unwrap()
            .iter()
            .position(|(id, _)| id == hex_id)
            .map(|i| i as u64)
            .ok_or(StoreError::NotFound)
    }

    fn open_length(&self, rowid: u64) -> Result<u64, StoreError> {
        self.blobs
            .lock()
            .unwrap()
            .get(rowid as usize)
            .map(|(_, bytes)| bytes.len() as u64)
            .ok_or(StoreError::NotFound)
    }

    fn read_range(&self, rowid: u64, offset: u64, max_len: usize) -> Result<Vec<u8>, StoreError> {
        let blobs = self.blobs.lock().unwrap();
        let (_, bytes) = blobs.get(rowid as usize).ok_or(StoreError::NotFound)?;

        if offset > bytes.len() as u64 {
            return Err(StoreError::BadOffset);
        }

        let start = offset as usize;
        let end = (start + max_len).min(bytes.len());
        Ok(bytes[start..end].to_vec())
    }
}
