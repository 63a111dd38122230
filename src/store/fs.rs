use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{ContentStore, StoreError};

/// Directory-backed store: each blob is a file under `root` named by its
/// lowercase hex content id.
pub struct FsStore {
    root: PathBuf,
    /// Resolved paths, indexed by row id. Row ids stay valid for the life of
    /// the store.
    resolved: Mutex<Vec<PathBuf>>,
}

impl FsStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            resolved: Mutex::new(Vec::new()),
        }
    }

    fn path_for(&self, rowid: u64) -> Result<PathBuf, StoreError> {
        self.resolved
            .lock()
            .unwrap()
            .get(rowid as usize)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

impl ContentStore for FsStore {
    fn resolve(&self, hex_id: &str) -> Result<u64, StoreError> {
        let path = self.root.join(hex_id);
        if !path.is_file() {
            return Err(StoreError::NotFound);
        }

        let mut resolved = self.resolved.lock().unwrap();
        if let Some(i) = resolved.iter().position(|p| p == &path) {
            return Ok(i as u64);
        }
        resolved.push(path);
        Ok((resolved.len() - 1) as u64)
    }

    fn open_length(&self, rowid: u64) -> Result<u64, StoreError> {
        let path = self.path_for(rowid)?;
        Ok(std::fs::metadata(path)?.len())
    }

    fn read_range(&self, rowid: u64, offset: u64, max_len: usize) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(rowid)?;
        let mut file = File::open(path)?;

        let len = file.metadata()?.len();
        if offset > len {
            return Err(StoreError::BadOffset);
        }

        let want = max_len.min((len - offset) as usize);
        file.seek(SeekFrom::Start(offset))?;

        let mut buf = vec![0u8; want];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }
}
