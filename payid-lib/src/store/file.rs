//! File-backed record store.
//!
//! Each record is a pretty-printed JSON document named after the md5 digest
//! of its PayID, since PayIDs carry characters (`$`, `/`, `:`) that are not
//! portable in file names.
//!
//! Conditional insert writes the document to a randomly named temp file in
//! the same directory and persists it without clobbering. The no-clobber
//! persist fails when the destination exists, so the filesystem decides the
//! race between concurrent creators and readers never observe a half-written
//! document. The temp file is removed on every failure path.

use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{PutOutcome, RecordStore, StoreResult};
use crate::codec::{decode_record, encode_record, StoredRecord};
use crate::PayId;

/// JSON-document storage in a local directory.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `base_path`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> std::io::Result<Self> {
        let path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&path)?;
        Ok(Self { base_path: path })
    }

    /// Directory holding the record documents.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a record.
    fn record_path(&self, key: &PayId) -> PathBuf {
        self.base_path.join(format!("{}.json", Self::file_stem(key)))
    }

    fn file_stem(key: &PayId) -> String {
        format!("{:x}", md5::compute(key.as_str().as_bytes()))
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn get(&self, key: &PayId) -> StoreResult<Option<StoredRecord>> {
        let data = match std::fs::read(self.record_path(key)) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(decode_record(key, &data)?))
    }

    async fn put_if_absent(&self, record: StoredRecord) -> StoreResult<PutOutcome> {
        let path = self.record_path(&record.id);
        let data = encode_record(&record)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".payid-")
            .suffix(".tmp")
            .tempfile_in(&self.base_path)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;

        match tmp.persist_noclobber(&path) {
            Ok(_) => Ok(PutOutcome::Inserted),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(PutOutcome::AlreadyExists),
            Err(e) => Err(e.error.into()),
        }
    }

    async fn delete(&self, key: &PayId) -> StoreResult<()> {
        match std::fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
