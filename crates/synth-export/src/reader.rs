//! Reading exported dataset files back.
//!
//! The loader uses this to find collection files and to discover session
//! chunks by their `sessions_<n>.json` names.

use crate::error::ExportError;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const CATEGORIES_FILE: &str = "categories.json";
pub const PRODUCTS_FILE: &str = "products.json";
pub const USERS_FILE: &str = "users.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";

const SESSION_CHUNK_PREFIX: &str = "sessions_";
const JSON_SUFFIX: &str = ".json";

/// File name of the session chunk with the given index.
pub fn session_chunk_file_name(index: usize) -> String {
    format!("{SESSION_CHUNK_PREFIX}{index}{JSON_SUFFIX}")
}

/// Chunk index encoded in a session chunk file name, if it is one.
fn session_chunk_index(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix(SESSION_CHUNK_PREFIX)?
        .strip_suffix(JSON_SUFFIX)?
        .parse()
        .ok()
}

/// Session chunk files in `dir`, ordered by chunk index.
pub fn discover_session_chunks<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, ExportError> {
    let mut chunks: Vec<(u64, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if let Some(index) = file_name.to_str().and_then(session_chunk_index) {
            chunks.push((index, entry.path()));
        }
    }
    chunks.sort_by_key(|(index, _)| *index);
    Ok(chunks.into_iter().map(|(_, path)| path).collect())
}

/// Read a collection file as untyped JSON documents.
pub fn read_collection<P: AsRef<Path>>(path: P) -> Result<Vec<serde_json::Value>, ExportError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    match serde_json::from_reader(reader)? {
        serde_json::Value::Array(records) => Ok(records),
        _ => Err(ExportError::NotAnArray(path.to_path_buf())),
    }
}

/// Read a collection file into typed records.
pub fn read_records<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Locations of every collection file in an export directory.
#[derive(Debug, Clone)]
pub struct DatasetFiles {
    pub categories: PathBuf,
    pub products: PathBuf,
    pub users: PathBuf,
    pub transactions: PathBuf,
    pub session_chunks: Vec<PathBuf>,
}

impl DatasetFiles {
    /// Resolve the collection files under `dir`. Single-collection files may
    /// be missing; callers check `exists()` before reading.
    pub fn locate<P: AsRef<Path>>(dir: P) -> Result<Self, ExportError> {
        let dir = dir.as_ref();
        Ok(Self {
            categories: dir.join(CATEGORIES_FILE),
            products: dir.join(PRODUCTS_FILE),
            users: dir.join(USERS_FILE),
            transactions: dir.join(TRANSACTIONS_FILE),
            session_chunks: discover_session_chunks(dir)?,
        })
    }
}
