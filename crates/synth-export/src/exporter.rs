//! JSON exporter for generated datasets.

use crate::error::ExportError;
use crate::reader::{
    discover_session_chunks, session_chunk_file_name, CATEGORIES_FILE, PRODUCTS_FILE,
    TRANSACTIONS_FILE, USERS_FILE,
};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use synth_core::Dataset;
use tracing::{debug, info};

/// Default number of sessions per chunk file.
pub const DEFAULT_SESSION_CHUNK_SIZE: usize = 100_000;

/// Default buffer size for file writing.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Metrics from an export operation.
#[derive(Debug, Clone, Default)]
pub struct ExportMetrics {
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
    /// Number of records written across all files.
    pub records_written: u64,
    /// Number of session chunk files.
    pub session_chunks: usize,
    /// Chunk files of an earlier export that were removed.
    pub stale_chunks_removed: usize,
    /// Bytes written across all files.
    pub bytes_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl ExportMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes a [`Dataset`] as JSON array files into a directory.
pub struct JsonExporter {
    output_dir: PathBuf,
    session_chunk_size: usize,
}

impl JsonExporter {
    /// Create an exporter writing into `output_dir`.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            session_chunk_size: DEFAULT_SESSION_CHUNK_SIZE,
        }
    }

    /// Set the maximum number of sessions per chunk file.
    pub fn with_session_chunk_size(mut self, session_chunk_size: usize) -> Self {
        self.session_chunk_size = session_chunk_size;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every collection of `dataset`.
    ///
    /// Products are written with their post-simulation stock. Session chunks
    /// already in the directory are deleted first, so the chunks on disk are
    /// exactly this dataset's. No session file is written when there are no
    /// sessions.
    pub fn export(&self, dataset: &Dataset) -> Result<ExportMetrics, ExportError> {
        if self.session_chunk_size == 0 {
            return Err(ExportError::InvalidChunkSize);
        }

        let start_time = Instant::now();
        let mut metrics = ExportMetrics::default();

        fs::create_dir_all(&self.output_dir)?;
        info!("Saving datasets to '{}'", self.output_dir.display());

        self.write_collection(USERS_FILE, &dataset.users, &mut metrics)?;
        self.write_collection(PRODUCTS_FILE, &dataset.products, &mut metrics)?;
        self.write_collection(CATEGORIES_FILE, &dataset.categories, &mut metrics)?;
        self.write_collection(TRANSACTIONS_FILE, &dataset.transactions, &mut metrics)?;

        for stale in discover_session_chunks(&self.output_dir)? {
            fs::remove_file(&stale)?;
            debug!("Removed stale session chunk '{}'", stale.display());
            metrics.stale_chunks_removed += 1;
        }

        for (chunk_idx, chunk) in dataset.sessions.chunks(self.session_chunk_size).enumerate() {
            self.write_collection(&session_chunk_file_name(chunk_idx), chunk, &mut metrics)?;
            metrics.session_chunks += 1;
        }

        metrics.total_duration = start_time.elapsed();

        info!(
            "Export complete: {} records in {} files, {} bytes in {:?} ({:.2} records/sec)",
            metrics.records_written,
            metrics.files.len(),
            metrics.bytes_written,
            metrics.total_duration,
            metrics.records_per_second()
        );

        Ok(metrics)
    }

    fn write_collection<T: Serialize>(
        &self,
        file_name: &str,
        records: &[T],
        metrics: &mut ExportMetrics,
    ) -> Result<(), ExportError> {
        let path = self.output_dir.join(file_name);
        let bytes = write_json_array(&path, records)?;

        debug!(
            "Wrote {} records ({} bytes) to '{}'",
            records.len(),
            bytes,
            path.display()
        );

        metrics.records_written += records.len() as u64;
        metrics.bytes_written += bytes;
        metrics.files.push(path);
        Ok(())
    }
}

/// Serialize `records` as a JSON array into `path`, returning the file size.
pub fn write_json_array<T: Serialize>(path: &Path, records: &[T]) -> Result<u64, ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
    serde_json::to_writer(&mut writer, records)?;
    writer.flush()?;
    drop(writer);

    Ok(fs::metadata(path)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use synth_core::{Category, GeoData, Subcategory, User};
    use tempfile::TempDir;

    fn tiny_dataset() -> Dataset {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        Dataset {
            categories: vec![Category {
                category_id: "cat_000".to_string(),
                name: "Walker Group".to_string(),
                subcategories: vec![Subcategory {
                    subcategory_id: "sub_000_00".to_string(),
                    name: "streamline robust synergies".to_string(),
                    profit_margin: 0.25,
                }],
            }],
            users: vec![User {
                user_id: "user_000000".to_string(),
                geo_data: GeoData {
                    city: "Salem".to_string(),
                    state: "OR".to_string(),
                    country: "US".to_string(),
                },
                registration_date: date,
                last_active: date,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_metrics() {
        let metrics = ExportMetrics {
            records_written: 1000,
            total_duration: Duration::from_secs(10),
            ..Default::default()
        };
        assert_eq!(metrics.records_per_second(), 100.0);
    }

    #[test]
    fn test_export_writes_arrays() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = JsonExporter::new(temp_dir.path());

        let metrics = exporter.export(&tiny_dataset()).unwrap();

        assert_eq!(metrics.records_written, 2);
        assert_eq!(metrics.session_chunks, 0);
        assert_eq!(metrics.files.len(), 4);

        let users: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(temp_dir.path().join(USERS_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(users[0]["user_id"], "user_000000");
        assert_eq!(users[0]["geo_data"]["state"], "OR");
        assert_eq!(users[0]["registration_date"], "2024-03-01T08:30:00Z");

        let transactions = std::fs::read_to_string(temp_dir.path().join(TRANSACTIONS_FILE)).unwrap();
        assert_eq!(transactions, "[]");
        assert!(!temp_dir.path().join("sessions_0.json").exists());
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        JsonExporter::new(&nested).export(&tiny_dataset()).unwrap();
        assert!(nested.join(CATEGORIES_FILE).exists());
    }

    #[test]
    fn test_stale_chunks_removed_without_sessions() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("sessions_0.json"), "[]").unwrap();
        std::fs::write(temp_dir.path().join("sessions_7.json"), "[]").unwrap();
        std::fs::write(temp_dir.path().join("notes.json"), "[]").unwrap();

        let metrics = JsonExporter::new(temp_dir.path())
            .export(&tiny_dataset())
            .unwrap();

        assert_eq!(metrics.stale_chunks_removed, 2);
        assert!(!temp_dir.path().join("sessions_0.json").exists());
        assert!(!temp_dir.path().join("sessions_7.json").exists());
        assert!(temp_dir.path().join("notes.json").exists());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = JsonExporter::new(temp_dir.path())
            .with_session_chunk_size(0)
            .export(&tiny_dataset());
        assert!(matches!(result, Err(ExportError::InvalidChunkSize)));
    }
}
