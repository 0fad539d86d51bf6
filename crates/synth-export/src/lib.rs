//! JSON export of generated datasets, and the matching reader.
//!
//! A dataset is written as one JSON array per collection. Sessions are
//! split across numbered chunk files so no single file grows unbounded:
//!
//! ```text
//! out/
//! ├── categories.json
//! ├── products.json
//! ├── users.json
//! ├── transactions.json
//! ├── sessions_0.json
//! ├── sessions_1.json
//! └── ...
//! ```
//!
//! # Example
//!
//! ```ignore
//! use synth_export::JsonExporter;
//!
//! let exporter = JsonExporter::new("out").with_session_chunk_size(100_000);
//! let metrics = exporter.export(&dataset)?;
//! println!("Wrote {} records in {:?}", metrics.records_written, metrics.total_duration);
//! ```

pub mod args;
pub mod error;
pub mod exporter;
pub mod reader;

pub use args::GenerateArgs;
pub use error::ExportError;
pub use exporter::{ExportMetrics, JsonExporter, DEFAULT_SESSION_CHUNK_SIZE};
pub use reader::{
    discover_session_chunks, read_collection, read_records, session_chunk_file_name,
    DatasetFiles, CATEGORIES_FILE, PRODUCTS_FILE, TRANSACTIONS_FILE, USERS_FILE,
};
