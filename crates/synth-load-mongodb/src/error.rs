//! Error types for the MongoDB loader.

use synth_export::ExportError;
use thiserror::Error;

/// Errors that can occur while loading a dataset into MongoDB.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// MongoDB query error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// The server could not be reached.
    #[error("Could not connect to MongoDB at {uri}; make sure the server is running: {source}")]
    Connection {
        /// Connection string with the password masked.
        uri: String,
        #[source]
        source: mongodb::error::Error,
    },

    /// JSON to BSON conversion error.
    #[error("BSON conversion error: {0}")]
    Bson(#[from] bson::ser::Error),

    /// Reading a dataset file failed.
    #[error("Dataset file error: {0}")]
    Export(#[from] ExportError),

    /// A record in a collection file was not a JSON object.
    #[error("Record {index} of collection '{collection}' is not a JSON object")]
    NotADocument { collection: String, index: usize },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
