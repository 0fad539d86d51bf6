//! Batched insert and collection maintenance for MongoDB loading.

use crate::error::LoaderError;
use bson::{doc, Bson, Document};
use mongodb::{Collection, IndexModel};

/// Default batch size for insert_many calls.
pub const DEFAULT_BATCH_SIZE: usize = 50_000;

/// Convert one exported JSON record into a BSON document.
///
/// Timestamps stay RFC 3339 strings, as they are in the files.
pub fn json_to_document(
    collection: &str,
    index: usize,
    record: &serde_json::Value,
) -> Result<Document, LoaderError> {
    if !record.is_object() {
        return Err(LoaderError::NotADocument {
            collection: collection.to_string(),
            index,
        });
    }
    Ok(bson::to_document(record)?)
}

/// Insert a batch of documents into a MongoDB collection.
pub async fn insert_batch(
    collection: &Collection<Document>,
    documents: Vec<Document>,
) -> Result<u64, LoaderError> {
    if documents.is_empty() {
        return Ok(0);
    }

    let result = collection.insert_many(documents).await?;
    Ok(result.inserted_ids.len() as u64)
}

/// Drop a collection if it exists.
pub async fn drop_collection(collection: &Collection<Document>) -> Result<(), LoaderError> {
    collection.drop().await?;
    Ok(())
}

/// Get the document count for a collection.
pub async fn count_documents(collection: &Collection<Document>) -> Result<u64, LoaderError> {
    let count = collection.count_documents(doc! {}).await?;
    Ok(count)
}

/// Create one ascending index per field.
pub async fn create_indexes(
    collection: &Collection<Document>,
    fields: &[&str],
) -> Result<usize, LoaderError> {
    for field in fields {
        let mut keys = Document::new();
        keys.insert(*field, 1i32);
        let model = IndexModel::builder().keys(keys).build();
        collection.create_index(model).await?;
    }
    Ok(fields.len())
}

/// Sum of the `total` field across a transactions collection.
pub async fn total_revenue(collection: &Collection<Document>) -> Result<f64, LoaderError> {
    let pipeline = vec![doc! {
        "$group": { "_id": Bson::Null, "total": { "$sum": "$total" } }
    }];
    let mut cursor = collection.aggregate(pipeline).await?;

    if cursor.advance().await? {
        let group = cursor.deserialize_current()?;
        return Ok(group.get("total").and_then(bson_number).unwrap_or(0.0));
    }
    Ok(0.0)
}

fn bson_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}
