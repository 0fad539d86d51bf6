//! Secondary indexes created after a load.

/// Single-field ascending indexes per collection.
pub const INDEX_PLAN: &[(&str, &[&str])] = &[
    ("products", &["product_id", "category_id", "is_active"]),
    ("users", &["user_id", "geo_data.state"]),
    (
        "transactions",
        &["transaction_id", "user_id", "session_id", "timestamp"],
    ),
    (
        "sessions",
        &["session_id", "user_id", "start_time", "conversion_status"],
    ),
];

/// Indexed fields of `collection`, empty when none are planned.
pub fn indexed_fields(collection: &str) -> &'static [&'static str] {
    INDEX_PLAN
        .iter()
        .find(|(name, _)| *name == collection)
        .map(|(_, fields)| *fields)
        .unwrap_or(&[])
}
