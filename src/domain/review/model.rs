use chrono::{DateTime, Utc};

/// Review model
///
/// Invariant (enforced by a unique index on `(product_id, author_id)`):
/// a user leaves at most one review per product.
#[derive(Clone, Debug)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub author_id: String,
    /// Integer rating, 1-5 inclusive.
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
