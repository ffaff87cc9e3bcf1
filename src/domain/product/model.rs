use chrono::{DateTime, Utc};

use crate::domain::review::Review;

/// Product model
///
/// Products are read-only after creation; there are no update or delete
/// operations on this aggregate.
#[derive(Clone, Debug)]
pub struct Product {
    pub id: String,
    /// Owner reference. Deliberately not a foreign key: deleting a user
    /// does not cascade to their products.
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Opaque reference into the blob store, resolved to a URL at the API
    /// boundary.
    pub image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Product augmented with its aggregate rating, as served by the catalog
/// listing.
#[derive(Clone, Debug)]
pub struct ProductWithRating {
    pub product: Product,
    /// Mean of all review ratings, `None` when the product has no reviews.
    pub avg_rating: Option<f64>,
    pub reviews_count: u64,
}

/// Product detail: the product, its full review list (most recent first)
/// and the same aggregate the listing shows.
#[derive(Clone, Debug)]
pub struct ProductDetail {
    pub product: Product,
    pub reviews: Vec<Review>,
    pub avg_rating: Option<f64>,
    pub reviews_count: u64,
}
