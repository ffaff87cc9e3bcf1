//! Product DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Product, ProductDetail, ProductWithRating};
use crate::infrastructure::blob::BlobStore;
use crate::interfaces::http::modules::reviews::dto::ReviewDto;

/// Product API representation.
///
/// The stored blob reference is projected to a servable URL here; the
/// opaque reference itself never reaches clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDto {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductDto {
    pub fn from_product(p: Product, blob_store: &dyn BlobStore) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            title: p.title,
            description: p.description,
            price: p.price,
            image_url: p.image_ref.as_deref().map(|r| blob_store.url_for(r)),
            created_at: p.created_at,
        }
    }
}

/// Listing entry: product plus the aggregate derived from its current
/// reviews. `avg_rating` is null for an unreviewed product.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductWithRatingDto {
    #[serde(flatten)]
    pub product: ProductDto,
    pub avg_rating: Option<f64>,
    pub reviews_count: u64,
}

impl ProductWithRatingDto {
    pub fn from_domain(p: ProductWithRating, blob_store: &dyn BlobStore) -> Self {
        Self {
            product: ProductDto::from_product(p.product, blob_store),
            avg_rating: p.avg_rating,
            reviews_count: p.reviews_count,
        }
    }
}

/// Product detail: the product, its reviews (most recent first) and the
/// same aggregate the listing shows.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailDto {
    #[serde(flatten)]
    pub product: ProductDto,
    pub reviews: Vec<ReviewDto>,
    pub avg_rating: Option<f64>,
    pub reviews_count: u64,
}

impl ProductDetailDto {
    pub fn from_domain(d: ProductDetail, blob_store: &dyn BlobStore) -> Self {
        Self {
            product: ProductDto::from_product(d.product, blob_store),
            reviews: d.reviews.into_iter().map(ReviewDto::from).collect(),
            avg_rating: d.avg_rating,
            reviews_count: d.reviews_count,
        }
    }
}

/// Multipart form for publishing a product. Schema only: the handler
/// parses the fields manually.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateProductForm {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Image file
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::infrastructure::blob::InMemoryBlobStore;

    #[tokio::test]
    async fn image_ref_is_projected_to_a_url() {
        let blob_store = InMemoryBlobStore::new();
        let blob_ref = blob_store.store(b"bytes", "photo.png").await.unwrap();
        assert_eq!(blob_store.get(&blob_ref).as_deref(), Some(&b"bytes"[..]));

        let product = Product {
            id: "p1".into(),
            owner_id: "u1".into(),
            title: "Lamp".into(),
            description: None,
            price: None,
            image_ref: Some(blob_ref.clone()),
            created_at: Utc::now(),
        };

        let dto = ProductDto::from_product(product, &blob_store);
        assert_eq!(dto.image_url.as_deref(), Some(&*format!("/uploads/{}", blob_ref)));
    }

    #[test]
    fn missing_image_stays_absent() {
        let blob_store = InMemoryBlobStore::new();
        let product = Product {
            id: "p1".into(),
            owner_id: "u1".into(),
            title: "Lamp".into(),
            description: None,
            price: None,
            image_ref: None,
            created_at: Utc::now(),
        };

        let dto = ProductDto::from_product(product, &blob_store);
        assert_eq!(dto.image_url, None);
    }
}
