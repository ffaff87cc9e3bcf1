use async_trait::async_trait;

use super::{CreateReviewDto, Review};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReviewRepositoryInterface: Send + Sync {
    /// Insert a new review. The storage-level unique index on
    /// `(product_id, author_id)` is the authoritative guard against
    /// duplicate submissions; a violation maps to `DomainError::Conflict`.
    async fn create_review(&self, dto: CreateReviewDto) -> DomainResult<Review>;

    async fn get_review(&self, id: &str) -> DomainResult<Option<Review>>;

    async fn get_review_for_product(
        &self,
        product_id: &str,
        review_id: &str,
    ) -> DomainResult<Option<Review>>;

    async fn find_by_product_and_author(
        &self,
        product_id: &str,
        author_id: &str,
    ) -> DomainResult<Option<Review>>;

    /// Reviews for a product, most recent first.
    async fn list_for_product(&self, product_id: &str) -> DomainResult<Vec<Review>>;

    /// Just the rating values for a product, for aggregate computation.
    async fn ratings_for_product(&self, product_id: &str) -> DomainResult<Vec<i32>>;

    /// Overwrite rating and comment in place; id and `created_at` are
    /// untouched.
    async fn update_review(
        &self,
        id: &str,
        rating: i32,
        comment: Option<String>,
    ) -> DomainResult<Review>;

    async fn delete_review(&self, id: &str) -> DomainResult<()>;
}
