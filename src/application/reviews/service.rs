//! Review service — creation, ownership-gated mutation and deletion

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateReviewDto, DomainError, DomainResult, ProductRepositoryInterface, Review,
    ReviewRepositoryInterface,
};

fn validate_rating(rating: i32) -> DomainResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(DomainError::Validation(
            "Rating must be between 1 and 5".into(),
        ));
    }
    Ok(())
}

/// Orchestrates review use-cases and enforces the ownership gate: a review
/// is mutated or deleted only by its author.
pub struct ReviewService<R, P>
where
    R: ReviewRepositoryInterface,
    P: ProductRepositoryInterface,
{
    reviews: Arc<R>,
    products: Arc<P>,
}

impl<R, P> ReviewService<R, P>
where
    R: ReviewRepositoryInterface,
    P: ProductRepositoryInterface,
{
    pub fn new(reviews: Arc<R>, products: Arc<P>) -> Self {
        Self { reviews, products }
    }

    /// Submit a review. The product must exist (no orphaned reviews), and
    /// a second submission by the same author loses: the friendly path is
    /// the pre-check below, the authoritative one is the unique index on
    /// `(product_id, author_id)`.
    pub async fn create_review(&self, dto: CreateReviewDto) -> DomainResult<Review> {
        if dto.author_id.trim().is_empty() {
            return Err(DomainError::Unauthorized("No user identity".into()));
        }
        validate_rating(dto.rating)?;

        if self.products.get_product(&dto.product_id).await?.is_none() {
            return Err(DomainError::NotFound {
                entity: "Product",
                field: "id",
                value: dto.product_id.clone(),
            });
        }

        if self
            .reviews
            .find_by_product_and_author(&dto.product_id, &dto.author_id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "You have already reviewed this product".into(),
            ));
        }

        let review = self.reviews.create_review(dto).await?;
        info!(review_id = %review.id, product_id = %review.product_id, "Review created");
        Ok(review)
    }

    /// Overwrite rating and comment in place. Identity and `created_at`
    /// never change. A missing review and someone else's review are both
    /// `Forbidden`: the caller learns nothing about other users' reviews.
    pub async fn update_review(
        &self,
        review_id: &str,
        author_id: &str,
        rating: i32,
        comment: Option<String>,
    ) -> DomainResult<Review> {
        validate_rating(rating)?;

        let existing = self.reviews.get_review(review_id).await?;
        let authorized = matches!(&existing, Some(review) if review.author_id == author_id);
        if !authorized {
            return Err(DomainError::Forbidden(
                "Not allowed to edit this review".into(),
            ));
        }

        self.reviews.update_review(review_id, rating, comment).await
    }

    /// Remove a review. The aggregate shrinks implicitly on the next read;
    /// there is no stored counter to reconcile.
    pub async fn delete_review(
        &self,
        product_id: &str,
        review_id: &str,
        requester_id: &str,
    ) -> DomainResult<()> {
        let review = self
            .reviews
            .get_review_for_product(product_id, review_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Review",
                field: "id",
                value: review_id.to_string(),
            })?;

        if review.author_id != requester_id {
            return Err(DomainError::Forbidden(
                "You can delete only your own review".into(),
            ));
        }

        self.reviews.delete_review(review_id).await?;
        info!(review_id = %review_id, product_id = %product_id, "Review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::MigratorTrait;

    use crate::domain::CreateProductDto;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::{ProductRepository, ReviewRepository};

    struct Fixture {
        service: ReviewService<ReviewRepository, ProductRepository>,
        reviews: Arc<ReviewRepository>,
        product_id: String,
    }

    async fn fixture() -> Fixture {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let products = Arc::new(ProductRepository::new(db.clone()));
        let reviews = Arc::new(ReviewRepository::new(db));

        let product = products
            .create_product(CreateProductDto {
                owner_id: "owner-1".into(),
                title: "Lamp".into(),
                description: None,
                price: None,
                image_ref: None,
            })
            .await
            .unwrap();

        Fixture {
            service: ReviewService::new(reviews.clone(), products),
            reviews,
            product_id: product.id,
        }
    }

    fn review_dto(product_id: &str, author: &str, rating: i32) -> CreateReviewDto {
        CreateReviewDto {
            product_id: product_id.into(),
            author_id: author.into(),
            rating,
            comment: Some("nice".into()),
        }
    }

    #[tokio::test]
    async fn rating_must_be_in_range() {
        let fx = fixture().await;

        for rating in [0, 6, -1] {
            let err = fx
                .service
                .create_review(review_dto(&fx.product_id, "u1", rating))
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn review_requires_existing_product() {
        let fx = fixture().await;

        let err = fx
            .service
            .create_review(review_dto("no-such-product", "u1", 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn second_review_by_same_author_conflicts() {
        let fx = fixture().await;

        let first = fx
            .service
            .create_review(review_dto(&fx.product_id, "u1", 5))
            .await
            .unwrap();

        let err = fx
            .service
            .create_review(review_dto(&fx.product_id, "u1", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // First review is untouched
        let kept = fx.reviews.get_review(&first.id).await.unwrap().unwrap();
        assert_eq!(kept.rating, 5);
    }

    #[tokio::test]
    async fn only_author_edits_or_deletes() {
        let fx = fixture().await;

        let review = fx
            .service
            .create_review(review_dto(&fx.product_id, "author", 4))
            .await
            .unwrap();

        let err = fx
            .service
            .update_review(&review.id, "intruder", 1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let err = fx
            .service
            .delete_review(&fx.product_id, &review.id, "intruder")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let updated = fx
            .service
            .update_review(&review.id, "author", 2, Some("changed my mind".into()))
            .await
            .unwrap();
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.id, review.id);
        assert_eq!(updated.created_at, review.created_at);

        fx.service
            .delete_review(&fx.product_id, &review.id, "author")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn editing_missing_review_is_forbidden() {
        let fx = fixture().await;

        let err = fx
            .service
            .update_review("no-such-review", "u1", 3, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn deleted_review_leaves_list_and_aggregate() {
        let fx = fixture().await;

        let kept = fx
            .service
            .create_review(review_dto(&fx.product_id, "u1", 5))
            .await
            .unwrap();
        let doomed = fx
            .service
            .create_review(review_dto(&fx.product_id, "u2", 1))
            .await
            .unwrap();

        fx.service
            .delete_review(&fx.product_id, &doomed.id, "u2")
            .await
            .unwrap();

        let remaining = fx.reviews.list_for_product(&fx.product_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);

        let ratings = fx
            .reviews
            .ratings_for_product(&fx.product_id)
            .await
            .unwrap();
        assert_eq!(ratings, vec![5]);
    }

    #[tokio::test]
    async fn deleting_missing_review_is_not_found() {
        let fx = fixture().await;

        let err = fx
            .service
            .delete_review(&fx.product_id, "no-such-review", "u1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
