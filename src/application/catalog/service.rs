//! Catalog service — product listing, creation and detail

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    aggregate_rating, CreateProductDto, DomainError, DomainResult, Product, ProductDetail,
    ProductRepositoryInterface, ProductWithRating, ReviewRepositoryInterface,
};

/// Orchestrates catalog use-cases. Products are read-only after creation.
pub struct CatalogService<P, R>
where
    P: ProductRepositoryInterface,
    R: ReviewRepositoryInterface,
{
    products: Arc<P>,
    reviews: Arc<R>,
}

impl<P, R> CatalogService<P, R>
where
    P: ProductRepositoryInterface,
    R: ReviewRepositoryInterface,
{
    pub fn new(products: Arc<P>, reviews: Arc<R>) -> Self {
        Self { products, reviews }
    }

    /// All products, newest first, each carrying the aggregate computed
    /// from its current reviews. Nothing is cached: the mean is derived on
    /// every call.
    pub async fn list_products(&self) -> DomainResult<Vec<ProductWithRating>> {
        let products = self.products.list_products().await?;

        let mut out = Vec::with_capacity(products.len());
        for product in products {
            let ratings = self.reviews.ratings_for_product(&product.id).await?;
            out.push(ProductWithRating {
                avg_rating: aggregate_rating(&ratings),
                reviews_count: ratings.len() as u64,
                product,
            });
        }

        Ok(out)
    }

    /// Publish a product. The owner always comes from the verified session
    /// token; if an image was uploaded, the HTTP layer has already pushed
    /// it through the blob store and hands us the reference.
    pub async fn create_product(&self, dto: CreateProductDto) -> DomainResult<Product> {
        if dto.owner_id.trim().is_empty() {
            return Err(DomainError::Validation("Owner is required".into()));
        }
        if dto.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".into()));
        }

        let product = self.products.create_product(dto).await?;
        info!(product_id = %product.id, owner_id = %product.owner_id, "Product published");
        Ok(product)
    }

    /// Product detail: the product, its reviews (most recent first) and
    /// the same aggregate the listing shows.
    pub async fn get_product(&self, id: &str) -> DomainResult<ProductDetail> {
        let product = self.products.get_product(id).await?.ok_or_else(|| {
            DomainError::NotFound {
                entity: "Product",
                field: "id",
                value: id.to_string(),
            }
        })?;

        let reviews = self.reviews.list_for_product(id).await?;
        let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();

        Ok(ProductDetail {
            avg_rating: aggregate_rating(&ratings),
            reviews_count: reviews.len() as u64,
            product,
            reviews,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::MigratorTrait;

    use crate::domain::CreateReviewDto;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::{ProductRepository, ReviewRepository};

    async fn service() -> (
        CatalogService<ProductRepository, ReviewRepository>,
        Arc<ReviewRepository>,
    ) {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let reviews = Arc::new(ReviewRepository::new(db.clone()));
        (
            CatalogService::new(Arc::new(ProductRepository::new(db)), reviews.clone()),
            reviews,
        )
    }

    fn product_dto(title: &str) -> CreateProductDto {
        CreateProductDto {
            owner_id: "owner-1".into(),
            title: title.into(),
            description: None,
            price: Some(9.99),
            image_ref: None,
        }
    }

    #[tokio::test]
    async fn create_requires_title() {
        let (svc, _) = service().await;
        let err = svc.create_product(product_dto("  ")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn aggregate_is_mean_of_current_reviews() {
        let (svc, reviews) = service().await;
        let product = svc.create_product(product_dto("Lamp")).await.unwrap();

        for (user, rating) in [("u1", 5), ("u2", 3), ("u3", 4)] {
            reviews
                .create_review(CreateReviewDto {
                    product_id: product.id.clone(),
                    author_id: user.into(),
                    rating,
                    comment: None,
                })
                .await
                .unwrap();
        }

        let detail = svc.get_product(&product.id).await.unwrap();
        assert_eq!(detail.avg_rating, Some(4.0));
        assert_eq!(detail.reviews_count, 3);

        let listing = svc.list_products().await.unwrap();
        assert_eq!(listing[0].avg_rating, Some(4.0));
        assert_eq!(listing[0].reviews_count, 3);
    }

    #[tokio::test]
    async fn product_without_reviews_has_no_aggregate() {
        let (svc, _) = service().await;
        let product = svc.create_product(product_dto("Mug")).await.unwrap();

        let detail = svc.get_product(&product.id).await.unwrap();
        assert_eq!(detail.avg_rating, None);
        assert_eq!(detail.reviews_count, 0);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let (svc, _) = service().await;
        let err = svc.get_product("no-such-id").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
