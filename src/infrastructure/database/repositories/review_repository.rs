use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{
    CreateReviewDto, DomainError, DomainResult, Review, ReviewRepositoryInterface,
};
use crate::infrastructure::database::entities::review;

pub struct ReviewRepository {
    db: DatabaseConnection,
}

impl ReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn review_model_to_domain(model: review::Model) -> Review {
    Review {
        id: model.id,
        product_id: model.product_id,
        author_id: model.author_id,
        rating: model.rating,
        comment: model.comment,
        created_at: model.created_at,
    }
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}

#[async_trait]
impl ReviewRepositoryInterface for ReviewRepository {
    async fn create_review(&self, dto: CreateReviewDto) -> DomainResult<Review> {
        let new_review = review::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            product_id: Set(dto.product_id),
            author_id: Set(dto.author_id),
            rating: Set(dto.rating),
            comment: Set(dto.comment),
            created_at: Set(Utc::now()),
        };

        let model = new_review.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("You have already reviewed this product".to_string())
            } else {
                DomainError::Database(e)
            }
        })?;

        Ok(review_model_to_domain(model))
    }

    async fn get_review(&self, id: &str) -> DomainResult<Option<Review>> {
        let model = review::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(review_model_to_domain))
    }

    async fn get_review_for_product(
        &self,
        product_id: &str,
        review_id: &str,
    ) -> DomainResult<Option<Review>> {
        let model = review::Entity::find_by_id(review_id)
            .filter(review::Column::ProductId.eq(product_id))
            .one(&self.db)
            .await?;

        Ok(model.map(review_model_to_domain))
    }

    async fn find_by_product_and_author(
        &self,
        product_id: &str,
        author_id: &str,
    ) -> DomainResult<Option<Review>> {
        let model = review::Entity::find()
            .filter(review::Column::ProductId.eq(product_id))
            .filter(review::Column::AuthorId.eq(author_id))
            .one(&self.db)
            .await?;

        Ok(model.map(review_model_to_domain))
    }

    async fn list_for_product(&self, product_id: &str) -> DomainResult<Vec<Review>> {
        let models = review::Entity::find()
            .filter(review::Column::ProductId.eq(product_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(review_model_to_domain).collect())
    }

    async fn ratings_for_product(&self, product_id: &str) -> DomainResult<Vec<i32>> {
        let ratings: Vec<i32> = review::Entity::find()
            .select_only()
            .column(review::Column::Rating)
            .filter(review::Column::ProductId.eq(product_id))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(ratings)
    }

    async fn update_review(
        &self,
        id: &str,
        rating: i32,
        comment: Option<String>,
    ) -> DomainResult<Review> {
        let existing = review::Entity::find_by_id(id).one(&self.db).await?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Review",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: review::ActiveModel = existing.into();
        active.rating = Set(rating);
        active.comment = Set(comment);

        let updated = active.update(&self.db).await?;
        Ok(review_model_to_domain(updated))
    }

    async fn delete_review(&self, id: &str) -> DomainResult<()> {
        let result = review::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Review",
                field: "id",
                value: id.to_string(),
            });
        }

        Ok(())
    }
}
