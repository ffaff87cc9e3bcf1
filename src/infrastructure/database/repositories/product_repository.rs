use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{CreateProductDto, DomainResult, Product, ProductRepositoryInterface};
use crate::infrastructure::database::entities::product;

pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn product_model_to_domain(model: product::Model) -> Product {
    Product {
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        description: model.description,
        price: model.price,
        image_ref: model.image_ref,
        created_at: model.created_at,
    }
}

#[async_trait]
impl ProductRepositoryInterface for ProductRepository {
    async fn create_product(&self, dto: CreateProductDto) -> DomainResult<Product> {
        let new_product = product::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            owner_id: Set(dto.owner_id),
            title: Set(dto.title),
            description: Set(dto.description),
            price: Set(dto.price),
            image_ref: Set(dto.image_ref),
            created_at: Set(Utc::now()),
        };

        let model = new_product.insert(&self.db).await?;
        Ok(product_model_to_domain(model))
    }

    async fn get_product(&self, id: &str) -> DomainResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(product_model_to_domain))
    }

    async fn list_products(&self) -> DomainResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_desc(product::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(product_model_to_domain).collect())
    }
}
