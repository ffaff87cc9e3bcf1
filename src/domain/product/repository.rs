use async_trait::async_trait;

use super::{CreateProductDto, Product};
use crate::domain::DomainResult;

#[async_trait]
pub trait ProductRepositoryInterface: Send + Sync {
    async fn create_product(&self, dto: CreateProductDto) -> DomainResult<Product>;

    async fn get_product(&self, id: &str) -> DomainResult<Option<Product>>;

    /// All products, newest first.
    async fn list_products(&self) -> DomainResult<Vec<Product>>;
}
