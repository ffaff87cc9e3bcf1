//! Product API handlers
//!
//! Product creation is the only place that touches the blob store: the
//! uploaded image is persisted first and the catalog only ever sees the
//! resulting opaque reference.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{ProductDetailDto, ProductDto, ProductWithRatingDto};
use crate::application::catalog::CatalogService;
use crate::domain::CreateProductDto;
use crate::infrastructure::blob::BlobStore;
use crate::infrastructure::database::repositories::{ProductRepository, ReviewRepository};
use crate::interfaces::http::common::{domain_error_response, ApiResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Product handler state — concrete over the SeaORM repositories for Axum
/// compatibility.
#[derive(Clone)]
pub struct ProductHandlerState {
    pub catalog_service: Arc<CatalogService<ProductRepository, ReviewRepository>>,
    pub blob_store: Arc<dyn BlobStore>,
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products, newest first, with aggregate ratings", body = ApiResponse<Vec<ProductWithRatingDto>>)
    )
)]
pub async fn list_products(
    State(state): State<ProductHandlerState>,
) -> Result<Json<ApiResponse<Vec<ProductWithRatingDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.catalog_service.list_products().await {
        Ok(products) => {
            let items: Vec<ProductWithRatingDto> = products
                .into_iter()
                .map(|p| ProductWithRatingDto::from_domain(p, state.blob_store.as_ref()))
                .collect();
            Ok(Json(ApiResponse::success(items)))
        }
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/products/{product_id}",
    tag = "Products",
    params(("product_id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with reviews and aggregate", body = ApiResponse<ProductDetailDto>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<ProductHandlerState>,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<ProductDetailDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.catalog_service.get_product(&product_id).await {
        Ok(detail) => Ok(Json(ApiResponse::success(ProductDetailDto::from_domain(
            detail,
            state.blob_store.as_ref(),
        )))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body(content = super::dto::CreateProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_product(
    State(state): State<ProductHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ProductDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut price: Option<f64> = None;
    let mut image: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Invalid field 'title': {}", e)))?;
                title = Some(text);
            }
            "description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Invalid field 'description': {}", e)))?;
                if !text.trim().is_empty() {
                    description = Some(text);
                }
            }
            "price" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Invalid field 'price': {}", e)))?;
                if !text.trim().is_empty() {
                    price = Some(
                        text.trim()
                            .parse::<f64>()
                            .map_err(|_| bad_request("Price must be a number"))?,
                    );
                }
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Invalid field 'image': {}", e)))?;
                if !bytes.is_empty() {
                    image = Some((bytes.to_vec(), file_name));
                }
            }
            _ => {}
        }
    }

    // Persist the image before touching the catalog; the service only ever
    // sees the opaque reference.
    let image_ref = match image {
        Some((bytes, file_name)) => Some(
            state
                .blob_store
                .store(&bytes, &file_name)
                .await
                .map_err(domain_error_response)?,
        ),
        None => None,
    };

    match state
        .catalog_service
        .create_product(CreateProductDto {
            owner_id: user.user_id,
            title: title.unwrap_or_default(),
            description,
            price,
            image_ref,
        })
        .await
    {
        Ok(product) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ProductDto::from_product(
                product,
                state.blob_store.as_ref(),
            ))),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}
