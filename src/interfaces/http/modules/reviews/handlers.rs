//! Review API handlers
//!
//! All three routes are behind the auth middleware; the author identity is
//! whatever the verified token says, never a body field.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateReviewRequest, MessageResponse, ReviewDto, UpdateReviewRequest};
use crate::application::reviews::ReviewService;
use crate::domain::CreateReviewDto;
use crate::infrastructure::database::repositories::{ProductRepository, ReviewRepository};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Review handler state — concrete over the SeaORM repositories for Axum
/// compatibility.
#[derive(Clone)]
pub struct ReviewHandlerState {
    pub review_service: Arc<ReviewService<ReviewRepository, ProductRepository>>,
}

#[utoipa::path(
    post,
    path = "/products/{product_id}/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("product_id" = String, Path, description = "Product ID")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<ReviewDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product already reviewed by this user")
    )
)]
pub async fn create_review(
    State(state): State<ReviewHandlerState>,
    Path(product_id): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .review_service
        .create_review(CreateReviewDto {
            product_id,
            author_id: user.user_id,
            rating: request.rating,
            comment: request.comment,
        })
        .await
    {
        Ok(review) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ReviewDto::from(review))),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/products/{product_id}/reviews/{review_id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = String, Path, description = "Product ID"),
        ("review_id" = String, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<ReviewDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the review's author")
    )
)]
pub async fn update_review(
    State(state): State<ReviewHandlerState>,
    Path((_product_id, review_id)): Path<(String, String)>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> Result<Json<ApiResponse<ReviewDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .review_service
        .update_review(&review_id, &user.user_id, request.rating, request.comment)
        .await
    {
        Ok(review) => Ok(Json(ApiResponse::success(ReviewDto::from(review)))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{product_id}/reviews/{review_id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = String, Path, description = "Product ID"),
        ("review_id" = String, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review deleted", body = ApiResponse<MessageResponse>),
        (status = 403, description = "Not the review's author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<ReviewHandlerState>,
    Path((product_id, review_id)): Path<(String, String)>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<MessageResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .review_service
        .delete_review(&product_id, &review_id, &user.user_id)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(MessageResponse {
            message: "Review deleted successfully".to_string(),
        }))),
        Err(e) => Err(domain_error_response(e)),
    }
}
