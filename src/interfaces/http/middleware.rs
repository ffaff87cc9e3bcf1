//! Authentication middleware for Axum
//!
//! The single gate in front of every mutating route: it verifies the
//! bearer token and stashes the resulting identity in request extensions.
//! Handlers never trust identity fields from request bodies.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::infrastructure::crypto::jwt::{verify_token, Claims, JwtConfig};
use crate::interfaces::http::common::ApiResponse;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

/// State for the authentication middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated user information extracted from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware - requires a valid token
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }

            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);

            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Create an authentication error response.
///
/// A missing credential answers 401; a presented-but-rejected one answers
/// 403.
fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::FORBIDDEN, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::FORBIDDEN, "Token has expired"),
    };

    let body = Json(ApiResponse::<()>::error(message));
    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::{middleware, Extension, Router};

    use crate::infrastructure::crypto::jwt::create_token;

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        user.user_id
    }

    fn app(jwt_config: JwtConfig) -> Router {
        Router::new().route("/whoami", get(whoami)).layer(
            middleware::from_fn_with_state(AuthState { jwt_config }, auth_middleware),
        )
    }

    async fn send(router: Router, req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = router.into_service();
        svc.call(req).await.unwrap()
    }

    fn config() -> JwtConfig {
        JwtConfig::new("middleware-test-secret", 1)
    }

    #[tokio::test]
    async fn missing_token_is_401() {
        let req = Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .unwrap();
        let resp = send(app(config()), req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_403() {
        let req = Request::builder()
            .uri("/whoami")
            .header(header::AUTHORIZATION, "Bearer not-a-token")
            .body(Body::empty())
            .unwrap();
        let resp = send(app(config()), req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn valid_token_passes_identity_through() {
        let config = config();
        let token = create_token("user-42", "a@b.c", "reviewer", &config).unwrap();

        let req = Request::builder()
            .uri("/whoami")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let resp = send(app(config), req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"user-42");
    }

    #[tokio::test]
    async fn expired_token_is_403() {
        let expired = JwtConfig::new("middleware-test-secret", -1);
        let token = create_token("user-42", "a@b.c", "reviewer", &expired).unwrap();

        let req = Request::builder()
            .uri("/whoami")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let resp = send(app(config()), req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
