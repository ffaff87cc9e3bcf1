//! Identity service — signup, login and session issuance
//!
//! HTTP handlers stay thin and delegate here; this is where credential
//! policy lives.

use std::sync::Arc;

use tracing::info;

use crate::application::identity::{role_to_str, str_to_role};
use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Orchestrates signup and login.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct AuthService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: UserRepositoryInterface> AuthService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user (default role: reviewer).
    ///
    /// Emails are normalized to lowercase before the uniqueness check, so
    /// `Alice@Example.com` and `alice@example.com` collide. The pre-check
    /// gives a friendly error; the unique index on email is what actually
    /// closes the check-then-insert race.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> DomainResult<User> {
        let username = username.trim();
        let email = email.trim().to_lowercase();

        if username.is_empty() {
            return Err(DomainError::Validation("Username is required".into()));
        }
        if email.is_empty() {
            return Err(DomainError::Validation("Email is required".into()));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if password.trim().is_empty() {
            return Err(DomainError::Validation("Password is required".into()));
        }

        let role = match role {
            None => None,
            Some(s) => Some(str_to_role(s).ok_or_else(|| {
                DomainError::Validation(format!("Unknown role '{}'", s))
            })?),
        };

        if self.repo.get_user_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                username: username.to_string(),
                email,
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and issue a session token.
    ///
    /// A missing user and a wrong password are indistinguishable from the
    /// outside.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = email.trim().to_lowercase();

        let user = self.repo.get_user_by_email(&email).await?;

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&user.id, &user.email, role_to_str(&user.role), &self.jwt_config)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Look up the user behind a verified token, for `/auth/me`.
    pub async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::MigratorTrait;

    use crate::domain::UserRole;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::UserRepository;

    async fn service() -> AuthService<UserRepository> {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        AuthService::new(
            Arc::new(UserRepository::new(db)),
            JwtConfig::new("test-secret", 1),
        )
    }

    #[tokio::test]
    async fn signup_assigns_distinct_ids() {
        let svc = service().await;

        let a = svc
            .signup("alice", "alice@example.com", "pw-alice", None)
            .await
            .unwrap();
        let b = svc
            .signup("bob", "bob@example.com", "pw-bob", Some("poster"))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.role, UserRole::Reviewer);
        assert_eq!(b.role, UserRole::Poster);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_case_insensitively() {
        let svc = service().await;

        svc.signup("alice", "alice@example.com", "pw", None)
            .await
            .unwrap();
        let err = svc
            .signup("alice2", "Alice@Example.com", "pw2", None)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn signup_rejects_empty_fields() {
        let svc = service().await;

        let err = svc.signup("", "a@b.c", "pw", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc.signup("alice", "a@b.c", "   ", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let svc = service().await;

        svc.signup("alice", "alice@example.com", "right-password", None)
            .await
            .unwrap();

        let err = svc
            .login("alice@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let err = svc.login("nobody@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let svc = service().await;

        let user = svc
            .signup("alice", "alice@example.com", "right-password", None)
            .await
            .unwrap();

        let auth = svc
            .login("Alice@Example.com", "right-password")
            .await
            .unwrap();
        assert_eq!(auth.user.id, user.id);
        assert_eq!(auth.expires_in, 3600);

        let claims = verify_token(&auth.token, &JwtConfig::new("test-secret", 1)).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "alice@example.com");
    }
}
