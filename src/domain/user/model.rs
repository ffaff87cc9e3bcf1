use chrono::{DateTime, Utc};

/// User role
///
/// Posters publish products, reviewers rate them. Either role may do both;
/// the distinction only records what the account was created for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Poster,
    Reviewer,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Reviewer
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}
