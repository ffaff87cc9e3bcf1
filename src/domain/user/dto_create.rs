use super::UserRole;

/// Payload for creating a user. The password arrives already hashed;
/// plain-text credentials never cross the repository boundary.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Option<UserRole>,
}
