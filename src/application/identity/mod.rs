//! Identity / authentication use-cases

pub mod service;

pub use service::{AuthResult, AuthService};

use crate::domain::UserRole;

pub fn role_to_str(role: &UserRole) -> &'static str {
    match role {
        UserRole::Poster => "poster",
        UserRole::Reviewer => "reviewer",
    }
}

pub fn str_to_role(s: &str) -> Option<UserRole> {
    match s {
        "poster" => Some(UserRole::Poster),
        "reviewer" => Some(UserRole::Reviewer),
        _ => None,
    }
}
