//! Business logic services.

pub mod auth;
pub mod tee_sheet;

pub use auth::{AuthError, AuthService};
