//! Service layer for business logic
//!
//! Concrete services encapsulating account management, the password-reset
//! flow, and the authentication facade that ties them together.

pub mod account;
pub mod auth;
pub mod password_reset;

pub use account::{AccountService, NewAccount};
pub use auth::{AuthService, LoginResponse, RegisterRequest};
pub use password_reset::PasswordResetService;
