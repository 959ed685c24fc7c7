//! Authentication for the candy store
//!
//! Users, password hashing, opaque session tokens with a fixed lifetime,
//! and the one-time bootstrap of the first admin account.

pub mod error;
pub mod models;
pub mod password;
pub mod rate_limiter;
pub mod repositories;
pub mod service;
pub mod session;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use service::{AuthService, LoginOutcome};
pub use session::SessionManager;
