//! Authentication service models

pub mod session;
pub mod user;

// Re-export for convenience
pub use session::{NewSession, Session};
pub use user::{LoginCredentials, NewUser, User, UserSummary};
