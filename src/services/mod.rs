pub mod auth;
pub mod permission;

pub use auth::{login, AuthError, LoginOutcome};
pub use permission::permissions_for_user;
