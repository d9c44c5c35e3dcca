pub mod auth;
pub mod permission;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use permission::permission_middleware;
pub use response::{ApiResponse, Page};
