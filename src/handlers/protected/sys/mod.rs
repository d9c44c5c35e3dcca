pub mod apis;
pub mod departments;
pub mod roles;
pub mod users;
