// Handlers behind JWT auth and the permission middleware.

pub mod auth;
pub mod cms;
pub mod nav;
pub mod sys;
