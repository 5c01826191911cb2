mod auth_service;
mod post_service;
mod user_service;

pub use auth_service::*;
pub use post_service::*;
pub use user_service::*;
