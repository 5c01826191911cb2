mod auth_service_impl;
mod ownership_guard;
mod post_service_impl;
mod token_codec_jwt;
mod user_service_impl;

pub use auth_service_impl::*;
pub use ownership_guard::*;
pub use post_service_impl::*;
pub use token_codec_jwt::*;
pub use user_service_impl::*;
