mod identity;
mod post;
mod user;

pub use identity::*;
pub use post::*;
pub use user::*;
