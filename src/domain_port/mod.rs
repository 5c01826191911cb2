// store

mod session_store;

pub use session_store::*;

// repo

mod post_repo;
mod repo_error;
mod user_repo;

pub use post_repo::*;
pub use repo_error::*;
pub use user_repo::*;
