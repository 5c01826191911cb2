#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("duplicate {0}")]
    Duplicate(String),
    #[error("store error: {0}")]
    Backend(String),
}
