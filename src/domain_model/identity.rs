use super::UserId;
use serde::{Deserialize, Serialize};

/// The claim embedded in every token: who the bearer is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
}

impl Identity {
    pub fn new(user_id: UserId) -> Self {
        Identity { user_id }
    }
}
