use crate::application_port::PostError;
use crate::domain_model::{Identity, Post, PostAction, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

pub fn authorize(owner: &UserId, requester: &Identity) -> Access {
    if *owner == requester.user_id {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Callers must have confirmed the post exists; absence is reported as
/// not-found before ownership is considered.
pub fn ensure_owner(post: &Post, requester: &Identity, action: PostAction) -> Result<(), PostError> {
    match authorize(&post.created_by, requester) {
        Access::Allow => Ok(()),
        Access::Deny => Err(PostError::Forbidden(action)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_owner_is_allowed() {
        let owner = UserId::from("a");
        assert_eq!(authorize(&owner, &Identity::new(UserId::from("a"))), Access::Allow);
        assert_eq!(authorize(&owner, &Identity::new(UserId::from("b"))), Access::Deny);
    }

    #[test]
    fn denial_names_the_attempted_action() {
        let post = Post::new(UserId::from("a"), "hi".into(), chrono::Utc::now());
        let err = ensure_owner(&post, &Identity::new(UserId::from("b")), PostAction::Delete)
            .unwrap_err();
        assert_eq!(err.to_string(), "unauthorized to delete this post");
    }
}
