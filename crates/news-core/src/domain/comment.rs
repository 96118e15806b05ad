//! Comments embedded in an article and the rules for mutating the sequence.
//!
//! Comment ids are scoped to their parent article: the next id is one past
//! the largest id currently present, so ids never repeat while a higher id
//! survives, and removal never renumbers the remaining entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::error::DomainError;

/// Comment ids are unique only within their parent article.
pub type CommentId = i64;

/// A reply embedded in an article's comment sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Input for adding a comment, as received from a client.
#[derive(Debug, Clone, Default)]
pub struct NewComment {
    pub user_id: Option<UserId>,
    pub text: Option<String>,
}

impl NewComment {
    /// Check presence of both fields and return them.
    pub fn validate(self) -> Result<(UserId, String), DomainError> {
        let text = self.text.filter(|t| !t.trim().is_empty());
        match (self.user_id, text) {
            (Some(user_id), Some(text)) => Ok((user_id, text)),
            (None, Some(_)) => Err(DomainError::Validation(
                "Missing required fields: user_id".to_string(),
            )),
            (Some(_), None) => Err(DomainError::Validation(
                "Comment cannot be empty".to_string(),
            )),
            (None, None) => Err(DomainError::Validation(
                "Missing required fields: user_id, text".to_string(),
            )),
        }
    }
}

/// Id for the next comment appended to `comments`: max + 1, or 1 when empty.
///
/// Fails once the largest id leaves no room for a successor.
pub fn next_comment_id(comments: &[Comment]) -> Result<CommentId, DomainError> {
    match comments.iter().map(|c| c.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            DomainError::Validation("No comment ids left on this article".to_string())
        }),
    }
}

/// Returns `comments` with a new entry appended at the end.
pub fn append_comment(
    comments: &[Comment],
    user_id: UserId,
    text: String,
    now: DateTime<Utc>,
) -> Result<Vec<Comment>, DomainError> {
    let id = next_comment_id(comments)?;

    let mut next = Vec::with_capacity(comments.len() + 1);
    next.extend_from_slice(comments);
    next.push(Comment {
        id,
        user_id,
        text,
        created_at: now,
    });
    Ok(next)
}

/// Returns `comments` without the entry `comment_id`, or `None` if it is absent.
pub fn remove_comment(comments: &[Comment], comment_id: CommentId) -> Option<Vec<Comment>> {
    if !comments.iter().any(|c| c.id == comment_id) {
        return None;
    }

    Some(
        comments
            .iter()
            .filter(|c| c.id != comment_id)
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: CommentId) -> Comment {
        Comment {
            id,
            user_id: 1,
            text: format!("comment {id}"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_first_comment_gets_id_one() {
        let comments = append_comment(&[], 2, "first".to_string(), Utc::now()).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, 1);
        assert_eq!(comments[0].user_id, 2);
    }

    #[test]
    fn test_append_uses_max_plus_one_at_end() {
        let existing = vec![comment(1), comment(2)];
        let comments = append_comment(&existing, 3, "third".to_string(), Utc::now()).unwrap();

        let ids: Vec<CommentId> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(comments[2].text, "third");
    }

    #[test]
    fn test_next_id_follows_max_not_length() {
        // A gap left by a removal must not cause id reuse.
        let existing = vec![comment(1), comment(5)];
        assert_eq!(next_comment_id(&existing).unwrap(), 6);
    }

    #[test]
    fn test_next_id_refuses_to_wrap_at_max() {
        let existing = vec![comment(3), comment(CommentId::MAX)];
        assert!(matches!(
            next_comment_id(&existing),
            Err(DomainError::Validation(_))
        ));
        assert!(append_comment(&existing, 1, "late".to_string(), Utc::now()).is_err());
    }

    #[test]
    fn test_remove_preserves_order_without_renumbering() {
        let existing = vec![comment(1), comment(2), comment(3)];
        let comments = remove_comment(&existing, 2).unwrap();

        let ids: Vec<CommentId> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_missing_comment() {
        let existing = vec![comment(1)];
        assert!(remove_comment(&existing, 7).is_none());
    }

    #[test]
    fn test_new_comment_validation() {
        let blank = NewComment {
            user_id: Some(1),
            text: Some("   ".to_string()),
        };
        assert!(matches!(blank.validate(), Err(DomainError::Validation(_))));

        let missing_user = NewComment {
            user_id: None,
            text: Some("hello".to_string()),
        };
        assert!(matches!(
            missing_user.validate(),
            Err(DomainError::Validation(_))
        ));

        let ok = NewComment {
            user_id: Some(4),
            text: Some("hello".to_string()),
        };
        assert_eq!(ok.validate().unwrap(), (4, "hello".to_string()));
    }
}
