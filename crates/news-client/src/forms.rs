//! Field checks a client runs before submitting an article or comment.
//!
//! The server only requires fields to be present; the length rule here is
//! applied on the client.

use thiserror::Error;

/// Shortest accepted article body, counted in characters after trimming.
pub const MIN_BODY_CHARS: usize = 20;

/// Per-field problems with an article form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.summary())]
pub struct FormErrors {
    pub title: Option<&'static str>,
    pub body: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }

    fn summary(&self) -> String {
        [self.title, self.body]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("; ")
    }
}

pub fn check_title(title: &str) -> Option<&'static str> {
    title.trim().is_empty().then_some("Title cannot be empty")
}

pub fn check_body(body: &str) -> Option<&'static str> {
    let body = body.trim();
    if body.is_empty() {
        Some("Content cannot be empty")
    } else if body.chars().count() < MIN_BODY_CHARS {
        Some("Content must be at least 20 characters")
    } else {
        None
    }
}

/// Validate an article form. `None` means the field is left unchanged and
/// is not checked, as when editing only the title.
pub fn validate_news(title: Option<&str>, body: Option<&str>) -> Result<(), FormErrors> {
    let errors = FormErrors {
        title: title.and_then(check_title),
        body: body.and_then(check_body),
    };
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Comment cannot be empty")]
pub struct EmptyComment;

pub fn validate_comment(text: &str) -> Result<(), EmptyComment> {
    if text.trim().is_empty() {
        Err(EmptyComment)
    } else {
        Ok(())
    }
}
