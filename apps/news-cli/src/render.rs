//! Plain-text rendering of API responses.

use std::collections::HashMap;

use news_shared::dto::{ArticleResponse, UserResponse};

const PREVIEW_CHARS: usize = 80;

/// User id to display name, for authors and commenters.
#[derive(Debug, Default)]
pub struct UserNames(HashMap<i64, String>);

impl UserNames {
    pub fn from_users(users: Vec<UserResponse>) -> Self {
        Self(users.into_iter().map(|u| (u.id, u.name)).collect())
    }

    /// Unknown ids render as `user <id>`.
    pub fn name(&self, id: i64) -> String {
        self.0
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("user {id}"))
    }
}

pub fn user_line(user: &UserResponse) -> String {
    format!("{:>3}  {} <{}>", user.id, user.name, user.email)
}

/// One line per article: id, date, title, author and comment count.
pub fn article_line(article: &ArticleResponse, names: &UserNames) -> String {
    format!(
        "{}  {}  {} by {} ({} comments)",
        article.id,
        article.created_at.format("%Y-%m-%d"),
        article.title,
        names.name(article.author_id),
        article.comments.len()
    )
}

pub fn article_detail(article: &ArticleResponse, names: &UserNames) -> String {
    let mut out = format!(
        "{}\nby {} on {}\n\n{}\n",
        article.title,
        names.name(article.author_id),
        article.created_at.format("%Y-%m-%d %H:%M"),
        article.body
    );

    if article.comments.is_empty() {
        out.push_str("\nNo comments yet.\n");
    } else {
        out.push_str(&format!("\nComments ({}):\n", article.comments.len()));
        for comment in &article.comments {
            out.push_str(&format!(
                "  #{} {}: {}\n",
                comment.id,
                names.name(comment.user_id),
                comment.text
            ));
        }
    }
    out
}

/// First line of the body, shortened for listings.
pub fn preview(body: &str) -> String {
    let line = body.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
