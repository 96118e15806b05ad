//! Subcommand execution.
//!
//! Ownership is checked here, against the local session, before any
//! mutating request is sent. The server does not check it again.

use std::io::Write;

use anyhow::{Context, bail};

use news_client::{ClientError, NewsClient, Session, forms};
use news_shared::dto::{
    AddCommentRequest, ArticleResponse, CreateArticleRequest, ListNewsParams,
    UpdateArticleRequest, UserResponse,
};

use crate::cli::Command;
use crate::render::{self, UserNames};

pub async fn run(
    command: Command,
    client: &NewsClient,
    session: &mut Session,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Users => {
            for user in client.list_users().await? {
                writeln!(out, "{}", render::user_line(&user))?;
            }
        }
        Command::Login { user_id } => {
            let user = client
                .get_user(user_id)
                .await
                .with_context(|| format!("cannot log in as user {user_id}"))?;
            writeln!(out, "Logged in as {}", user.name)?;
            session.login(user)?;
        }
        Command::Logout => {
            session.logout()?;
            writeln!(out, "Logged out")?;
        }
        Command::Whoami => match session.current() {
            Some(user) => writeln!(out, "{}", render::user_line(user))?,
            None => writeln!(out, "Not logged in")?,
        },
        Command::List { page, limit, query } => {
            let params = ListNewsParams {
                page,
                limit,
                q: query,
            };
            let listing = client.list_news(&params).await?;
            if listing.items.is_empty() {
                writeln!(out, "No news found")?;
            }
            let names = user_names(client).await;
            for article in &listing.items {
                writeln!(out, "{}", render::article_line(article, &names))?;
                writeln!(out, "    {}", render::preview(&article.body))?;
            }
            if let Some(total) = listing.total {
                writeln!(out, "{} of {} shown", listing.items.len(), total)?;
            }
        }
        Command::Show { id } => {
            let article = client.get_news(&id).await?;
            let names = user_names(client).await;
            write!(out, "{}", render::article_detail(&article, &names))?;
        }
        Command::Create { title, body } => {
            let author = require_user(session)?;
            forms::validate_news(Some(title.as_str()), Some(body.as_str()))?;
            let article = client
                .create_news(&CreateArticleRequest {
                    title: Some(title),
                    body: Some(body),
                    author_id: Some(author.id),
                })
                .await?;
            writeln!(out, "Published {}", article.id)?;
        }
        Command::Edit { id, title, body } => {
            if title.is_none() && body.is_none() {
                bail!("nothing to change: pass --title and/or --body");
            }
            forms::validate_news(title.as_deref(), body.as_deref())?;
            let article = owned_article(client, session, &id).await?;
            let request = UpdateArticleRequest {
                title,
                body,
                revision: Some(article.revision),
                ..UpdateArticleRequest::default()
            };
            match client.update_news(&id, &request).await {
                Ok(updated) => writeln!(out, "Updated {}", updated.id)?,
                Err(e) if e.is_conflict() => {
                    bail!("article {id} changed since it was loaded; run the command again")
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Delete { id } => {
            owned_article(client, session, &id).await?;
            let response = client.delete_news(&id).await?;
            writeln!(out, "{}", response.message)?;
        }
        Command::Comment { id, text } => {
            let user = require_user(session)?;
            forms::validate_comment(&text)?;
            let article = client
                .add_comment(
                    &id,
                    &AddCommentRequest {
                        user_id: Some(user.id),
                        text: Some(text),
                    },
                )
                .await
                .map_err(not_found_as("article", &id))?;
            let added = article.comments.last().map(|c| c.id).unwrap_or_default();
            writeln!(out, "Added comment #{added}")?;
        }
        Command::Uncomment { id, comment_id } => {
            require_user(session)?;
            let article = client
                .get_news(&id)
                .await
                .map_err(not_found_as("article", &id))?;
            let Some(comment) = article.comments.iter().find(|c| c.id == comment_id) else {
                bail!("article {id} has no comment #{comment_id}");
            };
            if !session.can_delete_comment(comment) {
                bail!("comment #{comment_id} belongs to another user");
            }
            client.remove_comment(&id, comment_id).await?;
            writeln!(out, "Removed comment #{comment_id}")?;
        }
    }

    Ok(())
}

/// Display names for authors and commenters, fetched in one call. A failed
/// lookup falls back to bare ids rather than failing the command.
async fn user_names(client: &NewsClient) -> UserNames {
    match client.list_users().await {
        Ok(users) => UserNames::from_users(users),
        Err(e) => {
            tracing::warn!(error = %e, "Could not load user names");
            UserNames::default()
        }
    }
}

fn require_user(session: &Session) -> anyhow::Result<&UserResponse> {
    session
        .current()
        .context("not logged in; run `news-cli login <user-id>` first")
}

/// Fetch an article and check that the current user wrote it.
async fn owned_article(
    client: &NewsClient,
    session: &Session,
    id: &str,
) -> anyhow::Result<ArticleResponse> {
    require_user(session)?;
    let article = client
        .get_news(id)
        .await
        .map_err(not_found_as("article", id))?;
    if !session.can_edit(&article) {
        bail!("article {id} belongs to another user");
    }
    Ok(article)
}

fn not_found_as<'a>(what: &'a str, id: &'a str) -> impl Fn(ClientError) -> anyhow::Error + 'a {
    move |e| {
        if e.is_not_found() {
            anyhow::anyhow!("no {what} with id {id}")
        } else {
            e.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_client::SessionStore;
    use tempfile::TempDir;

    // Nothing listens here; commands that fail before the network never notice.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn logged_out(dir: &TempDir) -> Session {
        Session::restore(SessionStore::new(dir.path())).unwrap()
    }

    #[tokio::test]
    async fn test_mutations_require_login() {
        let dir = TempDir::new().unwrap();
        let client = NewsClient::new(UNREACHABLE).unwrap();
        let mut session = logged_out(&dir);

        let commands = [
            Command::Create {
                title: "T".to_string(),
                body: "B".to_string(),
            },
            Command::Edit {
                id: "a".to_string(),
                title: Some("T".to_string()),
                body: None,
            },
            Command::Delete { id: "a".to_string() },
            Command::Comment {
                id: "a".to_string(),
                text: "hi".to_string(),
            },
            Command::Uncomment {
                id: "a".to_string(),
                comment_id: 1,
            },
        ];

        for command in commands {
            let mut out = Vec::new();
            let err = run(command, &client, &mut session, &mut out)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("not logged in"), "{err}");
        }
    }

    #[tokio::test]
    async fn test_edit_without_fields_is_rejected() {
        let dir = TempDir::new().unwrap();
        let client = NewsClient::new(UNREACHABLE).unwrap();
        let mut session = logged_out(&dir);

        let mut out = Vec::new();
        let err = run(
            Command::Edit {
                id: "a".to_string(),
                title: None,
                body: None,
            },
            &client,
            &mut session,
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("nothing to change"));
    }

    fn logged_in(dir: &TempDir) -> Session {
        let mut session = logged_out(dir);
        session
            .login(UserResponse {
                id: 2,
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
            })
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_short_body_is_rejected_before_sending() {
        let dir = TempDir::new().unwrap();
        let client = NewsClient::new(UNREACHABLE).unwrap();
        let mut session = logged_in(&dir);

        let commands = [
            Command::Create {
                title: "Launch".to_string(),
                body: "x".repeat(19),
            },
            Command::Edit {
                id: "a".to_string(),
                title: None,
                body: Some("x".repeat(19)),
            },
        ];
        for command in commands {
            let mut out = Vec::new();
            let err = run(command, &client, &mut session, &mut out)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("at least 20 characters"), "{err}");
        }

        // Twenty characters passes the form and fails on the network instead
        let mut out = Vec::new();
        let err = run(
            Command::Create {
                title: "Launch".to_string(),
                body: "x".repeat(20),
            },
            &client,
            &mut session,
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(!err.to_string().contains("at least 20 characters"), "{err}");
    }

    #[tokio::test]
    async fn test_blank_comment_is_rejected() {
        let dir = TempDir::new().unwrap();
        let client = NewsClient::new(UNREACHABLE).unwrap();
        let mut session = logged_in(&dir);

        let mut out = Vec::new();
        let err = run(
            Command::Comment {
                id: "a".to_string(),
                text: "   ".to_string(),
            },
            &client,
            &mut session,
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Comment cannot be empty"), "{err}");
    }

    #[tokio::test]
    async fn test_whoami_and_logout() {
        let dir = TempDir::new().unwrap();
        let client = NewsClient::new(UNREACHABLE).unwrap();
        let mut session = logged_out(&dir);

        let mut out = Vec::new();
        run(Command::Whoami, &client, &mut session, &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Not logged in\n");

        session
            .login(UserResponse {
                id: 4,
                name: "Alice Williams".to_string(),
                email: "alice@example.com".to_string(),
            })
            .unwrap();

        let mut out = Vec::new();
        run(Command::Whoami, &client, &mut session, &mut out)
            .await
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Alice Williams"));

        let mut out = Vec::new();
        run(Command::Logout, &client, &mut session, &mut out)
            .await
            .unwrap();
        assert!(!session.is_logged_in());
    }
}
