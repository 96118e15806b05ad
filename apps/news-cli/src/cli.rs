use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// `news-cli` arguments.
#[derive(Debug, Parser)]
#[command(name = "news-cli", about = "Browse and write news on a News Portal server", version)]
pub struct Cli {
    /// Base URL of the API server.
    #[arg(
        long,
        env = "NEWS_API_URL",
        default_value = news_client::client::DEFAULT_API_URL,
        global = true
    )]
    pub api_url: String,

    /// Directory holding the session file. Defaults to `$HOME/.news-portal`.
    #[arg(long, env = "NEWS_SESSION_DIR", value_name = "dir", global = true)]
    pub session_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(|| {
            env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".news-portal")
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the users you can act as.
    Users,
    /// Act as the given user from now on.
    Login { user_id: i64 },
    /// Forget the current user.
    Logout,
    /// Show the current user.
    Whoami,
    /// List news, newest first.
    List {
        #[arg(long)]
        page: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
        /// Case-insensitive text to look for in titles and bodies.
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show one article with its comments.
    Show { id: String },
    /// Publish an article as the current user.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Change the title or body of one of your articles.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete one of your articles.
    Delete { id: String },
    /// Comment on an article.
    Comment { id: String, text: String },
    /// Delete one of your comments.
    Uncomment { id: String, comment_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_list_filters() {
        let cli = Cli::try_parse_from([
            "news-cli", "list", "--page", "2", "--limit", "5", "-q", "rust",
        ])
        .unwrap();
        match cli.command {
            Command::List { page, limit, query } => {
                assert_eq!(page, Some(2));
                assert_eq!(limit, Some(5));
                assert_eq!(query.as_deref(), Some("rust"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_edit_fields_are_optional() {
        let cli = Cli::try_parse_from(["news-cli", "edit", "abc", "--body", "New body"]).unwrap();
        match cli.command {
            Command::Edit { id, title, body } => {
                assert_eq!(id, "abc");
                assert!(title.is_none());
                assert_eq!(body.as_deref(), Some("New body"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_create_requires_title_and_body() {
        assert!(Cli::try_parse_from(["news-cli", "create", "--title", "Only"]).is_err());
    }

    #[test]
    fn test_explicit_session_dir_wins() {
        let cli =
            Cli::try_parse_from(["news-cli", "--session-dir", "/tmp/np", "whoami"]).unwrap();
        assert_eq!(cli.session_dir(), PathBuf::from("/tmp/np"));
    }
}
