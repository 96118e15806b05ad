//! Client-local session: which user this client is acting as.
//!
//! There is no token and no server round-trip. The selected user is kept in
//! a JSON file named after [`SESSION_KEY`] and the ownership checks below
//! run entirely on the client.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use news_shared::dto::{ArticleResponse, CommentDto, UserResponse};

use crate::error::SessionError;

/// Fixed key the session is stored under.
pub const SESSION_KEY: &str = "newsportal_user";

/// File-backed storage for the session entry.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{SESSION_KEY}.json"))
    }

    /// `Ok(None)` when nothing has been stored.
    pub fn load(&self) -> Result<Option<UserResponse>, SessionError> {
        let raw = match fs::read(self.path()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    pub fn save(&self, user: &UserResponse) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(), serde_json::to_vec(user)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// The user currently selected on this client, if any.
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    user: Option<UserResponse>,
}

impl Session {
    /// Load the stored user. An unreadable entry is discarded and the
    /// session starts logged out.
    pub fn restore(store: SessionStore) -> Result<Self, SessionError> {
        let user = match store.load() {
            Ok(user) => user,
            Err(SessionError::Corrupt(e)) => {
                tracing::warn!(error = %e, path = %store.path().display(), "Discarding stored session");
                store.clear()?;
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self { store, user })
    }

    pub fn login(&mut self, user: UserResponse) -> Result<(), SessionError> {
        self.store.save(&user)?;
        tracing::debug!(user_id = user.id, "Session started");
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.clear()?;
        self.user = None;
        Ok(())
    }

    pub fn current(&self) -> Option<&UserResponse> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Only the author may edit or delete an article.
    pub fn can_edit(&self, article: &ArticleResponse) -> bool {
        self.user.as_ref().is_some_and(|u| u.id == article.author_id)
    }

    /// Only the commenter may delete a comment.
    pub fn can_delete_comment(&self, comment: &CommentDto) -> bool {
        self.user.as_ref().is_some_and(|u| u.id == comment.user_id)
    }
}
