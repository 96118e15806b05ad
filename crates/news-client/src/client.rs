//! Reqwest-backed API client.
//!
//! One method per endpoint. Non-2xx responses are decoded from the server's
//! `{error, message}` envelope into [`ClientError::Api`].

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use news_shared::ErrorResponse;
use news_shared::dto::{
    AddCommentRequest, ArticleResponse, CreateArticleRequest, DeleteResponse, HealthResponse,
    ListNewsParams, UpdateArticleRequest, UserResponse,
};

use crate::error::ClientError;

/// Default server address.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// One page of a news listing.
#[derive(Debug, Clone)]
pub struct NewsPage {
    pub items: Vec<ArticleResponse>,
    /// Matching articles across all pages, when the server reports it.
    pub total: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    base: Url,
}

impl NewsClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, ClientError> {
        let base =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// GET /
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.send(self.request(Method::GET, &[])?).await
    }

    /// GET /users
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, ClientError> {
        self.send(self.request(Method::GET, &["users"])?).await
    }

    /// GET /users/{id}
    pub async fn get_user(&self, id: i64) -> Result<UserResponse, ClientError> {
        let id = id.to_string();
        self.send(self.request(Method::GET, &["users", &id])?).await
    }

    /// GET /news
    pub async fn list_news(&self, params: &ListNewsParams) -> Result<NewsPage, ClientError> {
        let response = self
            .request(Method::GET, &["news"])?
            .query(params)
            .send()
            .await?;

        let total = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let items = decode(response).await?;

        Ok(NewsPage { items, total })
    }

    /// GET /news/{id}
    pub async fn get_news(&self, id: &str) -> Result<ArticleResponse, ClientError> {
        self.send(self.request(Method::GET, &["news", id])?).await
    }

    /// POST /news
    pub async fn create_news(
        &self,
        request: &CreateArticleRequest,
    ) -> Result<ArticleResponse, ClientError> {
        self.send(self.request(Method::POST, &["news"])?.json(request))
            .await
    }

    /// PATCH /news/{id}
    pub async fn update_news(
        &self,
        id: &str,
        request: &UpdateArticleRequest,
    ) -> Result<ArticleResponse, ClientError> {
        self.send(self.request(Method::PATCH, &["news", id])?.json(request))
            .await
    }

    /// DELETE /news/{id}
    pub async fn delete_news(&self, id: &str) -> Result<DeleteResponse, ClientError> {
        self.send(self.request(Method::DELETE, &["news", id])?)
            .await
    }

    /// POST /news/{id}/comments
    pub async fn add_comment(
        &self,
        id: &str,
        request: &AddCommentRequest,
    ) -> Result<ArticleResponse, ClientError> {
        self.send(
            self.request(Method::POST, &["news", id, "comments"])?
                .json(request),
        )
        .await
    }

    /// DELETE /news/{id}/comments/{comment_id}
    pub async fn remove_comment(
        &self,
        id: &str,
        comment_id: i64,
    ) -> Result<ArticleResponse, ClientError> {
        let comment_id = comment_id.to_string();
        self.send(self.request(Method::DELETE, &["news", id, "comments", &comment_id])?)
            .await
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.url(segments)?;
        tracing::debug!(%method, %url, "API request");
        Ok(self.client.request(method, url))
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        decode(request.send().await?).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(api_error(status, &body));
    }

    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(envelope) => ClientError::Api {
            status: status.as_u16(),
            error: envelope.error,
            message: envelope.message,
        },
        // Not our envelope, e.g. a proxy error page
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: (!body.is_empty()).then(|| String::from_utf8_lossy(body).into_owned()),
        },
    }
}
