//! Service-level tests against the in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use news_core::domain::{
    Article, ArticleId, ArticlePage, ArticlePatch, ArticleQuery, Comment, NewArticle, NewComment,
    append_comment,
};
use news_core::error::{DomainError, RepoError};
use news_core::ports::{ArticleRepository, UserRepository};
use news_core::services::{ArticleService, SeedOutcome, UserService};

use super::{InMemoryArticleRepository, InMemoryUserRepository};

async fn seeded_users() -> Arc<InMemoryUserRepository> {
    let users = Arc::new(InMemoryUserRepository::new());
    UserService::new(users.clone()).seed().await.unwrap();
    users
}

async fn service() -> (ArticleService, Arc<InMemoryArticleRepository>) {
    let articles = Arc::new(InMemoryArticleRepository::new());
    let service = ArticleService::new(articles.clone(), seeded_users().await);
    (service, articles)
}

fn draft(title: &str) -> NewArticle {
    NewArticle {
        title: Some(title.to_string()),
        body: Some(format!("{title} body text")),
        author_id: Some(1),
    }
}

fn new_comment(user_id: i64, text: &str) -> NewComment {
    NewComment {
        user_id: Some(user_id),
        text: Some(text.to_string()),
    }
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let users = Arc::new(InMemoryUserRepository::new());
    let service = UserService::new(users.clone());

    assert_eq!(service.seed().await.unwrap(), SeedOutcome::Inserted(5));
    assert_eq!(service.seed().await.unwrap(), SeedOutcome::AlreadyPresent(5));
    assert_eq!(users.count().await.unwrap(), 5);

    let ids: Vec<i64> = service.list().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_get_missing_user() {
    let service = UserService::new(seeded_users().await);
    assert!(matches!(
        service.get(42).await,
        Err(DomainError::NotFound { entity: "User", .. })
    ));
}

#[tokio::test]
async fn test_create_starts_with_no_comments() {
    let (service, _) = service().await;
    let before = Utc::now();

    let article = service.create(draft("Launch")).await.unwrap();

    assert!(article.comments.is_empty());
    assert!(article.created_at >= before);
    assert_eq!(service.get(article.id).await.unwrap(), article);
}

#[tokio::test]
async fn test_create_missing_field_persists_nothing() {
    let (service, articles) = service().await;

    let err = service
        .create(NewArticle {
            title: Some("No author".to_string()),
            body: Some("Body".to_string()),
            author_id: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    let page = articles.list(&ArticleQuery::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_create_with_unknown_author_is_a_reference_error() {
    let (service, _) = service().await;

    let mut unknown = draft("Ghost");
    unknown.author_id = Some(99);

    assert!(matches!(
        service.create(unknown).await,
        Err(DomainError::Reference { entity: "User", .. })
    ));
}

#[tokio::test]
async fn test_get_missing_article() {
    let (service, _) = service().await;
    assert!(matches!(
        service.get(ArticleId::new_v4()).await,
        Err(DomainError::NotFound { entity: "News", .. })
    ));
}

#[tokio::test]
async fn test_list_is_newest_first_and_paged() {
    let (service, articles) = service().await;
    let now = Utc::now();

    for (i, title) in ["oldest", "older", "middle", "newer", "newest"]
        .into_iter()
        .enumerate()
    {
        let age = Duration::minutes(10 - i as i64);
        let article = Article::create(draft(title), now - age).unwrap();
        articles.insert(article).await.unwrap();
    }

    let all = service.list(&ArticleQuery::default()).await.unwrap();
    let titles: Vec<&str> = all.items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "newer", "middle", "older", "oldest"]);

    let query = ArticleQuery {
        page: Some(2),
        limit: Some(2),
        search: None,
    };
    let page = service.list(&query).await.unwrap();
    let titles: Vec<&str> = page.items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["middle", "older"]);
    assert_eq!(page.total, 5);

    let search = ArticleQuery {
        search: Some("NEWE".to_string()),
        ..ArticleQuery::default()
    };
    let found = service.list(&search).await.unwrap();
    assert_eq!(found.total, 2);
}

#[tokio::test]
async fn test_update_round_trip_leaves_other_fields() {
    let (service, _) = service().await;
    let article = service.create(draft("Original")).await.unwrap();
    let article = service
        .add_comment(article.id, new_comment(2, "first!"))
        .await
        .unwrap();

    service
        .update(
            article.id,
            ArticlePatch {
                title: Some("X".to_string()),
                ..ArticlePatch::default()
            },
        )
        .await
        .unwrap();

    let fetched = service.get(article.id).await.unwrap();
    assert_eq!(fetched.title, "X");
    assert_eq!(fetched.body, article.body);
    assert_eq!(fetched.author_id, article.author_id);
    assert_eq!(fetched.created_at, article.created_at);
    assert_eq!(fetched.comments, article.comments);
}

#[tokio::test]
async fn test_update_missing_article() {
    let (service, _) = service().await;
    let patch = ArticlePatch {
        title: Some("X".to_string()),
        ..ArticlePatch::default()
    };
    assert!(matches!(
        service.update(ArticleId::new_v4(), patch).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_update_missing_article_outranks_unknown_author() {
    let (service, _) = service().await;
    let patch = ArticlePatch {
        author_id: Some(99),
        ..ArticlePatch::default()
    };
    assert!(matches!(
        service.update(ArticleId::new_v4(), patch).await,
        Err(DomainError::NotFound { entity: "News", .. })
    ));
}

#[tokio::test]
async fn test_patch_with_exhausted_comment_id_is_rejected() {
    let (service, _) = service().await;
    let article = service.create(draft("Edge")).await.unwrap();

    let patch = ArticlePatch {
        comments: Some(vec![Comment {
            id: i64::MAX,
            user_id: 2,
            text: "last one".to_string(),
            created_at: Utc::now(),
        }]),
        ..ArticlePatch::default()
    };
    assert!(matches!(
        service.update(article.id, patch).await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn test_add_comment_after_max_id_fails_cleanly() {
    let (service, articles) = service().await;
    let article = service.create(draft("Edge")).await.unwrap();

    // Written straight to the store, as older data might be
    let stored = vec![Comment {
        id: i64::MAX,
        user_id: 2,
        text: "last one".to_string(),
        created_at: Utc::now(),
    }];
    articles
        .update(article.id, ArticlePatch::comments_at(stored.clone(), article.revision))
        .await
        .unwrap();

    assert!(matches!(
        service.add_comment(article.id, new_comment(3, "one more")).await,
        Err(DomainError::Validation(_))
    ));
    assert_eq!(service.get(article.id).await.unwrap().comments, stored);
}

#[tokio::test]
async fn test_update_with_stale_revision_conflicts() {
    let (service, _) = service().await;
    let article = service.create(draft("Versioned")).await.unwrap();

    service
        .update(
            article.id,
            ArticlePatch {
                body: Some("edited once".to_string()),
                revision: Some(0),
                ..ArticlePatch::default()
            },
        )
        .await
        .unwrap();

    let stale = ArticlePatch {
        body: Some("edited from an old copy".to_string()),
        revision: Some(0),
        ..ArticlePatch::default()
    };
    assert!(matches!(
        service.update(article.id, stale).await,
        Err(DomainError::Conflict(_))
    ));
}

#[tokio::test]
async fn test_delete() {
    let (service, _) = service().await;
    let article = service.create(draft("Short lived")).await.unwrap();

    service.delete(article.id).await.unwrap();

    assert!(matches!(
        service.get(article.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(article.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_comment_ids_and_removal() {
    let (service, _) = service().await;
    let article = service.create(draft("Discussed")).await.unwrap();

    let article = service
        .add_comment(article.id, new_comment(2, "one"))
        .await
        .unwrap();
    assert_eq!(article.comments[0].id, 1);

    service
        .add_comment(article.id, new_comment(3, "two"))
        .await
        .unwrap();
    let article = service
        .add_comment(article.id, new_comment(4, "three"))
        .await
        .unwrap();
    let ids: Vec<i64> = article.comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let article = service.remove_comment(article.id, 2).await.unwrap();
    let ids: Vec<i64> = article.comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3]);

    // The next id continues from the max, not the length.
    let article = service
        .add_comment(article.id, new_comment(2, "four"))
        .await
        .unwrap();
    assert_eq!(article.comments.last().map(|c| c.id), Some(4));
}

#[tokio::test]
async fn test_remove_missing_comment() {
    let (service, _) = service().await;
    let article = service.create(draft("Quiet")).await.unwrap();

    assert!(matches!(
        service.remove_comment(article.id, 1).await,
        Err(DomainError::NotFound {
            entity: "Comment",
            ..
        })
    ));
}

#[tokio::test]
async fn test_comment_by_unknown_user() {
    let (service, _) = service().await;
    let article = service.create(draft("Open")).await.unwrap();

    assert!(matches!(
        service.add_comment(article.id, new_comment(77, "hi")).await,
        Err(DomainError::Reference { .. })
    ));
}

/// Lets a competing writer append a comment between the service's read and
/// its write, exactly once.
struct InterleavingRepository {
    inner: Arc<InMemoryArticleRepository>,
    fired: AtomicBool,
}

#[async_trait]
impl ArticleRepository for InterleavingRepository {
    async fn insert(&self, article: Article) -> Result<Article, RepoError> {
        self.inner.insert(article).await
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, RepoError> {
        self.inner.list(query).await
    }

    async fn update(
        &self,
        id: ArticleId,
        patch: ArticlePatch,
    ) -> Result<Option<Article>, RepoError> {
        if patch.comments.is_some() && !self.fired.swap(true, Ordering::SeqCst) {
            let current = self.inner.find_by_id(id).await?.ok_or(RepoError::NotFound)?;
            let comments =
                append_comment(&current.comments, 2, "from the other tab".to_string(), Utc::now())
                    .map_err(|e| RepoError::Query(e.to_string()))?;
            self.inner
                .update(id, ArticlePatch::comments_at(comments, current.revision))
                .await?;
        }
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: ArticleId) -> Result<bool, RepoError> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_interleaved_comment_adds_both_survive() {
    let inner = Arc::new(InMemoryArticleRepository::new());
    let racing = Arc::new(InterleavingRepository {
        inner: inner.clone(),
        fired: AtomicBool::new(false),
    });
    let service = ArticleService::new(racing, seeded_users().await);

    let article = service.create(draft("Contested")).await.unwrap();
    let article = service
        .add_comment(article.id, new_comment(1, "mine"))
        .await
        .unwrap();

    let comments: Vec<(i64, &str)> = article
        .comments
        .iter()
        .map(|c| (c.id, c.text.as_str()))
        .collect();
    assert_eq!(comments, vec![(1, "from the other tab"), (2, "mine")]);
}

#[tokio::test]
async fn test_interleaved_write_without_retries_is_a_conflict() {
    let inner = Arc::new(InMemoryArticleRepository::new());
    let racing = Arc::new(InterleavingRepository {
        inner: inner.clone(),
        fired: AtomicBool::new(false),
    });
    let service = ArticleService::new(racing, seeded_users().await).with_write_retries(0);

    let article = service.create(draft("Contested")).await.unwrap();
    assert!(matches!(
        service.add_comment(article.id, new_comment(1, "mine")).await,
        Err(DomainError::Conflict(_))
    ));

    // The competing comment is intact; ours was not written over it.
    let stored = inner.find_by_id(article.id).await.unwrap().unwrap();
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].text, "from the other tab");
}

#[tokio::test]
async fn test_unconditional_patch_keeps_last_writer_wins() {
    // Two clients read the same article and each PATCH a full comment array
    // without a revision: the second write replaces the first.
    let (service, _) = service().await;
    let article = service.create(draft("Legacy")).await.unwrap();

    let first = append_comment(&article.comments, 2, "first".to_string(), Utc::now()).unwrap();
    let second = append_comment(&article.comments, 3, "second".to_string(), Utc::now()).unwrap();

    for comments in [first, second] {
        service
            .update(
                article.id,
                ArticlePatch {
                    comments: Some(comments),
                    ..ArticlePatch::default()
                },
            )
            .await
            .unwrap();
    }

    let stored = service.get(article.id).await.unwrap();
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].text, "second");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_comment_adds_all_survive() {
    const WRITERS: i64 = 10;

    let (service, _) = service().await;
    // Each lost race means another writer succeeded, so WRITERS - 1 retries
    // always suffice.
    let service = service.with_write_retries(WRITERS as u32);
    let article = service.create(draft("Busy thread")).await.unwrap();

    let tasks: Vec<_> = (0..WRITERS)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .add_comment(article.id, new_comment(1 + i % 5, &format!("comment {i}")))
                    .await
            })
        })
        .collect();

    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let stored = service.get(article.id).await.unwrap();
    let ids: Vec<i64> = stored.comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..=WRITERS).collect::<Vec<_>>());
}
