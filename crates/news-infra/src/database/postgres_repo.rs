//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use news_core::domain::{
    Article, ArticleId, ArticlePage, ArticlePatch, ArticleQuery, User, UserId,
};
use news_core::error::RepoError;
use news_core::ports::{ArticleRepository, UserRepository};

use super::entity::article::{self, CommentList, Entity as ArticleEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL news repository.
pub type PostgresArticleRepository = PostgresBaseRepository<ArticleEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        self.find_by_pk(id).await
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        UserEntity::find()
            .count(&self.db)
            .await
            .map_err(query_error)
    }

    async fn insert_many(&self, users: Vec<User>) -> Result<(), RepoError> {
        if users.is_empty() {
            return Ok(());
        }

        let models: Vec<user::ActiveModel> = users.into_iter().map(Into::into).collect();
        UserEntity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(())
    }
}

/// `LIKE` pattern matching `term` anywhere, with wildcards in the term escaped.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn insert(&self, article: Article) -> Result<Article, RepoError> {
        let active_model: article::ActiveModel = article.into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, RepoError> {
        self.find_by_pk(id).await
    }

    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, RepoError> {
        let mut select = ArticleEntity::find();

        if let Some(term) = query.search_term() {
            let pattern = contains_pattern(term);
            select = select.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(article::Column::Title))).like(&pattern))
                    .add(Expr::expr(Func::lower(Expr::col(article::Column::Body))).like(&pattern)),
            );
        }

        let total = select
            .clone()
            .count(&self.db)
            .await
            .map_err(query_error)?;

        // Same order as the in-memory store, ties broken by id
        let mut select = select
            .order_by_desc(article::Column::CreatedAt)
            .order_by_asc(article::Column::Id);
        if let Some((offset, limit)) = query.window() {
            select = select.offset(offset).limit(limit);
        }

        let models = select.all(&self.db).await.map_err(query_error)?;
        tracing::debug!(total, returned = models.len(), "Listed news");

        Ok(ArticlePage {
            items: models.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn update(
        &self,
        id: ArticleId,
        patch: ArticlePatch,
    ) -> Result<Option<Article>, RepoError> {
        let expected = patch.revision;

        // A single UPDATE ... WHERE revision = $expected makes the write a
        // compare-and-swap when a revision is supplied.
        let mut update = ArticleEntity::update_many()
            .col_expr(
                article::Column::Revision,
                Expr::col(article::Column::Revision).add(1),
            )
            .filter(article::Column::Id.eq(id));

        if let Some(title) = patch.title {
            update = update.col_expr(article::Column::Title, Expr::value(title));
        }
        if let Some(body) = patch.body {
            update = update.col_expr(article::Column::Body, Expr::value(body));
        }
        if let Some(author_id) = patch.author_id {
            update = update.col_expr(article::Column::AuthorId, Expr::value(author_id));
        }
        if let Some(comments) = patch.comments {
            update = update.col_expr(article::Column::Comments, Expr::value(CommentList(comments)));
        }
        if let Some(revision) = expected {
            update = update.filter(article::Column::Revision.eq(revision));
        }

        let updated = update
            .exec_with_returning(&self.db)
            .await
            .map_err(query_error)?;

        if let Some(model) = updated.into_iter().next() {
            return Ok(Some(model.into()));
        }

        // Nothing matched: either the article is gone or the revision moved on.
        let current: Option<Article> = self.find_by_pk(id).await?;
        match (current, expected) {
            (None, _) => Ok(None),
            (Some(article), Some(expected)) => Err(RepoError::Conflict {
                expected,
                actual: article.revision,
            }),
            (Some(_), None) => Err(RepoError::Query(format!(
                "update of news {id} matched no rows"
            ))),
        }
    }

    async fn delete(&self, id: ArticleId) -> Result<bool, RepoError> {
        self.delete_by_pk(id).await
    }
}
