//! News article entity for SeaORM.
//!
//! Comments are embedded in the row as a JSONB array, mirroring the
//! document shape of the API.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use news_core::domain::Comment;

/// The `comments` column: the article's full comment sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CommentList(pub Vec<Comment>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub author_id: i64,
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: CommentList,
    pub revision: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Article.
impl From<Model> for news_core::domain::Article {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            author_id: model.author_id,
            created_at: model.created_at.into(),
            comments: model.comments.0,
            revision: model.revision,
        }
    }
}

/// Conversion from Domain Article to SeaORM ActiveModel.
impl From<news_core::domain::Article> for ActiveModel {
    fn from(article: news_core::domain::Article) -> Self {
        Self {
            id: Set(article.id),
            title: Set(article.title),
            body: Set(article.body),
            author_id: Set(article.author_id),
            created_at: Set(article.created_at.into()),
            comments: Set(CommentList(article.comments)),
            revision: Set(article.revision),
        }
    }
}
