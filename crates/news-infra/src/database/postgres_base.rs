use std::marker::PhantomData;

use sea_orm::{DbConn, DbErr, EntityTrait, PrimaryKeyTrait};

use news_core::error::RepoError;

/// Generic PostgreSQL repository: a connection bound to one entity.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Fetch one row by primary key and convert it to a domain type.
    pub(crate) async fn find_by_pk<T, ID>(&self, id: ID) -> Result<Option<T>, RepoError>
    where
        E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
        ID: Into<sea_orm::Value> + Send,
        T: From<E::Model>,
    {
        let result = E::find_by_id(id).one(&self.db).await.map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    /// Delete one row by primary key. Returns whether a row was removed.
    pub(crate) async fn delete_by_pk<ID>(&self, id: ID) -> Result<bool, RepoError>
    where
        E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
        ID: Into<sea_orm::Value> + Send,
    {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected > 0)
    }
}

/// Map a SeaORM error onto the repository taxonomy.
pub(crate) fn query_error(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(err) => RepoError::Connection(err.to_string()),
        DbErr::ConnectionAcquire(err) => RepoError::Connection(err.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}
