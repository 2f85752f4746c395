use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{DatabaseTransaction, DbConn, DbErr, EntityTrait, SqlErr, TransactionTrait};

use postdesk_core::error::RepoError;

/// Generic PostgreSQL repository over one entity's table.
///
/// Holds a handle to the shared pool. Repositories built with
/// [`PostgresBaseRepository::shared`] all talk to the same pool. Transactional
/// operations check out one connection through [`PostgresBaseRepository::begin`],
/// and it returns to the pool when the transaction is committed, rolled back or
/// dropped.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self::shared(Arc::new(db))
    }

    pub fn shared(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub(crate) fn conn(&self) -> &DbConn {
        &self.db
    }

    pub(crate) async fn begin(&self) -> Result<DatabaseTransaction, RepoError> {
        self.db.begin().await.map_err(map_db_err)
    }
}

/// Commit on success, roll back on failure. The driver error wins over a
/// failed rollback.
pub(crate) async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, DbErr>,
) -> Result<T, RepoError> {
    match result {
        Ok(value) => {
            txn.commit().await.map_err(map_db_err)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(map_db_err(err))
        }
    }
}

pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}
