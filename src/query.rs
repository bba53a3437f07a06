use async_trait::async_trait;

use crate::builder::Statement;
#[cfg(any(feature = "mysql", feature = "sqlite"))]
use crate::value::BindValue;
#[cfg(any(feature = "mysql", feature = "sqlite"))]
use sqlx::{
    query::{Query, QueryAs},
    Database, Encode, Type,
};

/// A database connection that runs sanitized statements and returns raw rows.
///
/// Implemented for `MySqlPool` (feature `mysql`) and `SqlitePool` (feature
/// `sqlite`). Pooling, transactions and timeouts belong to the implementor.
///
/// # Examples
///
/// ```rust,no_run
/// use sqlx::{Row, SqlitePool};
/// use sqlx_query_object::{builder::sanitize, params, Connection};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = SqlitePool::connect("sqlite::memory:").await?;
/// let statement = sanitize("SELECT :answer AS answer", &params! { "answer" => 42 })?;
///
/// let rows = pool.execute(&statement).await?;
/// let answer: i64 = rows[0].get("answer");
/// assert_eq!(answer, 42);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Connection: Send + Sync + 'static {
    /// The driver's native row type.
    type Row: Send + 'static;

    /// Executes `statement` and returns every row it produced.
    ///
    /// # Errors
    ///
    /// Driver failures are returned as [`Error::Database`](crate::Error::Database).
    async fn execute(&self, statement: &Statement) -> crate::Result<Vec<Self::Row>>;
}

/// A SQLx query builder that accepts bound arguments.
///
/// Both `sqlx::query` and `sqlx::query_as` builders implement this, so
/// statement values are mapped onto driver types in one place.
#[cfg(any(feature = "mysql", feature = "sqlite"))]
pub(crate) trait BindArguments<'q, DB: Database>: Sized {
    fn bind_one<T>(self, value: T) -> Self
    where
        T: 'q + Encode<'q, DB> + Type<DB>;

    /// Binds every statement value, in placeholder order.
    fn bind_all(mut self, binds: &[BindValue]) -> Self
    where
        String: Encode<'q, DB> + Type<DB>,
        i64: Encode<'q, DB> + Type<DB>,
        f64: Encode<'q, DB> + Type<DB>,
        bool: Encode<'q, DB> + Type<DB>,
        Option<String>: Encode<'q, DB> + Type<DB>,
    {
        for bind in binds {
            self = match bind {
                BindValue::Null => self.bind_one(None::<String>),
                BindValue::Bool(v) => self.bind_one(*v),
                BindValue::Int(v) => self.bind_one(*v),
                BindValue::Float(v) => self.bind_one(*v),
                BindValue::Text(v) => self.bind_one(v.clone()),
            };
        }
        self
    }
}

#[cfg(any(feature = "mysql", feature = "sqlite"))]
impl<'q, DB: Database> BindArguments<'q, DB>
    for Query<'q, DB, <DB as Database>::Arguments<'q>>
{
    fn bind_one<T>(self, value: T) -> Self
    where
        T: 'q + Encode<'q, DB> + Type<DB>,
    {
        self.bind(value)
    }
}

#[cfg(any(feature = "mysql", feature = "sqlite"))]
impl<'q, DB: Database, O> BindArguments<'q, DB>
    for QueryAs<'q, DB, O, <DB as Database>::Arguments<'q>>
{
    fn bind_one<T>(self, value: T) -> Self
    where
        T: 'q + Encode<'q, DB> + Type<DB>,
    {
        self.bind(value)
    }
}

#[cfg(any(feature = "mysql", feature = "sqlite"))]
macro_rules! impl_connection {
    ($pool:ty, $db:ty, $row:ty) => {
        #[async_trait]
        impl Connection for $pool {
            type Row = $row;

            async fn execute(&self, statement: &Statement) -> crate::Result<Vec<$row>> {
                let query = sqlx::query::<$db>(statement.sql()).bind_all(statement.binds());
                Ok(query.fetch_all(self).await?)
            }
        }
    };
}

#[cfg(feature = "mysql")]
impl_connection!(sqlx::MySqlPool, sqlx::MySql, sqlx::mysql::MySqlRow);

#[cfg(feature = "sqlite")]
impl_connection!(sqlx::SqlitePool, sqlx::Sqlite, sqlx::sqlite::SqliteRow);
