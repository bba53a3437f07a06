use async_trait::async_trait;
use std::marker::PhantomData;

use crate::builder::Statement;
use crate::query::Connection;
#[cfg(any(feature = "mysql", feature = "sqlite"))]
use crate::query::BindArguments;

/// A domain type that can be built by executing raw SQL on `C`.
///
/// For SQLx pools every type implementing `sqlx::FromRow` for the pool's row
/// type is an `Entity` already.
///
/// # Examples
///
/// ```rust,no_run
/// use sqlx::{FromRow, SqlitePool};
/// use sqlx_query_object::{builder::sanitize, params, Entity};
///
/// #[derive(FromRow)]
/// struct Post {
///     id: i64,
///     title: String,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let pool = SqlitePool::connect("sqlite::memory:").await?;
/// let statement = sanitize(
///     "SELECT id, title FROM posts WHERE title = :title",
///     &params! { "title" => "Test" },
/// )?;
/// let posts = Post::find_by_sql(&pool, &statement).await?;
/// println!("Found {} posts", posts.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Entity<C: Connection>: Sized + Send + 'static {
    /// Executes `statement` and hydrates every returned row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be converted.
    async fn find_by_sql(connection: &C, statement: &Statement) -> crate::Result<Vec<Self>>;
}

/// How a query's results are produced: raw rows or hydrated entities.
///
/// Chosen per query type through [`Query::Binding`](crate::Query::Binding).
#[async_trait]
pub trait Binding<C: Connection> {
    type Output: Send + 'static;

    async fn dispatch(connection: &C, statement: &Statement) -> crate::Result<Vec<Self::Output>>;
}

/// No entity bound: results are the connection's raw rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModel;

/// Results are hydrated into `E` through [`Entity::find_by_sql`].
pub struct Model<E>(PhantomData<fn() -> E>);

#[async_trait]
impl<C: Connection> Binding<C> for NoModel {
    type Output = C::Row;

    async fn dispatch(connection: &C, statement: &Statement) -> crate::Result<Vec<C::Row>> {
        connection.execute(statement).await
    }
}

#[async_trait]
impl<C, E> Binding<C> for Model<E>
where
    C: Connection,
    E: Entity<C>,
{
    type Output = E;

    async fn dispatch(connection: &C, statement: &Statement) -> crate::Result<Vec<E>> {
        <E as Entity<C>>::find_by_sql(connection, statement).await
    }
}

#[cfg(any(feature = "mysql", feature = "sqlite"))]
macro_rules! impl_entity {
    ($pool:ty, $db:ty, $row:ty) => {
        #[async_trait]
        impl<T> Entity<$pool> for T
        where
            T: for<'r> sqlx::FromRow<'r, $row> + Send + Unpin + 'static,
        {
            async fn find_by_sql(
                connection: &$pool,
                statement: &Statement,
            ) -> crate::Result<Vec<T>> {
                let query = sqlx::query_as::<$db, T>(statement.sql()).bind_all(statement.binds());
                Ok(query.fetch_all(connection).await?)
            }
        }
    };
}

#[cfg(feature = "mysql")]
impl_entity!(sqlx::MySqlPool, sqlx::MySql, sqlx::mysql::MySqlRow);

#[cfg(feature = "sqlite")]
impl_entity!(sqlx::SqlitePool, sqlx::Sqlite, sqlx::sqlite::SqliteRow);
