use crate::config::Config;
use crate::query::Connection;

/// The connection and configuration a query runs against.
///
/// Queries never look up a global connection; callers hand one in through a
/// `Context`. Pools are cheap to clone, so a context can own one.
///
/// # Examples
///
/// ```rust,no_run
/// use sqlx::SqlitePool;
/// use sqlx_query_object::{Config, Context};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = SqlitePool::connect("sqlite::memory:").await?;
/// let ctx = Context::with_config(pool, Config::for_app("/srv/blog"));
/// assert_eq!(ctx.config().sql_root().to_str(), Some("/srv/blog/app/queries/sql"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Context<C> {
    connection: C,
    config: Config,
}

impl<C: Connection> Context<C> {
    /// Creates a context with the default [`Config`].
    pub fn new(connection: C) -> Self {
        Self::with_config(connection, Config::default())
    }

    pub fn with_config(connection: C, config: Config) -> Self {
        Self { connection, config }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
