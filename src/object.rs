use async_trait::async_trait;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace, warn};

use crate::builder::{sanitize, Statement};
use crate::config::Config;
use crate::context::Context;
use crate::query::Connection;
use crate::query_as::Binding;
use crate::source::SqlSource;
use crate::value::Params;
use crate::Result;

/// Rows returned by query `Q` on connection `C`.
pub type QueryOutput<Q, C> = Vec<<<Q as Query>::Binding as Binding<C>>::Output>;

/// Declares a query: where its SQL comes from and what its rows become.
///
/// A query type carries no behavior of its own. Without `SQL_FILE` the
/// template is read from `<sql root>/<underscored name>.sql`.
///
/// # Examples
///
/// ```rust,no_run
/// use sqlx::{FromRow, SqlitePool};
/// use sqlx_query_object::{params, Context, Model, NoModel, Options, Query};
///
/// #[derive(FromRow)]
/// struct Post {
///     id: i64,
///     title: String,
/// }
///
/// // app/queries/sql/posts_by_title.sql:
/// //   SELECT id, title FROM posts WHERE title = :title
/// struct PostsByTitle;
///
/// impl Query for PostsByTitle {
///     type Binding = Model<Post>;
/// }
///
/// struct PostCounts;
///
/// impl Query for PostCounts {
///     const SQL_FILE: Option<&'static str> = Some("reports/post_counts.sql");
///     type Binding = NoModel;
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ctx = Context::new(SqlitePool::connect("sqlite://blog.db").await?);
///
/// let posts: Vec<Post> =
///     PostsByTitle::call(&ctx, params! { "title" => "Test" }, Options::new()).await?;
/// let counts = PostCounts::call(&ctx, params! {}, Options::new()).await?;
/// println!("{} posts, {} count rows", posts.len(), counts.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Query: Sized + 'static {
    /// Explicit SQL file, used when no `sql_file` option is given.
    const SQL_FILE: Option<&'static str> = None;

    /// [`NoModel`](crate::NoModel) for raw rows or [`Model<E>`](crate::Model) for entities.
    type Binding;

    /// Identifier the conventional file name is derived from.
    ///
    /// Defaults to the type's own name without its module path or generics.
    /// Return a `::`-separated name to place the file in a subdirectory.
    ///
    /// The default is read from [`std::any::type_name`], whose output is not
    /// guaranteed to stay the same across compiler versions. Override this
    /// when the SQL file name must be stable.
    fn name() -> &'static str {
        let name = std::any::type_name::<Self>();
        let name = name.split('<').next().unwrap_or(name);
        name.rsplit("::").next().unwrap_or(name)
    }

    /// Shorthand for `QueryObject::<Self>::new(params, options).call(ctx)`.
    async fn call<C>(
        ctx: &Context<C>,
        params: Params,
        options: Options,
    ) -> Result<QueryOutput<Self, C>>
    where
        C: Connection,
        Self::Binding: Binding<C>,
    {
        QueryObject::<Self>::new(params, options).call(ctx).await
    }
}

/// Per-invocation options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    sql_file: Option<PathBuf>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the template from `path`, taking priority over `SQL_FILE` and the convention.
    pub fn sql_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sql_file = Some(path.into());
        self
    }

    pub fn sql_file_path(&self) -> Option<&Path> {
        self.sql_file.as_deref()
    }
}

/// One invocation of query `Q`.
///
/// Construction only captures the params and options; the SQL file is read
/// and the database touched when [`QueryObject::call`] runs.
pub struct QueryObject<Q> {
    params: Params,
    sql_file: Option<PathBuf>,
    _query: PhantomData<fn() -> Q>,
}

impl<Q: Query> QueryObject<Q> {
    pub fn new(params: Params, options: Options) -> Self {
        Self {
            params,
            sql_file: options.sql_file,
            _query: PhantomData,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Picks the SQL file this invocation reads.
    pub fn source(&self, config: &Config) -> Result<SqlSource> {
        SqlSource::resolve(
            Q::name(),
            config.sql_root(),
            self.sql_file.as_deref(),
            Q::SQL_FILE,
        )
    }

    /// Resolves, reads and sanitizes the SQL without executing it.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSqlSource`](crate::Error::MissingSqlSource) when the
    /// file does not exist, or any sanitization error.
    pub fn statement(&self, config: &Config) -> Result<Statement> {
        let source = self.source(config)?;
        debug!(
            origin = source.origin().as_str(),
            path = %source.path().display(),
            "resolved SQL source"
        );

        let template = source.read().inspect_err(|err| {
            warn!(path = %source.path().display(), error = %err, "failed to read SQL source");
        })?;
        let statement = sanitize(&template, &self.params).inspect_err(|err| {
            warn!(path = %source.path().display(), error = %err, "failed to sanitize SQL");
        })?;

        debug!(sql = statement.sql(), binds = statement.binds().len(), "sanitized statement");
        Ok(statement)
    }

    /// Executes the query.
    ///
    /// Exactly one statement is sent, through the entity's
    /// [`find_by_sql`](crate::Entity::find_by_sql) when a model is bound or
    /// straight to the connection otherwise. Nothing is sent if the SQL
    /// cannot be read or sanitized.
    #[instrument(skip_all, fields(query = Q::name()))]
    pub async fn call<C>(&self, ctx: &Context<C>) -> Result<QueryOutput<Q, C>>
    where
        C: Connection,
        Q::Binding: Binding<C>,
    {
        let statement = self.statement(ctx.config())?;
        let rows = <Q::Binding as Binding<C>>::dispatch(ctx.connection(), &statement).await?;
        trace!(rows = rows.len(), "query executed");
        Ok(rows)
    }
}

impl<Q: Query> fmt::Debug for QueryObject<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryObject")
            .field("query", &Q::name())
            .field("params", &self.params)
            .field("sql_file", &self.sql_file)
            .finish()
    }
}
