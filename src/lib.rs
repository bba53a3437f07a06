//! # sqlx-query-object
//!
//! File-backed query objects for SQLx. Each query is a type that declares where
//! its SQL lives and what its rows become; the crate resolves the SQL file,
//! binds named parameters safely, and runs the statement.
//!
//! ## Features
//!
//! - **Convention over configuration**: `PostsByTitle` reads
//!   `app/queries/sql/posts_by_title.sql` unless told otherwise
//! - **Explicit overrides**: a per-call `sql_file` option beats a type-level
//!   `SQL_FILE` constant, which beats the convention
//! - **Named placeholders**: `:title` in the SQL file, bound as a real driver
//!   argument, never spliced into the SQL text
//! - **Typed or raw results**: bind a `FromRow` model to get entities, or
//!   `NoModel` to get the driver's rows
//! - **MySQL and SQLite**: through `MySqlPool` and `SqlitePool`, or any type
//!   implementing [`Connection`]
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! sqlx = { version = "0.8", features = ["sqlite", "runtime-tokio"] }
//! sqlx-query-object = "0.1"
//! ```
//!
//! ## Examples
//!
//! ### Hydrated results
//!
//! ```rust,no_run
//! use sqlx::{FromRow, SqlitePool};
//! use sqlx_query_object::{params, Context, Model, Options, Query};
//!
//! #[derive(Debug, FromRow)]
//! struct Post {
//!     id: i64,
//!     title: String,
//! }
//!
//! // app/queries/sql/posts.sql:
//! //   SELECT * FROM posts WHERE title = :title
//! struct Posts;
//!
//! impl Query for Posts {
//!     type Binding = Model<Post>;
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = Context::new(SqlitePool::connect("sqlite://blog.db").await?);
//!
//! let posts = Posts::call(&ctx, params! { "title" => "Test" }, Options::new()).await?;
//! for post in &posts {
//!     println!("{}: {}", post.id, post.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Raw rows and an explicit SQL file
//!
//! ```rust,no_run
//! use sqlx::{Row, SqlitePool};
//! use sqlx_query_object::{params, Context, NoModel, Options, QueryObject, Query};
//!
//! struct PostTitles;
//!
//! impl Query for PostTitles {
//!     type Binding = NoModel;
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let ctx = Context::new(SqlitePool::connect("sqlite://blog.db").await?);
//! let query = QueryObject::<PostTitles>::new(
//!     params! { "ids" => vec![1, 2, 3] },
//!     Options::new().sql_file("reports/titles_by_id.sql"),
//! );
//! for row in query.call(&ctx).await? {
//!     println!("{}", row.get::<String, _>("title"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## How It Works
//!
//! Every invocation runs the same linear pipeline:
//!
//! 1. **Resolve**: pick the SQL file (`sql_file` option, `SQL_FILE`, convention)
//! 2. **Read**: load the template; a missing file is [`Error::MissingSqlSource`]
//! 3. **Sanitize**: turn `:name` placeholders into `?` and collect bind values
//! 4. **Execute**: hand the statement to the model's `find_by_sql` or the
//!    connection, exactly once
//!
//! A failure in steps 1-3 ends the invocation before the database is touched.
//!
//! ## Limitations
//!
//! - Placeholder names must match `[A-Za-z]\w*`
//! - Templates must not contain positional `?` placeholders
//! - String literals may only escape quotes by doubling them (`'it''s'`).
//!   Backslash escapes such as MySQL's `'it\'s'` end the literal early, so a
//!   `:name` after them is treated as a placeholder
//! - PostgreSQL (`$1` placeholders) is not supported
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at your option.

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod object;
pub mod query;
pub mod query_as;
pub mod source;
pub mod value;

pub use async_trait::async_trait;
pub use builder::{sanitize, Statement};
pub use config::Config;
pub use context::Context;
pub use error::{Error, Result};
pub use object::{Options, Query, QueryObject, QueryOutput};
pub use query::Connection;
pub use query_as::{Binding, Entity, Model, NoModel};
pub use source::{SourceOrigin, SqlSource};
pub use value::{BindValue, Params, Value};

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::params;
    pub use crate::{Config, Context, Model, NoModel, Options, Params, Query, QueryObject};
}
