//! End-to-end query objects against an in-memory SQLite database.

#![cfg(feature = "sqlite")]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, Row, SqlitePool};
use sqlx_query_object::{
    params, Config, Context, Error, Model, NoModel, Options, Query, QueryObject,
};
use std::path::Path;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sql");

#[derive(Debug, PartialEq, FromRow)]
struct Post {
    id: i64,
    title: String,
    description: Option<String>,
}

struct Posts;

impl Query for Posts {
    type Binding = Model<Post>;
}

struct PostsByIds;

impl Query for PostsByIds {
    type Binding = Model<Post>;
}

struct WithoutModel;

impl Query for WithoutModel {
    type Binding = NoModel;
}

struct WithoutSqlFile;

impl Query for WithoutSqlFile {
    type Binding = NoModel;
}

struct QueryWithConstant;

impl Query for QueryWithConstant {
    const SQL_FILE: Option<&'static str> =
        Some(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sql/all_posts.sql"));
    type Binding = Model<Post>;
}

async fn setup() -> Context<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    Context::with_config(pool, Config::new(FIXTURES))
}

async fn create_post(ctx: &Context<SqlitePool>, title: &str) {
    sqlx::query("INSERT INTO posts (title, description) VALUES (?, ?)")
        .bind(title)
        .bind("Test Description")
        .execute(ctx.connection())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_posts_by_title_matches_one_row() {
    let ctx = setup().await;
    create_post(&ctx, "Test").await;
    create_post(&ctx, "Other").await;

    let posts = Posts::call(&ctx, params! { "title" => "Test" }, Options::new())
        .await
        .unwrap();

    assert_eq!(
        posts,
        vec![Post {
            id: 1,
            title: "Test".into(),
            description: Some("Test Description".into()),
        }]
    );
}

#[tokio::test]
async fn test_posts_by_title_matches_nothing() {
    let ctx = setup().await;
    create_post(&ctx, "Other").await;

    let posts = Posts::call(&ctx, params! { "title" => "Test" }, Options::new())
        .await
        .unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_returns_every_matching_record() {
    let ctx = setup().await;
    for _ in 0..3 {
        create_post(&ctx, "Test Post").await;
    }

    let posts = QueryObject::<Posts>::new(params! { "title" => "Test Post" }, Options::new())
        .call(&ctx)
        .await
        .unwrap();
    assert_eq!(posts.len(), 3);
}

#[tokio::test]
async fn test_without_model_returns_raw_rows() {
    let ctx = setup().await;
    create_post(&ctx, "Test").await;

    let rows = WithoutModel::call(&ctx, params! { "title" => "Test" }, Options::new())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<i64, _>("id"), 1);
    assert_eq!(rows[0].get::<String, _>("title"), "Test");
}

#[tokio::test]
async fn test_same_template_with_and_without_model() {
    let ctx = setup().await;
    create_post(&ctx, "Test").await;
    let sql_file = Path::new(FIXTURES).join("posts.sql");

    let posts = Posts::call(
        &ctx,
        params! { "title" => "Test" },
        Options::new().sql_file(&sql_file),
    )
    .await
    .unwrap();
    let rows = WithoutModel::call(
        &ctx,
        params! { "title" => "Test" },
        Options::new().sql_file(&sql_file),
    )
    .await
    .unwrap();

    assert_eq!(posts.len(), rows.len());
    assert_eq!(posts[0].title, rows[0].get::<String, _>("title"));
    assert_eq!(
        posts[0].description.as_deref(),
        rows[0].get::<Option<String>, _>("description").as_deref()
    );
}

#[tokio::test]
async fn test_without_sql_file_is_missing_source() {
    let ctx = setup().await;

    let Err(err) = WithoutSqlFile::call(&ctx, params! {}, Options::new()).await else {
        panic!("expected a missing SQL file");
    };
    assert!(matches!(err, Error::MissingSqlSource { .. }));
    assert!(err.to_string().contains("without_sql_file.sql"));
}

#[tokio::test]
async fn test_nonexistent_override_is_missing_source() {
    let ctx = setup().await;
    let invalid = Path::new(FIXTURES).join("nonexistent.sql");

    let by_instance = QueryObject::<Posts>::new(params! {}, Options::new().sql_file(&invalid))
        .call(&ctx)
        .await
        .unwrap_err();
    let by_type = Posts::call(&ctx, params! {}, Options::new().sql_file(&invalid))
        .await
        .unwrap_err();

    assert!(by_instance.is_missing_source());
    assert!(by_type.is_missing_source());
}

#[tokio::test]
async fn test_constant_and_override_priority() {
    let ctx = setup().await;
    create_post(&ctx, "First").await;
    create_post(&ctx, "Second").await;

    let all = QueryWithConstant::call(&ctx, params! {}, Options::new())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let filtered = QueryWithConstant::call(
        &ctx,
        params! { "title" => "Second" },
        Options::new().sql_file(Path::new(FIXTURES).join("posts.sql")),
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "Second");
}

#[tokio::test]
async fn test_list_params_expand() {
    let ctx = setup().await;
    for title in ["a", "b", "c"] {
        create_post(&ctx, title).await;
    }

    let posts = PostsByIds::call(&ctx, params! { "ids" => vec![1, 3] }, Options::new())
        .await
        .unwrap();
    let titles: Vec<_> = posts.iter().map(|post| post.title.as_str()).collect();
    assert_eq!(titles, ["a", "c"]);

    let none = PostsByIds::call(&ctx, params! { "ids" => Vec::<i64>::new() }, Options::new())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_type_level_call_equals_instance_call() {
    let ctx = setup().await;
    create_post(&ctx, "Test").await;
    let params = params! { "title" => "Test" };

    let by_type = Posts::call(&ctx, params.clone(), Options::new())
        .await
        .unwrap();
    let by_instance = QueryObject::<Posts>::new(params, Options::new())
        .call(&ctx)
        .await
        .unwrap();
    assert_eq!(by_type, by_instance);
}

#[tokio::test]
async fn test_injection_payload_is_a_literal() {
    let ctx = setup().await;
    sqlx::query("CREATE TABLE x (id INTEGER)")
        .execute(ctx.connection())
        .await
        .unwrap();
    let payload = "a'); DROP TABLE x; --";

    let statement = QueryObject::<Posts>::new(params! { "title" => payload }, Options::new())
        .statement(ctx.config())
        .unwrap();
    assert!(!statement.sql().contains(payload));

    let before = Posts::call(&ctx, params! { "title" => payload }, Options::new())
        .await
        .unwrap();
    assert!(before.is_empty());

    create_post(&ctx, payload).await;
    let after = Posts::call(&ctx, params! { "title" => payload }, Options::new())
        .await
        .unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].title, payload);

    let tables: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'x'")
            .fetch_one(ctx.connection())
            .await
            .unwrap();
    assert_eq!(tables.0, 1);
}

#[tokio::test]
async fn test_driver_errors_propagate() {
    let ctx = setup().await;
    sqlx::query("DROP TABLE posts")
        .execute(ctx.connection())
        .await
        .unwrap();

    let err = Posts::call(&ctx, params! { "title" => "Test" }, Options::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(_)));
}
