//! Basic example: query objects that hydrate `FromRow` models
//!
//! Run with: cargo run --example basic
//!
//! Uses an in-memory SQLite database unless DATABASE_URL is set:
//! export DATABASE_URL="sqlite://blog.db"

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::FromRow;
use sqlx_query_object::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, FromRow)]
struct Post {
    id: i64,
    title: String,
    body: String,
}

/// Reads demos/sql/posts_matching.sql by convention.
struct PostsMatching;

impl Query for PostsMatching {
    type Binding = Model<Post>;
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sqlx_query_object=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

    println!("Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;
    let ctx = Context::with_config(
        pool,
        Config::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sql")),
    );

    println!("\nCreating posts table...");
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            body TEXT NOT NULL
        )",
    )
    .execute(ctx.connection())
    .await?;

    for (title, body) in [
        ("Query objects", "SQL lives in files."),
        ("Query builders", "SQL lives in code."),
        ("Raw SQL", "SQL lives everywhere."),
    ] {
        sqlx::query("INSERT INTO posts (title, body) VALUES (?, ?)")
            .bind(title)
            .bind(body)
            .execute(ctx.connection())
            .await?;
    }

    // Example 1: type-level call
    println!("\n--- Example 1: Posts matching 'Query%' ---");
    let posts =
        PostsMatching::call(&ctx, params! { "pattern" => "Query%" }, Options::new()).await?;
    for post in &posts {
        println!("  - {} (id={}): {}", post.title, post.id, post.body);
    }

    // Example 2: the payload is bound, not spliced
    println!("\n--- Example 2: Hostile input ---");
    let hostile = "x' OR '1'='1";
    let query = QueryObject::<PostsMatching>::new(params! { "pattern" => hostile }, Options::new());
    println!("  SQL sent: {}", query.statement(ctx.config())?);
    println!("  Matches: {}", query.call(&ctx).await?.len());

    // Example 3: a missing file is a configuration error
    println!("\n--- Example 3: Missing SQL file ---");
    match PostsMatching::call(
        &ctx,
        params! {},
        Options::new().sql_file("demos/sql/does_not_exist.sql"),
    )
    .await
    {
        Ok(_) => println!("  Unexpectedly found the file"),
        Err(e) => println!("  Error: {}", e),
    }

    println!("\nExample completed successfully!");
    Ok(())
}
