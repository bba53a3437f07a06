//! Raw-row example: query objects without a bound model
//!
//! Run with: cargo run --example without_model
//!
//! Uses an in-memory SQLite database unless DATABASE_URL is set:
//! export DATABASE_URL="sqlite://blog.db"

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Row;
use sqlx_query_object::prelude::*;

/// Reads demos/sql/post_stats.sql by convention.
struct PostStats;

impl Query for PostStats {
    type Binding = NoModel;
}

/// Lives in a subdirectory: demos/sql/reports/titles.sql.
struct Titles;

impl Query for Titles {
    type Binding = NoModel;

    fn name() -> &'static str {
        "Reports::Titles"
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

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

    println!("\nSetting up posts table...");
    sqlx::query("DROP TABLE IF EXISTS posts")
        .execute(ctx.connection())
        .await?;
    sqlx::query(
        "CREATE TABLE posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            body TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(ctx.connection())
    .await?;
    for title in ["Alpha", "Beta", "Gamma", "Delta"] {
        sqlx::query("INSERT INTO posts (title) VALUES (?)")
            .bind(title)
            .execute(ctx.connection())
            .await?;
    }

    // Example 1: aggregate row without a model
    println!("\n--- Example 1: Post statistics ---");
    let rows = PostStats::call(&ctx, params! {}, Options::new()).await?;
    for row in &rows {
        let total: i64 = row.get("total");
        let newest: i64 = row.get("newest");
        println!("  total={} newest_id={}", total, newest);
    }

    // Example 2: list parameter expanded into IN (...)
    println!("\n--- Example 2: Titles for ids 1, 3, 4 ---");
    let query = QueryObject::<Titles>::new(params! { "ids" => vec![1, 3, 4] }, Options::new());
    println!("  SQL sent: {}", query.statement(ctx.config())?.sql().trim());
    for row in query.call(&ctx).await? {
        println!("  - {} (id={})", row.get::<String, _>("title"), row.get::<i64, _>("id"));
    }

    // Example 3: unbound placeholders are rejected before execution
    println!("\n--- Example 3: Missing parameter ---");
    match Titles::call(&ctx, params! {}, Options::new()).await {
        Ok(_) => println!("  Unexpectedly succeeded"),
        Err(e) => println!("  Error: {}", e),
    }

    println!("\nCleaning up...");
    sqlx::query("DROP TABLE IF EXISTS posts")
        .execute(ctx.connection())
        .await?;

    println!("\nExample completed successfully!");
    Ok(())
}
