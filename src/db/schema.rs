//! Songs table bootstrap

use sqlx::SqlitePool;

/// Definition of the `songs` table.
///
/// `"albumId"` is quoted so the column keeps its camel-cased name.
pub const SONGS_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS songs (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    year INTEGER NOT NULL,
    genre TEXT NOT NULL,
    performer TEXT NOT NULL,
    duration INTEGER,
    "albumId" TEXT
)
"#;

/// Create the songs table when absent. Existing tables are left untouched.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SONGS_TABLE_DDL).execute(pool).await?;
    Ok(())
}
