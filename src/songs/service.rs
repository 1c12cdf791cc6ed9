//! # Songs Data Service
//!
//! Owns a handle to the shared pool and issues exactly one parameterized
//! statement per operation. Missing rows are detected from the statement
//! result itself, never by a separate read.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::errors::{SongError, SongResult};
use super::filter::SongFilter;
use super::id::generate_song_id;
use super::model::{Song, SongPayload, SongQuery, SongSummary};

pub const ADD_FAILED: &str = "Failed to add song";
pub const SONG_NOT_FOUND: &str = "Song not found";
pub const UPDATE_NOT_FOUND: &str = "Failed to update song. Id not found";
pub const DELETE_NOT_FOUND: &str = "Failed to delete song. Id not found";

/// Data-access service for the `songs` table
#[derive(Debug, Clone)]
pub struct SongsService {
    pool: SqlitePool,
}

impl SongsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new song and return its generated id
    #[instrument(skip(self, payload), fields(title = %payload.title))]
    pub async fn add_song(&self, payload: SongPayload) -> SongResult<String> {
        let id = generate_song_id();

        let inserted: Option<String> = sqlx::query_scalar(
            r#"INSERT INTO songs (id, title, year, genre, performer, duration, "albumId")
               VALUES (?, ?, ?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(&id)
        .bind(&payload.title)
        .bind(payload.year)
        .bind(&payload.genre)
        .bind(&payload.performer)
        .bind(payload.duration)
        .bind(&payload.album_id)
        .fetch_optional(&self.pool)
        .await?;

        let song_id = inserted_id(inserted)?;
        debug!(%song_id, "song inserted");
        Ok(song_id)
    }

    /// List summary rows, optionally filtered by title and/or performer
    #[instrument(skip(self))]
    pub async fn get_songs(&self, query: &SongQuery) -> SongResult<Vec<SongSummary>> {
        let filter = SongFilter::from_query(query);
        let mut builder = filter.to_query();

        let songs = builder
            .build_query_as::<SongSummary>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = songs.len(), "songs listed");
        Ok(songs)
    }

    /// Fetch the full record for `id`
    #[instrument(skip(self))]
    pub async fn get_song_by_id(&self, id: &str) -> SongResult<Song> {
        sqlx::query_as::<_, Song>(
            r#"SELECT id, title, year, genre, performer, duration, "albumId"
               FROM songs WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| SongError::not_found(SONG_NOT_FOUND))
    }

    /// Replace every editable field of `id`
    #[instrument(skip(self, payload))]
    pub async fn edit_song_by_id(&self, id: &str, payload: SongPayload) -> SongResult<()> {
        let result = sqlx::query(
            r#"UPDATE songs
               SET title = ?, year = ?, genre = ?, performer = ?, duration = ?, "albumId" = ?
               WHERE id = ?"#,
        )
        .bind(&payload.title)
        .bind(payload.year)
        .bind(&payload.genre)
        .bind(&payload.performer)
        .bind(payload.duration)
        .bind(&payload.album_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(SongError::not_found(UPDATE_NOT_FOUND));
        }
        Ok(())
    }

    /// Remove `id`
    #[instrument(skip(self))]
    pub async fn delete_song_by_id(&self, id: &str) -> SongResult<()> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(SongError::not_found(DELETE_NOT_FOUND));
        }
        Ok(())
    }
}

/// The id reported back by `INSERT .. RETURNING id`; anything else means
/// the row was not written as requested.
fn inserted_id(inserted: Option<String>) -> SongResult<String> {
    match inserted {
        Some(song_id) if !song_id.is_empty() => Ok(song_id),
        _ => Err(SongError::invariant(ADD_FAILED)),
    }
}
