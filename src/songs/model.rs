//! Song records
//!
//! Row types double as API records: the storage column `"albumId"` is kept
//! camel-cased on both sides, so the mapping is a rename annotation only.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full song record as stored in the `songs` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    pub duration: Option<i32>,
    #[sqlx(rename = "albumId")]
    #[serde(rename = "albumId")]
    pub album_id: Option<String>,
}

impl Song {
    /// Combine an id with the editable fields
    pub fn from_payload(id: impl Into<String>, payload: SongPayload) -> Self {
        Self {
            id: id.into(),
            title: payload.title,
            year: payload.year,
            genre: payload.genre,
            performer: payload.performer,
            duration: payload.duration,
            album_id: payload.album_id,
        }
    }
}

/// Summary projection returned by the list operation
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct SongSummary {
    pub id: String,
    pub title: String,
    pub performer: String,
}

/// The six caller-supplied fields of a song.
///
/// Only produced by the payload validator, so every instance has passed the
/// create/update rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongPayload {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    pub duration: Option<i32>,
    #[serde(rename = "albumId")]
    pub album_id: Option<String>,
}

/// Optional filters accepted by the list operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SongQuery {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub performer: Option<String>,
}
