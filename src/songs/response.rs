//! # Response Envelopes
//!
//! Success bodies share the shape `{status, data}` or `{status, message}`.

use serde::Serialize;

use super::model::{Song, SongSummary};

pub const STATUS_SUCCESS: &str = "success";

/// `{status: "success", data: ...}`
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            data,
        }
    }
}

/// `{status: "success", message: ...}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SongIdData {
    #[serde(rename = "songId")]
    pub song_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SongsData {
    pub songs: Vec<SongSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SongData {
    pub song: Song,
}
