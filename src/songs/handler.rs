//! # Songs Request Handler
//!
//! Validates payloads, delegates to the data service, and shapes success
//! envelopes. Failures are returned untouched for the error layer to render.

use serde_json::Value;
use tracing::info;

use super::errors::SongResult;
use super::model::SongQuery;
use super::response::{DataResponse, MessageResponse, SongData, SongIdData, SongsData};
use super::service::SongsService;
use super::validator::SongPayloadValidator;

pub const UPDATED_MESSAGE: &str = "Song updated successfully";
pub const DELETED_MESSAGE: &str = "Song deleted successfully";

/// One method per songs route
#[derive(Debug, Clone)]
pub struct SongsHandler {
    service: SongsService,
    validator: SongPayloadValidator,
}

impl SongsHandler {
    pub fn new(service: SongsService, validator: SongPayloadValidator) -> Self {
        Self { service, validator }
    }

    /// POST /songs
    pub async fn create(&self, payload: &Value) -> SongResult<DataResponse<SongIdData>> {
        let payload = self.validator.validate(payload)?;
        let song_id = self.service.add_song(payload).await?;
        info!(%song_id, "song created");
        Ok(DataResponse::new(SongIdData { song_id }))
    }

    /// GET /songs
    pub async fn list(&self, query: &SongQuery) -> SongResult<DataResponse<SongsData>> {
        let songs = self.service.get_songs(query).await?;
        Ok(DataResponse::new(SongsData { songs }))
    }

    /// GET /songs/{id}
    pub async fn get_by_id(&self, id: &str) -> SongResult<DataResponse<SongData>> {
        let song = self.service.get_song_by_id(id).await?;
        Ok(DataResponse::new(SongData { song }))
    }

    /// PUT /songs/{id}
    pub async fn update(&self, id: &str, payload: &Value) -> SongResult<MessageResponse> {
        let payload = self.validator.validate(payload)?;
        self.service.edit_song_by_id(id, payload).await?;
        info!(song_id = %id, "song updated");
        Ok(MessageResponse::new(UPDATED_MESSAGE))
    }

    /// DELETE /songs/{id}
    pub async fn delete(&self, id: &str) -> SongResult<MessageResponse> {
        self.service.delete_song_by_id(id).await?;
        info!(song_id = %id, "song deleted");
        Ok(MessageResponse::new(DELETED_MESSAGE))
    }
}
