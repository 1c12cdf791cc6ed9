//! # Songs Resource
//!
//! CRUD over the `songs` table: HTTP routes feed the request handler, which
//! validates payloads and calls the data service; the service issues one SQL
//! statement per operation.

pub mod errors;
pub mod filter;
pub mod handler;
pub mod id;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod validator;

pub use errors::{SongError, SongResult, ValidationDetails};
pub use filter::SongFilter;
pub use handler::SongsHandler;
pub use id::generate_song_id;
pub use model::{Song, SongPayload, SongQuery, SongSummary};
pub use routes::songs_routes;
pub use service::SongsService;
pub use validator::SongPayloadValidator;
