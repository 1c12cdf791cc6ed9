//! openmusic - REST service for a song catalog
//!
//! Songs are stored in a single relational table and exposed as a CRUD
//! resource with case-insensitive title/performer search.

pub mod cli;
pub mod config;
pub mod db;
pub mod http_server;
pub mod observability;
pub mod songs;
