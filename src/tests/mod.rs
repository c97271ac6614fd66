//! Tests against the full router, backed by the in-memory storage

mod auth;
mod invalid_json;
mod mapping_create;
