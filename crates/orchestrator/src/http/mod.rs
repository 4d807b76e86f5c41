//! The operations HTTP surface: `POST /operations`, `GET /operations/{id}`, `GET /operations`.

pub mod dto;
mod routes;

pub use routes::{router, AppState};
