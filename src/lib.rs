//! HTTP service that renders text as PNG QR codes.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod structs;
pub mod utils;
