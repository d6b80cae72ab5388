//! legalens Gateway HTTP API Server
//!
//! Document analysis (plain and progress-streamed), the legal-assistant chat
//! relay, and a health probe, all under `/api`.

pub mod analyze_api;
pub mod chat_api;
pub mod error;
pub mod health_api;
pub mod server;
pub mod upload;

pub use error::ApiError;
pub use server::{router, start_server, GatewayState};
