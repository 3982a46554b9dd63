//! HTTP front of the webhook relay.
//!
//! Accepts arbitrary JSON callbacks, republishes each one to a fixed AMQP
//! queue, and serves a static redirect page.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod telemetry;

pub use config::Config;
pub use error::{ApiError, ConfigError, ServerError};
pub use server::{create_router, run, AppState};
