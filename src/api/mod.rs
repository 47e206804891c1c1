//! HTTP API for classification and history

pub mod server;

pub use server::{build_router, ApiServer, ApiServerConfig};
