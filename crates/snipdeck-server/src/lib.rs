//! HTTP API exposing a snipdeck session to external picker front-ends.

pub mod api;
pub mod server;

pub use server::{get_api_server_port, routes, start_api_server, SharedSession};
