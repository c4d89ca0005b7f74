//! API module for HTTP endpoints
//!
//! Thin translation layers between the wire protocols (JSON over HTTP,
//! protobuf over gRPC) and the event store.

pub mod grpc;
pub mod http;
pub mod rest;
pub mod state;

pub use grpc::GrpcEventService;
pub use http::create_router;
pub use state::AppState;
