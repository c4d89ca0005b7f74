//! `edgequota.events.v1` protobuf messages and the `EventService` server
//!
//! Mirrors `proto/edgequota/events/v1/events.proto`. The messages derive
//! `prost::Message` directly and the server follows the shape tonic's code
//! generator emits, so no `protoc` is needed at build time.

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use tonic::body::{empty_body, BoxBody};
use tonic::codegen::{http, Body, BoxFuture, Service, StdError};

/// Fully qualified gRPC service name
pub const SERVICE_NAME: &str = "edgequota.events.v1.EventService";

const PUBLISH_EVENTS_PATH: &str = "/edgequota.events.v1.EventService/PublishEvents";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UsageEvent {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub tenant_key: String,
    #[prost(string, tag = "3")]
    pub method: String,
    #[prost(string, tag = "4")]
    pub path: String,
    #[prost(bool, tag = "5")]
    pub allowed: bool,
    #[prost(int64, tag = "6")]
    pub remaining: i64,
    #[prost(int64, tag = "7")]
    pub limit: i64,
    #[prost(string, tag = "8")]
    pub timestamp: String,
    #[prost(int32, tag = "9")]
    pub status_code: i32,
    #[prost(string, tag = "10")]
    pub request_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PublishEventsRequest {
    #[prost(message, repeated, tag = "1")]
    pub events: Vec<UsageEvent>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PublishEventsResponse {
    #[prost(int64, tag = "1")]
    pub accepted: i64,
}

impl From<UsageEvent> for crate::types::UsageEvent {
    fn from(event: UsageEvent) -> Self {
        Self {
            key: event.key,
            tenant_key: event.tenant_key,
            method: event.method,
            path: event.path,
            allowed: event.allowed,
            remaining: event.remaining,
            limit: event.limit,
            timestamp: event.timestamp,
            status_code: event.status_code,
            request_id: event.request_id,
        }
    }
}

/// Server-side handler for `edgequota.events.v1.EventService`
#[tonic::async_trait]
pub trait EventService: Send + Sync + 'static {
    async fn publish_events(
        &self,
        request: tonic::Request<PublishEventsRequest>,
    ) -> Result<tonic::Response<PublishEventsResponse>, tonic::Status>;
}

/// Tower service routing gRPC calls to an `EventService` implementation
#[derive(Debug)]
pub struct EventServiceServer<T> {
    inner: Arc<T>,
}

impl<T: EventService> EventServiceServer<T> {
    pub fn new(inner: T) -> Self {
        Self::from_arc(Arc::new(inner))
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T> Clone for EventServiceServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> tonic::server::NamedService for EventServiceServer<T> {
    const NAME: &'static str = SERVICE_NAME;
}

struct PublishEventsSvc<T>(Arc<T>);

impl<T: EventService> tonic::server::UnaryService<PublishEventsRequest> for PublishEventsSvc<T> {
    type Response = PublishEventsResponse;
    type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<PublishEventsRequest>) -> Self::Future {
        let inner = Arc::clone(&self.0);
        Box::pin(async move { inner.publish_events(request).await })
    }
}

impl<T, B> Service<http::Request<B>> for EventServiceServer<T>
where
    T: EventService,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        match req.uri().path() {
            PUBLISH_EVENTS_PATH => {
                let inner = Arc::clone(&self.inner);
                Box::pin(async move {
                    // Batches are never rejected for size
                    let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default())
                        .apply_max_message_size_config(Some(usize::MAX), None);
                    Ok(grpc.unary(PublishEventsSvc(inner), req).await)
                })
            }
            _ => Box::pin(async move {
                let mut response = http::Response::new(empty_body());
                let headers = response.headers_mut();
                headers.insert(
                    http::header::HeaderName::from_static("grpc-status"),
                    http::HeaderValue::from(tonic::Code::Unimplemented as i32),
                );
                headers.insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/grpc"),
                );
                Ok(response)
            }),
        }
    }
}
