//! gRPC binding of the events protocol
//!
//! `EventService/PublishEvents` ingests a batch into the shared store. The
//! query endpoints stay on HTTP.

pub mod proto;

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::info;

use crate::event_store::EventStore;
use proto::{EventService, EventServiceServer, PublishEventsRequest, PublishEventsResponse};

/// `EventService` backed by an `EventStore`
#[derive(Debug, Clone)]
pub struct GrpcEventService {
    store: Arc<EventStore>,
}

impl GrpcEventService {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Wrap in the tower service tonic serves
    pub fn into_server(self) -> EventServiceServer<Self> {
        EventServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl EventService for GrpcEventService {
    async fn publish_events(
        &self,
        request: Request<PublishEventsRequest>,
    ) -> Result<Response<PublishEventsResponse>, Status> {
        let batch = request
            .into_inner()
            .events
            .into_iter()
            .map(Into::into)
            .collect();

        let summary = self.store.ingest(batch);
        info!(
            count = summary.accepted,
            allowed = summary.allowed,
            denied = summary.denied,
            evicted = summary.evicted,
            transport = "grpc",
            "events received"
        );

        Ok(Response::new(PublishEventsResponse {
            accepted: summary.accepted as i64,
        }))
    }
}
