//! Process configuration
//!
//! Every option can be given as a flag or through the environment.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::event_store::{EventStoreConfig, MAX_RETAINED};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Text,
}

/// EdgeQuota events receiver
#[derive(Debug, Clone, Parser)]
#[command(name = "edgequota-events")]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// HTTP listen address (a leading ':' listens on all interfaces)
    #[arg(long, env = "ADDR", default_value = ":8080")]
    pub addr: String,

    /// gRPC listen address for `EventService/PublishEvents`
    #[arg(long, env = "GRPC_ADDR", default_value = ":50053")]
    pub grpc_addr: String,

    /// Maximum number of events kept in memory
    #[arg(long, env = "MAX_RETAINED", default_value_t = MAX_RETAINED)]
    pub max_retained: usize,

    /// Log filter directive, e.g. `info` or `edgequota_events=debug`
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 5)]
    pub request_timeout_secs: u64,

    /// Seconds to wait for in-flight requests after a shutdown signal
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// HTTP address in a form `TcpListener::bind` accepts
    pub fn listen_addr(&self) -> String {
        bindable(&self.addr)
    }

    /// gRPC address in a form `TcpListener::bind` accepts
    pub fn grpc_listen_addr(&self) -> String {
        bindable(&self.grpc_addr)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    pub fn store_config(&self) -> EventStoreConfig {
        EventStoreConfig::new(self.max_retained)
    }
}

fn bindable(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    }
}
