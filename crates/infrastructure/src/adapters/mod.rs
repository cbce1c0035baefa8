//! Adapter implementations for application ports

mod memory_sink;
mod reqwest_transport;
mod tracing_sink;

pub use memory_sink::MemorySink;
pub use reqwest_transport::{
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ReqwestTransport, TransportOptions,
};
pub use tracing_sink::{TRACE_TARGET, TracingSink};
