//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the harness core and the outside
//! world: the HTTP transport, the diagnostic output and the authentication
//! decision point of the system under test.

mod authentication;
mod diagnostic_sink;
mod http_transport;

pub use authentication::{AuthenticationRequest, AuthenticationScheme};
pub use diagnostic_sink::DiagnosticSink;
pub use http_transport::{HttpTransport, TransportError, TransportFuture};
