//! Noticeboard library modules.
//!
//! A personal notes board and a commented news feed behind cookie sessions.
//! The binary in `main.rs` wires these modules into an actix-web server.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Request tracing middleware.
pub use middleware::Trace;
