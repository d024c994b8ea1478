//! # oplog-adapters
//!
//! Backend implementations of the `oplog` logging ports: the local `log`
//! crate adapter and the cloud sink adapter with its HTTP transport.
//! This crate depends on `ports`, `shared`, and `config`.

/// Cloud backend adapter.
pub mod cloud;
/// HTTP transport for the cloud log sink.
pub mod http_transport;
/// Local backend adapter over the `log` crate.
pub mod standard;

pub use cloud::CloudLogAdapter;
pub use http_transport::HttpCloudTransport;
pub use standard::StdLogAdapter;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
