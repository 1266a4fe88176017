//! Transport construction and the single-request execution unit.
pub mod client;
pub mod execution;


pub use client::{DEFAULT_USER_AGENT, ProxyTarget, build_client, resolve_proxy};
pub use execution::{ExecutionContext, classify_interruption};
