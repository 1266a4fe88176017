//! Request-file model and loading.
mod loader;
pub mod types;


pub use loader::{load_request_details, validate_request};
pub use types::{Content, ProxyConfig, RequestDetails, RequestRecipe};
