pub(crate) mod banner;
pub mod logger;
pub mod palette;
pub mod shutdown_handlers;
