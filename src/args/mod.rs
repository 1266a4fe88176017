//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::{Command, GetSampleArgs, PulseArgs};
pub use types::{ModeArg, TimeoutSetting};
