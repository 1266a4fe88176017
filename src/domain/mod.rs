//! Value types shared by the dispatcher, monitors and summarizer.
pub mod exception;
pub mod response;
pub mod result;
pub mod run;


pub use exception::{ExceptionInfo, MAX_EXCEPTION_DEPTH};
pub use response::Response;
pub use result::PulseResult;
pub use run::{CancellationSignal, ExecutionMode, RunParameters};
