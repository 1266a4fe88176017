use std::time::Duration;

use clap::ValueEnum;

use crate::domain::ExecutionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Sequential,
    Parallel,
}

impl From<ModeArg> for ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => ExecutionMode::Sequential,
            ModeArg::Parallel => ExecutionMode::Parallel,
        }
    }
}

/// Per-request timeout; `None` waits forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeoutSetting(pub Option<Duration>);

impl TimeoutSetting {
    #[must_use]
    pub const fn get(self) -> Option<Duration> {
        self.0
    }
}
