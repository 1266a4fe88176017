mod noop;
mod runner;
mod sample;

pub(crate) use noop::print_configuration;
pub(crate) use runner::run_pulse;
pub(crate) use sample::write_sample;
