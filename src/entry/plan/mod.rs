mod build;
mod execute;
mod types;

#[cfg(test)]
mod tests;

pub(super) use build::build_plan;
pub(super) use execute::execute_plan;
pub(crate) use types::ResolvedRun;
