use crate::args::GetSampleArgs;
use crate::config::RequestDetails;
use crate::domain::RunParameters;

/// A validated request file plus the parameters of the run.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedRun {
    pub(crate) details: RequestDetails,
    pub(crate) params: RunParameters,
}

#[derive(Debug)]
pub(crate) enum RunPlan {
    GetSample(GetSampleArgs),
    Noop(Box<ResolvedRun>),
    Run(Box<ResolvedRun>),
}
