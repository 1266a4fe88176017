use crate::app::{print_configuration, run_pulse, write_sample};
use crate::error::AppResult;
use crate::system::banner;

use super::types::RunPlan;

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::GetSample(sample_args) => write_sample(&sample_args.path).await,
        RunPlan::Noop(resolved) => print_configuration(&resolved),
        RunPlan::Run(resolved) => {
            banner::print_run_header(&resolved.details.request);
            run_pulse(*resolved).await
        }
    }
}
