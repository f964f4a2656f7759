// ============================================================
// Layer 2 — RunUseCase
// ============================================================
// One invocation of the front end, start to finish:
//
//   Step 1: Validate option combinations     (validator)
//   Step 2: Parse the device                  (domain)
//   Step 3: Resolve paths into a RunPlan      (validator + infra)
//   Step 4: Compute the backend environment   (infra)
//   Step 5: Load launcher commands            (infra)
//   Step 6: Dispatch create → train → test    (dispatcher)
//
// Steps 1 and 2 are the only sources of usage errors and run
// before anything else is read.

use anyhow::{Context, Result};
use std::path::Path;

use crate::application::dispatcher::Dispatcher;
use crate::application::validator::{plan, validate};
use crate::domain::device::Device;
use crate::domain::error::UsageError;
use crate::domain::options::RunOptions;
use crate::domain::requests::RunPlan;
use crate::infra::environment::BackendEnv;
use crate::infra::launcher::{LauncherConfig, ProcessWorkflows};

pub struct RunUseCase {
    options: RunOptions,
}

impl RunUseCase {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Usage checks only: option combinations and layers, then the device.
    pub fn check(&self) -> Result<Device, UsageError> {
        validate(&self.options)?;
        self.options.device.parse()
    }

    /// The plan for these options with paths resolved against `cwd`.
    pub fn plan(&self, cwd: &Path) -> Result<RunPlan, UsageError> {
        plan(&self.options, cwd)
    }

    pub fn execute(&self) -> Result<()> {
        let device = self.check()?;
        tracing::info!("Using backend device: {device}");

        let cwd = std::env::current_dir()
            .context("Failed to determine the current working directory")?;
        let run_plan = self.plan(&cwd)?;

        let backend_env = BackendEnv::from_process(device, &cwd)?;
        for (name, value) in backend_env.iter() {
            tracing::debug!("Backend environment: {name}={value}");
        }

        let launcher = LauncherConfig::from_env()?;
        let mut dispatcher = Dispatcher::new(ProcessWorkflows::new(launcher, backend_env));
        dispatcher.run(&run_plan)?;

        tracing::info!("Finished");
        Ok(())
    }
}
