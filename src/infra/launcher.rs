// ============================================================
// Layer 6 — Workflow Launcher
// ============================================================
// The real Workflows implementation: each entry point is an
// external command, run to completion with the BackendEnv
// exported into its environment.
//
// Command lines (override with environment variables):
//   DEEPMEDIC_NEW_MODEL_CMD   default: deepmedic-new-model
//   DEEPMEDIC_TRAIN_CMD       default: deepmedic-train
//   DEEPMEDIC_TEST_CMD        default: deepmedic-test
//
// Arguments appended by the launcher:
//   create: <model_cfg> [--pretrained P] [--layers N...] --result-file F
//   train:  <train_cfg> [--saved-model P] [--preloaded-model P] [--reset-optimizer]
//   test:   <test_cfg>  [--saved-model P]
//
// The create command reports where it saved the new model by
// writing {"saved_model": "<path>"} to the result file.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::domain::requests::{CreateRequest, CreatedModel, TestRequest, TrainRequest};
use crate::domain::traits::Workflows;
use crate::infra::environment::BackendEnv;

pub const NEW_MODEL_CMD_VAR: &str = "DEEPMEDIC_NEW_MODEL_CMD";
pub const TRAIN_CMD_VAR:     &str = "DEEPMEDIC_TRAIN_CMD";
pub const TEST_CMD_VAR:      &str = "DEEPMEDIC_TEST_CMD";

// ─── Command lines ────────────────────────────────────────────────────────────

/// A program plus its leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: OsString,
    args:    Vec<OsString>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args:    args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a whitespace-separated command line.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let program = words.next().context("command line is empty")?;
        Ok(Self::new(program, words))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Which command runs each workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub new_model: CommandLine,
    pub train:     CommandLine,
    pub test:      CommandLine,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            new_model: CommandLine::new("deepmedic-new-model", Vec::<OsString>::new()),
            train:     CommandLine::new("deepmedic-train", Vec::<OsString>::new()),
            test:      CommandLine::new("deepmedic-test", Vec::<OsString>::new()),
        }
    }
}

impl LauncherConfig {
    /// Defaults, overridden by the DEEPMEDIC_*_CMD variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let slots = [
            (NEW_MODEL_CMD_VAR, &mut config.new_model),
            (TRAIN_CMD_VAR,     &mut config.train),
            (TEST_CMD_VAR,      &mut config.test),
        ];
        for (var, slot) in slots {
            if let Some(line) = lookup(var) {
                *slot = CommandLine::parse(&line)
                    .with_context(|| format!("Invalid {var}: '{line}'"))?;
            }
        }
        Ok(config)
    }
}

// ─── Process-backed workflows ─────────────────────────────────────────────────

/// Handle to a model created by the external creation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedModel {
    pub path: PathBuf,
}

/// What the create command writes to its result file.
#[derive(Debug, Deserialize)]
struct CreateResult {
    saved_model: PathBuf,
}

pub struct ProcessWorkflows {
    config: LauncherConfig,
    env:    BackendEnv,
}

impl ProcessWorkflows {
    pub fn new(config: LauncherConfig, env: BackendEnv) -> Self {
        Self { config, env }
    }

    fn launch(&self, stage: &str, command_line: &CommandLine, extra: Vec<OsString>) -> Result<()> {
        let mut command = Command::new(&command_line.program);
        command
            .args(&command_line.args)
            .args(&extra)
            .envs(self.env.iter());

        if self.env.is_empty() {
            tracing::debug!("No backend variables to export for {stage}");
        }
        tracing::debug!("Launching {stage}: {command:?}");

        let status = command
            .status()
            .with_context(|| format!("Failed to launch {stage} command '{command_line}'"))?;
        if !status.success() {
            bail!("{stage} command '{command_line}' failed ({status})");
        }
        Ok(())
    }

    fn read_result(path: &Path) -> Result<CreateResult> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Model creation did not write its result file '{}'", path.display()))?;
        serde_json::from_str::<CreateResult>(&text)
            .with_context(|| format!("Malformed model creation result in '{}'", path.display()))
    }
}

fn flag(name: &str, value: &Path) -> [OsString; 2] {
    [OsString::from(name), value.as_os_str().to_os_string()]
}

impl Workflows for ProcessWorkflows {
    type Model = SavedModel;

    fn create_model(&mut self, request: &CreateRequest) -> Result<CreatedModel<SavedModel>> {
        // private, uniquely named directory; removed with everything in it on drop
        let result_dir = tempfile::Builder::new()
            .prefix("deepmedic-new-model-")
            .tempdir()
            .context("Failed to create a directory for the model creation result")?;
        let result_file = result_dir.path().join("result.json");

        let mut args = vec![request.model_conf.clone().into_os_string()];
        if let Some(pretrained) = &request.pretrained_model {
            args.extend(flag("--pretrained", pretrained));
        }
        if let Some(layers) = &request.layers_to_transfer {
            args.push("--layers".into());
            args.extend(layers.iter().map(|l| OsString::from(l.to_string())));
        }
        args.extend(flag("--result-file", &result_file));

        self.launch("model creation", &self.config.new_model, args)?;

        let saved_path = Self::read_result(&result_file)?.saved_model;

        Ok(CreatedModel {
            model: SavedModel { path: saved_path.clone() },
            saved_path,
        })
    }

    fn train(&mut self, request: &TrainRequest, preloaded: Option<CreatedModel<SavedModel>>) -> Result<()> {
        let mut args = vec![request.training_conf.clone().into_os_string()];
        if let Some(saved) = &request.saved_model {
            args.extend(flag("--saved-model", saved));
        }
        if let Some(created) = &preloaded {
            args.extend(flag("--preloaded-model", &created.model.path));
        }
        if request.reset_optimizer {
            args.push("--reset-optimizer".into());
        }
        self.launch("training", &self.config.train, args)
    }

    fn test(&mut self, request: &TestRequest) -> Result<()> {
        let mut args = vec![request.testing_conf.clone().into_os_string()];
        if let Some(saved) = &request.saved_model {
            args.extend(flag("--saved-model", saved));
        }
        self.launch("testing", &self.config.test, args)
    }
}
