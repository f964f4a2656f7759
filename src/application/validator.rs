// ============================================================
// Layer 2 — Option Validator
// ============================================================
// Checks the combination of options before anything runs and
// turns a valid combination into a RunPlan.
//
// Checks, in order (the first violation wins):
//   1. one of -newModel / -train / -test is present
//   2. -newModel excludes -model
//   3. -test excludes -newModel and -train
//   4. -pretrained requires -newModel
//   5. -layers requires -pretrained
//   6. -resetOptimizer requires -train
//   7. every -layers value is a positive integer
//
// Legal mode combinations left after 1 and 3:
//   -newModel | -newModel -train | -train | -test

use std::path::Path;

use crate::domain::error::UsageError;
use crate::domain::options::RunOptions;
use crate::domain::requests::{CreateRequest, RunPlan, TestRequest, TrainRequest};
use crate::infra::paths::absolute_path;

/// Check every option constraint. Returns the first one violated.
pub fn validate(opts: &RunOptions) -> Result<(), UsageError> {
    if !opts.has_mode() {
        return Err(UsageError::MissingMode);
    }
    if opts.model_conf.is_some() && opts.saved_model.is_some() {
        return Err(UsageError::NewModelWithSavedModel);
    }
    if opts.testing_conf.is_some() && (opts.model_conf.is_some() || opts.training_conf.is_some()) {
        return Err(UsageError::TestWithOtherModes);
    }
    if opts.pretrained_model.is_some() && opts.model_conf.is_none() {
        return Err(UsageError::PretrainedWithoutNewModel);
    }
    if opts.layers_to_transfer.is_some() && opts.pretrained_model.is_none() {
        return Err(UsageError::LayersWithoutPretrained);
    }
    if opts.reset_optimizer && opts.training_conf.is_none() {
        return Err(UsageError::ResetOptimizerWithoutTrain);
    }
    if let Some(layers) = &opts.layers_to_transfer {
        parse_layers(layers)?;
    }
    Ok(())
}

/// Parse -layers values. Each must be an integer >= 1.
pub fn parse_layers(values: &[String]) -> Result<Vec<u32>, UsageError> {
    values
        .iter()
        .map(|value| {
            let invalid = || UsageError::InvalidLayer { value: value.clone() };
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            match value.parse::<u32>() {
                Ok(layer) if layer >= 1 => Ok(layer),
                _ => Err(invalid()),
            }
        })
        .collect()
}

/// Build the plan for options, resolving every path against `cwd`.
/// Call `validate` first; this only fails on bad -layers values.
pub fn plan(opts: &RunOptions, cwd: &Path) -> Result<RunPlan, UsageError> {
    let abs = |p: &String| absolute_path(p, cwd);

    let layers_to_transfer = opts
        .layers_to_transfer
        .as_deref()
        .map(parse_layers)
        .transpose()?;

    let create = opts.model_conf.as_ref().map(|conf| CreateRequest {
        model_conf:         abs(conf),
        pretrained_model:   opts.pretrained_model.as_ref().map(abs),
        layers_to_transfer,
    });

    let train = opts.training_conf.as_ref().map(|conf| TrainRequest {
        training_conf:   abs(conf),
        saved_model:     opts.saved_model.as_ref().map(abs),
        reset_optimizer: opts.reset_optimizer,
    });

    let test = opts.testing_conf.as_ref().map(|conf| TestRequest {
        testing_conf: abs(conf),
        saved_model:  opts.saved_model.as_ref().map(abs),
    });

    Ok(RunPlan { create, train, test })
}
