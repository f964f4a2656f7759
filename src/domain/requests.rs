// ============================================================
// Layer 3 — Workflow Requests
// ============================================================
// What the dispatcher hands to each external workflow. All
// paths in here are absolute.

use std::path::PathBuf;

/// Arguments of the model-creation workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub model_conf:         PathBuf,
    pub pretrained_model:   Option<PathBuf>,
    pub layers_to_transfer: Option<Vec<u32>>,
}

/// A freshly created model: the handle the creation workflow
/// returned and where it persisted the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedModel<M> {
    pub model:      M,
    pub saved_path: PathBuf,
}

/// Training arguments known before dispatch starts. The model
/// produced by a preceding create step is attached later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRequest {
    pub training_conf:   PathBuf,
    pub saved_model:     Option<PathBuf>,
    pub reset_optimizer: bool,
}

/// Arguments of the testing workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRequest {
    pub testing_conf: PathBuf,
    pub saved_model:  Option<PathBuf>,
}

/// A validated run: which workflows fire, in order create → train → test.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunPlan {
    pub create: Option<CreateRequest>,
    pub train:  Option<TrainRequest>,
    pub test:   Option<TestRequest>,
}
