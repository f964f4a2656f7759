// ============================================================
// Layer 3 — Usage Errors
// ============================================================
// Every way a command line can be rejected before any work
// starts. Each variant renders the exact message printed to
// the user; the process then exits with status 1.

use thiserror::Error;

/// Exit status for every usage error.
pub const USAGE_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("ERROR: One of the main options must be specified: -newModel, -train or -test. Run with -h for help.")]
    MissingMode,

    #[error("ERROR: Options -newModel and -model cannot be given together. \
             -model loads an existing model, -newModel creates a new one. Run with -h for help.")]
    NewModelWithSavedModel,

    #[error("ERROR: Option -test cannot be combined with -newModel or -train. Run with -h for help.")]
    TestWithOtherModes,

    #[error("ERROR: Option -pretrained requires -newModel: weights are transferred into a newly created model. Run with -h for help.")]
    PretrainedWithoutNewModel,

    #[error("ERROR: Option -layers requires -pretrained: it selects which pretrained layers to transfer. Run with -h for help.")]
    LayersWithoutPretrained,

    #[error("ERROR: Option -resetOptimizer requires -train. Run with -h for help.")]
    ResetOptimizerWithoutTrain,

    #[error("ERROR: Invalid layer '{value}' for -layers. Layers are given as positive integers, e.g. -layers 1 2 5. Run with -h for help.")]
    InvalidLayer { value: String },

    #[error("ERROR: Invalid device '{value}'. Expected one of: cpu, cuda, cuda<N> (e.g. cuda0). Run with -h for help.")]
    InvalidDevice { value: String },
}
