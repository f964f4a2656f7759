// ============================================================
// Layer 3 — Run Options
// ============================================================
// The command line as the rest of the program sees it, after
// clap has done its job. Paths are still exactly as typed;
// they only become absolute once the run has been validated.

/// All options of a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// -newModel: config of the model to create
    pub model_conf: Option<String>,

    /// -train: config of the training session
    pub training_conf: Option<String>,

    /// -test: config of the testing session
    pub testing_conf: Option<String>,

    /// -model: an existing saved model, overriding the one named in the config
    pub saved_model: Option<String>,

    /// -dev: backend device, unparsed
    pub device: String,

    /// -pretrained: model whose weights seed the new model
    pub pretrained_model: Option<String>,

    /// -layers: explicit layer indices to transfer from the pretrained model, unparsed
    pub layers_to_transfer: Option<Vec<String>>,

    /// -resetOptimizer: start training with fresh optimizer state
    pub reset_optimizer: bool,
}

impl RunOptions {
    /// True if at least one of -newModel, -train or -test was given.
    pub fn has_mode(&self) -> bool {
        self.model_conf.is_some() || self.training_conf.is_some() || self.testing_conf.is_some()
    }
}
