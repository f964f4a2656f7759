// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the command line with clap and hands a clap-free
// RunOptions to Layer 2. Exactly one thing is decided here:
// how the user spelled their options.
//
// Main options (at least one is required):
//   -newModel <cfg>   create a new model
//   -train <cfg>      train a model (right after -newModel, if both given)
//   -test <cfg>       test a model

pub mod legacy_flags;

use anyhow::Result;
use clap::Parser;

use crate::application::run_use_case::RunUseCase;
use crate::domain::options::RunOptions;

/// Create, train, and test 3D multi-scale CNNs for volumetric biomedical image segmentation.
#[derive(Parser, Debug)]
#[command(
    name = "deepmedic",
    version,
    after_help = "Options may also be written with a single dash, e.g. -newModel ./model.cfg -train ./train.cfg -dev cuda0"
)]
pub struct Cli {
    /// Create a new CNN model with the given model configuration file.
    #[arg(long = "newModel", value_name = "MODEL_CFG")]
    pub model_conf: Option<String>,

    /// Train a model with the given training-session configuration file.
    /// Combined with -newModel, the new model is trained right after it is created.
    #[arg(long = "train", value_name = "TRAIN_CFG")]
    pub training_conf: Option<String>,

    /// Test a model with the given testing-session configuration file.
    #[arg(long = "test", value_name = "TEST_CFG")]
    pub testing_conf: Option<String>,

    /// Saved model to train or test, overriding the one named in the session config.
    /// Cannot be combined with -newModel.
    #[arg(long = "model", value_name = "SAVED_MODEL")]
    pub saved_model: Option<String>,

    /// Compute device: cpu, cuda, or cuda<N> for a specific GPU (e.g. cuda0).
    #[arg(long = "dev", value_name = "DEVICE", default_value = "cpu")]
    pub device: String,

    /// Pretrained model whose weights are transferred into the new model. Requires -newModel.
    #[arg(long = "pretrained", value_name = "PRETRAINED_MODEL")]
    pub pretrained_model: Option<String>,

    /// Layers to transfer from the pretrained model (1-based). Requires -pretrained.
    /// Default: as given in the model config.
    #[arg(long = "layers", value_name = "LAYER", num_args = 1..)]
    pub layers_to_transfer: Option<Vec<String>>,

    /// Reset the optimizer state before training (e.g. for fine-tuning). Requires -train.
    #[arg(long = "resetOptimizer")]
    pub reset_optimizer: bool,
}

impl From<Cli> for RunOptions {
    fn from(c: Cli) -> Self {
        RunOptions {
            model_conf:         c.model_conf,
            training_conf:      c.training_conf,
            testing_conf:       c.testing_conf,
            saved_model:        c.saved_model,
            device:             c.device,
            pretrained_model:   c.pretrained_model,
            layers_to_transfer: c.layers_to_transfer,
            reset_optimizer:    c.reset_optimizer,
        }
    }
}

impl Cli {
    /// Parse the process arguments, accepting single-dash spellings.
    pub fn parse_args() -> Self {
        Self::parse_from(legacy_flags::normalize_legacy_flags(std::env::args_os()))
    }

    /// Hand the options to the run use case.
    pub fn run(self) -> Result<()> {
        RunUseCase::new(self.into()).execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::legacy_flags::normalize_legacy_flags;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = vec!["deepmedic"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(normalize_legacy_flags(argv))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();
        let opts: RunOptions = cli.into();
        assert_eq!(opts, RunOptions { device: "cpu".into(), ..Default::default() });
    }

    #[test]
    fn test_single_dash_full_command_line() {
        let cli = parse(&[
            "-newModel", "cfg/model.cfg",
            "-train", "cfg/train.cfg",
            "-dev", "cuda0",
            "-pretrained", "pre.save",
            "-layers", "1", "2", "5",
            "-resetOptimizer",
        ])
        .unwrap();
        let opts: RunOptions = cli.into();

        assert_eq!(opts.model_conf.as_deref(), Some("cfg/model.cfg"));
        assert_eq!(opts.training_conf.as_deref(), Some("cfg/train.cfg"));
        assert_eq!(opts.device, "cuda0");
        assert_eq!(opts.pretrained_model.as_deref(), Some("pre.save"));
        assert_eq!(
            opts.layers_to_transfer,
            Some(vec!["1".to_string(), "2".to_string(), "5".to_string()])
        );
        assert!(opts.reset_optimizer);
    }

    #[test]
    fn test_double_dash_spelling() {
        let cli = parse(&["--test", "t.cfg", "--model", "m.save"]).unwrap();
        assert_eq!(cli.testing_conf.as_deref(), Some("t.cfg"));
        assert_eq!(cli.saved_model.as_deref(), Some("m.save"));
    }

    #[test]
    fn test_device_is_not_checked_by_clap() {
        // device errors are usage errors with exit status 1, reported later
        let cli = parse(&["-train", "t.cfg", "-dev", "gpu"]).unwrap();
        assert_eq!(cli.device, "gpu");
    }

    #[test]
    fn test_layer_values_are_not_checked_by_clap() {
        // bad layer numbers are usage errors with exit status 1, reported later
        let cli = parse(&["-layers", "0", "two"]).unwrap();
        assert_eq!(cli.layers_to_transfer, Some(vec!["0".to_string(), "two".to_string()]));
        assert!(parse(&["-layers"]).is_err());
    }

    #[test]
    fn test_clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
