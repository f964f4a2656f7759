// ============================================================
// Layer 2 — Dispatcher
// ============================================================
// Runs a validated RunPlan against a Workflows implementation:
//
//   Create → Train → Test   (each at most once, always in this order)
//
// The model returned by Create is moved into the Train call
// of the same invocation. Test never follows Create or Train;
// the validator guarantees that.

use anyhow::Result;

use crate::domain::requests::RunPlan;
use crate::domain::traits::Workflows;

pub struct Dispatcher<W: Workflows> {
    workflows: W,
}

impl<W: Workflows> Dispatcher<W> {
    pub fn new(workflows: W) -> Self {
        Self { workflows }
    }

    pub fn run(&mut self, plan: &RunPlan) -> Result<()> {
        let created = match &plan.create {
            Some(request) => {
                tracing::info!("Creating new model from '{}'", request.model_conf.display());
                let created = self.workflows.create_model(request)?;
                tracing::info!("New model saved at '{}'", created.saved_path.display());
                Some(created)
            }
            None => None,
        };

        if let Some(request) = &plan.train {
            tracing::info!("Training with session config '{}'", request.training_conf.display());
            self.workflows.train(request, created)?;
        }

        if let Some(request) = &plan.test {
            tracing::info!("Testing with session config '{}'", request.testing_conf.display());
            self.workflows.test(request)?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.workflows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::domain::requests::{CreateRequest, CreatedModel, TestRequest, TrainRequest};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Create(PathBuf),
        Train { conf: PathBuf, preloaded: Option<CreatedModel<u32>> },
        Test(PathBuf),
    }

    /// Records calls; the "model handle" is a counter value.
    #[derive(Default)]
    struct Recorder {
        calls:       Vec<Call>,
        fail_create: bool,
    }

    impl Workflows for Recorder {
        type Model = u32;

        fn create_model(&mut self, request: &CreateRequest) -> Result<CreatedModel<u32>> {
            self.calls.push(Call::Create(request.model_conf.clone()));
            if self.fail_create {
                anyhow::bail!("model config is malformed");
            }
            Ok(CreatedModel { model: 7, saved_path: PathBuf::from("/out/model.save") })
        }

        fn train(&mut self, request: &TrainRequest, preloaded: Option<CreatedModel<u32>>) -> Result<()> {
            self.calls.push(Call::Train { conf: request.training_conf.clone(), preloaded });
            Ok(())
        }

        fn test(&mut self, request: &TestRequest) -> Result<()> {
            self.calls.push(Call::Test(request.testing_conf.clone()));
            Ok(())
        }
    }

    fn create_req() -> CreateRequest {
        CreateRequest {
            model_conf:         PathBuf::from("/cfg/model.cfg"),
            pretrained_model:   None,
            layers_to_transfer: None,
        }
    }

    fn train_req() -> TrainRequest {
        TrainRequest {
            training_conf:   PathBuf::from("/cfg/train.cfg"),
            saved_model:     None,
            reset_optimizer: false,
        }
    }

    #[test]
    fn test_train_only_calls_train_once() {
        let plan = RunPlan { train: Some(train_req()), ..Default::default() };
        let mut d = Dispatcher::new(Recorder::default());
        d.run(&plan).unwrap();

        assert_eq!(
            d.into_inner().calls,
            vec![Call::Train { conf: PathBuf::from("/cfg/train.cfg"), preloaded: None }]
        );
    }

    #[test]
    fn test_create_then_train_forwards_model() {
        let plan = RunPlan { create: Some(create_req()), train: Some(train_req()), test: None };
        let mut d = Dispatcher::new(Recorder::default());
        d.run(&plan).unwrap();

        assert_eq!(
            d.into_inner().calls,
            vec![
                Call::Create(PathBuf::from("/cfg/model.cfg")),
                Call::Train {
                    conf:      PathBuf::from("/cfg/train.cfg"),
                    preloaded: Some(CreatedModel { model: 7, saved_path: PathBuf::from("/out/model.save") }),
                },
            ]
        );
    }

    #[test]
    fn test_create_only() {
        let plan = RunPlan { create: Some(create_req()), ..Default::default() };
        let mut d = Dispatcher::new(Recorder::default());
        d.run(&plan).unwrap();
        assert_eq!(d.into_inner().calls, vec![Call::Create(PathBuf::from("/cfg/model.cfg"))]);
    }

    #[test]
    fn test_test_only() {
        let plan = RunPlan {
            test: Some(TestRequest { testing_conf: PathBuf::from("/cfg/test.cfg"), saved_model: None }),
            ..Default::default()
        };
        let mut d = Dispatcher::new(Recorder::default());
        d.run(&plan).unwrap();
        assert_eq!(d.into_inner().calls, vec![Call::Test(PathBuf::from("/cfg/test.cfg"))]);
    }

    #[test]
    fn test_failed_create_skips_train() {
        let plan = RunPlan { create: Some(create_req()), train: Some(train_req()), test: None };
        let mut d = Dispatcher::new(Recorder { fail_create: true, ..Default::default() });

        let err = d.run(&plan).unwrap_err();
        assert!(err.to_string().contains("malformed"));
        assert_eq!(d.into_inner().calls, vec![Call::Create(PathBuf::from("/cfg/model.cfg"))]);
    }
}
