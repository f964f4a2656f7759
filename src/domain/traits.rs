// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The three external entry points the front end dispatches to.
// The dispatcher only ever talks to this trait, so the real
// launcher (infra::launcher) and the recording fakes used in
// tests are interchangeable.

use anyhow::Result;

use crate::domain::requests::{CreateRequest, CreatedModel, TestRequest, TrainRequest};

// ─── Workflows ────────────────────────────────────────────────────────────────
/// Model creation, training, and testing entry points.
///
/// Implementations:
///   - ProcessWorkflows → spawns the configured backend commands
pub trait Workflows {
    /// Handle to a loaded model, passed from creation into training.
    type Model;

    /// Build a new model from its config and persist it.
    fn create_model(&mut self, request: &CreateRequest) -> Result<CreatedModel<Self::Model>>;

    /// Run a training session. `preloaded` is the model created earlier
    /// in the same invocation, if any.
    fn train(
        &mut self,
        request:   &TrainRequest,
        preloaded: Option<CreatedModel<Self::Model>>,
    ) -> Result<()>;

    /// Run a testing session.
    fn test(&mut self, request: &TestRequest) -> Result<()>;
}
