// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates a run: checks the options, plans which
// workflows fire, and drives them in order.
//
// Rules for this layer:
//   - No clap types here (that's Layer 1)
//   - No printing to the user (that's Layer 1)
//   - No process spawning or environment access of its own
//     (that's Layer 6)

// Option-combination checks and plan building
pub mod validator;

// Create → train → test dispatch over the Workflows trait
pub mod dispatcher;

// The full run, wiring validator, infra, and dispatcher
pub mod run_use_case;
