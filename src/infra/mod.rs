// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the outside world:
//
//   paths.rs       — Turns user-typed paths into absolute ones
//                    against the working directory.
//
//   environment.rs — Computes the backend environment
//                    (threading layer, backend flags, legacy
//                    library search paths) without mutating
//                    this process.
//
//   launcher.rs    — Runs the create / train / test entry
//                    points as child processes, exporting the
//                    backend environment into each.

/// Absolute path resolution
pub mod paths;

/// Backend environment variables
pub mod environment;

/// Child-process implementation of the workflows
pub mod launcher;
