// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits describing one run of
// the front end: the options the user gave, the device they
// asked for, the requests handed to the external workflows,
// and the usage errors that stop a run before it starts.
//
// Rules for this layer:
//   - NO clap types allowed here
//   - NO file I/O, process spawning, or environment access
//   - Only plain Rust structs, enums, and traits

// Compute backend selected with -dev
pub mod device;

// Clap-free view of the parsed command line
pub mod options;

// Requests handed to the create / train / test workflows
pub mod requests;

// Usage errors (fatal, exit status 1)
pub mod error;

// The Workflows abstraction the dispatcher drives
pub mod traits;
