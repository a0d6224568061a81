//! Support library for the sampleval CLI binary.
//!
//! Re-exports the CLI module so doctests and integration tests can exercise
//! commands without forking a subprocess.

pub mod cli;
pub mod logging;
