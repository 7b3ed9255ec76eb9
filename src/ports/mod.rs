//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the pipeline and an external
//! system (processes, filesystem, git). Implementations live in
//! `src/adapters/`.

pub mod filesystem;
pub mod git;
pub mod runner;

pub use filesystem::FileSystem;
pub use git::{GitRepo, Identity};
pub use runner::{CommandRunner, ExecutionResult, Invocation};

/// Error type returned by fallible port operations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
